//! Gate shown while the server runs without a database

use crate::api::load_status;
use crate::state::AppState;
use leptos::prelude::*;

/// Renders `children` unless the server reports no database and the
/// visitor has not yet chosen to continue with demo data.
#[component]
pub fn SetupGuide(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppState>();

    // Check server status once on mount
    let state_for_load = state.clone();
    Effect::new(move |_| {
        load_status(state_for_load.clone());
    });

    let gated = {
        let state = state.clone();
        move || state.needs_setup() && !state.demo_acknowledged.get()
    };

    view! {
        <Show when=move || !gated() fallback=move || view! {
            <div class="min-h-screen flex items-center justify-center p-8 bg-gradient-to-br from-slate-50 to-indigo-100">
                <div class="bg-white rounded-2xl shadow-lg p-8 max-w-xl w-full">
                    <h1 class="text-2xl font-bold text-indigo-600 mb-4">"🔧 Setup Required"</h1>
                    <p class="text-slate-600 mb-6">
                        "To use the full features of this app, you need to configure Supabase."
                    </p>

                    <div class="bg-slate-50 rounded-lg p-6 mb-6">
                        <h3 class="font-semibold text-slate-800 mb-3">"📝 Steps to set up:"</h3>
                        <ol class="list-decimal list-inside text-slate-600 space-y-1">
                            <li>
                                "Create a " <strong>"Supabase project"</strong> " at "
                                <a href="https://supabase.com" target="_blank" rel="noopener noreferrer" class="text-indigo-600 underline">
                                    "supabase.com"
                                </a>
                            </li>
                            <li>"Create a " <strong>".env"</strong> " file next to lifeware.toml"</li>
                            <li>"Add your Supabase credentials and restart the server:"</li>
                        </ol>
                        <pre class="bg-slate-800 text-slate-100 rounded-lg p-4 mt-4 text-sm overflow-x-auto">
                            "SUPABASE_URL=https://your-project.supabase.co\nSUPABASE_KEY=your_supabase_anon_key"
                        </pre>
                    </div>

                    <div class="bg-amber-50 border border-amber-300 rounded-lg p-4 mb-6">
                        <p class="text-amber-800 text-sm">
                            <strong>"💡 Note: "</strong>
                            "The app will work with demo data until you configure Supabase."
                        </p>
                    </div>

                    <button
                        class="w-full px-6 py-3 bg-gradient-to-r from-indigo-500 to-purple-600 text-white rounded-lg font-semibold"
                        on:click={
                            let state = state.clone();
                            move |_| state.acknowledge_demo()
                        }
                    >
                        "🔄 Continue with Demo Data"
                    </button>
                </div>
            </div>
        }>
            {children()}
        </Show>
    }
}
