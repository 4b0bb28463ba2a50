use leptos::prelude::*;

/// Replaces the page when a view below the error boundary fails.
#[component]
pub fn ErrorFallback(errors: ArcRwSignal<Errors>) -> impl IntoView {
    Effect::new({
        let errors = errors.clone();
        move |_| {
            for (_, err) in errors.get().iter() {
                tracing::error!("View error: {:?}", err);
            }
        }
    });

    let reload = move |_| {
        let _ = window().location().reload();
    };

    view! {
        <div class="min-h-screen flex items-center justify-center p-8">
            <div class="max-w-md text-center bg-white rounded-2xl shadow-lg p-8">
                <h1 class="text-2xl font-bold text-slate-800 mb-3">"Something went wrong"</h1>
                <p class="text-slate-500 mb-6">
                    "We're sorry, but something unexpected happened. Please refresh the page to try again."
                </p>
                <button
                    class="px-6 py-3 bg-rose-600 hover:bg-rose-700 text-white rounded-lg font-medium transition-colors"
                    on:click=reload
                >
                    "Refresh Page"
                </button>
            </div>
        </div>
    }
}
