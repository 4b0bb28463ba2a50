//! Top navigation bar

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

const LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/donors", "Find Donors"),
    ("/register-donor", "Become a Donor"),
    ("/chatbot", "Lifela AI"),
];

#[component]
pub fn NavBar() -> impl IntoView {
    let pathname = use_location().pathname;
    let menu_open = RwSignal::new(false);

    // Close the mobile menu after navigating
    Effect::new(move |_| {
        pathname.track();
        menu_open.set(false);
    });

    view! {
        <nav class="sticky top-0 z-40 bg-white/90 backdrop-blur border-b border-slate-200">
            <div class="max-w-6xl mx-auto px-4 h-16 flex items-center justify-between">
                <A href="/" attr:class="flex items-center gap-2 font-bold text-lg text-rose-600">
                    <span>"❤️"</span>
                    <span>"Lifeware Collective"</span>
                </A>

                <button
                    class="md:hidden p-2 rounded-lg hover:bg-slate-100"
                    aria-label="Toggle navigation"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    "☰"
                </button>

                <div class=move || format!(
                    "md:flex items-center gap-1 {}",
                    if menu_open.get() {
                        "flex flex-col absolute top-16 inset-x-0 bg-white border-b border-slate-200 p-2"
                    } else {
                        "hidden"
                    }
                )>
                    {LINKS.into_iter().map(|(href, label)| {
                        let active = move || pathname.get() == href;
                        view! {
                            <A
                                href=href
                                attr:class=move || format!(
                                    "px-3 py-2 rounded-lg text-sm font-medium transition-colors {}",
                                    if active() {
                                        "bg-rose-50 text-rose-700"
                                    } else {
                                        "text-slate-600 hover:bg-slate-100"
                                    }
                                )
                            >
                                {label}
                            </A>
                        }
                    }).collect::<Vec<_>>()}
                </div>
            </div>
        </nav>
    }
}
