//! Home page - hero, live donor count and a filterable donor preview

use crate::api::{fetch_count, fetch_donors};
use crate::components::{DonorCard, DonorFilters, FilterSignals, LoadingDots, LoadingSpinner};
use crate::state::AppState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use lifeware_donor::{Donor, DonorQuery};

const FEATURES: [(&str, &str, &str); 4] = [
    (
        "🔍",
        "Donor Search",
        "Find compatible blood donors quickly by blood group and location.",
    ),
    (
        "🤖",
        "AI Health Assistant",
        "Get health guidance and support through our Thalassemia assistant.",
    ),
    (
        "👥",
        "Community Support",
        "Connect with others facing similar challenges and share experiences.",
    ),
    (
        "📚",
        "Educational Resources",
        "Access clear information about Thalassemia and treatment options.",
    ),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<AppState>();

    let donors = RwSignal::new(Vec::<Donor>::new());
    let count = RwSignal::new(Option::<usize>::None);
    let is_loading = RwSignal::new(true);
    let filters = FilterSignals::new();

    // Load the directory and the count on mount
    Effect::new(move |_| {
        let base = state.api_base.get_untracked();
        spawn_local(async move {
            match fetch_donors(&base, &DonorQuery::default()).await {
                Ok(listing) => donors.set(listing.donors),
                Err(e) => {
                    tracing::error!("Failed to load donors: {}", e);
                    donors.set(Vec::new());
                }
            }
            is_loading.set(false);

            match fetch_count(&base).await {
                Ok(n) => count.set(Some(n)),
                Err(e) => {
                    tracing::error!("Failed to load donor count: {}", e);
                    count.set(Some(donors.get_untracked().len()));
                }
            }
        });
    });

    let filtered = Memo::new(move |_| filters.query().apply(&donors.get()));
    let has_filters = move || !filters.query().is_empty();

    view! {
        <div>
            // Hero
            <section class="bg-gradient-to-br from-rose-50 via-white to-purple-50">
                <div class="max-w-6xl mx-auto px-4 py-16 grid md:grid-cols-2 gap-10 items-center">
                    <div>
                        <h1 class="text-4xl md:text-5xl font-bold mb-4">
                            "Welcome to "
                            <span class="text-rose-600">"Lifeware Collective"</span>
                        </h1>
                        <p class="text-lg text-slate-600 mb-8">
                            "Your platform for Thalassemia support, donor search, and AI-powered health guidance. "
                            "Together, we're building a stronger, healthier community."
                        </p>

                        <div class="inline-flex items-center gap-4 bg-white rounded-2xl shadow px-5 py-4 mb-8">
                            <span class="text-3xl">"🩸"</span>
                            <div>
                                <div class="text-2xl font-bold text-rose-600">
                                    {move || match count.get() {
                                        Some(n) => format!("{}+", n).into_any(),
                                        None => view! { <LoadingDots /> }.into_any(),
                                    }}
                                </div>
                                <div class="text-sm text-slate-500">"Currently registered donors"</div>
                            </div>
                        </div>

                        <div class="flex flex-wrap gap-3">
                            <A href="/donors" attr:class="px-5 py-3 bg-rose-600 hover:bg-rose-700 text-white rounded-lg font-medium">
                                "🔍 Find Donors"
                            </A>
                            <A href="/register-donor" attr:class="px-5 py-3 bg-purple-600 hover:bg-purple-700 text-white rounded-lg font-medium">
                                "❤️ Become a Donor"
                            </A>
                            <A href="/chatbot" attr:class="px-5 py-3 border border-slate-300 hover:bg-slate-100 rounded-lg font-medium">
                                "🤖 AI Health Assistant"
                            </A>
                        </div>
                    </div>
                    <div class="hidden md:flex items-center justify-center">
                        <div class="relative w-64 h-64 rounded-full bg-rose-100 flex items-center justify-center animate-pulse">
                            <span class="text-8xl">"❤️"</span>
                        </div>
                    </div>
                </div>
            </section>

            // Donor preview
            <section class="max-w-6xl mx-auto px-4 py-12">
                <h2 class="text-3xl font-bold mb-2">"Donor List"</h2>
                <p class="text-slate-600 mb-6">
                    "Browse our registered donors and find compatible matches for your needs."
                </p>

                <DonorFilters filters />
                <p class="text-sm text-slate-500 mt-3 mb-6">
                    {move || format!(
                        "Showing {} of {} donors",
                        filtered.get().len(),
                        donors.get().len()
                    )}
                </p>

                <Show
                    when=move || !is_loading.get()
                    fallback=|| view! { <LoadingSpinner message="Loading donors..." /> }
                >
                    <Show
                        when=move || !filtered.get().is_empty()
                        fallback=move || view! {
                            <div class="text-center py-12">
                                <div class="text-5xl mb-3">"🔍"</div>
                                <h3 class="text-xl font-semibold mb-2">"No donors found"</h3>
                                <p class="text-slate-500 mb-6">
                                    {if has_filters() {
                                        "Try adjusting your search criteria or register as a donor to help others."
                                    } else {
                                        "No donors are currently registered. Be the first to register and help save lives!"
                                    }}
                                </p>
                                <A href="/register-donor" attr:class="px-5 py-3 bg-rose-600 text-white rounded-lg font-medium">
                                    "Register as Donor"
                                </A>
                            </div>
                        }
                    >
                        <div class="grid sm:grid-cols-2 lg:grid-cols-3 gap-4">
                            <For
                                each=move || filtered.get()
                                key=|donor| format!("{:?}-{}", donor.id, donor.name)
                                children=|donor| view! { <DonorCard donor /> }
                            />
                        </div>
                    </Show>
                </Show>
            </section>

            // Features
            <section class="bg-white border-t border-slate-200">
                <div class="max-w-6xl mx-auto px-4 py-12">
                    <h2 class="text-3xl font-bold text-center mb-8">"How We Help"</h2>
                    <div class="grid sm:grid-cols-2 lg:grid-cols-4 gap-4">
                        {FEATURES.into_iter().map(|(icon, title, text)| view! {
                            <div class="rounded-2xl border border-slate-200 p-6">
                                <div class="text-3xl mb-3">{icon}</div>
                                <h3 class="font-semibold mb-2">{title}</h3>
                                <p class="text-sm text-slate-600">{text}</p>
                            </div>
                        }).collect::<Vec<_>>()}
                    </div>
                </div>
            </section>
        </div>
    }
}
