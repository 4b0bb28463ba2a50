//! Donor search page

use crate::api::fetch_donors;
use crate::components::{DonorCard, DonorFilters, FilterSignals, LoadingSpinner};
use crate::state::AppState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use lifeware_donor::{Donor, DonorQuery};

#[component]
pub fn DonorSearchPage() -> impl IntoView {
    let state = expect_context::<AppState>();

    let donors = RwSignal::new(Vec::<Donor>::new());
    let is_loading = RwSignal::new(true);
    let is_demo = RwSignal::new(false);
    let filters = FilterSignals::new();

    // Server round trip; an empty query lists the whole directory
    let load = move |query: DonorQuery| {
        let base = state.api_base.get_untracked();
        is_loading.set(true);
        spawn_local(async move {
            match fetch_donors(&base, &query).await {
                Ok(listing) => {
                    is_demo.set(listing.demo);
                    donors.set(listing.donors);
                }
                Err(e) => {
                    tracing::error!("Failed to load donors: {}", e);
                    donors.set(Vec::new());
                }
            }
            is_loading.set(false);
        });
    };

    // Load all donors on mount
    let load_all = load.clone();
    Effect::new(move |_| load_all(DonorQuery::default()));

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        load(filters.query());
    };

    // Narrow whatever the server returned as the visitor types
    let filtered = Memo::new(move |_| filters.query().apply(&donors.get()));

    view! {
        <div class="max-w-6xl mx-auto px-4 py-10">
            <header class="mb-8">
                <h1 class="text-4xl font-bold bg-gradient-to-r from-rose-600 to-purple-600 bg-clip-text text-transparent mb-2">
                    "Find Blood Donors"
                </h1>
                <p class="text-slate-600">
                    "Connect with compatible donors and help save lives. Search for donors or register to become one."
                </p>
            </header>

            <Show when=move || is_demo.get()>
                <div class="bg-amber-50 border border-amber-300 text-amber-800 rounded-lg px-4 py-3 mb-6 text-sm">
                    "Showing demo donors. Configure the database to see real registrations."
                </div>
            </Show>

            <form class="bg-white rounded-2xl border border-slate-200 p-6 mb-8" on:submit=on_search>
                <h2 class="text-xl font-semibold mb-4">"Search for Donors"</h2>
                <DonorFilters filters search_placeholder="Enter name or location..." />
                <button
                    type="submit"
                    class="mt-4 px-6 py-2 bg-rose-600 hover:bg-rose-700 disabled:opacity-50 text-white rounded-lg font-medium"
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() { "🔍 Searching..." } else { "🔍 Search Donors" }}
                </button>
            </form>

            <div class="flex items-center justify-between mb-4">
                <h3 class="text-xl font-semibold">
                    {move || format!("Available Donors ({})", filtered.get().len())}
                </h3>
                <A href="/register-donor" attr:class="px-4 py-2 bg-purple-600 hover:bg-purple-700 text-white rounded-lg font-medium">
                    "➕ Register as Donor"
                </A>
            </div>

            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <LoadingSpinner message="Loading donors..." /> }
            >
                <Show
                    when=move || !filtered.get().is_empty()
                    fallback=|| view! {
                        <div class="text-center py-12 text-slate-500">
                            <p>"No donors found matching your criteria."</p>
                            <p>"Try adjusting your search parameters or register as a donor to help others."</p>
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
        </div>
    }
}
