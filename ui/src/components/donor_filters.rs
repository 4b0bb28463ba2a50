//! Search inputs shared by the home page preview and the donor search page

use leptos::prelude::*;
use lifeware_donor::{BloodGroup, DonorQuery};

/// Current values of the three filter inputs
#[derive(Clone, Copy)]
pub struct FilterSignals {
    pub search_query: RwSignal<String>,
    pub blood_group: RwSignal<String>,
    pub location: RwSignal<String>,
}

impl FilterSignals {
    pub fn new() -> Self {
        Self {
            search_query: RwSignal::new(String::new()),
            blood_group: RwSignal::new(String::new()),
            location: RwSignal::new(String::new()),
        }
    }

    /// The inputs as a normalized query; an unrecognized group means "any".
    pub fn query(&self) -> DonorQuery {
        DonorQuery {
            search_query: Some(self.search_query.get()),
            blood_group: self.blood_group.get().parse::<BloodGroup>().ok(),
            location: Some(self.location.get()),
        }
        .normalized()
    }
}

impl Default for FilterSignals {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn DonorFilters(
    filters: FilterSignals,
    #[prop(default = "Search by name or location...")] search_placeholder: &'static str,
) -> impl IntoView {
    let input_class = "w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:ring-2 focus:ring-rose-400";

    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
            <input
                type="text"
                class=input_class
                placeholder=search_placeholder
                prop:value=move || filters.search_query.get()
                on:input=move |ev| filters.search_query.set(event_target_value(&ev))
            />
            <select
                class=input_class
                prop:value=move || filters.blood_group.get()
                on:change=move |ev| filters.blood_group.set(event_target_value(&ev))
            >
                <option value="">"All Blood Groups"</option>
                {BloodGroup::ALL.into_iter().map(|group| view! {
                    <option value=group.as_str()>{group.as_str()}</option>
                }).collect::<Vec<_>>()}
            </select>
            <input
                type="text"
                class=input_class
                placeholder="Filter by location..."
                prop:value=move || filters.location.get()
                on:input=move |ev| filters.location.set(event_target_value(&ev))
            />
        </div>
    }
}
