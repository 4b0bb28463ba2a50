//! Donor directory card

use leptos::prelude::*;
use lifeware_donor::Donor;

/// "Sarah Johnson" -> "SJ"; blank names show "D".
fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "D".to_string()
    } else {
        letters
    }
}

/// `mailto:` for emails, `tel:` for anything else
fn contact_href(contact: &str) -> String {
    if contact.contains('@') {
        format!("mailto:{}", contact)
    } else {
        format!("tel:{}", contact.replace(' ', ""))
    }
}

#[component]
pub fn DonorCard(donor: Donor) -> impl IntoView {
    let name = if donor.name.trim().is_empty() {
        "Anonymous Donor".to_string()
    } else {
        donor.name.clone()
    };
    let blood_group = donor
        .blood_group
        .map(|g| g.to_string())
        .unwrap_or_else(|| "?".to_string());
    let last_donated = donor
        .last_donated
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "Not specified".to_string());
    let contact = donor.contact().map(contact_href);

    view! {
        <div class="bg-white rounded-2xl border border-slate-200 p-5 flex flex-col gap-4 hover:shadow-md transition-shadow">
            <div class="flex items-center justify-between">
                <div class="w-12 h-12 rounded-full bg-gradient-to-br from-rose-500 to-purple-600 flex items-center justify-center text-white font-semibold">
                    {initials(&donor.name)}
                </div>
                <span class="text-xs font-medium text-emerald-700 bg-emerald-50 px-2 py-1 rounded-full">
                    "🟢 Available"
                </span>
            </div>

            <div class="flex flex-col gap-1">
                <h4 class="font-semibold text-lg">{name}</h4>
                <div class="flex flex-wrap items-center gap-2 text-sm text-slate-600">
                    <span class="font-bold text-rose-600 bg-rose-50 px-2 py-0.5 rounded">{blood_group}</span>
                    <span>"📍 " {donor.location.clone()}</span>
                </div>
                <span class="text-sm text-slate-500">"Last donation: " {last_donated}</span>
                {donor.age.map(|age| view! {
                    <span class="text-sm text-slate-500">"Age: " {age}</span>
                })}
            </div>

            {match contact {
                Some(href) => view! {
                    <a
                        href=href
                        class="text-center px-4 py-2 border border-rose-600 text-rose-600 hover:bg-rose-50 rounded-lg font-medium transition-colors"
                    >
                        "📞 Contact"
                    </a>
                }.into_any(),
                None => view! {
                    <span class="text-center px-4 py-2 border border-slate-200 text-slate-400 rounded-lg">
                        "No contact details"
                    </span>
                }.into_any(),
            }}
        </div>
    }
}
