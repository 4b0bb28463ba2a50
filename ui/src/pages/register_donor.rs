//! Donor registration page

use crate::api::register;
use crate::components::LoadingSpinner;
use crate::state::AppState;
use crate::types::RegisterError;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use lifeware_donor::{
    BloodGroup, Donor, DonorRegistration, ValidationErrors, MAX_DONOR_AGE, MIN_DONOR_AGE,
};

const REDIRECT_AFTER_MS: u32 = 3_000;

const BENEFITS: [(&str, &str, &str); 4] = [
    (
        "🩸",
        "Save Lives",
        "Your donation can save up to 3 lives and help patients with Thalassemia and other blood disorders.",
    ),
    (
        "🤝",
        "Community Support",
        "Join a network of compassionate donors dedicated to helping those in need.",
    ),
    (
        "📱",
        "Easy Matching",
        "Our platform makes it easy for patients to find compatible donors quickly.",
    ),
    (
        "🏥",
        "Professional Network",
        "Connect with healthcare professionals and blood banks in your area.",
    ),
];

/// Form inputs, one signal per field
#[derive(Clone, Copy)]
struct FormFields {
    name: RwSignal<String>,
    blood_group: RwSignal<String>,
    age: RwSignal<String>,
    location: RwSignal<String>,
    email: RwSignal<String>,
    phone_number: RwSignal<String>,
    last_donated: RwSignal<String>,
}

impl FormFields {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            blood_group: RwSignal::new(String::new()),
            age: RwSignal::new(String::new()),
            location: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
            last_donated: RwSignal::new(String::new()),
        }
    }

    fn registration(&self) -> DonorRegistration {
        let optional = |s: RwSignal<String>| Some(s.get_untracked());
        DonorRegistration {
            name: self.name.get_untracked(),
            blood_group: optional(self.blood_group),
            age: optional(self.age),
            location: self.location.get_untracked(),
            email: optional(self.email),
            phone_number: optional(self.phone_number),
            last_donated: optional(self.last_donated),
        }
    }
}

#[component]
pub fn RegisterDonorPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let fields = FormFields::new();
    let errors = RwSignal::new(ValidationErrors::default());
    let submit_error = RwSignal::new(Option::<String>::None);
    let is_submitting = RwSignal::new(false);
    let registered = RwSignal::new(Option::<Donor>::None);

    let navigate_for_submit = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let registration = fields.registration();
        // Same rules as the server, checked before the round trip
        if let Err(invalid) = registration.validate() {
            errors.set(invalid);
            return;
        }
        errors.set(ValidationErrors::default());
        submit_error.set(None);
        is_submitting.set(true);

        let base = state.api_base.get_untracked();
        let navigate = navigate_for_submit.clone();
        spawn_local(async move {
            match register(&base, &registration).await {
                Ok(donor) => {
                    tracing::info!("Registered donor {}", donor.name);
                    registered.set(Some(donor));
                    let _ = Timeout::new(REDIRECT_AFTER_MS, move || {
                        navigate("/", Default::default())
                    })
                    .forget();
                }
                Err(RegisterError::Invalid(invalid)) => errors.set(invalid),
                Err(RegisterError::Failed(message)) => {
                    tracing::error!("Registration failed: {}", message);
                    submit_error.set(Some(message));
                }
            }
            is_submitting.set(false);
        });
    };

    let on_cancel = move |_| navigate("/", Default::default());

    view! {
        <Show
            when=move || registered.get().is_none()
            fallback=move || registered.get().map(|donor| view! { <RegistrationSuccess donor /> })
        >
            <div class="max-w-4xl mx-auto px-4 py-10">
                <header class="mb-8">
                    <h1 class="text-4xl font-bold bg-gradient-to-r from-rose-600 to-purple-600 bg-clip-text text-transparent mb-2">
                        "Register as a Donor"
                    </h1>
                    <p class="text-slate-600">
                        "Join our community of lifesavers. Your registration helps connect those in need with compatible donors."
                    </p>
                </header>

                <form class="bg-white rounded-2xl border border-slate-200 p-6" on:submit=on_submit.clone() novalidate=true>
                    <h2 class="text-xl font-semibold mb-1">"Donor Information"</h2>
                    <p class="text-sm text-slate-500 mb-6">
                        "Please provide your details to help us connect you with those in need."
                    </p>

                    <div class="grid md:grid-cols-2 gap-4">
                        <FormField label="Name *" field="name" errors wide=true>
                            <input
                                type="text"
                                class=input_class(errors, "name")
                                placeholder="Enter your full name"
                                prop:value=move || fields.name.get()
                                on:input=move |ev| on_change(errors, "name", fields.name, event_target_value(&ev))
                            />
                        </FormField>

                        <FormField label="Blood Group *" field="blood_group" errors>
                            <select
                                class=input_class(errors, "blood_group")
                                prop:value=move || fields.blood_group.get()
                                on:change=move |ev| on_change(errors, "blood_group", fields.blood_group, event_target_value(&ev))
                            >
                                <option value="">"Select Blood Group"</option>
                                {BloodGroup::ALL.into_iter().map(|group| view! {
                                    <option value=group.as_str()>{group.as_str()}</option>
                                }).collect::<Vec<_>>()}
                            </select>
                        </FormField>

                        <FormField label="Age *" field="age" errors>
                            <input
                                type="number"
                                class=input_class(errors, "age")
                                placeholder="Enter your age"
                                min=MIN_DONOR_AGE.to_string()
                                max=MAX_DONOR_AGE.to_string()
                                prop:value=move || fields.age.get()
                                on:input=move |ev| on_change(errors, "age", fields.age, event_target_value(&ev))
                            />
                        </FormField>

                        <FormField label="Location *" field="location" errors wide=true>
                            <input
                                type="text"
                                class=input_class(errors, "location")
                                placeholder="City, State"
                                prop:value=move || fields.location.get()
                                on:input=move |ev| on_change(errors, "location", fields.location, event_target_value(&ev))
                            />
                        </FormField>

                        <FormField label="Email" field="email" errors>
                            <input
                                type="email"
                                class=input_class(errors, "email")
                                placeholder="Enter your email"
                                prop:value=move || fields.email.get()
                                on:input=move |ev| on_change(errors, "email", fields.email, event_target_value(&ev))
                            />
                        </FormField>

                        <FormField label="Phone Number" field="phone_number" errors>
                            <input
                                type="tel"
                                class=input_class(errors, "phone_number")
                                placeholder="Enter your phone number"
                                prop:value=move || fields.phone_number.get()
                                on:input=move |ev| on_change(errors, "phone_number", fields.phone_number, event_target_value(&ev))
                            />
                        </FormField>

                        <FormField label="Last Donation Date" field="last_donated" errors>
                            <input
                                type="date"
                                class=input_class(errors, "last_donated")
                                prop:value=move || fields.last_donated.get()
                                on:input=move |ev| on_change(errors, "last_donated", fields.last_donated, event_target_value(&ev))
                            />
                        </FormField>
                    </div>

                    {move || submit_error.get().map(|message| view! {
                        <div class="mt-6 bg-red-50 border border-red-200 text-red-700 rounded-lg px-4 py-3 text-sm">
                            {message}
                        </div>
                    })}

                    <div class="mt-6 flex justify-end gap-3">
                        <button
                            type="button"
                            class="px-5 py-2 border border-slate-300 rounded-lg font-medium hover:bg-slate-100 disabled:opacity-50"
                            disabled=move || is_submitting.get()
                            on:click=on_cancel.clone()
                        >
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="px-5 py-2 bg-rose-600 hover:bg-rose-700 text-white rounded-lg font-medium disabled:opacity-50"
                            disabled=move || is_submitting.get()
                        >
                            {move || if is_submitting.get() { "Registering..." } else { "Register as Donor" }}
                        </button>
                    </div>
                </form>

                <section class="mt-12">
                    <h2 class="text-2xl font-bold text-center mb-6">"Why Register as a Donor?"</h2>
                    <div class="grid sm:grid-cols-2 gap-4">
                        {BENEFITS.into_iter().map(|(icon, title, text)| view! {
                            <div class="bg-white rounded-2xl border border-slate-200 p-6">
                                <div class="text-3xl mb-2">{icon}</div>
                                <h3 class="font-semibold mb-1">{title}</h3>
                                <p class="text-sm text-slate-600">{text}</p>
                            </div>
                        }).collect::<Vec<_>>()}
                    </div>
                </section>
            </div>
        </Show>
    }
}

/// Store the new value and clear that field's error
fn on_change(
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
    signal: RwSignal<String>,
    value: String,
) {
    signal.set(value);
    if errors.with_untracked(|e| e.get(field).is_some()) {
        errors.update(|e| e.clear(field));
    }
}

fn input_class(
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
) -> impl Fn() -> String + Send + Sync + 'static {
    move || {
        format!(
            "w-full px-4 py-2 rounded-lg border focus:outline-none focus:ring-2 focus:ring-rose-400 {}",
            if errors.with(|e| e.get(field).is_some()) {
                "border-red-400"
            } else {
                "border-slate-300"
            }
        )
    }
}

#[component]
fn FormField(
    label: &'static str,
    field: &'static str,
    errors: RwSignal<ValidationErrors>,
    #[prop(default = false)] wide: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=if wide { "flex flex-col gap-1 md:col-span-2" } else { "flex flex-col gap-1" }>
            <label class="text-sm font-medium text-slate-700">{label}</label>
            {children()}
            {move || errors.with(|e| e.get(field).map(str::to_string)).map(|message| view! {
                <span class="text-sm text-red-600">{message}</span>
            })}
        </div>
    }
}

#[component]
fn RegistrationSuccess(donor: Donor) -> impl IntoView {
    let blood_group = donor.blood_group.map(|g| g.to_string()).unwrap_or_default();

    view! {
        <div class="min-h-[70vh] flex items-center justify-center px-4">
            <div class="max-w-lg w-full bg-white rounded-2xl shadow-lg p-8 text-center">
                <div class="text-5xl mb-4">"✅"</div>
                <h1 class="text-2xl font-bold mb-3">"Registration Successful!"</h1>
                <p class="text-slate-600 mb-6">
                    "Thank you for registering as a donor. Your information has been saved and you can now be contacted by those in need."
                </p>
                <div class="bg-slate-50 rounded-lg p-4 text-left text-sm mb-6 space-y-1">
                    <p><strong>"Name: "</strong>{donor.name.clone()}</p>
                    <p><strong>"Blood Group: "</strong>{blood_group}</p>
                    <p><strong>"Location: "</strong>{donor.location.clone()}</p>
                </div>
                <LoadingSpinner size="w-6 h-6" message="Redirecting to home page in a few seconds..." />
            </div>
        </div>
    }
}
