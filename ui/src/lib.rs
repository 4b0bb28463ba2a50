//! Lifeware Collective UI - Leptos frontend
//!
//! Donor directory, donor registration and the Lifela health assistant,
//! talking to the Lifeware server's `/api` routes.

pub mod api;
pub mod components;
pub mod pages;
pub mod state;
pub mod types;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};

use components::{ErrorFallback, NavBar, ScrollToTop, SetupGuide};
use pages::{
    chatbot::ChatbotPage, donor_search::DonorSearchPage, home::HomePage,
    register_donor::RegisterDonorPage,
};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Initialize global state
    let app_state = AppState::new();
    provide_context(app_state);

    view! {
        <Title text="Lifeware Collective" />
        <Router>
            <ScrollToTop />
            <SetupGuide>
                <ErrorBoundary fallback=|errors| view! { <ErrorFallback errors /> }>
                    <NavBar />
                    <main class="min-h-screen bg-slate-50 text-slate-800">
                        <Routes fallback=|| view! { <NotFound /> }>
                            <Route path=path!("/") view=HomePage />
                            <Route path=path!("/donors") view=DonorSearchPage />
                            <Route path=path!("/register-donor") view=RegisterDonorPage />
                            <Route path=path!("/chatbot") view=ChatbotPage />
                        </Routes>
                    </main>
                </ErrorBoundary>
            </SetupGuide>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-slate-400 mb-4">"404"</h1>
                <p class="text-xl text-slate-500 mb-8">"Page not found"</p>
                <A
                    href="/"
                    attr:class="px-6 py-3 bg-rose-600 hover:bg-rose-700 text-white rounded-lg font-medium transition-colors"
                >
                    "Go Home"
                </A>
            </div>
        </div>
    }
}
