use leptos::prelude::*;
use leptos_router::hooks::use_location;

/// Scrolls the window back to the top whenever the route changes.
#[component]
pub fn ScrollToTop() -> impl IntoView {
    let location = use_location();

    Effect::new(move |_| {
        location.pathname.track();
        window().scroll_to_with_x_and_y(0.0, 0.0);
    });
}
