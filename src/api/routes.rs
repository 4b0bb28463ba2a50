use crate::api::handlers::{chat, donors, status};
use crate::utils::toml_config::RateLimitConfig;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

/// Routes mounted under `/api`.
pub fn create_router(rate_limit: &RateLimitConfig) -> Router<AppState> {
    let mut chat_route = post(chat::chat);

    if rate_limit.enabled {
        match GovernorConfigBuilder::default()
            .per_second(rate_limit.chat_period_secs)
            .burst_size(rate_limit.chat_burst)
            .finish()
        {
            Some(governor_config) => {
                chat_route = chat_route.layer(GovernorLayer::new(Arc::new(governor_config)));
            }
            None => tracing::warn!(
                "Invalid chat rate limit ({}s period, burst {}); chat is not rate limited",
                rate_limit.chat_period_secs,
                rate_limit.chat_burst
            ),
        }
    }

    Router::new()
        .route("/health", get(status::health_check))
        .route("/status", get(status::status))
        .route(
            "/donors",
            get(donors::list_donors).post(donors::register_donor),
        )
        .route("/donors/count", get(donors::donor_count))
        .route("/chat", chat_route)
        .route("/chat/greeting", get(chat::greeting))
        .fallback(status::api_not_found)
}
