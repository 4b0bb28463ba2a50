use crate::{
    types::{ChatRequest, ChatResponse, GreetingResponse, Result},
    AppState,
};
use axum::{extract::State, Json};

/// Chat with the health assistant
///
/// Model failures still answer 200 with `fallback: true` and a
/// "try again later" reply.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Empty message"),
        (status = 429, description = "Too many requests")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let response = state
        .assistant
        .reply(&payload.message, &payload.history)
        .await?;

    Ok(Json(response))
}

/// Opening message shown before the first exchange
#[utoipa::path(
    get,
    path = "/api/chat/greeting",
    responses(
        (status = 200, description = "Greeting", body = GreetingResponse)
    ),
    tag = "chat"
)]
pub async fn greeting(State(state): State<AppState>) -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: state.assistant.greeting().to_string(),
    })
}
