use lifeware_donor::{Donor, ValidationErrors};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= Donor API Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DonorListResponse {
    pub donors: Vec<Donor>,
    pub total: usize,
    /// True when the list is demo data because no database is configured
    pub demo: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DonorCountResponse {
    pub count: usize,
}

// ============= Chat API Types =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    /// Earlier turns of the same conversation, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
    /// True when the reply is the canned "try again later" text
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GreetingResponse {
    pub message: String,
}

// ============= Status Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub database_configured: bool,
    pub assistant_configured: bool,
    pub demo_mode: bool,
    pub version: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("LLM error: {0}")]
    LLM(String),

    #[error("{0} is not configured")]
    NotConfigured(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, body) = match self {
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({
                    "error": "Please correct the highlighted fields",
                    "fields": fields,
                }),
            ),
            AppError::NotConfigured(what) => (
                StatusCode::SERVICE_UNAVAILABLE,
                serde_json::json!({ "error": format!("{} is not configured", what) }),
            ),
            AppError::Database(msg) => (
                StatusCode::BAD_GATEWAY,
                serde_json::json!({ "error": msg }),
            ),
            AppError::LLM(msg) => (
                StatusCode::BAD_GATEWAY,
                serde_json::json!({ "error": msg }),
            ),
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Internal(format!("HTTP client error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (AppError::Database("x".into()), 502),
            (AppError::LLM("x".into()), 502),
            (AppError::NotConfigured("Database".into()), 503),
            (AppError::Validation(ValidationErrors::default()), 422),
            (AppError::InvalidInput("x".into()), 400),
            (AppError::NotFound("x".into()), 404),
            (AppError::Internal("x".into()), 500),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status().as_u16(), status);
        }
    }

    #[test]
    fn test_chat_request_history_defaults_to_empty() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert!(req.history.is_empty());

        let req: ChatRequest = serde_json::from_str(
            r#"{"message":"and iron?","history":[{"role":"user","content":"diet?"},{"role":"assistant","content":"Eat well."}]}"#,
        )
        .unwrap();
        assert_eq!(req.history.len(), 2);
        assert_eq!(req.history[1].role, ChatRole::Assistant);
    }
}
