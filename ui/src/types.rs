//! API types matching the Lifeware server

use chrono::{DateTime, Local};
use lifeware_donor::{Donor, ValidationErrors};
use serde::{Deserialize, Serialize};

/// `GET /api/donors` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonorListResponse {
    pub donors: Vec<Donor>,
    pub total: usize,
    /// Set when the server answered from its built-in demo list
    #[serde(default)]
    pub demo: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DonorCountResponse {
    pub count: usize,
}

/// `GET /api/status` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    pub database_configured: bool,
    pub assistant_configured: bool,
    pub demo_mode: bool,
    #[serde(default)]
    pub version: String,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One prior turn sent back to the assistant
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

/// Chat request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<ChatTurn>,
}

/// Chat response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GreetingResponse {
    pub message: String,
}

/// A message in the chatbot transcript
#[derive(Debug, Clone)]
pub struct Message {
    pub id: usize,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(id: usize, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn as_turn(&self) -> ChatTurn {
        ChatTurn {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// API error body
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: String,
    /// Per-field messages on a rejected registration
    #[serde(default)]
    pub fields: Option<ValidationErrors>,
}

/// Why a registration did not go through
#[derive(Debug, Clone)]
pub enum RegisterError {
    /// The server rejected these fields
    Invalid(ValidationErrors),
    /// Anything else, already phrased for the user
    Failed(String),
}
