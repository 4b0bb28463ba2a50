use crate::llm::LLMClientFactory;
use crate::types::{AppError, ChatResponse, ChatTurn, Result};
use crate::utils::toml_config::LifewareConfigManager;
use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = "You are a helpful AI health assistant specializing in Thalassemia support. Provide accurate, helpful information about diet, treatment, symptoms, and support resources. Always recommend consulting healthcare professionals for personalized medical advice.";

pub const GREETING: &str = "Hello! I'm Lifela AI, your intelligent health assistant. I'm here to help you with questions about Thalassemia, diet, care, and support. How can I assist you today?";

pub const EMPTY_REPLY: &str = "Sorry, I couldn't process your request.";

pub const CONNECTION_FALLBACK: &str =
    "I'm having trouble connecting right now. Please try again later.";

/// Default number of earlier turns sent along with a new message
pub const DEFAULT_MAX_HISTORY_TURNS: usize = 10;

/// The "Lifela AI" chat assistant.
pub struct HealthAssistant {
    llm_factory: Arc<dyn LLMClientFactory>,
    system_prompt: String,
    max_history_turns: usize,
    config_manager: Option<Arc<LifewareConfigManager>>,
}

impl HealthAssistant {
    pub fn new(llm_factory: Arc<dyn LLMClientFactory>) -> Self {
        Self {
            llm_factory,
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_history_turns: DEFAULT_MAX_HISTORY_TURNS,
            config_manager: None,
        }
    }

    /// Take the prompt and history limit from the live `[assistant]` section
    /// on every message instead of the values fixed at construction.
    pub fn with_config(mut self, config_manager: Arc<LifewareConfigManager>) -> Self {
        self.config_manager = Some(config_manager);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_max_history_turns(mut self, turns: usize) -> Self {
        self.max_history_turns = turns;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.llm_factory.is_configured()
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    pub fn system_prompt(&self) -> String {
        self.current_settings().0
    }

    fn current_settings(&self) -> (String, usize) {
        match &self.config_manager {
            Some(manager) => {
                let config = manager.config();
                let prompt = config
                    .assistant
                    .system_prompt
                    .clone()
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or_else(|| self.system_prompt.clone());
                (prompt, config.assistant.max_history_turns)
            }
            None => (self.system_prompt.clone(), self.max_history_turns),
        }
    }

    /// Answer one user message.
    ///
    /// Only a blank message is an error; any failure to reach the model is
    /// turned into the connection fallback reply.
    pub async fn reply(&self, message: &str, history: &[ChatTurn]) -> Result<ChatResponse> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::InvalidInput("Message cannot be empty".to_string()));
        }

        let (system_prompt, max_history_turns) = self.current_settings();
        let skip = history.len().saturating_sub(max_history_turns);
        let recent = &history[skip..];

        let client = match self.llm_factory.create_default().await {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Health assistant unavailable: {}", e);
                return Ok(fallback_response());
            }
        };

        let reply = if recent.is_empty() {
            client.generate_with_system(&system_prompt, message).await
        } else {
            client
                .generate_with_history(&system_prompt, recent, message)
                .await
        };

        match reply {
            Ok(text) if text.trim().is_empty() => Ok(ChatResponse {
                reply: EMPTY_REPLY.to_string(),
                fallback: false,
                model: Some(client.model_name().to_string()),
            }),
            Ok(text) => Ok(ChatResponse {
                reply: text,
                fallback: false,
                model: Some(client.model_name().to_string()),
            }),
            Err(e) => {
                tracing::error!(model = client.model_name(), "Chat completion failed: {}", e);
                Ok(fallback_response())
            }
        }
    }
}

fn fallback_response() -> ChatResponse {
    ChatResponse {
        reply: CONNECTION_FALLBACK.to_string(),
        fallback: true,
        model: None,
    }
}
