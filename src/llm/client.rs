//! LLM client abstractions and provider selection
//!
//! Both supported services speak the OpenAI chat-completions protocol:
//! - **OpenAI**: `https://api.openai.com/v1`
//! - **Groq**: `https://api.groq.com/openai/v1`

use crate::types::{AppError, ChatTurn, Result};
use crate::utils::toml_config::{LifewareConfig, LifewareConfigManager, ProviderKind};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Generic LLM client trait for provider abstraction
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate with system prompt
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Generate with a system prompt, earlier turns (oldest first) and the new message
    async fn generate_with_history(
        &self,
        system: &str,
        history: &[ChatTurn],
        prompt: &str,
    ) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Sampling and transport settings shared by every request a client makes
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI, or any server that speaks its chat-completions API
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::OpenAI {
    ///     api_key: "sk-...".to_string(),
    ///     api_base: "https://api.openai.com/v1".to_string(),
    ///     model: "gpt-3.5-turbo".to_string(),
    ///     settings: GenerationSettings::default(),
    /// };
    /// ```
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
        settings: GenerationSettings,
    },

    /// Groq's OpenAI-compatible endpoint
    Groq {
        api_key: String,
        api_base: String,
        model: String,
        settings: GenerationSettings,
    },
}

impl Provider {
    pub const OPENAI_API_BASE: &'static str = "https://api.openai.com/v1";
    pub const GROQ_API_BASE: &'static str = "https://api.groq.com/openai/v1";

    /// Build the provider described by the `[assistant]` section.
    ///
    /// Returns `None` when the configured API key variable is unset.
    pub fn from_config(config: &LifewareConfig) -> Option<Self> {
        let api_key = config.assistant_api_key()?;
        let assistant = &config.assistant;
        let settings = GenerationSettings {
            max_tokens: assistant.max_tokens,
            temperature: assistant.temperature,
            timeout: Duration::from_secs(assistant.timeout_secs),
        };
        let model = assistant.model.clone();

        Some(match assistant.provider {
            ProviderKind::OpenAI => Provider::OpenAI {
                api_key,
                api_base: assistant
                    .api_base
                    .clone()
                    .unwrap_or_else(|| Self::OPENAI_API_BASE.to_string()),
                model,
                settings,
            },
            ProviderKind::Groq => Provider::Groq {
                api_key,
                api_base: assistant
                    .api_base
                    .clone()
                    .unwrap_or_else(|| Self::GROQ_API_BASE.to_string()),
                model,
                settings,
            },
        })
    }

    /// Create a client instance for this provider
    pub fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
                settings,
            }
            | Provider::Groq {
                api_key,
                api_base,
                model,
                settings,
            } => Ok(Box::new(super::openai::OpenAICompatibleClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                settings.clone(),
            )?)),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Groq { .. } => "Groq",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAI { model, .. } | Provider::Groq { model, .. } => model,
        }
    }
}

/// Creates the client that answers a chat request.
///
/// Handlers hold an `Arc<dyn LLMClientFactory>` so tests can hand out mock
/// clients without touching the network.
#[async_trait]
pub trait LLMClientFactory: Send + Sync {
    /// Whether a client can currently be created
    fn is_configured(&self) -> bool;

    /// Create a client using the current default provider
    async fn create_default(&self) -> Result<Box<dyn LLMClient>>;
}

/// Factory that re-reads `lifeware.toml` on every call, so a hot reload
/// (new model, new provider, new key variable) applies to the next message.
pub struct ConfiguredLLMFactory {
    config_manager: Arc<LifewareConfigManager>,
}

impl ConfiguredLLMFactory {
    pub fn new(config_manager: Arc<LifewareConfigManager>) -> Self {
        Self { config_manager }
    }

    pub fn current_provider(&self) -> Option<Provider> {
        Provider::from_config(&self.config_manager.config())
    }
}

#[async_trait]
impl LLMClientFactory for ConfiguredLLMFactory {
    fn is_configured(&self) -> bool {
        self.config_manager.config().assistant_api_key().is_some()
    }

    async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        let provider = self
            .current_provider()
            .ok_or_else(|| AppError::NotConfigured("Health assistant".to_string()))?;

        tracing::debug!(
            provider = provider.name(),
            model = provider.model(),
            "Creating LLM client"
        );
        provider.create_client()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::toml_config::AssistantConfig;

    fn config_with_key_env(var: &str, provider: ProviderKind) -> LifewareConfig {
        LifewareConfig {
            assistant: AssistantConfig {
                provider,
                api_key_env: var.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_provider_missing_key_is_none() {
        let config = config_with_key_env("LIFEWARE_TEST_UNSET_KEY_7731", ProviderKind::OpenAI);
        assert!(Provider::from_config(&config).is_none());
    }

    #[test]
    fn test_provider_default_bases() {
        std::env::set_var("LIFEWARE_TEST_LLM_KEY_A", "sk-test");

        let openai = Provider::from_config(&config_with_key_env(
            "LIFEWARE_TEST_LLM_KEY_A",
            ProviderKind::OpenAI,
        ))
        .unwrap();
        assert_eq!(openai.name(), "OpenAI");
        assert!(matches!(
            &openai,
            Provider::OpenAI { api_base, .. } if api_base == Provider::OPENAI_API_BASE
        ));

        let groq = Provider::from_config(&config_with_key_env(
            "LIFEWARE_TEST_LLM_KEY_A",
            ProviderKind::Groq,
        ))
        .unwrap();
        assert_eq!(groq.name(), "Groq");
        assert!(matches!(
            &groq,
            Provider::Groq { api_base, .. } if api_base == Provider::GROQ_API_BASE
        ));
        assert_eq!(groq.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_provider_api_base_override() {
        std::env::set_var("LIFEWARE_TEST_LLM_KEY_B", "sk-test");
        let mut config = config_with_key_env("LIFEWARE_TEST_LLM_KEY_B", ProviderKind::OpenAI);
        config.assistant.api_base = Some("http://localhost:8080/v1".to_string());
        config.assistant.max_tokens = 64;

        match Provider::from_config(&config).unwrap() {
            Provider::OpenAI {
                api_base, settings, ..
            } => {
                assert_eq!(api_base, "http://localhost:8080/v1");
                assert_eq!(settings.max_tokens, 64);
            }
            other => panic!("unexpected provider {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_factory_without_key_is_not_configured() {
        let manager = Arc::new(LifewareConfigManager::from_config(config_with_key_env(
            "LIFEWARE_TEST_UNSET_KEY_9912",
            ProviderKind::OpenAI,
        )));
        let factory = ConfiguredLLMFactory::new(manager);

        assert!(!factory.is_configured());
        let err = match factory.create_default().await {
            Ok(_) => panic!("Expected error"),
            Err(e) => e,
        };
        assert!(matches!(err, AppError::NotConfigured(_)));
    }
}
