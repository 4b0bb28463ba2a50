use crate::llm::client::{GenerationSettings, LLMClient};
use crate::types::{AppError, ChatRole, ChatTurn, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Client for any chat-completions endpoint that follows OpenAI's wire format.
pub struct OpenAICompatibleClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    settings: GenerationSettings,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAICompatibleClient {
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        settings: GenerationSettings,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AppError::LLM(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            settings,
        })
    }

    async fn complete(&self, messages: Vec<RequestMessage<'_>>) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::LLM(format!("Chat completion request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|env| env.error.message)
                .unwrap_or(body);
            return Err(AppError::LLM(format!(
                "Chat completion API returned {}: {}",
                status.as_u16(),
                message
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLM(format!("Invalid chat completion response: {}", e)))?;

        // No choices or no content is an empty reply, not a failure
        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default())
    }
}

fn role_name(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    }
}

#[async_trait]
impl LLMClient for OpenAICompatibleClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.complete(vec![
            RequestMessage {
                role: "system",
                content: system,
            },
            RequestMessage {
                role: "user",
                content: prompt,
            },
        ])
        .await
    }

    async fn generate_with_history(
        &self,
        system: &str,
        history: &[ChatTurn],
        prompt: &str,
    ) -> Result<String> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(RequestMessage {
            role: "system",
            content: system,
        });
        messages.extend(history.iter().map(|turn| RequestMessage {
            role: role_name(turn.role),
            content: &turn.content,
        }));
        messages.push(RequestMessage {
            role: "user",
            content: prompt,
        });

        self.complete(messages).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
