//! LLM provider clients
//!
//! - [`LLMClient`] - the trait every provider client implements
//! - [`LLMClientFactory`] - hands out clients to request handlers
//! - [`ConfiguredLLMFactory`] - builds clients from the live `lifeware.toml`
//!
//! OpenAI and Groq both go through [`openai::OpenAICompatibleClient`].
//!
//! # Example
//!
//! ```ignore
//! use lifeware::llm::{LLMClientFactory, ConfiguredLLMFactory};
//!
//! let factory = ConfiguredLLMFactory::new(config_manager);
//! let client = factory.create_default().await?;
//! let reply = client.generate_with_system(system, "What foods are high in iron?").await?;
//! ```

#![allow(missing_docs)]

/// Core LLM client trait, providers and factories.
pub mod client;
/// OpenAI-compatible chat-completions client.
pub mod openai;

pub use client::{
    ConfiguredLLMFactory, GenerationSettings, LLMClient, LLMClientFactory, Provider,
};
pub use openai::OpenAICompatibleClient;
