//! Mock donor store and LLM clients shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use lifeware::db::DonorStore;
use lifeware::llm::{LLMClient, LLMClientFactory};
use lifeware::types::{AppError, ChatTurn, Result};
use lifeware_donor::{Donor, DonorId, DonorQuery, NewDonor};
use parking_lot::Mutex;
use std::sync::Arc;

// ============= Donor Store =============

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Behaves like a reachable database
    Working,
    /// No credentials
    Unconfigured,
    /// Credentials present but every call fails
    Failing,
}

/// In-memory donor store with switchable failure modes.
pub struct MockDonorStore {
    mode: StoreMode,
    rows: Mutex<Vec<Donor>>,
    next_id: Mutex<i64>,
    last_query: Mutex<Option<DonorQuery>>,
}

impl MockDonorStore {
    pub fn with_donors(donors: Vec<Donor>) -> Self {
        Self {
            mode: StoreMode::Working,
            next_id: Mutex::new(donors.len() as i64 + 1),
            rows: Mutex::new(donors),
            last_query: Mutex::new(None),
        }
    }

    pub fn empty() -> Self {
        Self::with_donors(Vec::new())
    }

    pub fn unconfigured() -> Self {
        Self {
            mode: StoreMode::Unconfigured,
            ..Self::empty()
        }
    }

    pub fn failing() -> Self {
        Self {
            mode: StoreMode::Failing,
            ..Self::empty()
        }
    }

    pub fn rows(&self) -> Vec<Donor> {
        self.rows.lock().clone()
    }

    pub fn last_query(&self) -> Option<DonorQuery> {
        self.last_query.lock().clone()
    }

    fn check(&self) -> Result<()> {
        match self.mode {
            StoreMode::Working => Ok(()),
            StoreMode::Unconfigured => Err(AppError::NotConfigured("Database".to_string())),
            StoreMode::Failing => Err(AppError::Database("connection refused".to_string())),
        }
    }

    fn sorted(mut donors: Vec<Donor>) -> Vec<Donor> {
        donors.sort_by(|a, b| a.name.cmp(&b.name));
        donors
    }
}

#[async_trait]
impl DonorStore for MockDonorStore {
    fn is_configured(&self) -> bool {
        self.mode != StoreMode::Unconfigured
    }

    async fn list_donors(&self) -> Result<Vec<Donor>> {
        self.check()?;
        Ok(Self::sorted(self.rows()))
    }

    async fn search_donors(&self, query: &DonorQuery) -> Result<Vec<Donor>> {
        self.check()?;
        *self.last_query.lock() = Some(query.clone());
        Ok(Self::sorted(query.apply(&self.rows())))
    }

    async fn insert_donor(&self, donor: &NewDonor) -> Result<Donor> {
        self.check()?;
        let id = {
            let mut next = self.next_id.lock();
            let id = *next;
            *next += 1;
            id
        };
        let stored = donor.clone().into_donor(Some(DonorId::Int(id)));
        self.rows.lock().push(stored.clone());
        Ok(stored)
    }

    async fn count_donors(&self) -> Result<usize> {
        self.check()?;
        Ok(self.rows.lock().len())
    }
}

// ============= LLM =============

/// What the assistant sent on the last call
#[derive(Debug, Clone, Default)]
pub struct RecordedCall {
    pub system: String,
    pub history: Vec<ChatTurn>,
    pub prompt: String,
}

/// Mock LLM client with a fixed response.
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockLLMClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    fn record(&self, system: &str, history: &[ChatTurn], prompt: &str) -> Result<String> {
        self.calls.lock().push(RecordedCall {
            system: system.to_string(),
            history: history.to_vec(),
            prompt: prompt.to_string(),
        });
        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.record(system, &[], prompt)
    }

    async fn generate_with_history(
        &self,
        system: &str,
        history: &[ChatTurn],
        prompt: &str,
    ) -> Result<String> {
        self.record(system, history, prompt)
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Hands out clones of one mock client; `None` acts like a missing API key.
pub struct MockLLMFactory {
    client: Option<MockLLMClient>,
}

impl MockLLMFactory {
    pub fn new(client: MockLLMClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn unconfigured() -> Self {
        Self { client: None }
    }
}

#[async_trait]
impl LLMClientFactory for MockLLMFactory {
    fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        match &self.client {
            Some(client) => Ok(Box::new(client.clone())),
            None => Err(AppError::NotConfigured("Health assistant".to_string())),
        }
    }
}
