//! Global application state

use crate::types::StatusResponse;
use gloo_storage::{SessionStorage, Storage};
use leptos::prelude::*;

const STORAGE_KEY_DEMO: &str = "lifeware_demo_acknowledged";

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Server status, `None` until the first check completes
    pub status: RwSignal<Option<StatusResponse>>,
    /// The visitor chose to continue with demo data this session
    pub demo_acknowledged: RwSignal<bool>,
    /// API base URL; empty means same origin
    pub api_base: RwSignal<String>,
}

impl AppState {
    pub fn new() -> Self {
        let acknowledged = SessionStorage::get::<bool>(STORAGE_KEY_DEMO).unwrap_or(false);

        Self {
            status: RwSignal::new(None),
            demo_acknowledged: RwSignal::new(acknowledged),
            api_base: RwSignal::new(String::new()),
        }
    }

    pub fn acknowledge_demo(&self) {
        let _ = SessionStorage::set(STORAGE_KEY_DEMO, true);
        self.demo_acknowledged.set(true);
    }

    /// True once the status is known and the database is unconfigured
    pub fn needs_setup(&self) -> bool {
        self.status
            .get()
            .map(|s| !s.database_configured)
            .unwrap_or(false)
    }

    pub fn is_demo(&self) -> bool {
        self.status.get().map(|s| s.demo_mode).unwrap_or(false)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
