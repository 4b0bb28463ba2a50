pub mod mocks;

use lifeware::utils::toml_config::{LifewareConfig, LifewareConfigManager};
use lifeware::{DonorStore, LLMClientFactory};
use lifeware::{build_app, AppState};
use lifeware_donor::{BloodGroup, Donor, DonorId};
use std::sync::Arc;

/// Config for in-process tests: no rate limiting (axum-test has no peer
/// address) and a UI directory that doesn't exist.
#[allow(dead_code)]
pub fn test_config() -> LifewareConfig {
    let mut config = LifewareConfig::default();
    config.server.rate_limit.enabled = false;
    config.server.ui_dir = "target/test-ui-missing".into();
    config
}

#[allow(dead_code)]
pub fn test_app(store: Arc<dyn DonorStore>, llm: Arc<dyn LLMClientFactory>) -> axum::Router {
    let config_manager = Arc::new(LifewareConfigManager::from_config(test_config()));
    build_app(AppState::new(config_manager, store, llm))
}

#[allow(dead_code)]
pub fn donor(id: i64, name: &str, group: BloodGroup, location: &str) -> Donor {
    Donor {
        id: Some(DonorId::Int(id)),
        name: name.to_string(),
        blood_group: Some(group),
        age: Some(30),
        location: location.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        phone_number: None,
        last_donated: None,
        availability: Some("available".to_string()),
        created_at: None,
    }
}
