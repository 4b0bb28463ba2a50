//! TOML-based configuration for Lifeware
//!
//! Settings live in `lifeware.toml`. Secrets never appear in the file: it
//! names the environment variables that hold them (`supabase_key_env`,
//! `api_key_env`, ...), and those are read from the process environment,
//! usually populated from `.env`.
//!
//! Every section has defaults, so an empty file (or no file at all) gives a
//! server that runs in demo mode.
//!
//! # Hot Reloading
//!
//! Assistant settings (model, temperature, prompt) and database settings
//! (table, env var names, timeout) are re-read on every request, so edits to
//! the file apply without a restart. Server settings (bind address, CORS,
//! rate limit) are read once at startup.

use arc_swap::ArcSwap;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Root configuration structure loaded from lifeware.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifewareConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Directory holding the built UI (index.html + wasm bundle)
    #[serde(default = "default_ui_dir")]
    pub ui_dir: PathBuf,

    /// Origins allowed by CORS; empty means same-origin only
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_ui_dir() -> PathBuf {
    PathBuf::from("ui/dist")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            ui_dir: default_ui_dir(),
            allowed_origins: Vec::new(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Per-client limits on the chat endpoint, which spends paid API tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between replenished requests
    #[serde(default = "default_chat_period_secs")]
    pub chat_period_secs: u64,

    #[serde(default = "default_chat_burst")]
    pub chat_burst: u32,
}

fn default_true() -> bool {
    true
}

fn default_chat_period_secs() -> u64 {
    2
}

fn default_chat_burst() -> u32 {
    5
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            chat_period_secs: default_chat_period_secs(),
            chat_burst: default_chat_burst(),
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Environment variable containing the Supabase project URL
    #[serde(default = "default_supabase_url_env")]
    pub supabase_url_env: String,

    /// Environment variable containing the Supabase anon key
    #[serde(default = "default_supabase_key_env")]
    pub supabase_key_env: String,

    /// Table holding donor rows
    #[serde(default = "default_donor_table")]
    pub donor_table: String,

    #[serde(default = "default_database_timeout")]
    pub timeout_secs: u64,
}

fn default_supabase_url_env() -> String {
    "SUPABASE_URL".to_string()
}

fn default_supabase_key_env() -> String {
    "SUPABASE_KEY".to_string()
}

fn default_donor_table() -> String {
    "donors".to_string()
}

fn default_database_timeout() -> u64 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            supabase_url_env: default_supabase_url_env(),
            supabase_key_env: default_supabase_key_env(),
            donor_table: default_donor_table(),
            timeout_secs: default_database_timeout(),
        }
    }
}

// ============= Assistant Configuration =============

/// Which OpenAI-compatible service answers chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAI,
    Groq,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Environment variable containing the provider API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Override the provider's base URL (for proxies and compatible servers)
    #[serde(default)]
    pub api_base: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Prior turns forwarded with each message
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,

    #[serde(default = "default_assistant_timeout")]
    pub timeout_secs: u64,

    /// Replaces the built-in Thalassemia support prompt
    #[serde(default)]
    pub system_prompt: Option<String>,
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_history_turns() -> usize {
    10
}

fn default_assistant_timeout() -> u64 {
    30
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key_env: default_api_key_env(),
            api_base: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_history_turns: default_max_history_turns(),
            timeout_secs: default_assistant_timeout(),
            system_prompt: None,
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Configuration warnings that don't prevent operation but may indicate issues
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub kind: ConfigWarningKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarningKind {
    /// The server will fall back to demo data
    DatabaseNotConfigured,
    /// The assistant will answer with its fallback text
    AssistantNotConfigured,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),
}

impl LifewareConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: LifewareConfig = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Reject values that can never work
    pub fn validate(&self) -> Result<(), ConfigError> {
        let table = &self.database.donor_table;
        if table.is_empty()
            || !table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::ValidationError(format!(
                "database.donor_table '{}' must be a plain table name",
                table
            )));
        }

        if !(0.0..=2.0).contains(&self.assistant.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "assistant.temperature must be between 0 and 2, got {}",
                self.assistant.temperature
            )));
        }

        if self.assistant.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "assistant.max_tokens must be greater than 0".to_string(),
            ));
        }

        if !matches!(self.server.log_format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "server.log_format must be 'pretty' or 'json', got '{}'",
                self.server.log_format
            )));
        }

        let limits = &self.server.rate_limit;
        if limits.enabled && (limits.chat_period_secs == 0 || limits.chat_burst == 0) {
            return Err(ConfigError::ValidationError(
                "server.rate_limit values must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate, then report settings that leave a feature in fallback mode
    pub fn validate_with_warnings(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.validate()?;

        let mut warnings = Vec::new();

        if self.supabase_url().is_none() || self.supabase_key().is_none() {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::DatabaseNotConfigured,
                message: format!(
                    "{} / {} not set: serving demo donor data",
                    self.database.supabase_url_env, self.database.supabase_key_env
                ),
            });
        }

        if self.assistant_api_key().is_none() {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::AssistantNotConfigured,
                message: format!(
                    "{} not set: the health assistant will reply with its fallback message",
                    self.assistant.api_key_env
                ),
            });
        }

        Ok(warnings)
    }

    /// Get a resolved value from an env var reference; blank counts as unset
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Supabase project URL from the environment
    pub fn supabase_url(&self) -> Option<String> {
        self.resolve_env(&self.database.supabase_url_env)
    }

    /// Supabase anon key from the environment
    pub fn supabase_key(&self) -> Option<String> {
        self.resolve_env(&self.database.supabase_key_env)
    }

    /// Chat-completion API key from the environment
    pub fn assistant_api_key(&self) -> Option<String> {
        self.resolve_env(&self.assistant.api_key_env)
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ============= Hot Reloading Configuration Manager =============

/// Thread-safe configuration manager with hot reloading support
pub struct LifewareConfigManager {
    config: Arc<ArcSwap<LifewareConfig>>,
    config_path: PathBuf,
    watcher: RwLock<Option<RecommendedWatcher>>,
    reload_tx: Option<mpsc::UnboundedSender<()>>,
}

impl LifewareConfigManager {
    /// Create a new configuration manager and load the initial config
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        // Absolute path so the watcher keeps working after a chdir
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(ConfigError::ReadError)?
                .join(path)
        };

        let config = LifewareConfig::load(&path)?;

        Ok(Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: path,
            watcher: RwLock::new(None),
            reload_tx: None,
        })
    }

    /// Create a config manager directly from a config.
    /// This won't have file watching capabilities.
    pub fn from_config(config: LifewareConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: PathBuf::from("lifeware.toml"),
            watcher: RwLock::new(None),
            reload_tx: None,
        }
    }

    /// Get the current configuration (lockless read)
    pub fn config(&self) -> Arc<LifewareConfig> {
        self.config.load_full()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Swap in a new configuration without touching the file
    pub fn replace(&self, config: LifewareConfig) {
        self.config.store(Arc::new(config));
    }

    /// Manually reload the configuration from disk
    pub fn reload(&self) -> Result<(), ConfigError> {
        info!("Reloading configuration from {:?}", self.config_path);

        let new_config = LifewareConfig::load(&self.config_path)?;
        self.replace(new_config);

        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Start watching for configuration file changes
    pub fn start_watching(&mut self) -> Result<(), ConfigError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        self.reload_tx = Some(tx.clone());

        let config_path = self.config_path.clone();
        let config_arc = Arc::clone(&self.config);
        let file_name = config_path.file_name().map(|n| n.to_os_string());

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_config && (event.kind.is_modify() || event.kind.is_create()) {
                        let _ = tx.send(());
                    }
                }
                Err(e) => {
                    error!("Config watcher error: {:?}", e);
                }
            }
        })?;

        // Editors replace files, so watch the directory rather than the file
        if let Some(parent) = self.config_path.parent() {
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
        }

        *self.watcher.write() = Some(watcher);

        tokio::spawn(async move {
            let mut last_reload = std::time::Instant::now();
            let debounce_duration = Duration::from_millis(500);

            while rx.recv().await.is_some() {
                if last_reload.elapsed() < debounce_duration {
                    continue;
                }

                // let the writer finish
                tokio::time::sleep(Duration::from_millis(100)).await;

                match LifewareConfig::load(&config_path) {
                    Ok(new_config) => {
                        config_arc.store(Arc::new(new_config));
                        info!("Configuration hot-reloaded successfully");
                        last_reload = std::time::Instant::now();
                    }
                    Err(e) => {
                        warn!(
                            "Failed to hot-reload config: {}. Keeping previous config.",
                            e
                        );
                    }
                }
            }
        });

        info!("Configuration hot-reload watcher started");
        Ok(())
    }

    /// Stop watching for configuration changes
    pub fn stop_watching(&self) {
        *self.watcher.write() = None;
        info!("Configuration hot-reload watcher stopped");
    }
}

impl Clone for LifewareConfigManager {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            config_path: self.config_path.clone(),
            watcher: RwLock::new(None), // Watcher is not cloned
            reload_tx: self.reload_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"
allowed_origins = ["http://localhost:8081"]

[database]
supabase_url_env = "TEST_LIFEWARE_SUPABASE_URL"
supabase_key_env = "TEST_LIFEWARE_SUPABASE_KEY"
donor_table = "LIFEWARE"

[assistant]
provider = "groq"
api_key_env = "TEST_LIFEWARE_GROQ_KEY"
model = "llama-3.1-8b-instant"
temperature = 0.4
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config: LifewareConfig = toml::from_str(&create_test_config()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:8081"]);
        assert_eq!(config.database.donor_table, "LIFEWARE");
        assert_eq!(config.assistant.provider, ProviderKind::Groq);
        assert_eq!(config.assistant.model, "llama-3.1-8b-instant");
        // unspecified fields keep their defaults
        assert_eq!(config.assistant.max_tokens, 500);
        assert_eq!(config.server.log_format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: LifewareConfig = toml::from_str("").unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.donor_table, "donors");
        assert_eq!(config.database.supabase_url_env, "SUPABASE_URL");
        assert_eq!(config.assistant.provider, ProviderKind::OpenAI);
        assert_eq!(config.assistant.model, "gpt-3.5-turbo");
        assert!((config.assistant.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.assistant.max_history_turns, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = LifewareConfig::default();
        config.assistant.temperature = 3.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let mut config = LifewareConfig::default();
        config.assistant.max_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = LifewareConfig::default();
        config.database.donor_table = "donors; drop table".to_string();
        assert!(config.validate().is_err());

        let mut config = LifewareConfig::default();
        config.server.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_secrets_are_warnings_not_errors() {
        let mut config = LifewareConfig::default();
        config.database.supabase_url_env = "TEST_LIFEWARE_UNSET_URL".to_string();
        config.database.supabase_key_env = "TEST_LIFEWARE_UNSET_KEY".to_string();
        config.assistant.api_key_env = "TEST_LIFEWARE_UNSET_LLM".to_string();

        let warnings = config.validate_with_warnings().unwrap();
        let kinds: Vec<_> = warnings.iter().map(|w| w.kind.clone()).collect();
        assert!(kinds.contains(&ConfigWarningKind::DatabaseNotConfigured));
        assert!(kinds.contains(&ConfigWarningKind::AssistantNotConfigured));
    }

    #[test]
    fn test_resolve_env_treats_blank_as_unset() {
        // unique variable names, so parallel tests don't interfere
        std::env::set_var("TEST_LIFEWARE_BLANK", "   ");
        std::env::set_var("TEST_LIFEWARE_SET", " https://x.supabase.co ");
        let config = LifewareConfig::default();
        assert_eq!(config.resolve_env("TEST_LIFEWARE_BLANK"), None);
        assert_eq!(
            config.resolve_env("TEST_LIFEWARE_SET").as_deref(),
            Some("https://x.supabase.co")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = LifewareConfig::load("/definitely/not/here/lifeware.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_manager_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifeware.toml");
        fs::write(&path, "[assistant]\nmodel = \"gpt-4o-mini\"\n").unwrap();

        let manager = LifewareConfigManager::new(&path).unwrap();
        assert_eq!(manager.config().assistant.model, "gpt-4o-mini");

        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[assistant]\nmodel = \"llama-3.1-8b-instant\"").unwrap();
        drop(file);

        manager.reload().unwrap();
        assert_eq!(manager.config().assistant.model, "llama-3.1-8b-instant");
    }

    #[test]
    fn test_manager_from_config() {
        let manager = LifewareConfigManager::from_config(LifewareConfig::default());
        assert_eq!(manager.config().server.port, 3000);
        let cloned = manager.clone();
        assert_eq!(cloned.config().database.donor_table, "donors");
    }
}
