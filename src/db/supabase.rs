//! Supabase (PostgREST) donor store.
//!
//! Talks to `{project_url}/rest/v1/{table}` directly with reqwest; the
//! project's anon key goes in both the `apikey` and bearer headers.
//!
//! A client built with [`SupabaseClient::from_manager`] re-reads the
//! `[database]` section on every operation, so a reloaded `lifeware.toml`
//! (new table, new env var names, new timeout) applies without a restart.

use crate::db::traits::DonorStore;
use crate::types::{AppError, Result};
use crate::utils::toml_config::{LifewareConfig, LifewareConfigManager};
use async_trait::async_trait;
use lifeware_donor::{Donor, DonorQuery, NewDonor};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Connection settings, resolved from configuration and the environment.
#[derive(Debug, Clone)]
pub struct SupabaseSettings {
    pub url: Option<String>,
    pub key: Option<String>,
    pub table: String,
    pub timeout: Duration,
}

impl SupabaseSettings {
    pub fn from_config(config: &LifewareConfig) -> Self {
        Self {
            url: config.supabase_url(),
            key: config.supabase_key(),
            table: config.database.donor_table.clone(),
            timeout: Duration::from_secs(config.database.timeout_secs),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.key.is_some()
    }

    fn endpoint(&self) -> Result<String> {
        let base = self
            .url
            .as_deref()
            .ok_or_else(|| AppError::NotConfigured("Database".to_string()))?;
        Ok(format!(
            "{}/rest/v1/{}",
            base.trim_end_matches('/'),
            self.table
        ))
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let key = self
            .key
            .as_deref()
            .ok_or_else(|| AppError::NotConfigured("Database".to_string()))?;

        let mut headers = HeaderMap::new();
        let invalid = |_| AppError::Internal("Supabase key contains invalid characters".to_string());
        headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid)?);
        headers.insert(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key)).map_err(invalid)?,
        );
        Ok(headers)
    }
}

enum SettingsSource {
    Fixed(SupabaseSettings),
    Live(Arc<LifewareConfigManager>),
}

pub struct SupabaseClient {
    http: reqwest::Client,
    source: SettingsSource,
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    hint: Option<String>,
}

impl SupabaseClient {
    /// Client pinned to one set of settings.
    pub fn new(settings: SupabaseSettings) -> Result<Self> {
        if !settings.is_configured() {
            tracing::warn!("Supabase URL/key not set; donor directory will serve demo data");
        }
        Self::build(SettingsSource::Fixed(settings))
    }

    /// Client that resolves its settings from the live configuration on
    /// every operation.
    pub fn from_manager(config_manager: Arc<LifewareConfigManager>) -> Result<Self> {
        if !SupabaseSettings::from_config(&config_manager.config()).is_configured() {
            tracing::warn!("Supabase URL/key not set; donor directory will serve demo data");
        }
        Self::build(SettingsSource::Live(config_manager))
    }

    pub fn from_config(config: &LifewareConfig) -> Result<Self> {
        Self::new(SupabaseSettings::from_config(config))
    }

    fn build(source: SettingsSource) -> Result<Self> {
        // Timeouts are set per request from the current settings
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, source })
    }

    /// Settings in effect right now
    pub fn settings(&self) -> SupabaseSettings {
        match &self.source {
            SettingsSource::Fixed(settings) => settings.clone(),
            SettingsSource::Live(manager) => SupabaseSettings::from_config(&manager.config()),
        }
    }

    pub fn table(&self) -> String {
        self.settings().table
    }

    /// Run `operation` only when credentials are present.
    ///
    /// The settings are resolved once and handed to `operation`, so a reload
    /// halfway through never mixes two configurations. Unconfigured clients
    /// fail fast with `NotConfigured`; failures from a configured backend are
    /// logged here once so callers don't have to.
    pub async fn safe_operation<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(SupabaseSettings) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let settings = self.settings();
        if !settings.is_configured() {
            tracing::debug!("Supabase not configured, skipping operation");
            return Err(AppError::NotConfigured("Database".to_string()));
        }

        let table = settings.table.clone();
        let result = operation(settings).await;
        if let Err(ref e) = result {
            tracing::error!(table = %table, "Supabase operation failed: {}", e);
        }
        result
    }

    fn get(&self, settings: &SupabaseSettings) -> Result<RequestBuilder> {
        Ok(self
            .http
            .get(settings.endpoint()?)
            .headers(settings.auth_headers()?)
            .timeout(settings.timeout))
    }

    async fn fetch_rows(
        &self,
        settings: &SupabaseSettings,
        params: Vec<(String, String)>,
    ) -> Result<Vec<Donor>> {
        let response = self
            .get(settings)?
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::Database(format!("Request to Supabase failed: {}", e)))?;

        let response = check_status(response).await?;
        response
            .json::<Vec<Donor>>()
            .await
            .map_err(|e| AppError::Database(format!("Unexpected donor rows: {}", e)))
    }
}

#[async_trait]
impl DonorStore for SupabaseClient {
    fn is_configured(&self) -> bool {
        self.settings().is_configured()
    }

    async fn list_donors(&self) -> Result<Vec<Donor>> {
        let params = postgrest_params(&DonorQuery::default());
        self.safe_operation(|settings| async move { self.fetch_rows(&settings, params).await })
            .await
    }

    async fn search_donors(&self, query: &DonorQuery) -> Result<Vec<Donor>> {
        let params = postgrest_params(query);
        self.safe_operation(|settings| async move { self.fetch_rows(&settings, params).await })
            .await
    }

    async fn insert_donor(&self, donor: &NewDonor) -> Result<Donor> {
        self.safe_operation(|settings| async move {
            let response = self
                .http
                .post(settings.endpoint()?)
                .headers(settings.auth_headers()?)
                .timeout(settings.timeout)
                .header("Prefer", "return=representation")
                .json(&[donor])
                .send()
                .await
                .map_err(|e| AppError::Database(format!("Request to Supabase failed: {}", e)))?;

            let response = check_status(response).await?;
            let mut rows = response
                .json::<Vec<Donor>>()
                .await
                .map_err(|e| AppError::Database(format!("Unexpected insert response: {}", e)))?;

            if rows.is_empty() {
                return Err(AppError::Database(
                    "Insert returned no rows; check the table's select policy".to_string(),
                ));
            }
            Ok(rows.swap_remove(0))
        })
        .await
    }

    async fn count_donors(&self) -> Result<usize> {
        self.safe_operation(|settings| async move {
            let response = self
                .get(&settings)?
                .query(&[("select", "id")])
                .header("Prefer", "count=exact")
                .header("Range-Unit", "items")
                .header("Range", "0-0")
                .send()
                .await
                .map_err(|e| AppError::Database(format!("Request to Supabase failed: {}", e)))?;

            let response = check_status(response).await?;
            let total = response
                .headers()
                .get(reqwest::header::CONTENT_RANGE)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_content_range_total);

            match total {
                Some(total) => Ok(total),
                None => {
                    // Without an exact count, fall back to whatever rows came back
                    let rows: Vec<serde_json::Value> = response.json().await.map_err(|e| {
                        AppError::Database(format!("Unexpected count response: {}", e))
                    })?;
                    Ok(rows.len())
                }
            }
        })
        .await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<PostgrestError>(&body) {
        Ok(err) => match err.hint {
            Some(hint) => format!("{} ({})", err.message, hint),
            None => err.message,
        },
        Err(_) if body.is_empty() => status.to_string(),
        Err(_) => body,
    };

    Err(AppError::Database(format!(
        "Supabase returned {}: {}",
        status.as_u16(),
        message
    )))
}

/// Translate a directory query into PostgREST filter parameters.
pub fn postgrest_params(query: &DonorQuery) -> Vec<(String, String)> {
    let query = query.clone().normalized();
    let mut params = vec![("select".to_string(), "*".to_string())];

    if let Some(group) = query.blood_group {
        params.push(("blood_group".to_string(), format!("eq.{}", group)));
    }

    if let Some(location) = &query.location {
        params.push((
            "location".to_string(),
            format!("ilike.{}", quote_pattern(location)),
        ));
    }

    if let Some(search) = &query.search_query {
        let pattern = quote_pattern(search);
        params.push((
            "or".to_string(),
            format!("(name.ilike.{},location.ilike.{})", pattern, pattern),
        ));
    }

    params.push(("order".to_string(), "name.asc".to_string()));
    params
}

// Double-quoted so commas and parentheses in user text can't break the filter
fn quote_pattern(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"*{}*\"", escaped)
}

/// `0-0/42` -> 42; `*/0` -> 0; `0-0/*` -> None
fn parse_content_range_total(value: &str) -> Option<usize> {
    value.rsplit_once('/')?.1.parse().ok()
}
