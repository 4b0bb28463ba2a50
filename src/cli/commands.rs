//! `config` and `donors` subcommands

use super::output::Output;
use crate::gateway::DonorGateway;
use crate::types::{AppError, Result};
use crate::utils::toml_config::{ConfigError, LifewareConfig};
use lifeware_donor::{BloodGroup, Donor, DonorQuery};
use std::path::Path;

/// Print (and optionally validate) the configuration at `path`.
pub fn show_config(
    path: &Path,
    full: bool,
    validate: bool,
    output: &Output,
) -> std::result::Result<(), ConfigError> {
    let config = match LifewareConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            output.error(&e.to_string());
            if matches!(e, ConfigError::FileNotFound(_)) {
                output.hint("Run `lifeware-server init` to create one");
            }
            return Err(e);
        }
    };

    output.header("Configuration");
    output.kv("file", &path.display().to_string());
    output.kv("listen", &config.bind_address());
    output.kv("ui_dir", &config.server.ui_dir.display().to_string());
    output.kv("donor_table", &config.database.donor_table);
    output.kv(
        "database",
        if config.supabase_url().is_some() && config.supabase_key().is_some() {
            "configured"
        } else {
            "not configured (demo data)"
        },
    );
    output.kv("assistant_model", &config.assistant.model);
    output.kv(
        "assistant",
        if config.assistant_api_key().is_some() {
            "configured"
        } else {
            "not configured (fallback replies)"
        },
    );

    if full {
        output.header("Resolved TOML");
        match toml::to_string_pretty(&config) {
            Ok(text) => println!("{}", text),
            Err(e) => output.warning(&format!("Could not render configuration: {}", e)),
        }
    }

    if validate {
        output.header("Validation");
        let warnings = config.validate_with_warnings()?;
        if warnings.is_empty() {
            output.success("Configuration is valid");
        } else {
            output.success("Configuration is valid, with warnings:");
            for warning in &warnings {
                output.warning(&warning.message);
            }
        }
    }

    Ok(())
}

/// Build the directory query from `donors list` flags.
pub fn donor_query(
    query: Option<String>,
    blood_group: Option<String>,
    location: Option<String>,
) -> Result<DonorQuery> {
    let blood_group = blood_group
        .map(|raw| raw.parse::<BloodGroup>())
        .transpose()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    Ok(DonorQuery {
        search_query: query,
        blood_group,
        location,
    }
    .normalized())
}

pub async fn list_donors(gateway: &DonorGateway, query: DonorQuery, output: &Output) {
    let listing = gateway.search_donors(query).await;

    if listing.demo {
        output.warning("Database not configured: showing demo donors");
    }

    if listing.donors.is_empty() {
        output.info("No donors found");
        return;
    }

    let rows: Vec<Vec<String>> = listing.donors.iter().map(donor_row).collect();
    output.newline();
    output.table(&["Name", "Group", "Location", "Contact"], &rows);
    output.newline();
    output.info(&format!("{} donor(s)", listing.donors.len()));
}

pub async fn count_donors(gateway: &DonorGateway, output: &Output) {
    let count = gateway.donor_count().await;
    if !gateway.is_configured() {
        output.warning("Database not configured: counting demo donors");
    }
    output.kv("registered donors", &count.to_string());
}

fn donor_row(donor: &Donor) -> Vec<String> {
    vec![
        donor.name.clone(),
        donor
            .blood_group
            .map(|g| g.to_string())
            .unwrap_or_else(|| "?".to_string()),
        donor.location.clone(),
        donor.contact().unwrap_or("-").to_string(),
    ]
}
