//! Configuration utilities.

/// `lifeware.toml` loading, validation and hot reload.
#[allow(missing_docs)]
pub mod toml_config;
