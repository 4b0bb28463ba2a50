//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Health assistant handlers.
pub mod chat;
/// Donor directory and registration handlers.
pub mod donors;
/// Health and service status handlers.
pub mod status;
