//! Intent-level operations shared by the HTTP handlers and the CLI.
//!
//! [`DonorGateway`] wraps the donor store with the demo-data and
//! empty-list fallbacks; [`HealthAssistant`] wraps the chat model with the
//! Thalassemia support prompt and the "try again later" fallback.

#![allow(missing_docs)]

pub mod assistant;
pub mod donors;

pub use assistant::HealthAssistant;
pub use donors::{DonorGateway, DonorListing};
