//! Donor store abstraction
//!
//! The gateway talks to the directory through [`DonorStore`] so the hosted
//! backend can be swapped (or mocked in tests) without touching handlers.

use crate::types::Result;
use async_trait::async_trait;
use lifeware_donor::{Donor, DonorQuery, NewDonor};

/// Operations the donor directory needs from its backing store.
///
/// Implementations return [`AppError::NotConfigured`](crate::types::AppError::NotConfigured)
/// from every data method when they have no credentials, so callers can
/// tell "no backend" apart from "backend failed".
#[async_trait]
pub trait DonorStore: Send + Sync {
    /// Whether credentials for the store are present
    fn is_configured(&self) -> bool;

    /// All donors, ordered by name
    async fn list_donors(&self) -> Result<Vec<Donor>>;

    /// Donors matching the query, ordered by name
    async fn search_donors(&self, query: &DonorQuery) -> Result<Vec<Donor>>;

    /// Insert a validated donor and return the stored row
    async fn insert_donor(&self, donor: &NewDonor) -> Result<Donor>;

    /// Number of registered donors
    async fn count_donors(&self) -> Result<usize>;
}
