use crate::db::DonorStore;
use crate::types::{AppError, Result};
use lifeware_donor::{demo_donors, Donor, DonorQuery, DonorRegistration};
use std::sync::Arc;

/// Donor rows plus whether they came from the built-in demo set
#[derive(Debug, Clone)]
pub struct DonorListing {
    pub donors: Vec<Donor>,
    pub demo: bool,
}

impl DonorListing {
    fn live(donors: Vec<Donor>) -> Self {
        Self {
            donors,
            demo: false,
        }
    }

    fn demo(donors: Vec<Donor>) -> Self {
        Self { donors, demo: true }
    }
}

/// Directory operations used by the HTTP handlers and the CLI.
///
/// Reads never fail: without a database they serve demo data, and a
/// failing database yields an empty result. Registration is the only
/// operation that reports errors to the caller.
pub struct DonorGateway {
    store: Arc<dyn DonorStore>,
}

impl DonorGateway {
    pub fn new(store: Arc<dyn DonorStore>) -> Self {
        Self { store }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_configured()
    }

    pub async fn list_donors(&self) -> DonorListing {
        match self.store.list_donors().await {
            Ok(donors) => DonorListing::live(donors),
            Err(AppError::NotConfigured(_)) => DonorListing::demo(demo_donors()),
            Err(e) => {
                tracing::error!("Error fetching donors: {}", e);
                DonorListing::live(Vec::new())
            }
        }
    }

    pub async fn search_donors(&self, query: DonorQuery) -> DonorListing {
        let query = query.normalized();
        if query.is_empty() {
            return self.list_donors().await;
        }

        match self.store.search_donors(&query).await {
            Ok(donors) => DonorListing::live(donors),
            Err(AppError::NotConfigured(_)) => DonorListing::demo(query.apply(&demo_donors())),
            Err(e) => {
                tracing::error!("Error searching donors: {}", e);
                DonorListing::live(Vec::new())
            }
        }
    }

    pub async fn donor_count(&self) -> usize {
        match self.store.count_donors().await {
            Ok(count) => count,
            Err(AppError::NotConfigured(_)) => demo_donors().len(),
            Err(e) => {
                tracing::error!("Error counting donors: {}", e);
                0
            }
        }
    }

    /// Validate and store a registration.
    pub async fn register_donor(&self, registration: DonorRegistration) -> Result<Donor> {
        let donor = registration.validate()?;

        let stored = self.store.insert_donor(&donor).await?;
        tracing::info!(
            donor_id = ?stored.id,
            blood_group = ?stored.blood_group,
            "Registered new donor"
        );
        Ok(stored)
    }
}
