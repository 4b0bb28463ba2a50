//! # lifeware-donor
//!
//! The donor model shared by the Lifeware server and its browser UI.
//!
//! This crate has no async runtime or HTTP dependency, so it compiles for
//! both native targets and `wasm32-unknown-unknown`. It owns:
//!
//! - [`BloodGroup`] - the eight ABO/Rh groups and their wire spelling
//! - [`Donor`] - a directory row as read back from the store
//! - [`DonorRegistration`] / [`NewDonor`] - the registration payload and
//!   its validated insert form
//! - [`DonorQuery`] - directory filtering (name/location/blood group)
//! - [`demo_donors`] - the fallback directory used when no store is configured
//!
//! ## Example
//!
//! ```rust
//! use lifeware_donor::{BloodGroup, DonorQuery, demo_donors};
//!
//! let query = DonorQuery {
//!     search_query: Some("new york".to_string()),
//!     blood_group: Some(BloodGroup::OPositive),
//!     location: None,
//! };
//!
//! let matches = query.apply(&demo_donors());
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].name, "Sarah Johnson");
//! ```

#![warn(missing_docs)]

mod blood_group;
mod demo;
mod donor;
mod query;
mod validation;

pub use blood_group::{BloodGroup, ParseBloodGroupError};
pub use demo::demo_donors;
pub use donor::{Donor, DonorId, NewDonor};
pub use query::DonorQuery;
pub use validation::{
    DonorRegistration, ValidationErrors, MAX_DONOR_AGE, MIN_DONOR_AGE,
};
