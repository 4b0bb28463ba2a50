//! Donor storage.
//!
//! - [`traits::DonorStore`] - the store abstraction used by the gateway
//! - [`supabase::SupabaseClient`] - the hosted Supabase/PostgREST backend

#![allow(missing_docs)]

pub mod supabase;
pub mod traits;

pub use supabase::{SupabaseClient, SupabaseSettings};
pub use traits::DonorStore;
