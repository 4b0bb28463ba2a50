//! Routed pages

pub mod chatbot;
pub mod donor_search;
pub mod home;
pub mod register_donor;
