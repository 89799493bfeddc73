//! Clients for external services

pub mod enrichment_client;

pub use enrichment_client::{EnrichmentClient, EnrichmentError};
