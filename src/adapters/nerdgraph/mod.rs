//! New Relic NerdGraph adapter
//!
//! This module provides the integration with the NerdGraph GraphQL API: the
//! query documents and response envelopes, the HTTP client, and the
//! monitor search and detail fetch operations built on top of it.

pub mod client;
pub mod fetcher;
pub mod models;

pub use client::{query_as, GraphQlClient, NerdGraphClient};
pub use fetcher::{search_monitors, select_monitors, DetailFetcher};
