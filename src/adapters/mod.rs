//! External system integrations for tfsynth.
//!
//! - [`nerdgraph`] - New Relic NerdGraph (GraphQL) integration
//!
//! # Design Pattern
//!
//! Adapters isolate the remote API behind the [`nerdgraph::GraphQlClient`]
//! trait so the export pipeline can be driven by an in-memory implementation
//! in tests.
//!
//! ```rust,no_run
//! use tfsynth::adapters::nerdgraph::{search_monitors, NerdGraphClient};
//! use tfsynth::config::{secret_string, NewRelicConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NewRelicConfig {
//!     account_id: 1234567,
//!     api_key: secret_string("NRAK-EXAMPLE".to_string()),
//!     region: "US".to_string(),
//!     graphql_url: None,
//!     timeout_seconds: 30,
//! };
//!
//! let client = NerdGraphClient::new(config)?;
//! let monitors = search_monitors(&client, "domain = 'SYNTH'").await?;
//! println!("found {} monitors", monitors.len());
//! # Ok(())
//! # }
//! ```

pub mod nerdgraph;
