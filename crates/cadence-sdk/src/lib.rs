//! Cadence Rust SDK
//!
//! Client library for blending voice clone DNA through the Cadence API:
//! fetch source profiles, edit a [`WeightMatrix`](cadence_domain::WeightMatrix),
//! and submit the merge.
//!
//! # Example
//!
//! ```no_run
//! use cadence_domain::{Category, CloneId, WeightMatrix};
//! use cadence_sdk::CadenceClient;
//!
//! # async fn run() -> Result<(), cadence_sdk::SdkError> {
//! let client = CadenceClient::new("http://localhost:8000")?;
//! let ids = vec![CloneId::new("c1").unwrap(), CloneId::new("c2").unwrap()];
//!
//! let mut matrix = WeightMatrix::new();
//! for (id, outcome) in client.fetch_profiles(&ids).await {
//!     matrix.add_source(id, outcome.profile());
//! }
//! matrix.set_weight(&ids[1], Category::Tone, 80.0).unwrap();
//!
//! let merged = client.merge("Blend A", &matrix).await?;
//! println!("created {}", merged.id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod aggregator;
pub mod api;
pub mod cache;
mod client;
mod config;
mod error;
pub mod merge;
pub mod mock;
pub mod transport;

pub use aggregator::{ProfileAggregator, ProfileOutcome};
pub use api::{CloneList, CloneResponse, MergeRequest, MergeSourceClone};
pub use cache::{QueryCache, QueryKey};
pub use client::CadenceClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_STALE_AFTER_SECS, DEFAULT_TIMEOUT_SECS};
pub use error::SdkError;
pub use merge::{MergeSubmitter, SubmissionState};
pub use transport::{HttpTransport, Transport};
