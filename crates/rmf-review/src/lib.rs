//! Review workflow for ReMindful learning cards
//!
//! Wraps the [`rmf_srs`] scheduler with what a review submission needs around it:
//! card and review-log models, the storage seams, configuration and logging.

pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod service;
pub mod store;
pub mod tracing;
pub mod validation;

pub use config::{Environment, ReviewConfig};
pub use error::ReviewError;
pub use memory::MemoryStore;
pub use service::ReviewService;
pub use store::{CardStore, ReviewLogSink, StoreError};
