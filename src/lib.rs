//! Threat-intelligence ETL: pulls CVE and URLhaus feeds over HTTP, flattens
//! their JSON into a few fixed record shapes and inserts them into MongoDB.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod store;

pub use config::AppConfig;
pub use error::{ConfigError, FetchError, StoreError};
pub use fetcher::{Fetcher, HttpFetcher};
pub use pipeline::{CvePipeline, LoadOutcome, RunReport, UrlhausPipeline};
pub use store::{DocumentStore, InMemoryStore, MongoStore, StoreTarget};
