use tracing::{debug, info, warn};

use super::{Loader, RunReport};
use crate::config::UrlhausConfig;
use crate::fetcher::Fetcher;
use crate::normalizer::{flatten_batches, normalize_records};
use crate::store::DocumentStore;

pub const URLHAUS_SOURCE_TAG: &str = "urlhaus_recent";

/// Single-endpoint batch flow for the URLhaus recent-URLs feed.
pub struct UrlhausPipeline<'a> {
    config: &'a UrlhausConfig,
    fetcher: &'a dyn Fetcher,
    loader: Loader<'a>,
}

impl<'a> UrlhausPipeline<'a> {
    pub fn new(
        config: &'a UrlhausConfig,
        fetcher: &'a dyn Fetcher,
        store: &'a dyn DocumentStore,
    ) -> Self {
        Self {
            config,
            fetcher,
            loader: Loader::new(store, &config.target, URLHAUS_SOURCE_TAG),
        }
    }

    pub async fn run(&self) -> RunReport {
        info!("Starting URLhaus ETL...");
        let mut report = RunReport {
            attempted: 1,
            ..RunReport::default()
        };

        let records = match self.fetcher.fetch(&self.config.endpoint).await {
            Ok(fetched) => {
                report.fetched = 1;
                if !fetched.payload.is_object() {
                    warn!("URLhaus payload is not an object of batches; nothing to extract");
                }
                let raw = flatten_batches(&fetched.payload);
                info!("Extracted {} records from JSON", raw.len());
                if let Some(sample) = raw.first() {
                    debug!("Sample record: {}", serde_json::Value::Object(sample.clone()));
                }
                normalize_records(&raw)
            }
            Err(_) => {
                report.failed = 1;
                Vec::new()
            }
        };

        let outcome = self.loader.load_batch(records).await;
        report.record_load(outcome);

        info!("ETL completed");
        report
    }
}
