use tracing::{debug, info, warn};

use super::{Loader, RunReport};
use crate::config::CveConfig;
use crate::fetcher::Fetcher;
use crate::normalizer::CveNormalizer;
use crate::store::DocumentStore;

pub const CVE_SOURCE_TAG: &str = "cve_full";

/// Fetch, normalize and store each configured CVE module in turn.
pub struct CvePipeline<'a> {
    config: &'a CveConfig,
    fetcher: &'a dyn Fetcher,
    normalizer: CveNormalizer,
    loader: Loader<'a>,
}

impl<'a> CvePipeline<'a> {
    pub fn new(config: &'a CveConfig, fetcher: &'a dyn Fetcher, store: &'a dyn DocumentStore) -> Self {
        Self {
            config,
            fetcher,
            normalizer: CveNormalizer::new(config.products_key.clone()),
            loader: Loader::new(store, &config.target, CVE_SOURCE_TAG),
        }
    }

    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        for endpoint in &self.config.endpoints {
            report.attempted += 1;
            let fetched = match self.fetcher.fetch(endpoint).await {
                Ok(fetched) => fetched,
                Err(_) => {
                    warn!("Skipping module {}", endpoint.name);
                    report.failed += 1;
                    continue;
                }
            };
            report.fetched += 1;

            let normalized = self.normalizer.normalize(&fetched.payload);
            debug!("Module {} normalized to {} record(s)", endpoint.name, normalized.len());

            let outcome = self.loader.load_one(&normalized, Some(fetched.metadata)).await;
            report.record_load(outcome);
        }

        info!(
            "All modules processed: {} attempted, {} stored, {} failed",
            report.attempted, report.stored, report.failed
        );
        report
    }
}
