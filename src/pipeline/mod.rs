mod cve;
mod loader;
mod urlhaus;

pub use cve::{CvePipeline, CVE_SOURCE_TAG};
pub use loader::{LoadOutcome, Loader};
pub use urlhaus::{UrlhausPipeline, URLHAUS_SOURCE_TAG};

/// Per-run tally. Informational only; failures never abort a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub attempted: usize,
    pub fetched: usize,
    pub failed: usize,
    pub stored: usize,
}

impl RunReport {
    fn record_load(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Inserted(count) => self.stored += count,
            LoadOutcome::Failed => self.failed += 1,
            LoadOutcome::Skipped => {}
        }
    }
}
