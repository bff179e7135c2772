use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::error::StoreError;
use crate::models::{EtlInfo, FetchMetadata, StoredRecord};
use crate::store::{DocumentStore, StoreTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Inserted(usize),
    /// Nothing to write; the store was not contacted.
    Skipped,
    /// The store rejected the write. Already logged.
    Failed,
}

/// Wraps records in the storage envelope and writes them to one collection.
pub struct Loader<'a> {
    store: &'a dyn DocumentStore,
    target: &'a StoreTarget,
    source: &'static str,
}

impl<'a> Loader<'a> {
    pub fn new(store: &'a dyn DocumentStore, target: &'a StoreTarget, source: &'static str) -> Self {
        Self {
            store,
            target,
            source,
        }
    }

    /// One document holding `data` and its provenance.
    pub async fn load_one<T: Serialize>(&self, data: T, meta: Option<FetchMetadata>) -> LoadOutcome {
        let module = meta
            .as_ref()
            .map(|meta| meta.source_name.clone())
            .unwrap_or_else(|| self.source.to_string());
        let envelope = StoredRecord {
            data,
            meta,
            etl: EtlInfo::now(self.source),
        };

        let result = match serde_json::to_value(&envelope) {
            Ok(document) => self.store.insert_one(self.target, document).await,
            Err(err) => Err(StoreError::from(err)),
        };
        match result {
            Ok(()) => {
                info!("Inserted module {} record", module);
                LoadOutcome::Inserted(1)
            }
            Err(err) => self.failed(err),
        }
    }

    /// One document per record, all sharing a single ingestion timestamp.
    pub async fn load_batch<T: Serialize>(&self, records: Vec<T>) -> LoadOutcome {
        if records.is_empty() {
            info!("No data to load into {}.{}", self.target.database, self.target.collection);
            return LoadOutcome::Skipped;
        }

        let etl = EtlInfo::now(self.source);
        let documents = records
            .into_iter()
            .map(|data| {
                serde_json::to_value(StoredRecord {
                    data,
                    meta: None,
                    etl: etl.clone(),
                })
            })
            .collect::<Result<Vec<Value>, _>>();

        let result = match documents {
            Ok(documents) => self.store.insert_many(self.target, documents).await,
            Err(err) => Err(StoreError::from(err)),
        };
        match result {
            Ok(count) => {
                info!(
                    "Inserted {} records into {}.{}",
                    count, self.target.database, self.target.collection
                );
                LoadOutcome::Inserted(count)
            }
            Err(err) => self.failed(err),
        }
    }

    fn failed(&self, err: StoreError) -> LoadOutcome {
        error!("MongoDB error ({}): {}", self.source, err);
        LoadOutcome::Failed
    }
}
