use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentStore, StoreTarget};
use crate::error::StoreError;

/// Process-local store keyed by `(database, collection)`. Can be switched
/// into a failing mode to exercise error isolation.
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<(String, String), Vec<Value>>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of insert calls received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn documents(&self, database: &str, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .map(|guard| {
                guard
                    .get(&(database.to_string(), collection.to_string()))
                    .cloned()
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    fn append(&self, target: &StoreTarget, documents: Vec<Value>) -> Result<usize, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(format!(
                "in-memory store rejected write to {}.{}",
                target.database, target.collection
            )));
        }
        let count = documents.len();
        self.collections
            .lock()
            .map_err(|_| StoreError::unavailable("poisoned lock"))?
            .entry((target.database.clone(), target.collection.clone()))
            .or_default()
            .extend(documents);
        Ok(count)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_one(&self, target: &StoreTarget, document: Value) -> Result<(), StoreError> {
        self.append(target, vec![document]).map(|_| ())
    }

    async fn insert_many(
        &self,
        target: &StoreTarget,
        documents: Vec<Value>,
    ) -> Result<usize, StoreError> {
        self.append(target, documents)
    }
}
