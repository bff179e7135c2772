mod memory;
mod mongo;

pub use memory::InMemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Where a pipeline writes: connection string, database and collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreTarget {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// Insert-only document store. Each call owns its connection for the
/// duration of the call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, target: &StoreTarget, document: Value) -> Result<(), StoreError>;

    /// Returns the number of documents written.
    async fn insert_many(
        &self,
        target: &StoreTarget,
        documents: Vec<Value>,
    ) -> Result<usize, StoreError>;
}
