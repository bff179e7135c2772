use async_trait::async_trait;
use chrono::DateTime;
use mongodb::bson::{self, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde_json::Value;
use tracing::debug;

use super::{DocumentStore, StoreTarget};
use crate::config::redact_uri;
use crate::error::StoreError;

/// Envelope fields written as BSON dates rather than strings.
const TIMESTAMP_FIELDS: [(&str, &str); 2] = [("etl", "ingested_at"), ("meta", "fetched_at")];

#[derive(Debug, Clone)]
pub struct MongoStore {
    app_name: String,
}

impl Default for MongoStore {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

impl MongoStore {
    async fn connect(&self, target: &StoreTarget) -> Result<Client, StoreError> {
        let connect_error = |source| StoreError::Connect {
            uri: redact_uri(&target.uri),
            source,
        };
        let mut options = ClientOptions::parse(&target.uri)
            .await
            .map_err(connect_error)?;
        options.app_name = Some(self.app_name.clone());
        debug!("Connecting to {}", redact_uri(&target.uri));
        Client::with_options(options).map_err(connect_error)
    }

    fn collection(client: &Client, target: &StoreTarget) -> Collection<Document> {
        client
            .database(&target.database)
            .collection::<Document>(&target.collection)
    }

    fn write_error(target: &StoreTarget, source: mongodb::error::Error) -> StoreError {
        StoreError::Write {
            database: target.database.clone(),
            collection: target.collection.clone(),
            source,
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, target: &StoreTarget, document: Value) -> Result<(), StoreError> {
        let document = encode(&document)?;
        let client = self.connect(target).await?;
        let result = Self::collection(&client, target)
            .insert_one(document, None)
            .await;
        client.shutdown().await;
        result
            .map(|_| ())
            .map_err(|source| Self::write_error(target, source))
    }

    async fn insert_many(
        &self,
        target: &StoreTarget,
        documents: Vec<Value>,
    ) -> Result<usize, StoreError> {
        let documents = documents
            .iter()
            .map(encode)
            .collect::<Result<Vec<_>, _>>()?;
        let client = self.connect(target).await?;
        let result = Self::collection(&client, target)
            .insert_many(documents, None)
            .await;
        client.shutdown().await;
        result
            .map(|inserted| inserted.inserted_ids.len())
            .map_err(|source| Self::write_error(target, source))
    }
}

/// Converts a JSON envelope to BSON, restoring the RFC 3339 envelope
/// timestamps to native dates.
pub(crate) fn encode(document: &Value) -> Result<Document, StoreError> {
    let mut document = bson::to_document(document)?;
    for (section, field) in TIMESTAMP_FIELDS {
        let Ok(inner) = document.get_document_mut(section) else {
            continue;
        };
        let Some(parsed) = inner
            .get_str(field)
            .ok()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        else {
            continue;
        };
        inner.insert(
            field,
            Bson::DateTime(bson::DateTime::from_millis(parsed.timestamp_millis())),
        );
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EtlInfo, FetchMetadata, StoredRecord};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn envelope_timestamps_become_bson_dates() {
        let fetched_at = Utc::now();
        let record = StoredRecord {
            data: json!({"id": "CVE-2024-12345"}),
            meta: Some(FetchMetadata {
                source_name: "cve_details".into(),
                requested_path: "/cve/CVE-2024-12345".into(),
                http_status: 200,
                fetched_at,
                query_params: None,
            }),
            etl: EtlInfo::now("cve_full"),
        };
        let ingested_at = record.etl.ingested_at;

        let document = encode(&serde_json::to_value(&record).unwrap()).unwrap();

        let etl = document.get_document("etl").unwrap();
        assert_eq!(
            etl.get("ingested_at"),
            Some(&Bson::DateTime(bson::DateTime::from_millis(
                ingested_at.timestamp_millis()
            )))
        );
        assert_eq!(etl.get_str("source").unwrap(), "cve_full");
        let meta = document.get_document("meta").unwrap();
        assert!(matches!(meta.get("fetched_at"), Some(Bson::DateTime(_))));
        assert_eq!(
            meta.get_datetime("fetched_at").unwrap().timestamp_millis(),
            fetched_at.timestamp_millis()
        );
    }

    #[test]
    fn batch_envelope_without_meta_is_encoded() {
        let record = StoredRecord {
            data: json!({"url": "http://bad.example", "date_added": "2024-01-01"}),
            meta: None,
            etl: EtlInfo::now("urlhaus_recent"),
        };

        let document = encode(&serde_json::to_value(&record).unwrap()).unwrap();

        assert!(matches!(
            document.get_document("etl").unwrap().get("ingested_at"),
            Some(Bson::DateTime(_))
        ));
        assert!(!document.contains_key("meta"));
        let data = document.get_document("data").unwrap();
        assert_eq!(data.get_str("date_added").unwrap(), "2024-01-01");
    }

    #[test]
    fn data_fields_are_left_alone() {
        let document = encode(&json!({"data": {"ingested_at": "2024-01-01T00:00:00Z"}})).unwrap();
        assert_eq!(
            document
                .get_document("data")
                .unwrap()
                .get_str("ingested_at")
                .unwrap(),
            "2024-01-01T00:00:00Z"
        );
    }
}
