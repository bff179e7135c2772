use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::FetchMetadata;

/// Bump when the stored envelope layout changes.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CveSummary {
    pub id: Value,
    pub cvss: Value,
    pub summary: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorProducts {
    pub vendor: Value,
    pub products: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarValue {
    pub value: String,
}

/// One flattened record produced from a CVE API response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CveRecord {
    Summary(CveSummary),
    VendorProducts(VendorProducts),
    Value(ScalarValue),
    /// Unrecognized object, stored as received.
    Passthrough(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedCve {
    One(CveRecord),
    Many(Vec<CveRecord>),
}

impl NormalizedCve {
    pub(crate) fn len(&self) -> usize {
        match self {
            NormalizedCve::One(_) => 1,
            NormalizedCve::Many(records) => records.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlThreatRecord {
    pub url: String,
    pub date_added: String,
    pub threat: String,
    pub tags: Vec<String>,
    pub reporter: String,
    pub url_status: String,
    pub last_online: String,
    pub urlhaus_reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtlInfo {
    pub source: String,
    pub ingested_at: DateTime<Utc>,
    pub schema_version: u32,
}

impl EtlInfo {
    pub fn now(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ingested_at: Utc::now(),
            schema_version: SCHEMA_VERSION,
        }
    }
}

/// Document shape written to the store.
#[derive(Debug, Clone, Serialize)]
pub struct StoredRecord<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<FetchMetadata>,
    pub etl: EtlInfo,
}
