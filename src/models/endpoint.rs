use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub type QueryParams = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

/// A named upstream resource, addressed relative to a source's base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub query_params: Option<QueryParams>,
}

impl EndpointSpec {
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            method: HttpMethod::Get,
            query_params: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params
            .get_or_insert_with(QueryParams::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Provenance of one successful upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchMetadata {
    pub source_name: String,
    pub requested_path: String,
    pub http_status: u16,
    pub fetched_at: DateTime<Utc>,
    pub query_params: Option<QueryParams>,
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub payload: Value,
    pub metadata: FetchMetadata,
}
