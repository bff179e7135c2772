use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },

    #[error("{key} must not be blank")]
    Blank { key: &'static str },

    #[error("duplicate endpoint name: {0}")]
    DuplicateEndpoint(String),
}

/// Failure of a single upstream call. Every variant means "skip this endpoint".
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON from {url}: {source} (body starts with {preview:?})")]
    InvalidJson {
        url: String,
        preview: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not connect to {uri}: {source}")]
    Connect {
        uri: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("write to {database}.{collection} failed: {source}")]
    Write {
        database: String,
        collection: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("document is not BSON-encodable: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("record is not JSON-serializable: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }
}
