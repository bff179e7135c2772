mod cve;
mod urlhaus;

pub use cve::{CveNormalizer, CveShape, DEFAULT_PRODUCTS_KEY, MAX_ITEMS};
pub use urlhaus::{
    flatten_batches, normalize_record, normalize_records, normalize_urlhaus, UNKNOWN_REPORTER,
};

use serde_json::Value;

/// Strings render bare, everything else as compact JSON.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
