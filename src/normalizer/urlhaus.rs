use serde_json::{Map, Value};

use super::stringify;
use crate::models::UrlThreatRecord;

pub const UNKNOWN_REPORTER: &str = "unknown";

/// Flattens `{batch_id: [record, ..]}` into one list, tagging each record
/// with its batch id under `"id"`. Non-list batches and non-object records
/// are skipped.
pub fn flatten_batches(payload: &Value) -> Vec<Map<String, Value>> {
    let Some(batches) = payload.as_object() else {
        return Vec::new();
    };

    batches
        .iter()
        .filter_map(|(batch_id, records)| records.as_array().map(|list| (batch_id, list)))
        .flat_map(|(batch_id, records)| {
            records.iter().filter_map(Value::as_object).map(move |record| {
                let mut tagged = record.clone();
                tagged.insert("id".to_string(), Value::String(batch_id.clone()));
                tagged
            })
        })
        .collect()
}

pub fn normalize_urlhaus(payload: &Value) -> Vec<UrlThreatRecord> {
    normalize_records(&flatten_batches(payload))
}

pub fn normalize_records(records: &[Map<String, Value>]) -> Vec<UrlThreatRecord> {
    records.iter().map(normalize_record).collect()
}

pub fn normalize_record(record: &Map<String, Value>) -> UrlThreatRecord {
    UrlThreatRecord {
        url: text(record, "url").unwrap_or_default(),
        date_added: non_empty(record, "date_added")
            .or_else(|| text(record, "dateadded"))
            .unwrap_or_default(),
        threat: text(record, "threat").unwrap_or_default(),
        tags: tags(record),
        reporter: text(record, "reporter").unwrap_or_else(|| UNKNOWN_REPORTER.to_string()),
        url_status: text(record, "url_status").unwrap_or_default(),
        last_online: text(record, "last_online").unwrap_or_default(),
        urlhaus_reference: non_empty(record, "urlhaus_reference")
            .or_else(|| text(record, "urlhaus_link"))
            .unwrap_or_default(),
    }
}

// null counts as absent
fn text(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null => None,
        value => Some(stringify(value)),
    }
}

fn non_empty(record: &Map<String, Value>, key: &str) -> Option<String> {
    text(record, key).filter(|value| !value.is_empty())
}

fn tags(record: &Map<String, Value>) -> Vec<String> {
    match record.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(stringify)
            .collect(),
        Some(Value::String(tag)) if !tag.is_empty() => vec![tag.clone()],
        _ => Vec::new(),
    }
}
