use serde_json::{Map, Value};

use super::stringify;
use crate::models::{CveRecord, CveSummary, NormalizedCve, ScalarValue, VendorProducts};

/// Upper bound on list items and vendor products kept per response.
pub const MAX_ITEMS: usize = 10;
pub const DEFAULT_PRODUCTS_KEY: &str = "product";

/// Recognized CVE API response shapes, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CveShape<'a> {
    RecordList(&'a [Value]),
    VendorBrowse(&'a Map<String, Value>),
    CveDetail(&'a Map<String, Value>),
    Opaque(&'a Map<String, Value>),
    Scalar(&'a Value),
}

#[derive(Debug, Clone)]
pub struct CveNormalizer {
    products_key: String,
}

impl Default for CveNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCTS_KEY)
    }
}

impl CveNormalizer {
    pub fn new(products_key: impl Into<String>) -> Self {
        Self {
            products_key: products_key.into(),
        }
    }

    pub fn classify<'a>(&self, payload: &'a Value) -> CveShape<'a> {
        match payload {
            Value::Array(items) => CveShape::RecordList(items),
            Value::Object(map) if map.contains_key(&self.products_key) => {
                CveShape::VendorBrowse(map)
            }
            Value::Object(map) if map.contains_key("id") && map.contains_key("summary") => {
                CveShape::CveDetail(map)
            }
            Value::Object(map) => CveShape::Opaque(map),
            other => CveShape::Scalar(other),
        }
    }

    /// Total over every JSON value; missing fields become null.
    pub fn normalize(&self, payload: &Value) -> NormalizedCve {
        match self.classify(payload) {
            CveShape::RecordList(items) => NormalizedCve::Many(
                items
                    .iter()
                    .take(MAX_ITEMS)
                    .map(|item| match item {
                        Value::Object(map) => CveRecord::Summary(summary(map)),
                        other => scalar(other),
                    })
                    .collect(),
            ),
            CveShape::VendorBrowse(map) => NormalizedCve::One(CveRecord::VendorProducts(
                VendorProducts {
                    vendor: field(map, "vendor"),
                    products: Self::products(map.get(&self.products_key)),
                },
            )),
            CveShape::CveDetail(map) => NormalizedCve::One(CveRecord::Summary(summary(map))),
            CveShape::Opaque(map) => NormalizedCve::One(CveRecord::Passthrough(map.clone())),
            CveShape::Scalar(value) => NormalizedCve::One(scalar(value)),
        }
    }

    fn products(raw: Option<&Value>) -> Vec<Value> {
        match raw {
            Some(Value::Array(items)) => items.iter().take(MAX_ITEMS).cloned().collect(),
            None | Some(Value::Null) => Vec::new(),
            Some(single) => vec![single.clone()],
        }
    }
}

fn field(map: &Map<String, Value>, key: &str) -> Value {
    map.get(key).cloned().unwrap_or(Value::Null)
}

fn summary(map: &Map<String, Value>) -> CveSummary {
    CveSummary {
        id: field(map, "id"),
        cvss: field(map, "cvss"),
        summary: field(map, "summary"),
    }
}

fn scalar(value: &Value) -> CveRecord {
    CveRecord::Value(ScalarValue {
        value: stringify(value),
    })
}
