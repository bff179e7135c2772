mod endpoint;
mod records;

pub use endpoint::{EndpointSpec, FetchMetadata, FetchResult, HttpMethod, QueryParams};
pub use records::{
    CveRecord, CveSummary, EtlInfo, NormalizedCve, ScalarValue, StoredRecord, UrlThreatRecord,
    VendorProducts, SCHEMA_VERSION,
};
