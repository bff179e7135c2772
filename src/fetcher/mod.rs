mod http_fetcher;

pub use http_fetcher::{endpoint_url, HttpFetcher, BROWSER_USER_AGENT};

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{EndpointSpec, FetchResult};

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// One request, no retries. Failures are logged before being returned.
    async fn fetch(&self, endpoint: &EndpointSpec) -> Result<FetchResult, FetchError>;
}
