use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use tracing::{debug, error, info};

use super::Fetcher;
use crate::error::FetchError;
use crate::models::{EndpointSpec, FetchMetadata, FetchResult, HttpMethod};

pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const BODY_PREVIEW_CHARS: usize = 200;

/// JSON-over-HTTP client bound to one upstream base URL.
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    async fn execute(&self, endpoint: &EndpointSpec, url: &str) -> Result<FetchResult, FetchError> {
        let mut request = self.client.request(method(endpoint.method), url);
        if let Some(params) = &endpoint.query_params {
            request = request.query(params);
        }

        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        debug!("Response status: {}", status);

        let body = response.bytes().await.map_err(request_error)?;
        let payload: Value = serde_json::from_slice(&body).map_err(|source| FetchError::InvalidJson {
            url: url.to_string(),
            preview: preview(&body),
            source,
        })?;

        Ok(FetchResult {
            payload,
            metadata: FetchMetadata {
                source_name: endpoint.name.clone(),
                requested_path: endpoint.path.clone(),
                http_status: status.as_u16(),
                fetched_at: Utc::now(),
                query_params: endpoint.query_params.clone(),
            },
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &EndpointSpec) -> Result<FetchResult, FetchError> {
        let url = endpoint_url(&self.base_url, &endpoint.path);
        info!("Calling {} -> {}", endpoint.name, url);

        let result = self.execute(endpoint, &url).await;
        if let Err(err) = &result {
            error!("Fetch failed on {}: {}", endpoint.name, err);
        }
        result
    }
}

/// Joins base and path with exactly one `/` between them.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
    }
}

fn preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_PREVIEW_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_with_single_slash() {
        assert_eq!(
            endpoint_url("https://cve.circl.lu/api", "/last"),
            "https://cve.circl.lu/api/last"
        );
        assert_eq!(
            endpoint_url("https://cve.circl.lu/api/", "last"),
            "https://cve.circl.lu/api/last"
        );
        assert_eq!(
            endpoint_url("https://urlhaus.abuse.ch", "/downloads/json_recent/"),
            "https://urlhaus.abuse.ch/downloads/json_recent/"
        );
    }

    #[test]
    fn preview_is_bounded() {
        let body = "x".repeat(1000);
        assert_eq!(preview(body.as_bytes()).len(), BODY_PREVIEW_CHARS);
        assert_eq!(preview(b"<html>"), "<html>");
    }
}
