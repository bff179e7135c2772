#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use threat_intel_etl::AppConfig;
use warp::Filter;
use warp::http::{Response, StatusCode};
use warp::path::FullPath;

/// Serves fixed `(status, body)` pairs by request path; anything else is a 404.
pub async fn serve(routes: Vec<(&str, StatusCode, String)>) -> SocketAddr {
    serve_with_delays(routes, Vec::new()).await
}

/// Like [`serve`], but the listed paths stall for the given time before answering.
pub async fn serve_with_delays(
    routes: Vec<(&str, StatusCode, String)>,
    delays: Vec<(&str, Duration)>,
) -> SocketAddr {
    let table: Arc<HashMap<String, (StatusCode, String)>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body)))
            .collect(),
    );
    let delays: Arc<HashMap<String, Duration>> = Arc::new(
        delays
            .into_iter()
            .map(|(path, delay)| (path.to_string(), delay))
            .collect(),
    );

    let canned = warp::path::full().and_then(move |path: FullPath| {
        let table = Arc::clone(&table);
        let delays = Arc::clone(&delays);
        async move {
            if let Some(delay) = delays.get(path.as_str()) {
                tokio::time::sleep(*delay).await;
            }
            let (status, body) = table
                .get(path.as_str())
                .cloned()
                .unwrap_or((StatusCode::NOT_FOUND, "{}".to_string()));
            Ok::<_, warp::Rejection>(
                Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(body),
            )
        }
    });

    let (addr, server) = warp::serve(canned).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

/// Default configuration with both upstreams pointed at a local server.
pub fn config_for(addr: SocketAddr) -> AppConfig {
    config_with_timeout(addr, 5)
}

pub fn config_with_timeout(addr: SocketAddr, timeout_secs: u64) -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("CVE_BASE_URL", format!("http://{addr}/api")),
        ("URLHAUS_BASE_URL", format!("http://{addr}")),
        ("CVE_TIMEOUT_SECS", timeout_secs.to_string()),
        ("URLHAUS_TIMEOUT_SECS", timeout_secs.to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("test configuration is valid")
}

/// An address nothing is listening on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}
