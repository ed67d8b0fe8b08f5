//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;

use energy_data_proxy::config::ProxyConfig;
use energy_data_proxy::http::HttpServer;
use energy_data_proxy::lifecycle::Shutdown;
use tokio::net::TcpListener;

pub const API_KEY: &str = "test-api-key";
pub const SECURITY_TOKEN: &str = "test-security-token";

/// A proxy listening on an ephemeral port.
pub struct TestProxy {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config pointing both upstreams at `upstream_url` (usually a wiremock
/// server): MaStR under `/mastr`, ENTSO-E at `/entsoe/api`.
pub fn test_config(upstream_url: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.mastr.api_url = format!("{}/mastr", upstream_url);
    config.mastr.api_key = API_KEY.into();
    config.entsoe.api_url = format!("{}/entsoe/api", upstream_url);
    config.entsoe.security_token = Some(SECURITY_TOKEN.into());
    config.timeouts.upstream_secs = 2;
    config.observability.metrics_enabled = false;
    config
}

/// Start a proxy with `config` and wait until it accepts connections.
pub async fn spawn_proxy(config: ProxyConfig) -> TestProxy {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let stopped = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, stopped).await;
    });

    TestProxy {
        addr,
        client: reqwest::Client::new(),
        shutdown,
    }
}

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}

/// Raw fixture text, e.g. `fixture("upstream/einheit_wind.json")`.
pub fn fixture(relative: &str) -> String {
    std::fs::read_to_string(fixture_path(relative))
        .unwrap_or_else(|e| panic!("reading fixture {}: {}", relative, e))
}

/// Fixture parsed as JSON.
#[allow(dead_code)]
pub fn fixture_json(relative: &str) -> serde_json::Value {
    serde_json::from_str(&fixture(relative))
        .unwrap_or_else(|e| panic!("parsing fixture {}: {}", relative, e))
}
