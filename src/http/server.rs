//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Build the shared outbound client and the upstream clients
//! - Wire up middleware (tracing, limits, request ID, CORS, metrics)
//! - Serve the OpenAPI document and the Swagger UI page
//! - Serve on a listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::entsoe::EntsoeClient;
use crate::http::request::{enforce_timeout, propagate_request_id};
use crate::http::{docs, handlers, response};
use crate::mastr::MastrClient;
use crate::observability::metrics;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub mastr: Arc<MastrClient>,
    pub entsoe: Arc<EntsoeClient>,
}

impl AppState {
    /// Build both upstream clients over one connection pool.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let upstream_timeout = Duration::from_secs(config.timeouts.upstream_secs);

        let mastr = MastrClient::new(
            UpstreamClient::new(http.clone(), "mastr", upstream_timeout),
            &config.mastr,
        );
        let entsoe = EntsoeClient::new(
            UpstreamClient::new(http, "entsoe", upstream_timeout),
            &config.entsoe,
        );

        Ok(Self {
            mastr: Arc::new(mastr),
            entsoe: Arc::new(entsoe),
        })
    }
}

/// HTTP server for the energy data proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::from_config(&config)?;
        if !state.entsoe.is_configured() {
            tracing::warn!("ENTSO-E security token not set, load forecast endpoint disabled");
        }

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/openapi.json", get(docs::openapi_json))
            .route("/docs", get(docs::swagger_ui))
            .route("/get_einheit_wind", post(handlers::get_einheit_wind))
            .route("/get_einheit_solar", post(handlers::get_einheit_solar))
            .route("/get_einheit_biomasse", post(handlers::get_einheit_biomasse))
            .route(
                "/get_einheit_strom_speicher",
                post(handlers::get_einheit_strom_speicher),
            )
            .route(
                "/get_liste_alle_netzanschlusspunkte",
                post(handlers::get_liste_alle_netzanschlusspunkte),
            )
            .route(
                "/day_ahead_load_forecast",
                get(handlers::day_ahead_load_forecast),
            )
            .route_layer(middleware::from_fn(metrics::track_requests))
            .fallback(response::route_not_found)
            .method_not_allowed_fallback(response::method_not_allowed)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(middleware::from_fn_with_state(
                Duration::from_secs(config.timeouts.request_secs),
                enforce_timeout,
            ))
            .layer(middleware::from_fn(propagate_request_id))
            .layer(CorsLayer::very_permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for serving on a custom listener or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mastr_url = %self.config.mastr.api_url,
            entsoe_url = %self.config.entsoe.api_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let mut config = ProxyConfig::default();
        config.mastr.api_url = "http://127.0.0.1:9/api".into();
        config.mastr.api_key = "key".into();
        HttpServer::new(config).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_welcome() {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "message": "Welcome to the energy data proxy! Visit /docs for documentation."
            })
        );
    }

    #[tokio::test]
    async fn test_missing_required_field_is_422() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/get_einheit_wind")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"marktakteurMastrNummer":"ABR1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("einheitMastrNummer"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_422() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/get_einheit_solar")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_422() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/get_einheit_solar")
                    .header("content-type", "text/plain")
                    .body(Body::from(r#"{"marktakteurMastrNummer":"ABR1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_json(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn test_forecast_without_token_is_503() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/day_ahead_load_forecast?bidding_zone=10Y1001A1001A82H&period_start=202401010000&period_end=202401020000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "ENTSO-E security token is not configured"})
        );
    }

    #[tokio::test]
    async fn test_forecast_missing_query_param_is_422() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/day_ahead_load_forecast?bidding_zone=10Y1001A1001A82H")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/get_einheit_wind")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "Method Not Allowed"})
        );
    }

    #[tokio::test]
    async fn test_unknown_path_is_404_with_detail() {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "Not Found"})
        );
    }

    #[tokio::test]
    async fn test_oversize_body_is_413_with_detail() {
        let mut config = ProxyConfig::default();
        config.mastr.api_url = "http://127.0.0.1:9/api".into();
        config.mastr.api_key = "key".into();
        config.security.max_body_size = 64;
        let body = format!(
            r#"{{"marktakteurMastrNummer":"{}","einheitMastrNummer":"SEE1"}}"#,
            "A".repeat(200)
        );

        let response = HttpServer::new(config)
            .unwrap()
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/get_einheit_wind")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body_json(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn test_cors_mirrors_origin() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "https://dashboard.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let headers = response.headers();
        assert_eq!(
            headers["access-control-allow-origin"],
            "https://dashboard.example"
        );
        assert_eq!(headers["access-control-allow-credentials"], "true");
    }

    #[tokio::test]
    async fn test_cors_preflight_is_answered() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/get_einheit_wind")
                    .header("origin", "https://dashboard.example")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(
            headers["access-control-allow-origin"],
            "https://dashboard.example"
        );
        assert_eq!(headers["access-control-allow-methods"], "POST");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert_eq!(doc["paths"].as_object().unwrap().len(), 6);
        assert!(doc["paths"]["/day_ahead_load_forecast"]["get"].is_object());
    }

    #[tokio::test]
    async fn test_docs_page_loads_openapi_document() {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("SwaggerUIBundle"));
        assert!(page.contains("/openapi.json"));
    }
}
