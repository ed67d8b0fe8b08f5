//! MaStR JSON API client.

use serde::{de::DeserializeOwned, Serialize};

use crate::config::MastrConfig;
use crate::http::response::ApiError;
use crate::upstream::UpstreamClient;

/// Upstream operations, one per proxied endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MastrOperation {
    GetEinheitWind,
    GetEinheitSolar,
    GetEinheitBiomasse,
    GetEinheitStromSpeicher,
    GetListeAlleNetzanschlusspunkte,
}

impl MastrOperation {
    /// Path segment appended to the configured base URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            MastrOperation::GetEinheitWind => "GetEinheitWind",
            MastrOperation::GetEinheitSolar => "GetEinheitSolar",
            MastrOperation::GetEinheitBiomasse => "GetEinheitBiomasse",
            MastrOperation::GetEinheitStromSpeicher => "GetEinheitStromSpeicher",
            MastrOperation::GetListeAlleNetzanschlusspunkte => "GetListeAlleNetzanschlusspunkte",
        }
    }
}

/// Request body plus the credential the upstream expects inline.
#[derive(Serialize)]
struct Authenticated<'a, T> {
    #[serde(rename = "apiKey")]
    api_key: &'a str,
    #[serde(flatten)]
    request: &'a T,
}

/// Client for the registry API. Not `Debug`: it holds the API key.
#[derive(Clone)]
pub struct MastrClient {
    upstream: UpstreamClient,
    base_url: String,
    api_key: String,
}

impl MastrClient {
    pub fn new(upstream: UpstreamClient, config: &MastrConfig) -> Self {
        Self {
            upstream,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn url(&self, operation: MastrOperation) -> String {
        format!("{}/{}", self.base_url, operation.as_str())
    }

    /// POST `request` to `operation` and parse the answer as `R`.
    pub async fn call<T, R>(&self, operation: MastrOperation, request: &T) -> Result<R, ApiError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let payload = Authenticated {
            api_key: &self.api_key,
            request,
        };

        let builder = self.upstream.http().post(self.url(operation)).json(&payload);
        let body = self
            .upstream
            .execute(operation.as_str(), builder, || redacted(request))
            .await?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(
                operation = operation.as_str(),
                error = %e,
                "Upstream response failed schema validation"
            );
            ApiError::InvalidResponse(e.to_string())
        })
    }
}

/// The payload as sent, minus `apiKey`.
fn redacted<T: Serialize>(request: &T) -> String {
    serde_json::to_string(request).unwrap_or_else(|_| "<unserializable>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mastr::request::{EinheitRequest, NetzanschlusspunkteRequest};
    use std::time::Duration;

    #[test]
    fn test_payload_injects_api_key() {
        let request = NetzanschlusspunkteRequest {
            marktakteur_mastr_nummer: "ABR1".into(),
            lokation_mastr_nummer: Some(vec!["SEL1".into()]),
            ..Default::default()
        };
        let payload = serde_json::to_value(Authenticated {
            api_key: "secret",
            request: &request,
        })
        .unwrap();

        assert_eq!(
            payload,
            serde_json::json!({
                "apiKey": "secret",
                "marktakteurMastrNummer": "ABR1",
                "LokationMastrNummer[]": ["SEL1"]
            })
        );
    }

    #[test]
    fn test_redacted_has_no_key() {
        let request = EinheitRequest {
            marktakteur_mastr_nummer: "ABR1".into(),
            einheit_mastr_nummer: "SEE1".into(),
        };
        let sent = redacted(&request);
        assert!(!sent.contains("apiKey"));
        assert!(sent.contains("SEE1"));
    }

    #[test]
    fn test_url_joins_operation() {
        let config = MastrConfig {
            api_url: "https://mastr.example/api/".into(),
            api_key: "k".into(),
        };
        let upstream = UpstreamClient::new(reqwest::Client::new(), "mastr", Duration::from_secs(1));
        let client = MastrClient::new(upstream, &config);
        assert_eq!(
            client.url(MastrOperation::GetEinheitStromSpeicher),
            "https://mastr.example/api/GetEinheitStromSpeicher"
        );
    }
}
