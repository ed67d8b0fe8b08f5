//! ENTSO-E transparency platform client.

use crate::config::EntsoeConfig;
use crate::entsoe::document::{parse_load_forecast, DocumentError, LoadForecast};
use crate::entsoe::request::LoadForecastQuery;
use crate::http::response::ApiError;
use crate::upstream::UpstreamClient;

const OPERATION: &str = "DayAheadTotalLoadForecast";

/// Client for the transparency platform. Not `Debug`: it holds the token.
#[derive(Clone)]
pub struct EntsoeClient {
    upstream: UpstreamClient,
    api_url: String,
    security_token: Option<String>,
}

impl EntsoeClient {
    pub fn new(upstream: UpstreamClient, config: &EntsoeConfig) -> Self {
        Self {
            upstream,
            api_url: config.api_url.clone(),
            security_token: config
                .security_token
                .as_ref()
                .filter(|token| !token.trim().is_empty())
                .cloned(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.security_token.is_some()
    }

    /// Fetch and decode the day-ahead total load forecast.
    pub async fn day_ahead_load_forecast(
        &self,
        query: &LoadForecastQuery,
    ) -> Result<LoadForecast, ApiError> {
        query.validate()?;

        let token = self
            .security_token
            .as_deref()
            .ok_or(ApiError::NotConfigured("ENTSO-E security token is not configured"))?;

        let params = query.upstream_params();
        let builder = self
            .upstream
            .http()
            .get(&self.api_url)
            .query(&[("securityToken", token)])
            .query(&params);

        let body = self
            .upstream
            .execute(OPERATION, builder, || redacted(&params))
            .await?;

        let body = String::from_utf8_lossy(&body);
        parse_load_forecast(&body).map_err(|e| match e {
            DocumentError::NoData(reason) => {
                tracing::info!(
                    bidding_zone = %query.bidding_zone,
                    reason = %reason,
                    "Upstream returned no data"
                );
                ApiError::NoData(reason)
            }
            e => {
                tracing::error!(
                    operation = OPERATION,
                    error = %e,
                    "Upstream document failed schema validation"
                );
                ApiError::InvalidResponse(e.to_string())
            }
        })
    }
}

/// The query as sent, minus `securityToken`.
fn redacted(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}
