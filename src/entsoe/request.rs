//! Day-ahead load forecast query.

use serde::Deserialize;
use time::macros::format_description;
use time::PrimitiveDateTime;
use utoipa::IntoParams;

use crate::http::response::ApiError;

/// Document type for "system total load".
pub const DOCUMENT_TYPE_LOAD: &str = "A65";
/// Process type for "day ahead".
pub const PROCESS_TYPE_DAY_AHEAD: &str = "A01";

/// Flat query parameters of `GET /day_ahead_load_forecast`.
///
/// Periods use the upstream `yyyyMMddHHmm` UTC notation and are forwarded
/// verbatim once validated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoadForecastQuery {
    /// EIC code of the bidding zone, e.g. `10Y1001A1001A82H`
    #[serde(alias = "outBiddingZone_Domain")]
    pub bidding_zone: String,
    /// Period start, `yyyyMMddHHmm` UTC
    #[serde(alias = "periodStart")]
    pub period_start: String,
    /// Period end, `yyyyMMddHHmm` UTC
    #[serde(alias = "periodEnd")]
    pub period_end: String,
}

impl LoadForecastQuery {
    /// Check the EIC code shape and the period bounds.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !is_eic_code(&self.bidding_zone) {
            return Err(ApiError::InvalidRequest(format!(
                "bidding_zone '{}' is not a 16 character EIC code",
                self.bidding_zone
            )));
        }

        let start = parse_period("period_start", &self.period_start)?;
        let end = parse_period("period_end", &self.period_end)?;
        if start >= end {
            return Err(ApiError::InvalidRequest(format!(
                "period_start ({}) must be before period_end ({})",
                self.period_start, self.period_end
            )));
        }
        Ok(())
    }

    /// Query parameters for the upstream, without the security token.
    pub fn upstream_params(&self) -> [(&'static str, &str); 5] {
        [
            ("documentType", DOCUMENT_TYPE_LOAD),
            ("processType", PROCESS_TYPE_DAY_AHEAD),
            ("outBiddingZone_Domain", self.bidding_zone.as_str()),
            ("periodStart", self.period_start.as_str()),
            ("periodEnd", self.period_end.as_str()),
        ]
    }
}

fn is_eic_code(code: &str) -> bool {
    code.len() == 16
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-')
}

fn parse_period(name: &str, value: &str) -> Result<PrimitiveDateTime, ApiError> {
    let format = format_description!("[year][month][day][hour][minute]");
    if value.len() != 12 {
        return Err(ApiError::InvalidRequest(format!(
            "{} '{}' must use the yyyyMMddHHmm format",
            name, value
        )));
    }
    PrimitiveDateTime::parse(value, format).map_err(|e| {
        ApiError::InvalidRequest(format!("{} '{}' is not a valid timestamp: {}", name, value, e))
    })
}
