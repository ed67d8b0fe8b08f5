//! Load forecast market documents.
//!
//! The wire types mirror the normalized XML tree (see [`crate::codec::xml`])
//! and are converted into the flat, snake_case [`LoadForecast`] returned to
//! clients.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::codec::coerce::{from_text, one_or_many};
use crate::codec::{to_value, XmlError};

const FORECAST_ROOT: &str = "GL_MarketDocument";
const ACKNOWLEDGEMENT_ROOT: &str = "Acknowledgement_MarketDocument";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("{0}")]
    Schema(#[from] serde_json::Error),

    #[error("unexpected document root <{0}>")]
    UnexpectedRoot(String),

    /// The upstream acknowledged the query without returning data.
    #[error("{0}")]
    NoData(String),
}

// Wire shapes

#[derive(Debug, Deserialize)]
struct GlMarketDocument {
    #[serde(rename = "mRID")]
    mrid: String,
    #[serde(rename = "revisionNumber", deserialize_with = "from_text")]
    revision_number: u32,
    #[serde(rename = "type")]
    document_type: String,
    #[serde(rename = "process.processType")]
    process_type: Option<String>,
    #[serde(rename = "createdDateTime")]
    created: String,
    #[serde(rename = "time_Period.timeInterval")]
    time_interval: WireInterval,
    #[serde(rename = "TimeSeries", default, deserialize_with = "one_or_many")]
    time_series: Vec<WireTimeSeries>,
}

#[derive(Debug, Deserialize)]
struct WireInterval {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct WireTimeSeries {
    #[serde(rename = "mRID")]
    mrid: String,
    #[serde(rename = "businessType")]
    business_type: Option<String>,
    #[serde(rename = "objectAggregation")]
    object_aggregation: Option<String>,
    #[serde(rename = "outBiddingZone_Domain.mRID")]
    bidding_zone: Option<String>,
    #[serde(rename = "quantity_Measure_Unit.name")]
    unit: Option<String>,
    #[serde(rename = "curveType")]
    curve_type: Option<String>,
    #[serde(rename = "Period", default, deserialize_with = "one_or_many")]
    periods: Vec<WirePeriod>,
}

#[derive(Debug, Deserialize)]
struct WirePeriod {
    #[serde(rename = "timeInterval")]
    time_interval: WireInterval,
    resolution: String,
    #[serde(rename = "Point", default, deserialize_with = "one_or_many")]
    points: Vec<WirePoint>,
}

#[derive(Debug, Deserialize)]
struct WirePoint {
    #[serde(deserialize_with = "from_text")]
    position: u32,
    #[serde(deserialize_with = "from_text")]
    quantity: f64,
}

#[derive(Debug, Deserialize)]
struct Acknowledgement {
    #[serde(rename = "Reason", default, deserialize_with = "one_or_many")]
    reasons: Vec<Reason>,
}

#[derive(Debug, Deserialize)]
struct Reason {
    code: Option<String>,
    text: Option<String>,
}

// Client shapes

/// Day-ahead total load forecast for one bidding zone.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LoadForecast {
    pub document_id: String,
    pub revision_number: u32,
    pub document_type: String,
    pub process_type: Option<String>,
    pub created: String,
    pub period: Interval,
    pub time_series: Vec<TimeSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Interval {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TimeSeries {
    pub id: String,
    pub business_type: Option<String>,
    pub object_aggregation: Option<String>,
    pub bidding_zone: Option<String>,
    pub unit: Option<String>,
    pub curve_type: Option<String>,
    pub periods: Vec<Period>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Period {
    pub start: String,
    pub end: String,
    pub resolution: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Point {
    pub position: u32,
    pub quantity: f64,
}

impl From<WireInterval> for Interval {
    fn from(interval: WireInterval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
        }
    }
}

impl From<WirePeriod> for Period {
    fn from(period: WirePeriod) -> Self {
        Self {
            start: period.time_interval.start,
            end: period.time_interval.end,
            resolution: period.resolution,
            points: period
                .points
                .into_iter()
                .map(|p| Point {
                    position: p.position,
                    quantity: p.quantity,
                })
                .collect(),
        }
    }
}

impl From<WireTimeSeries> for TimeSeries {
    fn from(series: WireTimeSeries) -> Self {
        Self {
            id: series.mrid,
            business_type: series.business_type,
            object_aggregation: series.object_aggregation,
            bidding_zone: series.bidding_zone,
            unit: series.unit,
            curve_type: series.curve_type,
            periods: series.periods.into_iter().map(Period::from).collect(),
        }
    }
}

impl From<GlMarketDocument> for LoadForecast {
    fn from(document: GlMarketDocument) -> Self {
        Self {
            document_id: document.mrid,
            revision_number: document.revision_number,
            document_type: document.document_type,
            process_type: document.process_type,
            created: document.created,
            period: document.time_interval.into(),
            time_series: document
                .time_series
                .into_iter()
                .map(TimeSeries::from)
                .collect(),
        }
    }
}

/// Parse an upstream XML body into a forecast.
///
/// An acknowledgement document yields [`DocumentError::NoData`] carrying the
/// upstream reason text.
pub fn parse_load_forecast(body: &str) -> Result<LoadForecast, DocumentError> {
    let document = to_value(body)?;

    match document.root.as_str() {
        FORECAST_ROOT => {
            let document: GlMarketDocument = serde_json::from_value(document.value)?;
            Ok(document.into())
        }
        ACKNOWLEDGEMENT_ROOT => {
            let ack: Acknowledgement = serde_json::from_value(document.value)?;
            Err(DocumentError::NoData(ack.reason_text()))
        }
        other => Err(DocumentError::UnexpectedRoot(other.to_string())),
    }
}

impl Acknowledgement {
    fn reason_text(&self) -> String {
        let texts: Vec<String> = self
            .reasons
            .iter()
            .filter_map(|r| match (&r.code, &r.text) {
                (Some(code), Some(text)) => Some(format!("{} ({})", text, code)),
                (None, Some(text)) => Some(text.clone()),
                (Some(code), None) => Some(format!("reason code {}", code)),
                (None, None) => None,
            })
            .collect();

        if texts.is_empty() {
            "No data available for the requested period".to_string()
        } else {
            texts.join("; ")
        }
    }
}
