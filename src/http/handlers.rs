//! Endpoint handlers.
//!
//! Each handler extracts and validates its input, delegates to the matching
//! upstream client and returns the typed result as JSON. Extractor
//! rejections are taken as `Result` so they render through [`ApiError`].

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::entsoe::{LoadForecast, LoadForecastQuery};
use crate::http::response::{ApiError, ErrorBody};
use crate::http::server::AppState;
use crate::mastr::{
    EinheitBiomasse, EinheitRequest, EinheitSolar, EinheitStromSpeicher, EinheitWind,
    MastrOperation, NetzanschlusspunkteListe, NetzanschlusspunkteRequest,
};

#[derive(Debug, Serialize)]
pub struct Welcome {
    pub message: &'static str,
}

pub async fn root() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to the energy data proxy! Visit /docs for documentation.",
    })
}

/// Get Einheit Wind
#[utoipa::path(
    post,
    path = "/get_einheit_wind",
    request_body = EinheitRequest,
    responses(
        (status = 200, description = "Unit record as returned by MaStR", body = EinheitWind),
        (status = 422, description = "Invalid request body", body = ErrorBody),
        (status = 500, description = "Upstream response did not match the schema", body = ErrorBody),
        (status = 503, description = "MaStR unreachable", body = ErrorBody)
    ),
    tag = "mastr"
)]
pub async fn get_einheit_wind(
    State(state): State<AppState>,
    payload: Result<Json<EinheitRequest>, JsonRejection>,
) -> Result<Json<EinheitWind>, ApiError> {
    einheit(&state, MastrOperation::GetEinheitWind, payload).await
}

/// Get Einheit Solar
#[utoipa::path(
    post,
    path = "/get_einheit_solar",
    request_body = EinheitRequest,
    responses(
        (status = 200, description = "Unit record as returned by MaStR", body = EinheitSolar),
        (status = 422, description = "Invalid request body", body = ErrorBody),
        (status = 500, description = "Upstream response did not match the schema", body = ErrorBody),
        (status = 503, description = "MaStR unreachable", body = ErrorBody)
    ),
    tag = "mastr"
)]
pub async fn get_einheit_solar(
    State(state): State<AppState>,
    payload: Result<Json<EinheitRequest>, JsonRejection>,
) -> Result<Json<EinheitSolar>, ApiError> {
    einheit(&state, MastrOperation::GetEinheitSolar, payload).await
}

/// Get Einheit Biomasse
#[utoipa::path(
    post,
    path = "/get_einheit_biomasse",
    request_body = EinheitRequest,
    responses(
        (status = 200, description = "Unit record as returned by MaStR", body = EinheitBiomasse),
        (status = 422, description = "Invalid request body", body = ErrorBody),
        (status = 500, description = "Upstream response did not match the schema", body = ErrorBody),
        (status = 503, description = "MaStR unreachable", body = ErrorBody)
    ),
    tag = "mastr"
)]
pub async fn get_einheit_biomasse(
    State(state): State<AppState>,
    payload: Result<Json<EinheitRequest>, JsonRejection>,
) -> Result<Json<EinheitBiomasse>, ApiError> {
    einheit(&state, MastrOperation::GetEinheitBiomasse, payload).await
}

/// Get Einheit Strom Speicher
#[utoipa::path(
    post,
    path = "/get_einheit_strom_speicher",
    request_body = EinheitRequest,
    responses(
        (status = 200, description = "Unit record as returned by MaStR", body = EinheitStromSpeicher),
        (status = 422, description = "Invalid request body", body = ErrorBody),
        (status = 500, description = "Upstream response did not match the schema", body = ErrorBody),
        (status = 503, description = "MaStR unreachable", body = ErrorBody)
    ),
    tag = "mastr"
)]
pub async fn get_einheit_strom_speicher(
    State(state): State<AppState>,
    payload: Result<Json<EinheitRequest>, JsonRejection>,
) -> Result<Json<EinheitStromSpeicher>, ApiError> {
    einheit(&state, MastrOperation::GetEinheitStromSpeicher, payload).await
}

/// Get Liste Alle Netzanschlusspunkte
#[utoipa::path(
    post,
    path = "/get_liste_alle_netzanschlusspunkte",
    request_body = NetzanschlusspunkteRequest,
    responses(
        (status = 200, description = "Page of grid connection points", body = NetzanschlusspunkteListe),
        (status = 422, description = "Invalid request body", body = ErrorBody),
        (status = 500, description = "Upstream response did not match the schema", body = ErrorBody),
        (status = 503, description = "MaStR unreachable", body = ErrorBody)
    ),
    tag = "mastr"
)]
pub async fn get_liste_alle_netzanschlusspunkte(
    State(state): State<AppState>,
    payload: Result<Json<NetzanschlusspunkteRequest>, JsonRejection>,
) -> Result<Json<NetzanschlusspunkteListe>, ApiError> {
    let Json(request) = payload?;
    tracing::debug!(
        marktakteur = %request.marktakteur_mastr_nummer,
        start_ab = ?request.start_ab,
        limit = ?request.limit,
        "Listing grid connection points"
    );
    state
        .mastr
        .call(MastrOperation::GetListeAlleNetzanschlusspunkte, &request)
        .await
        .map(Json)
}

/// Get Day-Ahead Total Load Forecast
#[utoipa::path(
    get,
    path = "/day_ahead_load_forecast",
    params(LoadForecastQuery),
    responses(
        (status = 200, description = "Forecast time series", body = LoadForecast),
        (status = 404, description = "No matching data for the query", body = ErrorBody),
        (status = 422, description = "Invalid bidding zone or period", body = ErrorBody),
        (status = 500, description = "Unparseable market document", body = ErrorBody),
        (status = 503, description = "ENTSO-E unreachable or token not configured", body = ErrorBody)
    ),
    tag = "entsoe"
)]
pub async fn day_ahead_load_forecast(
    State(state): State<AppState>,
    query: Result<Query<LoadForecastQuery>, QueryRejection>,
) -> Result<Json<LoadForecast>, ApiError> {
    let Query(query) = query?;
    tracing::debug!(
        bidding_zone = %query.bidding_zone,
        period_start = %query.period_start,
        period_end = %query.period_end,
        "Fetching day-ahead load forecast"
    );
    state.entsoe.day_ahead_load_forecast(&query).await.map(Json)
}

async fn einheit<R: DeserializeOwned>(
    state: &AppState,
    operation: MastrOperation,
    payload: Result<Json<EinheitRequest>, JsonRejection>,
) -> Result<Json<R>, ApiError> {
    let Json(request) = payload?;
    tracing::debug!(
        operation = operation.as_str(),
        einheit = %request.einheit_mastr_nummer,
        "Fetching unit"
    );
    state.mastr.call(operation, &request).await.map(Json)
}
