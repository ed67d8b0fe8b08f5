//! OpenAPI description of the proxy endpoints.
//!
//! `GET /openapi.json` serves the generated document and `GET /docs` an
//! interactive Swagger UI page that loads it.

use axum::{response::Html, Json};
use utoipa::OpenApi;

use crate::entsoe::document::{Interval, LoadForecast, Period, Point, TimeSeries};
use crate::http::handlers;
use crate::http::response::ErrorBody;
use crate::mastr::{
    EinheitBase, EinheitBiomasse, EinheitRequest, EinheitSolar, EinheitStromSpeicher,
    EinheitWind, NetzanschlusspunkteListe, NetzanschlusspunkteRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Energy Data Proxy",
        description = "Proxy for the Marktstammdatenregister (MaStR) and the ENTSO-E transparency platform. Upstream credentials are injected by the proxy."
    ),
    paths(
        handlers::get_einheit_wind,
        handlers::get_einheit_solar,
        handlers::get_einheit_biomasse,
        handlers::get_einheit_strom_speicher,
        handlers::get_liste_alle_netzanschlusspunkte,
        handlers::day_ahead_load_forecast,
    ),
    components(
        schemas(
            EinheitRequest,
            NetzanschlusspunkteRequest,
            EinheitBase,
            EinheitWind,
            EinheitSolar,
            EinheitBiomasse,
            EinheitStromSpeicher,
            NetzanschlusspunkteListe,
            LoadForecast,
            Interval,
            TimeSeries,
            Period,
            Point,
            ErrorBody,
        )
    ),
    tags(
        (name = "mastr", description = "Marktstammdatenregister unit and grid connection lookups"),
        (name = "entsoe", description = "ENTSO-E transparency platform load data")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_PAGE)
}

const SWAGGER_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Energy Data Proxy - Swagger UI</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        SwaggerUIBundle({
            url: '/openapi.json',
            dom_id: '#swagger-ui',
            presets: [
                SwaggerUIBundle.presets.apis,
                SwaggerUIBundle.presets.standalone
            ]
        });
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_endpoint() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();

        for path in [
            "/get_einheit_wind",
            "/get_einheit_solar",
            "/get_einheit_biomasse",
            "/get_einheit_strom_speicher",
            "/get_liste_alle_netzanschlusspunkte",
        ] {
            assert!(paths[path]["post"].is_object(), "{} missing", path);
        }
        let forecast = &paths["/day_ahead_load_forecast"]["get"];
        let params: Vec<&str> = forecast["parameters"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(params, vec!["bidding_zone", "period_start", "period_end"]);
        assert!(paths.get("/").is_none());
    }

    #[test]
    fn test_schemas_use_upstream_field_names() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];

        let request = &schemas["EinheitRequest"]["properties"];
        assert!(request["marktakteurMastrNummer"].is_object());
        assert!(request["einheitMastrNummer"].is_object());
        assert!(schemas["EinheitBase"]["properties"]["AufrufVersion"].is_object());
        assert!(schemas["NetzanschlusspunkteListe"]["properties"]["ListeNetzanschlusspunkte[]"]
            .is_object());
    }
}
