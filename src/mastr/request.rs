//! MaStR request schemas.
//!
//! Inbound bodies use the upstream spelling (`marktakteurMastrNummer`,
//! `Einheitart`, ...); the Rust field names are accepted as aliases.
//! Serialization produces the forwarded payload: absent options are omitted
//! and list filters gain the `[]` suffix the upstream expects.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lookup of a single unit, shared by all `GetEinheit*` operations.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[schema(example = json!({
    "marktakteurMastrNummer": "ABR900000000001",
    "einheitMastrNummer": "SEE900000000001"
}))]
pub struct EinheitRequest {
    #[serde(rename = "marktakteurMastrNummer", alias = "marktakteur_mastr_nummer")]
    pub marktakteur_mastr_nummer: String,

    #[serde(rename = "einheitMastrNummer", alias = "einheit_mastr_nummer")]
    pub einheit_mastr_nummer: String,
}

/// Filtered, paged listing of grid connection points.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
#[schema(example = json!({
    "marktakteurMastrNummer": "ABR900000000001",
    "startAb": 0,
    "limit": 100,
    "Spannungsebene": "Mittelspannung"
}))]
pub struct NetzanschlusspunkteRequest {
    #[serde(rename = "marktakteurMastrNummer", alias = "marktakteur_mastr_nummer")]
    pub marktakteur_mastr_nummer: String,

    // Paging
    #[serde(rename = "startAb", alias = "start_ab", skip_serializing_if = "Option::is_none")]
    pub start_ab: Option<i64>,
    #[serde(rename = "datumAb", alias = "datum_ab", skip_serializing_if = "Option::is_none")]
    pub datum_ab: Option<String>,
    #[serde(rename = "limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    // Unit filters
    #[serde(alias = "einheitart", skip_serializing_if = "Option::is_none")]
    pub einheitart: Option<String>,
    #[serde(alias = "einheittyp", skip_serializing_if = "Option::is_none")]
    pub einheittyp: Option<String>,
    #[serde(alias = "einheit_postleitzahl", skip_serializing_if = "Option::is_none")]
    pub einheit_postleitzahl: Option<String>,
    #[serde(alias = "einheit_ort", skip_serializing_if = "Option::is_none")]
    pub einheit_ort: Option<String>,
    #[serde(alias = "einheit_gemeinde", skip_serializing_if = "Option::is_none")]
    pub einheit_gemeinde: Option<String>,
    #[serde(alias = "einheit_gemeindeschluessel", skip_serializing_if = "Option::is_none")]
    pub einheit_gemeindeschluessel: Option<String>,

    // Connection point filters
    #[serde(alias = "regelzone", skip_serializing_if = "Option::is_none")]
    pub regelzone: Option<String>,
    #[serde(alias = "name_der_technischen_lokation", skip_serializing_if = "Option::is_none")]
    pub name_der_technischen_lokation: Option<String>,
    #[serde(alias = "netzbetreiber_mastr_nummer", skip_serializing_if = "Option::is_none")]
    pub netzbetreiber_mastr_nummer: Option<String>,
    #[serde(alias = "netzanschlusspunkt_bezeichnung", skip_serializing_if = "Option::is_none")]
    pub netzanschlusspunkt_bezeichnung: Option<String>,
    #[serde(alias = "messlokation", skip_serializing_if = "Option::is_none")]
    pub messlokation: Option<String>,
    #[serde(alias = "spannungsebene", skip_serializing_if = "Option::is_none")]
    pub spannungsebene: Option<String>,
    #[serde(alias = "nettoengpassleistung", skip_serializing_if = "Option::is_none")]
    pub nettoengpassleistung: Option<f64>,
    #[serde(alias = "netzanschlusskapazitaet", skip_serializing_if = "Option::is_none")]
    pub netzanschlusskapazitaet: Option<f64>,
    #[serde(alias = "maximale_einspeiseleistung", skip_serializing_if = "Option::is_none")]
    pub maximale_einspeiseleistung: Option<f64>,
    #[serde(alias = "maximale_ausspeiseleistung", skip_serializing_if = "Option::is_none")]
    pub maximale_ausspeiseleistung: Option<f64>,
    #[serde(alias = "gasqualitaet", skip_serializing_if = "Option::is_none")]
    pub gasqualitaet: Option<String>,
    #[serde(alias = "geplanter_netzanschlusspunkt", skip_serializing_if = "Option::is_none")]
    pub geplanter_netzanschlusspunkt: Option<bool>,
    #[serde(alias = "yeic", skip_serializing_if = "Option::is_none")]
    pub yeic: Option<String>,

    // List filters, forwarded as `<name>[]`
    #[serde(
        rename(serialize = "einheitMastrNummer[]", deserialize = "einheitMastrNummer"),
        alias = "einheitMastrNummer[]",
        alias = "einheit_mastr_nummer",
        skip_serializing_if = "Option::is_none"
    )]
    pub einheit_mastr_nummer: Option<Vec<String>>,
    #[serde(
        rename(
            serialize = "NetzanschlusspunktMastrNummer[]",
            deserialize = "NetzanschlusspunktMastrNummer"
        ),
        alias = "NetzanschlusspunktMastrNummer[]",
        alias = "netzanschlusspunkt_mastr_nummer",
        skip_serializing_if = "Option::is_none"
    )]
    pub netzanschlusspunkt_mastr_nummer: Option<Vec<String>>,
    #[serde(
        rename(serialize = "LokationMastrNummer[]", deserialize = "LokationMastrNummer"),
        alias = "LokationMastrNummer[]",
        alias = "lokation_mastr_nummer",
        skip_serializing_if = "Option::is_none"
    )]
    pub lokation_mastr_nummer: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_einheit_request_requires_both_numbers() {
        let err = serde_json::from_value::<EinheitRequest>(json!({
            "marktakteurMastrNummer": "ABR900000000001"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("einheitMastrNummer"));
    }

    #[test]
    fn test_einheit_request_accepts_snake_case() {
        let request: EinheitRequest = serde_json::from_value(json!({
            "marktakteur_mastr_nummer": "ABR900000000001",
            "einheit_mastr_nummer": "SEE900000000001"
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "marktakteurMastrNummer": "ABR900000000001",
                "einheitMastrNummer": "SEE900000000001"
            })
        );
    }

    #[test]
    fn test_absent_options_are_omitted() {
        let request: NetzanschlusspunkteRequest = serde_json::from_value(json!({
            "marktakteurMastrNummer": "ABR900000000001",
            "limit": 100,
            "Spannungsebene": null
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"marktakteurMastrNummer": "ABR900000000001", "limit": 100})
        );
    }

    #[test]
    fn test_list_filters_get_bracket_suffix() {
        let request: NetzanschlusspunkteRequest = serde_json::from_value(json!({
            "marktakteurMastrNummer": "ABR900000000001",
            "einheitMastrNummer": ["SEE1", "SEE2"],
            "LokationMastrNummer[]": ["SEL1"],
            "Nettoengpassleistung": 10,
            "GeplanterNetzanschlusspunkt": false
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "marktakteurMastrNummer": "ABR900000000001",
                "einheitMastrNummer[]": ["SEE1", "SEE2"],
                "LokationMastrNummer[]": ["SEL1"],
                "Nettoengpassleistung": 10.0,
                "GeplanterNetzanschlusspunkt": false
            })
        );
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let err = serde_json::from_value::<NetzanschlusspunkteRequest>(json!({
            "marktakteurMastrNummer": "ABR900000000001",
            "startAb": "zehn"
        }))
        .unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn test_paging_accepts_negative_and_large_values() {
        let request: NetzanschlusspunkteRequest = serde_json::from_value(json!({
            "marktakteurMastrNummer": "ABR900000000001",
            "startAb": -1,
            "limit": 5_000_000_000_i64
        }))
        .unwrap();
        assert_eq!(request.start_ab, Some(-1));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "marktakteurMastrNummer": "ABR900000000001",
                "startAb": -1,
                "limit": 5_000_000_000_i64
            })
        );
    }
}
