//! MaStR response schemas.
//!
//! Every `GetEinheit*` response shares [`EinheitBase`]; the per energy
//! carrier records flatten it and add their own fields. Field names on the
//! wire are the upstream's (PascalCase, with `[]` on list fields), both when
//! parsing the upstream body and when re-emitting it. Optional fields the
//! upstream leaves out are re-emitted as `null`; unknown fields are dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::codec::coerce::{integral, integral_opt};

/// Fields common to every unit record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct EinheitBase {
    // Call metadata
    pub ergebniscode: String,
    pub aufruf_veraltet: bool,
    pub aufruf_lebenszeit_ende: Option<String>,
    #[serde(deserialize_with = "integral")]
    pub aufruf_version: i64,

    // Unit identity and grid operator check
    pub einheit_mastr_nummer: String,
    pub datum_letzte_aktualisierung: String,
    pub lokation_mastr_nummer: Option<String>,
    pub netzbetreiberpruefung_status: String,
    #[serde(rename = "Netzbetreiberzuordnungen[]")]
    pub netzbetreiberzuordnungen: Option<Vec<String>>,
    pub netzbetreiberpruefung_datum: Option<String>,
    pub anlagenbetreiber_mastr_nummer: Option<String>,

    // Location
    pub land: String,
    pub bundesland: Option<String>,
    pub landkreis: Option<String>,
    pub gemeinde: Option<String>,
    pub gemeindeschluessel: Option<String>,
    pub postleitzahl: String,
    pub gemarkung: Option<String>,
    pub flur_flurstuecknummern: Option<String>,
    pub strasse: Option<String>,
    pub strasse_nicht_gefunden: Option<bool>,
    pub hausnummer: Option<String>,
    pub hausnummer_nicht_gefunden: Option<bool>,
    pub adresszusatz: Option<String>,
    pub ort: String,
    pub laengengrad: Option<f64>,
    pub breitengrad: Option<f64>,
    #[serde(default, deserialize_with = "integral_opt")]
    pub utm_zonenwert: Option<i64>,
    pub utm_east: Option<f64>,
    pub utm_north: Option<f64>,
    pub gauss_krueger_hoch: Option<f64>,
    pub gauss_krueger_rechts: Option<f64>,

    // Lifecycle
    pub registrierungsdatum: Option<String>,
    pub geplantes_inbetriebnahmedatum: Option<String>,
    pub inbetriebnahmedatum: Option<String>,
    pub datum_endgueltige_stilllegung: Option<String>,
    pub datum_beginn_voruebergehende_stilllegung: Option<String>,
    pub datum_wiederaufnahme_betrieb: Option<String>,
    pub einheit_systemstatus: Option<String>,
    pub einheit_betriebsstatus: String,
    pub bestandsanlage_mastr_nummer: Option<String>,
    pub nicht_vorhanden_in_migrierten_einheiten: Option<bool>,
    pub alt_anlagenbetreiber_mastr_nummer: Option<String>,
    pub datum_des_betreiberwechsels: Option<String>,
    pub datum_registrierung_des_betreiberwechsels: Option<String>,
    pub inbetriebnahmedatum_am_aktuellen_ort: Option<String>,

    // Technical data
    pub name_stromerzeugungseinheit: String,
    pub weic: Option<String>,
    pub weic_display_name: Option<String>,
    pub kraftwerksnummer: Option<String>,
    pub energietraeger: String,
    pub bruttoleistung: f64,
    pub nettonennleistung: f64,
    pub schwarzstartfaehigkeit: Option<bool>,
    pub inselbetriebsfaehigkeit: Option<bool>,
    pub einsatzverantwortlicher: Option<String>,
    pub fernsteuerbarkeit_nb: Option<bool>,
    pub fernsteuerbarkeit_dv: Option<bool>,
    pub einspeisungsart: Option<String>,
    pub praequalifiziert_fuer_regelenergie: Option<bool>,
    pub gen_mastr_nummer: Option<String>,
}

/// `GetEinheitWind`: onshore and offshore wind turbines.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct EinheitWind {
    #[serde(flatten)]
    pub base: EinheitBase,

    pub name_windpark: String,
    pub wind_an_land_oder_see: String,
    pub seelage: Option<String>,
    pub gebiet_nach_dem_flaechenentwicklungsplan_ostsee: Option<String>,
    pub gebiet_nach_dem_flaechenentwicklungsplan_nordsee: Option<String>,
    pub hersteller: Option<String>,
    pub technologie: Option<String>,
    pub typenbezeichnung: String,
    pub nabenhoehe: Option<f64>,
    pub rotordurchmesser: Option<f64>,
    pub rotorblattenteisungssystem: Option<bool>,
    pub auflage_abschaltung_leistungsbegrenzung: Option<bool>,
    pub auflagen_abschaltung_schallimmissionsschutz_nachts: Option<bool>,
    pub auflagen_abschaltung_schallimmissionsschutz_tagsueber: Option<bool>,
    pub auflagen_abschaltung_schattenwurf: Option<bool>,
    pub auflagen_abschaltung_tierschutz: Option<bool>,
    pub auflagen_abschaltung_eiswurf: Option<bool>,
    pub auflagen_abschaltung_sonstige: Option<bool>,
    pub wassertiefe: Option<f64>,
    pub kuestenentfernung: Option<f64>,
    pub buergerenergie: Option<bool>,
    pub nachtkennzeichen: Option<bool>,
    pub eeg_mastr_nummer: Option<String>,
    pub technologie_flugwind: Option<String>,
    pub flughoehe: Option<f64>,
    pub flugradius: Option<f64>,
}

/// `GetEinheitSolar`: photovoltaic installations.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct EinheitSolar {
    #[serde(flatten)]
    pub base: EinheitBase,

    #[serde(rename = "zugeordneteWirkleistungWechselrichter")]
    pub zugeordnete_wirkleistung_wechselrichter: Option<f64>,
    #[serde(default, deserialize_with = "integral_opt")]
    pub anzahl_module: Option<i64>,
    pub art_der_solaranlage: Option<String>,
    pub solaranlagen_kategorie: Option<String>,
    pub leistungsbegrenzung: Option<String>,
    pub einheitliche_ausrichtung_und_neigungswinkel: Option<bool>,
    pub hauptausrichtung: Option<String>,
    pub hauptausrichtung_neigungswinkel: Option<String>,
    pub nebenausrichtung: Option<String>,
    pub nebenausrichtung_neigungswinkel: Option<String>,
    pub groesse_der_in_anspruch_genommenen_flaeche: Option<f64>,
    pub ueberwiegende_nutzungsart_der_flaeche_vor_errichtung_der_solaranlage: Option<String>,
    pub vorheriger_nutzungsartenbereich_der_flaeche: Option<String>,
    #[serde(rename = "ZusaetzlicheMerkmaleDerFlaecheUndAktuellenFlaechennutzung[]")]
    pub zusaetzliche_merkmale_der_flaeche_und_aktuellen_flaechennutzung: Option<Vec<String>>,
    pub lichte_hoehe: Option<f64>,
    pub nutzungsbereich: Option<String>,
    pub buergerenergie: Option<bool>,
    pub zaehlernummer: Option<String>,
    pub eeg_mastr_nummer: Option<String>,
    pub speicher_am_gleichen_ort: Option<bool>,
    pub name_des_solarparks: Option<String>,
}

/// `GetEinheitBiomasse`: biomass plants.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct EinheitBiomasse {
    #[serde(flatten)]
    pub base: EinheitBase,

    pub hauptbrennstoff: Option<String>,
    pub biomasseart: Option<String>,
    pub technologie: String,
    pub eeg_mastr_nummer: String,
    pub kwk_mastr_nummer: Option<String>,
    pub netzreserve_zugeordnet: Option<bool>,
    pub datum_netzreserve: Option<String>,
    pub kapazitaetsreserve_zugeordnet: Option<bool>,
    pub datum_kapazitaetsreserve: Option<String>,
}

/// `GetEinheitStromSpeicher`: electricity storage units.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct EinheitStromSpeicher {
    #[serde(flatten)]
    pub base: EinheitBase,

    pub einsatzort: Option<String>,
    pub ac_dc_koppelung: Option<String>,
    pub batterietechnologie: Option<String>,
    pub leistungsaufnahme_beim_einspeichern: Option<f64>,
    pub pumpbetrieb_kontinuierlich_regelbar: Option<bool>,
    pub pumpspeichertechnologie: Option<String>,
    pub notstromaggregat: Option<bool>,
    pub bestandteil_grenzkraftwerk: Option<bool>,
    pub nettonennleistung_deutschland: Option<f64>,
    pub zugeordnete_wirkleistung_wechselrichter: Option<f64>,
    pub nutzbare_speicherkapazitaet: Option<f64>,
    pub spe_mastr_nummer: Option<String>,
    pub eeg_mastr_nummer: Option<String>,
    pub eeg_anlagentyp: Option<String>,
    pub technologie: Option<String>,
    pub netzreserve_zugeordnet: Option<bool>,
    pub datum_netzreserve: Option<String>,
    pub kapazitaetsreserve_zugeordnet: Option<bool>,
    pub datum_kapazitaetsreserve: Option<String>,
    pub gemeinsam_registrierte_solareinheit_mastr_nummer: Option<String>,
}

/// `GetListeAlleNetzanschlusspunkte`: grid connection points.
///
/// The entries are passed through as opaque objects.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct NetzanschlusspunkteListe {
    pub ergebniscode: String,
    pub aufruf_veraltet: bool,
    pub aufruf_lebenszeit_ende: Option<String>,
    #[serde(deserialize_with = "integral")]
    pub aufruf_version: i64,
    #[serde(rename = "ListeNetzanschlusspunkte[]")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub liste_netzanschlusspunkte: Option<Vec<Map<String, Value>>>,
}
