use serde::{Deserialize, Serialize};
use std::fmt;

use crate::indicators::classifier::{level_difference, summer_level_difference};
use crate::models::{ClimateZone, Municipality, SeriesLocation, SummerZone, WinterZone};

/// Continuous severity indicators derived from one hourly series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityResult {
    /// Winter degree-days on a 20 °C base
    pub gd_winter: f64,
    /// Summer degree-days on a 20 °C base
    pub gd_summer: f64,
    /// Winter sunshine fraction n/N
    pub sunshine_fraction: f64,
    /// Winter severity index
    pub sci: f64,
    /// Summer severity index
    pub scv: f64,
}

/// One row of the output table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "COD_INE")]
    pub cod_ine: String,
    #[serde(rename = "COD_PROV")]
    pub cod_prov: String,
    #[serde(rename = "PROVINCIA")]
    pub province: String,
    #[serde(rename = "NOMBRE_ACTUAL")]
    pub name: String,
    #[serde(rename = "LONGITUD_ETRS89")]
    pub longitude: f64,
    #[serde(rename = "LATITUD_ETRS89")]
    pub latitude: f64,
    #[serde(rename = "ALTITUD")]
    pub altitude: f64,
    #[serde(rename = "ARCHIVO_TMY")]
    pub tmy_file: String,

    #[serde(rename = "ZCI_CTE_2019")]
    pub winter_zone_cte: WinterZone,
    #[serde(rename = "ZCV_CTE_2019")]
    pub summer_zone_cte: SummerZone,

    #[serde(rename = "GD_I")]
    pub gd_winter: f64,
    #[serde(rename = "GD_V")]
    pub gd_summer: f64,
    #[serde(rename = "n_N")]
    pub sunshine_fraction: f64,
    #[serde(rename = "SCI")]
    pub sci: f64,
    #[serde(rename = "SCV")]
    pub scv: f64,

    #[serde(rename = "ZCI_TMY")]
    pub winter_zone_tmy: WinterZone,
    #[serde(rename = "ZCV_TMY")]
    pub summer_zone_tmy: SummerZone,

    /// Weather-derived winter level minus regulatory winter level
    #[serde(rename = "ZCI_DIFF")]
    pub winter_diff: i32,
    /// Weather-derived summer level minus regulatory summer level
    #[serde(rename = "ZCV_DIFF")]
    pub summer_diff: i32,
}

impl ResultRecord {
    pub fn assemble(
        municipality: &Municipality,
        regulatory: ClimateZone,
        severity: &SeverityResult,
        weather: ClimateZone,
    ) -> Self {
        Self {
            cod_ine: municipality.cod_ine.clone(),
            cod_prov: municipality.cod_prov.clone(),
            province: municipality.province.clone(),
            name: municipality.name.clone(),
            longitude: municipality.longitude,
            latitude: municipality.latitude,
            altitude: municipality.altitude,
            tmy_file: municipality.tmy_filename(),
            winter_zone_cte: regulatory.winter,
            summer_zone_cte: regulatory.summer,
            gd_winter: severity.gd_winter,
            gd_summer: severity.gd_summer,
            sunshine_fraction: severity.sunshine_fraction,
            sci: severity.sci,
            scv: severity.scv,
            winter_zone_tmy: weather.winter,
            summer_zone_tmy: weather.summer,
            winter_diff: level_difference(weather.winter, regulatory.winter),
            summer_diff: summer_level_difference(weather.summer, regulatory.summer),
        }
    }

    pub fn regulatory_zone(&self) -> ClimateZone {
        ClimateZone::new(self.winter_zone_cte, self.summer_zone_cte)
    }

    pub fn weather_zone(&self) -> ClimateZone {
        ClimateZone::new(self.winter_zone_tmy, self.summer_zone_tmy)
    }
}

/// Declared registry location disagreeing with the weather file header
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMismatch {
    pub cod_ine: String,
    pub declared: SeriesLocation,
    pub embedded: SeriesLocation,
}

impl fmt::Display for LocationMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: registry ({:.3}, {:.3}, {:.1} m) vs weather file ({:.3}, {:.3}, {:.1} m)",
            self.cod_ine,
            self.declared.latitude,
            self.declared.longitude,
            self.declared.elevation,
            self.embedded.latitude,
            self.embedded.longitude,
            self.embedded.elevation
        )
    }
}
