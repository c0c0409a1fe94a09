use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::filename::default_tmy_filename;

/// One row of the municipality registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Municipality {
    /// INE code, kept as text to preserve leading zeros
    #[serde(rename = "COD_INE")]
    #[validate(length(min = 1))]
    pub cod_ine: String,

    #[serde(rename = "COD_PROV")]
    pub cod_prov: String,

    #[serde(rename = "PROVINCIA")]
    #[validate(length(min = 1))]
    pub province: String,

    #[serde(rename = "NOMBRE_ACTUAL")]
    pub name: String,

    #[serde(rename = "LONGITUD_ETRS89")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[serde(rename = "LATITUD_ETRS89")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[serde(rename = "ALTITUD")]
    pub altitude: f64,

    #[serde(rename = "ARCHIVO_TMY", default)]
    pub tmy_file: String,
}

impl Municipality {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cod_ine: String,
        cod_prov: String,
        province: String,
        name: String,
        longitude: f64,
        latitude: f64,
        altitude: f64,
        tmy_file: String,
    ) -> Self {
        Self {
            cod_ine,
            cod_prov,
            province,
            name,
            longitude,
            latitude,
            altitude,
            tmy_file,
        }
    }

    /// Weather file name, falling back to `{COD_INE}_{NOMBRE_ACTUAL}.csv`
    pub fn tmy_filename(&self) -> String {
        if self.tmy_file.trim().is_empty() {
            default_tmy_filename(&self.cod_ine, &self.name)
        } else {
            self.tmy_file.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn madrid() -> Municipality {
        Municipality::new(
            "28079".to_string(),
            "28".to_string(),
            "Madrid".to_string(),
            "Madrid".to_string(),
            -3.703,
            40.409,
            657.0,
            String::new(),
        )
    }

    #[test]
    fn test_municipality_validation() {
        assert!(madrid().validate().is_ok());

        let mut invalid = madrid();
        invalid.latitude = 91.0;
        assert!(invalid.validate().is_err());

        let mut unnamed = madrid();
        unnamed.cod_ine = String::new();
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_tmy_filename_fallback() {
        let mut municipality = madrid();
        assert_eq!(municipality.tmy_filename(), "28079_Madrid.csv");

        municipality.tmy_file = "custom.csv".to_string();
        assert_eq!(municipality.tmy_filename(), "custom.csv");
    }
}
