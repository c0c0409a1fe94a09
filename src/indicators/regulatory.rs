//! CTE DB-HE (2019) climate zones by province and altitude.
//!
//! The reference table is data: one CSV row per altitude band, embedded at
//! compile time and validated when loaded. Lookups never mutate the table, so
//! a single instance is shared read-only by every worker.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::models::ClimateZone;

const EMBEDDED_TABLE: &str = include_str!("../../data/cte_db_he_2019.csv");

#[derive(Debug, Deserialize)]
struct BandRow {
    provincia: String,
    capital: String,
    altitud_capital: f64,
    zona_capital: String,
    altitud_min: Option<f64>,
    altitud_max: Option<f64>,
    zona: Option<String>,
}

/// Half-open altitude interval `[min, max)` in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeBand {
    pub min: f64,
    pub max: f64,
    pub zone: ClimateZone,
}

impl AltitudeBand {
    pub fn new(min: f64, max: f64, zone: ClimateZone) -> Self {
        Self { min, max, zone }
    }

    pub fn contains(&self, altitude: f64) -> bool {
        self.min <= altitude && altitude < self.max
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceZones {
    pub name: String,
    pub capital: String,
    pub capital_altitude: f64,
    pub reference_zone: ClimateZone,
    pub bands: Vec<AltitudeBand>,
}

impl ProvinceZones {
    pub fn new(
        name: String,
        capital: String,
        capital_altitude: f64,
        reference_zone: ClimateZone,
        bands: Vec<AltitudeBand>,
    ) -> Self {
        Self {
            name,
            capital,
            capital_altitude,
            reference_zone,
            bands,
        }
    }

    /// First band containing the altitude, in list order
    pub fn zone_at(&self, altitude: f64) -> Option<ClimateZone> {
        self.bands
            .iter()
            .find(|band| band.contains(altitude))
            .map(|band| band.zone)
    }

    /// Altitude range covered by the bands
    pub fn coverage(&self) -> Option<(f64, f64)> {
        match (self.bands.first(), self.bands.last()) {
            (Some(first), Some(last)) => Some((first.min, last.max)),
            _ => None,
        }
    }

    /// Bands must be non-empty, sorted and contiguous, and the capital must
    /// fall in a band carrying the reference zone.
    fn validate(&self) -> Result<()> {
        if self.bands.is_empty() {
            return Err(ProcessingError::InvalidZoneTable(format!(
                "province '{}' has no altitude bands",
                self.name
            )));
        }

        for band in &self.bands {
            if !(band.min < band.max) {
                return Err(ProcessingError::InvalidZoneTable(format!(
                    "province '{}' has an empty band [{}, {})",
                    self.name, band.min, band.max
                )));
            }
        }

        for pair in self.bands.windows(2) {
            if pair[0].max != pair[1].min {
                return Err(ProcessingError::InvalidZoneTable(format!(
                    "province '{}' bands are not contiguous: [{}, {}) followed by [{}, {})",
                    self.name, pair[0].min, pair[0].max, pair[1].min, pair[1].max
                )));
            }
        }

        match self.zone_at(self.capital_altitude) {
            Some(zone) if zone == self.reference_zone => Ok(()),
            found => Err(ProcessingError::InvalidZoneTable(format!(
                "province '{}': capital {} at {} m resolves to {:?}, expected {}",
                self.name,
                self.capital,
                self.capital_altitude,
                found.map(|z| z.to_string()),
                self.reference_zone
            ))),
        }
    }
}

/// Province → ordered altitude bands → zone code
#[derive(Debug, Clone)]
pub struct RegulatoryZoneTable {
    provinces: Vec<ProvinceZones>,
    by_name: HashMap<String, usize>,
    by_capital: HashMap<String, usize>,
}

impl RegulatoryZoneTable {
    /// Load the table compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_reader(EMBEDDED_TABLE.as_bytes())
    }

    /// Load a replacement table with the same column layout
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut provinces: Vec<ProvinceZones> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (line, row) in csv_reader.deserialize::<BandRow>().enumerate() {
            let row = row?;

            let (min, max, zone) = match (row.altitud_min, row.altitud_max, row.zona.as_deref()) {
                (None, None, None) => {
                    // Dangling entry after a complete band list
                    debug!(
                        province = %row.provincia,
                        line = line + 2,
                        "Dropping empty altitude band"
                    );
                    continue;
                }
                (Some(min), Some(max), Some(zone)) => (min, max, zone.parse::<ClimateZone>()?),
                _ => {
                    return Err(ProcessingError::InvalidZoneTable(format!(
                        "incomplete altitude band for province '{}' on line {}",
                        row.provincia,
                        line + 2
                    )))
                }
            };

            let band = AltitudeBand::new(min, max, zone);

            match index.get(&row.provincia) {
                Some(&i) => {
                    let province = &mut provinces[i];
                    if province.capital != row.capital
                        || province.capital_altitude != row.altitud_capital
                    {
                        return Err(ProcessingError::InvalidZoneTable(format!(
                            "conflicting capital data for province '{}' on line {}",
                            row.provincia,
                            line + 2
                        )));
                    }
                    province.bands.push(band);
                }
                None => {
                    let reference_zone = row.zona_capital.parse::<ClimateZone>()?;
                    index.insert(row.provincia.clone(), provinces.len());
                    provinces.push(ProvinceZones::new(
                        row.provincia,
                        row.capital,
                        row.altitud_capital,
                        reference_zone,
                        vec![band],
                    ));
                }
            }
        }

        Self::from_provinces(provinces)
    }

    /// Build a table from already-parsed provinces, validating each one
    pub fn from_provinces(provinces: Vec<ProvinceZones>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(provinces.len());
        let mut by_capital = HashMap::with_capacity(provinces.len());

        for (i, province) in provinces.iter().enumerate() {
            province.validate()?;

            if by_name.insert(province.name.clone(), i).is_some() {
                return Err(ProcessingError::InvalidZoneTable(format!(
                    "province '{}' appears twice",
                    province.name
                )));
            }
            by_capital.insert(province.capital.clone(), i);
        }

        Ok(Self {
            provinces,
            by_name,
            by_capital,
        })
    }

    /// Regulatory zone for an altitude within a province
    pub fn lookup(&self, altitude: f64, province: &str) -> Result<ClimateZone> {
        let zones = self.province(province)?;
        zones
            .zone_at(altitude)
            .ok_or_else(|| ProcessingError::MalformedBandTable {
                province: province.to_string(),
                altitude,
            })
    }

    pub fn province(&self, name: &str) -> Result<&ProvinceZones> {
        self.by_name
            .get(name)
            .map(|&i| &self.provinces[i])
            .ok_or_else(|| ProcessingError::UnknownProvince {
                province: name.to_string(),
            })
    }

    /// Zone of the provincial capital
    pub fn reference_zone(&self, province: &str) -> Result<ClimateZone> {
        self.province(province).map(|p| p.reference_zone)
    }

    pub fn province_of_capital(&self, capital: &str) -> Option<&ProvinceZones> {
        self.by_capital.get(capital).map(|&i| &self.provinces[i])
    }

    pub fn provinces(&self) -> &[ProvinceZones] {
        &self.provinces
    }

    pub fn len(&self) -> usize {
        self.provinces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
    }
}
