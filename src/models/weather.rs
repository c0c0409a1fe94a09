use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::utils::constants::HOURS_PER_YEAR;

/// Location embedded in a weather file header
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl SeriesLocation {
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }
}

/// One hour of a typical meteorological year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Dry-bulb air temperature at 2 m (°C)
    pub dry_bulb_temp: f64,
    /// Direct (beam) normal irradiance (W/m²)
    pub beam_irradiance: f64,
    pub global_horizontal: Option<f64>,
    pub diffuse_horizontal: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl HourlyRecord {
    pub fn new(dry_bulb_temp: f64, beam_irradiance: f64) -> Self {
        Self {
            dry_bulb_temp,
            beam_irradiance,
            global_horizontal: None,
            diffuse_horizontal: None,
            relative_humidity: None,
            wind_speed: None,
        }
    }
}

/// 8760 ordered hourly records for one location
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    location: SeriesLocation,
    records: Vec<HourlyRecord>,
}

impl HourlySeries {
    pub fn new(location: SeriesLocation, records: Vec<HourlyRecord>) -> Result<Self> {
        if records.len() != HOURS_PER_YEAR {
            return Err(ProcessingError::MalformedWeatherFile(format!(
                "expected {} hourly rows, found {}",
                HOURS_PER_YEAR,
                records.len()
            )));
        }

        Ok(Self { location, records })
    }

    /// Build a series from parallel temperature and beam irradiance columns
    pub fn from_columns(
        location: SeriesLocation,
        temperatures: &[f64],
        beam_irradiance: &[f64],
    ) -> Result<Self> {
        if temperatures.len() != beam_irradiance.len() {
            return Err(ProcessingError::MalformedWeatherFile(format!(
                "column lengths differ: {} temperatures, {} irradiance values",
                temperatures.len(),
                beam_irradiance.len()
            )));
        }

        let records = temperatures
            .iter()
            .zip(beam_irradiance)
            .map(|(&t, &b)| HourlyRecord::new(t, b))
            .collect();

        Self::new(location, records)
    }

    pub fn location(&self) -> &SeriesLocation {
        &self.location
    }

    pub fn records(&self) -> &[HourlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_requires_full_year() {
        let location = SeriesLocation::new(40.409, -3.703, 657.0);

        let short = vec![HourlyRecord::new(20.0, 0.0); 100];
        assert!(matches!(
            HourlySeries::new(location, short),
            Err(ProcessingError::MalformedWeatherFile(_))
        ));

        let full = vec![HourlyRecord::new(20.0, 0.0); HOURS_PER_YEAR];
        let series = HourlySeries::new(location, full).unwrap();
        assert_eq!(series.len(), HOURS_PER_YEAR);
        assert_eq!(series.location().elevation, 657.0);
    }

    #[test]
    fn test_from_columns_rejects_mismatched_lengths() {
        let location = SeriesLocation::new(40.0, -3.0, 600.0);
        let temps = vec![10.0; HOURS_PER_YEAR];
        let beams = vec![0.0; HOURS_PER_YEAR - 1];

        assert!(HourlySeries::from_columns(location, &temps, &beams).is_err());
    }
}
