use crate::error::{ProcessingError, Result};
use crate::models::{HourlyRecord, HourlySeries, SeriesLocation};
use crate::utils::constants::*;
use std::fs;
use std::path::Path;

/// Reader for PVGIS typical meteorological year CSV files
///
/// Layout: three `Label: value` lines (latitude, longitude, elevation), the
/// 13-line month/year block, a column header, 8760 hourly rows and a
/// free-text legend.
pub struct TmyReader;

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    temperature: usize,
    beam: usize,
    global: Option<usize>,
    diffuse: Option<usize>,
    humidity: Option<usize>,
    wind: Option<usize>,
}

impl TmyReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_file(&self, path: &Path) -> Result<HourlySeries> {
        let content = fs::read_to_string(path)?;
        self.parse(&content).map_err(|e| match e {
            ProcessingError::MalformedWeatherFile(message) => {
                ProcessingError::MalformedWeatherFile(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    pub fn parse(&self, content: &str) -> Result<HourlySeries> {
        let header_lines = TMY_METADATA_LINES + TMY_SKIPPED_LINES;
        let mut parts = content.splitn(header_lines + 1, '\n');

        let latitude = parse_metadata(parts.next(), "latitude")?;
        let longitude = parse_metadata(parts.next(), "longitude")?;
        let elevation = parse_metadata(parts.next(), "elevation")?;

        for _ in 0..TMY_SKIPPED_LINES {
            if parts.next().is_none() {
                return Err(malformed("file ends inside the header block"));
            }
        }

        let body = parts
            .next()
            .ok_or_else(|| malformed("no hourly data after the header block"))?;

        let records = self.parse_hourly_rows(body)?;
        HourlySeries::new(SeriesLocation::new(latitude, longitude, elevation), records)
    }

    fn parse_hourly_rows(&self, body: &str) -> Result<Vec<HourlyRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let headers = reader.headers()?.clone();
        let find = |name: &str| headers.iter().position(|h| h == name);

        let columns = ColumnIndex {
            temperature: find(TMY_TEMPERATURE_COLUMN)
                .ok_or_else(|| malformed(&format!("missing column {}", TMY_TEMPERATURE_COLUMN)))?,
            beam: find(TMY_BEAM_COLUMN)
                .ok_or_else(|| malformed(&format!("missing column {}", TMY_BEAM_COLUMN)))?,
            global: find(TMY_GLOBAL_COLUMN),
            diffuse: find(TMY_DIFFUSE_COLUMN),
            humidity: find(TMY_HUMIDITY_COLUMN),
            wind: find(TMY_WIND_COLUMN),
        };

        let mut records = Vec::with_capacity(HOURS_PER_YEAR);

        for (row, result) in reader.records().enumerate() {
            let record = result?;

            if records.len() == HOURS_PER_YEAR {
                // Anything after the year must be the legend, not another data row
                if record.len() == headers.len() && looks_like_timestamp(record.get(0)) {
                    return Err(malformed(&format!(
                        "more than {} hourly rows",
                        HOURS_PER_YEAR
                    )));
                }
                break;
            }

            if record.len() < headers.len() {
                return Err(malformed(&format!(
                    "hourly row {} has {} fields, expected {}",
                    row + 1,
                    record.len(),
                    headers.len()
                )));
            }

            let field = |index: usize, name: &str| -> Result<f64> {
                let raw = record.get(index).unwrap_or_default();
                raw.parse::<f64>().map_err(|_| {
                    malformed(&format!("hourly row {}: invalid {} value '{}'", row + 1, name, raw))
                })
            };
            let optional = |index: Option<usize>| -> Option<f64> {
                index
                    .and_then(|i| record.get(i))
                    .and_then(|raw| raw.parse::<f64>().ok())
            };

            records.push(HourlyRecord {
                dry_bulb_temp: field(columns.temperature, TMY_TEMPERATURE_COLUMN)?,
                beam_irradiance: field(columns.beam, TMY_BEAM_COLUMN)?,
                global_horizontal: optional(columns.global),
                diffuse_horizontal: optional(columns.diffuse),
                relative_humidity: optional(columns.humidity),
                wind_speed: optional(columns.wind),
            });
        }

        if records.len() != HOURS_PER_YEAR {
            return Err(malformed(&format!(
                "expected {} hourly rows, found {}",
                HOURS_PER_YEAR,
                records.len()
            )));
        }

        Ok(records)
    }
}

impl Default for TmyReader {
    fn default() -> Self {
        Self::new()
    }
}

fn malformed(message: &str) -> ProcessingError {
    ProcessingError::MalformedWeatherFile(message.to_string())
}

/// Parse the value after the colon of a `Label (unit): value` line
fn parse_metadata(line: Option<&str>, label: &str) -> Result<f64> {
    let line = line.ok_or_else(|| malformed(&format!("missing {} line", label)))?;
    let (_, value) = line
        .split_once(':')
        .ok_or_else(|| malformed(&format!("{} line has no ':' separator: '{}'", label, line.trim())))?;

    value
        .trim()
        .parse::<f64>()
        .map_err(|_| malformed(&format!("invalid {} value '{}'", label, value.trim())))
}

/// PVGIS timestamps look like `20070101:0000`
fn looks_like_timestamp(field: Option<&str>) -> bool {
    field
        .and_then(|f| f.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}
