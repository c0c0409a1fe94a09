use crate::error::Result;
use crate::models::{ClimateZone, ResultRecord};
use std::collections::BTreeMap;
use std::path::Path;

/// Agreement between weather-derived and regulatory zones over a result table
#[derive(Debug, Clone, PartialEq)]
pub struct ZoningSummary {
    pub total_records: usize,
    pub winter_matches: usize,
    pub summer_matches: usize,
    pub full_matches: usize,
    /// Count of records per winter level difference
    pub winter_diffs: BTreeMap<i32, usize>,
    /// Count of records per summer level difference
    pub summer_diffs: BTreeMap<i32, usize>,
    pub regulatory_zones: BTreeMap<String, usize>,
    pub weather_zones: BTreeMap<String, usize>,
    pub severity_ranges: SeverityRanges,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityRanges {
    pub min_sci: f64,
    pub max_sci: f64,
    pub min_scv: f64,
    pub max_scv: f64,
}

impl ZoningSummary {
    pub fn winter_agreement(&self) -> f64 {
        percentage(self.winter_matches, self.total_records)
    }

    pub fn summer_agreement(&self) -> f64 {
        percentage(self.summer_matches, self.total_records)
    }

    pub fn full_agreement(&self) -> f64 {
        percentage(self.full_matches, self.total_records)
    }

    pub fn summary(&self) -> String {
        format!(
            "Zoning Summary:\n\
            - {} municipalities\n\
            - Winter zone agreement: {}/{} ({:.1}%)\n\
            - Summer zone agreement: {}/{} ({:.1}%)\n\
            - Both zones agree: {}/{} ({:.1}%)",
            self.total_records,
            self.winter_matches,
            self.total_records,
            self.winter_agreement(),
            self.summer_matches,
            self.total_records,
            self.summer_agreement(),
            self.full_matches,
            self.total_records,
            self.full_agreement()
        )
    }

    pub fn detailed_summary(&self) -> String {
        let mut out = self.summary();

        if self.total_records == 0 {
            return out;
        }

        out.push_str(&format!(
            "\n\nSeverity Ranges:\n\
            - SCI: {:.2} to {:.2}\n\
            - SCV: {:.2} to {:.2}",
            self.severity_ranges.min_sci,
            self.severity_ranges.max_sci,
            self.severity_ranges.min_scv,
            self.severity_ranges.max_scv
        ));

        out.push_str("\n\nWinter Level Differences (weather - CTE):\n");
        out.push_str(&histogram(&self.winter_diffs, self.total_records));
        out.push_str("\nSummer Level Differences (weather - CTE):\n");
        out.push_str(&histogram(&self.summer_diffs, self.total_records));

        out.push_str("\nZones (CTE / weather):\n");
        let mut zones: Vec<&String> = self
            .regulatory_zones
            .keys()
            .chain(self.weather_zones.keys())
            .collect();
        zones.sort_by_key(|z| zone_sort_key(z));
        zones.dedup();
        for zone in zones {
            out.push_str(&format!(
                "  {:>3}: {:>5} / {:>5}\n",
                zone,
                self.regulatory_zones.get(zone).copied().unwrap_or(0),
                self.weather_zones.get(zone).copied().unwrap_or(0)
            ));
        }

        out
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn histogram(counts: &BTreeMap<i32, usize>, total: usize) -> String {
    counts
        .iter()
        .map(|(diff, count)| {
            format!(
                "  {:>+3}: {:>5} ({:.1}%)\n",
                diff,
                count,
                percentage(*count, total)
            )
        })
        .collect()
}

/// Order zone labels by winter then summer level, so "a3" sorts before "A3"
fn zone_sort_key(label: &str) -> (i32, i32) {
    match label.parse::<ClimateZone>() {
        Ok(zone) => (zone.winter.level(), zone.summer.level()),
        Err(_) => (i32::MAX, i32::MAX),
    }
}

pub struct ZoningAnalyzer;

impl ZoningAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Summarise a result table previously written to CSV or Parquet
    pub fn analyze_file(&self, path: &Path) -> Result<ZoningSummary> {
        let records = crate::writers::read_results(path)?;
        Ok(self.analyze(&records))
    }

    pub fn analyze(&self, records: &[ResultRecord]) -> ZoningSummary {
        let mut summary = ZoningSummary {
            total_records: records.len(),
            winter_matches: 0,
            summer_matches: 0,
            full_matches: 0,
            winter_diffs: BTreeMap::new(),
            summer_diffs: BTreeMap::new(),
            regulatory_zones: BTreeMap::new(),
            weather_zones: BTreeMap::new(),
            severity_ranges: SeverityRanges {
                min_sci: f64::NAN,
                max_sci: f64::NAN,
                min_scv: f64::NAN,
                max_scv: f64::NAN,
            },
        };

        for record in records {
            if record.winter_diff == 0 {
                summary.winter_matches += 1;
            }
            if record.summer_diff == 0 {
                summary.summer_matches += 1;
            }
            if record.winter_diff == 0 && record.summer_diff == 0 {
                summary.full_matches += 1;
            }

            *summary.winter_diffs.entry(record.winter_diff).or_insert(0) += 1;
            *summary.summer_diffs.entry(record.summer_diff).or_insert(0) += 1;
            *summary
                .regulatory_zones
                .entry(record.regulatory_zone().to_string())
                .or_insert(0) += 1;
            *summary
                .weather_zones
                .entry(record.weather_zone().to_string())
                .or_insert(0) += 1;

            // f64::min/max ignore the NaN seed
            let ranges = &mut summary.severity_ranges;
            ranges.min_sci = ranges.min_sci.min(record.sci);
            ranges.max_sci = ranges.max_sci.max(record.sci);
            ranges.min_scv = ranges.min_scv.min(record.scv);
            ranges.max_scv = ranges.max_scv.max(record.scv);
        }

        summary
    }
}

impl Default for ZoningAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
