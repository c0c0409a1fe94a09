use chrono::{DateTime, Local};
use serde::Serialize;

use crate::models::LocationMismatch;

/// A municipality whose evaluation failed, kept out of the output table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MunicipalityFailure {
    #[serde(rename = "COD_INE")]
    pub cod_ine: String,
    #[serde(rename = "NOMBRE_ACTUAL")]
    pub name: String,
    #[serde(rename = "PROVINCIA")]
    pub province: String,
    #[serde(rename = "ERROR")]
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub total_municipalities: usize,
    pub succeeded: usize,
    pub failures: Vec<MunicipalityFailure>,
    pub location_mismatches: Vec<LocationMismatch>,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl BatchReport {
    pub fn new(total_municipalities: usize) -> Self {
        let now = Local::now();
        Self {
            total_municipalities,
            succeeded: 0,
            failures: Vec::new(),
            location_mismatches: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Generate a summary report
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();
        let total = self.total_municipalities.max(1) as f64;
        let elapsed = self.finished_at - self.started_at;

        summary.push_str("=== Indicator Batch Report ===\n");
        summary.push_str(&format!("Municipalities: {}\n", self.total_municipalities));
        summary.push_str(&format!(
            "Computed: {} ({:.1}%)\n",
            self.succeeded,
            100.0 * self.succeeded as f64 / total
        ));
        summary.push_str(&format!(
            "Failed: {} ({:.1}%)\n",
            self.failures.len(),
            100.0 * self.failures.len() as f64 / total
        ));
        summary.push_str(&format!(
            "Location mismatches (non-fatal): {}\n",
            self.location_mismatches.len()
        ));
        summary.push_str(&format!(
            "Elapsed: {:.1}s\n",
            elapsed.num_milliseconds() as f64 / 1000.0
        ));

        if !self.failures.is_empty() {
            summary.push_str("\nFirst 10 Failures:\n");
            for (i, failure) in self.failures.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. {} {} ({}): {}\n",
                    i + 1,
                    failure.cod_ine,
                    failure.name,
                    failure.province,
                    failure.error
                ));
            }
        }

        if !self.location_mismatches.is_empty() {
            summary.push_str("\nFirst 10 Location Mismatches:\n");
            for (i, mismatch) in self.location_mismatches.iter().take(10).enumerate() {
                summary.push_str(&format!("  {}. {}\n", i + 1, mismatch));
            }
        }

        summary
    }
}
