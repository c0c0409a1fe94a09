use crate::error::{ProcessingError, Result};
use crate::indicators::solar::winter_theoretical_daylight;
use crate::models::{HourlyRecord, HourlySeries, SeverityResult};
use crate::utils::constants::*;
use crate::utils::coordinates::round_to;

/// Reduces an hourly year into degree-days, sunshine fraction and the
/// winter (SCI) and summer (SCV) severity indices.
#[derive(Debug, Clone, Copy)]
pub struct SeverityCalculator {
    base_temperature: f64,
    sunshine_threshold: f64,
}

impl SeverityCalculator {
    pub fn new() -> Self {
        Self {
            base_temperature: BASE_TEMPERATURE,
            sunshine_threshold: SUNSHINE_THRESHOLD,
        }
    }

    pub fn compute(&self, series: &HourlySeries, latitude: f64) -> Result<SeverityResult> {
        let gd_winter = round_to(self.winter_degree_days(series), 1);
        let sunshine_hours = self.winter_sunshine_hours(series);

        let theoretical = round_to(winter_theoretical_daylight(latitude), 1);
        if !theoretical.is_finite() || theoretical == 0.0 {
            return Err(ProcessingError::DegenerateGeometry(format!(
                "winter theoretical daylight is {} at latitude {}",
                theoretical, latitude
            )));
        }

        let sunshine_fraction = round_to(sunshine_hours as f64 / theoretical, 3);
        let sci = winter_severity(gd_winter, sunshine_fraction);

        let gd_summer = round_to(self.summer_degree_days(series), 1);
        let scv = summer_severity(gd_summer);

        Ok(SeverityResult {
            gd_winter,
            gd_summer,
            sunshine_fraction,
            sci,
            scv,
        })
    }

    /// Σ max(0, 20 − T)/24 over the winter hours
    pub fn winter_degree_days(&self, series: &HourlySeries) -> f64 {
        winter_hours(series)
            .map(|r| (self.base_temperature - r.dry_bulb_temp).max(0.0) / 24.0)
            .sum()
    }

    /// Σ max(0, T − 20)/24 over the summer hours
    pub fn summer_degree_days(&self, series: &HourlySeries) -> f64 {
        let (start, end) = SUMMER_HOURS;
        series.records()[start..end]
            .iter()
            .map(|r| (r.dry_bulb_temp - self.base_temperature).max(0.0) / 24.0)
            .sum()
    }

    /// Winter hours with beam irradiance above the sunshine threshold
    pub fn winter_sunshine_hours(&self, series: &HourlySeries) -> usize {
        winter_hours(series)
            .filter(|r| r.beam_irradiance > self.sunshine_threshold)
            .count()
    }
}

impl Default for SeverityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Series always hold a full year, so the fixed hour ranges are in bounds
fn winter_hours(series: &HourlySeries) -> impl Iterator<Item = &HourlyRecord> {
    let records = series.records();
    WINTER_HOURS
        .iter()
        .flat_map(move |&(start, end)| records[start..end].iter())
}

/// SCI regression on winter degree-days and sunshine fraction, rounded to 2 decimals
pub fn winter_severity(gd_winter: f64, sunshine_fraction: f64) -> f64 {
    round_to(
        SCI_GD * gd_winter
            + SCI_SUN * sunshine_fraction
            + SCI_GD2 * gd_winter * gd_winter
            + SCI_SUN2 * sunshine_fraction * sunshine_fraction
            + SCI_INTERCEPT,
        2,
    )
}

/// SCV regression on summer degree-days, rounded to 2 decimals
pub fn summer_severity(gd_summer: f64) -> f64 {
    round_to(
        SCV_GD * gd_summer + SCV_GD2 * gd_summer * gd_summer + SCV_INTERCEPT,
        2,
    )
}
