use crate::error::Result;
use crate::models::{ClimateZone, SeverityResult, SummerZone, WinterZone};
use crate::utils::constants::{SUMMER_THRESHOLDS, WINTER_THRESHOLDS};

/// Winter zone for a winter severity index; each bound is inclusive
pub fn winter_zone(sci: f64) -> WinterZone {
    WINTER_THRESHOLDS
        .iter()
        .zip(WinterZone::ALL)
        .find(|&(&limit, _)| sci <= limit)
        .map_or(WinterZone::E, |(_, zone)| zone)
}

/// Summer zone for a summer severity index; each bound is inclusive
pub fn summer_zone(scv: f64) -> SummerZone {
    SUMMER_THRESHOLDS
        .iter()
        .zip(SummerZone::ALL)
        .find(|&(&limit, _)| scv <= limit)
        .map_or(SummerZone::Four, |(_, zone)| zone)
}

pub fn classify(severity: &SeverityResult) -> ClimateZone {
    ClimateZone::new(winter_zone(severity.sci), summer_zone(severity.scv))
}

/// Ordinal level of a winter zone letter (a = 1 .. E = 6)
pub fn winter_level(code: &str) -> Result<i32> {
    code.parse::<WinterZone>().map(WinterZone::level)
}

/// Signed level difference `a − b` between two winter classifications
pub fn level_difference(a: WinterZone, b: WinterZone) -> i32 {
    a.level() - b.level()
}

/// Signed level difference `a − b` between two summer classifications
pub fn summer_level_difference(a: SummerZone, b: SummerZone) -> i32 {
    a.level() - b.level()
}
