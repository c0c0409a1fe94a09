//! Climate-severity indicators and zone classification.
//!
//! - [`regulatory`]: CTE zone by province and altitude
//! - [`solar`]: theoretical day length
//! - [`severity`]: degree-days, sunshine fraction, SCI and SCV
//! - [`classifier`]: severity indices to zone letters and numbers

pub mod classifier;
pub mod regulatory;
pub mod severity;
pub mod solar;

pub use classifier::{classify, level_difference, summer_level_difference, summer_zone, winter_level, winter_zone};
pub use regulatory::{AltitudeBand, ProvinceZones, RegulatoryZoneTable};
pub use severity::SeverityCalculator;
