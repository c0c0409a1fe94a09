pub mod zoning_analyzer;

pub use zoning_analyzer::{SeverityRanges, ZoningAnalyzer, ZoningSummary};
