pub mod indicators;
pub mod municipality;
pub mod weather;
pub mod zone;

pub use indicators::{LocationMismatch, ResultRecord, SeverityResult};
pub use municipality::Municipality;
pub use weather::{HourlyRecord, HourlySeries, SeriesLocation};
pub use zone::{ClimateZone, SummerZone, WinterZone};
