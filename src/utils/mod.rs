pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{round_to, within_decimals, validate_spain_coordinates};
pub use filename::{default_tmy_filename, is_parquet_path};
pub use progress::ProgressReporter;
