pub mod municipality_reader;
pub mod tmy_reader;

pub use municipality_reader::MunicipalityReader;
pub use tmy_reader::TmyReader;

use crate::error::Result;
use crate::models::{HourlySeries, Municipality};
use std::path::PathBuf;

/// Where a municipality's hourly weather series comes from
///
/// The pipeline only sees this trait, so tests and dry runs can supply
/// in-memory series without touching the filesystem.
pub trait WeatherSource: Send + Sync {
    fn load(&self, municipality: &Municipality) -> Result<HourlySeries>;
}

/// PVGIS TMY files stored in one directory, named per municipality
pub struct TmyDirectory {
    dir: PathBuf,
    reader: TmyReader,
}

impl TmyDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            reader: TmyReader::new(),
        }
    }

    pub fn path_for(&self, municipality: &Municipality) -> PathBuf {
        self.dir.join(municipality.tmy_filename())
    }
}

impl WeatherSource for TmyDirectory {
    fn load(&self, municipality: &Municipality) -> Result<HourlySeries> {
        self.reader.read_file(&self.path_for(municipality))
    }
}
