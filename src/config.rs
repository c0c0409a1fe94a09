use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_MUNICIPALITIES_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_TMY_DIR,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Configuration file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_NAME: &str = "cte-zoning";

/// Prefix of the environment variables read into [`Settings`]
pub const ENV_PREFIX: &str = "CTE_ZONING";

/// Runtime settings for a batch run
///
/// Resolved from, in decreasing priority: command-line overrides,
/// `CTE_ZONING_*` environment variables, a TOML file and built-in defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct Settings {
    pub municipalities_file: PathBuf,
    pub tmy_dir: PathBuf,
    pub output_file: PathBuf,
    /// Replacement for the embedded CTE reference table
    #[serde(default)]
    pub zone_table: Option<PathBuf>,
    #[validate(range(min = 1))]
    pub max_workers: usize,
    pub compression: String,
}

/// Values given on the command line; `None` leaves lower layers in charge
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub municipalities_file: Option<PathBuf>,
    pub tmy_dir: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub zone_table: Option<PathBuf>,
    pub max_workers: Option<usize>,
    pub compression: Option<String>,
}

impl Settings {
    /// Load settings without command-line overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with(config_file, &SettingsOverrides::default())
    }

    pub fn load_with(config_file: Option<&Path>, overrides: &SettingsOverrides) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("municipalities_file", DEFAULT_MUNICIPALITIES_FILE)?
            .set_default("tmy_dir", DEFAULT_TMY_DIR)?
            .set_default("output_file", DEFAULT_OUTPUT_FILE)?
            .set_default("max_workers", num_cpus::get() as i64)?
            .set_default("compression", COMPRESSION_SNAPPY)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("municipalities_file", path_value(&overrides.municipalities_file))?
            .set_override_option("tmy_dir", path_value(&overrides.tmy_dir))?
            .set_override_option("output_file", path_value(&overrides.output_file))?
            .set_override_option("zone_table", path_value(&overrides.zone_table))?
            .set_override_option("max_workers", overrides.max_workers.map(|n| n as i64))?
            .set_override_option("compression", overrides.compression.clone())?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        settings.validate_compression()?;

        Ok(settings)
    }

    fn validate_compression(&self) -> Result<()> {
        let known = [
            COMPRESSION_SNAPPY,
            COMPRESSION_GZIP,
            COMPRESSION_LZ4,
            COMPRESSION_ZSTD,
            COMPRESSION_NONE,
        ];

        if known.contains(&self.compression.to_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ProcessingError::Config(format!(
                "Unknown compression '{}', expected one of {}",
                self.compression,
                known.join(", ")
            )))
        }
    }
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}
