use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Province '{province}' has no entry in the reference zone table")]
    UnknownProvince { province: String },

    #[error("Altitude {altitude} m matches no altitude band of province '{province}'")]
    MalformedBandTable { province: String, altitude: f64 },

    #[error("Invalid reference zone table: {0}")]
    InvalidZoneTable(String),

    #[error("Malformed weather file: {0}")]
    MalformedWeatherFile(String),

    #[error("Degenerate solar geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid zone code: '{0}'")]
    InvalidZoneCode(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
