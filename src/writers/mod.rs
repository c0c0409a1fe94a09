pub mod csv_writer;
pub mod parquet_writer;

pub use csv_writer::CsvResultWriter;
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};

use crate::error::Result;
use crate::models::ResultRecord;
use crate::utils::filename::is_parquet_path;
use std::path::Path;

/// Write the indicator table, choosing Parquet or CSV from the file extension
pub fn write_results(records: &[ResultRecord], path: &Path, compression: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if is_parquet_path(path) {
        ParquetWriter::new()
            .with_compression(compression)?
            .write_records(records, path)
    } else {
        CsvResultWriter::new().write_records(records, path)
    }
}

/// Read an indicator table written by [`write_results`]
pub fn read_results(path: &Path) -> Result<Vec<ResultRecord>> {
    if is_parquet_path(path) {
        ParquetWriter::new().read_records(path)
    } else {
        CsvResultWriter::new().read_records(path)
    }
}
