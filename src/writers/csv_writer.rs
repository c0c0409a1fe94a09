use crate::error::Result;
use crate::models::ResultRecord;
use crate::processors::MunicipalityFailure;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

const RESULT_HEADER: [&str; 19] = [
    "COD_INE",
    "COD_PROV",
    "PROVINCIA",
    "NOMBRE_ACTUAL",
    "LONGITUD_ETRS89",
    "LATITUD_ETRS89",
    "ALTITUD",
    "ARCHIVO_TMY",
    "ZCI_CTE_2019",
    "ZCV_CTE_2019",
    "GD_I",
    "GD_V",
    "n_N",
    "SCI",
    "SCV",
    "ZCI_TMY",
    "ZCV_TMY",
    "ZCI_DIFF",
    "ZCV_DIFF",
];

const FAILURE_HEADER: [&str; 4] = ["COD_INE", "NOMBRE_ACTUAL", "PROVINCIA", "ERROR"];

/// Writes the indicator table (and failure lists) as UTF-8 CSV
pub struct CsvResultWriter {
    delimiter: u8,
}

impl CsvResultWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn write_records(&self, records: &[ResultRecord], path: &Path) -> Result<()> {
        self.write_rows(&RESULT_HEADER, records, path)
    }

    pub fn write_failures(&self, failures: &[MunicipalityFailure], path: &Path) -> Result<()> {
        self.write_rows(&FAILURE_HEADER, failures, path)
    }

    pub fn read_records(&self, path: &Path) -> Result<Vec<ResultRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .from_path(path)?;

        let mut records = Vec::new();
        for result in reader.deserialize::<ResultRecord>() {
            records.push(result?);
        }

        Ok(records)
    }

    /// The header is written explicitly so an empty table still replaces
    /// whatever was at `path` with a readable file
    fn write_rows<T: Serialize>(&self, header: &[&str], rows: &[T], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .from_writer(file);

        writer.write_record(header)?;

        for row in rows {
            writer.serialize(row)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvResultWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClimateZone, Municipality, SeverityResult};
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn sample_record() -> ResultRecord {
        let municipality = Municipality::new(
            "35016".to_string(),
            "35".to_string(),
            "Palmas, Las".to_string(),
            "Palmas de Gran Canaria, Las".to_string(),
            -15.413,
            28.1,
            8.0,
            String::new(),
        );
        let severity = SeverityResult {
            gd_winter: 12.4,
            gd_summer: 410.3,
            sunshine_fraction: 0.512,
            sci: -0.31,
            scv: 1.0,
        };

        ResultRecord::assemble(
            &municipality,
            "α3".parse::<ClimateZone>().unwrap(),
            &severity,
            "a3".parse::<ClimateZone>().unwrap(),
        )
    }

    #[test]
    fn test_write_and_read_back() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let writer = CsvResultWriter::new();
        let record = sample_record();

        writer.write_records(std::slice::from_ref(&record), temp_file.path())?;

        let content = std::fs::read_to_string(temp_file.path())?;
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some(
                "COD_INE,COD_PROV,PROVINCIA,NOMBRE_ACTUAL,LONGITUD_ETRS89,LATITUD_ETRS89,ALTITUD,\
                 ARCHIVO_TMY,ZCI_CTE_2019,ZCV_CTE_2019,GD_I,GD_V,n_N,SCI,SCV,ZCI_TMY,ZCV_TMY,\
                 ZCI_DIFF,ZCV_DIFF"
            )
        );
        let row = lines.next().unwrap_or_default();
        assert!(row.starts_with("35016,35,\"Palmas, Las\""));
        assert!(row.ends_with(",a,3,12.4,410.3,0.512,-0.31,1.0,a,3,0,0"));

        let read_back = writer.read_records(temp_file.path())?;
        assert_eq!(read_back, vec![record]);

        Ok(())
    }

    #[test]
    fn test_empty_table_keeps_header() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(temp_file.path(), "STALE,previous,run\n")?;
        let writer = CsvResultWriter::new();

        writer.write_records(&[], temp_file.path())?;

        let content = std::fs::read_to_string(temp_file.path())?;
        assert_eq!(content, format!("{}\n", RESULT_HEADER.join(",")));
        assert!(writer.read_records(temp_file.path())?.is_empty());

        Ok(())
    }

    #[test]
    fn test_write_failures() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let failures = vec![MunicipalityFailure {
            cod_ine: "99001".to_string(),
            name: "Nowhere".to_string(),
            province: "Atlantis".to_string(),
            error: "unknown province".to_string(),
        }];

        CsvResultWriter::new().write_failures(&failures, temp_file.path())?;

        let content = std::fs::read_to_string(temp_file.path())?;
        assert_eq!(
            content,
            "COD_INE,NOMBRE_ACTUAL,PROVINCIA,ERROR\n99001,Nowhere,Atlantis,unknown province\n"
        );

        Ok(())
    }
}
