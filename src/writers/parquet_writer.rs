use crate::error::{ProcessingError, Result};
use crate::models::{ResultRecord, SummerZone, WinterZone};
use crate::utils::constants::*;
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write the indicator table to a Parquet file
    pub fn write_records(&self, records: &[ResultRecord], path: &Path) -> Result<()> {
        let schema = self.create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        for chunk in records.chunks(self.row_group_size.max(1)) {
            let batch = self.records_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Arrow schema mirroring the CSV output columns
    fn create_schema(&self) -> Arc<Schema> {
        let fields = vec![
            Field::new("COD_INE", DataType::Utf8, false),
            Field::new("COD_PROV", DataType::Utf8, false),
            Field::new("PROVINCIA", DataType::Utf8, false),
            Field::new("NOMBRE_ACTUAL", DataType::Utf8, false),
            Field::new("LONGITUD_ETRS89", DataType::Float64, false),
            Field::new("LATITUD_ETRS89", DataType::Float64, false),
            Field::new("ALTITUD", DataType::Float64, false),
            Field::new("ARCHIVO_TMY", DataType::Utf8, false),
            Field::new("ZCI_CTE_2019", DataType::Utf8, false),
            Field::new("ZCV_CTE_2019", DataType::UInt8, false),
            Field::new("GD_I", DataType::Float64, false),
            Field::new("GD_V", DataType::Float64, false),
            Field::new("n_N", DataType::Float64, false),
            Field::new("SCI", DataType::Float64, false),
            Field::new("SCV", DataType::Float64, false),
            Field::new("ZCI_TMY", DataType::Utf8, false),
            Field::new("ZCV_TMY", DataType::UInt8, false),
            Field::new("ZCI_DIFF", DataType::Int32, false),
            Field::new("ZCV_DIFF", DataType::Int32, false),
        ];

        Arc::new(Schema::new(fields))
    }

    /// Convert records to Arrow RecordBatch
    fn records_to_batch(
        &self,
        records: &[ResultRecord],
        schema: Arc<Schema>,
    ) -> Result<RecordBatch> {
        let batch = RecordBatch::try_new(
            schema,
            vec![
                string_column(records, |r| r.cod_ine.as_str()),
                string_column(records, |r| r.cod_prov.as_str()),
                string_column(records, |r| r.province.as_str()),
                string_column(records, |r| r.name.as_str()),
                float_column(records, |r| r.longitude),
                float_column(records, |r| r.latitude),
                float_column(records, |r| r.altitude),
                string_column(records, |r| r.tmy_file.as_str()),
                string_column(records, |r| r.winter_zone_cte.as_str()),
                summer_column(records, |r| r.summer_zone_cte),
                float_column(records, |r| r.gd_winter),
                float_column(records, |r| r.gd_summer),
                float_column(records, |r| r.sunshine_fraction),
                float_column(records, |r| r.sci),
                float_column(records, |r| r.scv),
                string_column(records, |r| r.winter_zone_tmy.as_str()),
                summer_column(records, |r| r.summer_zone_tmy),
                Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.winter_diff))),
                Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.summer_diff))),
            ],
        )?;

        Ok(batch)
    }

    /// Read an indicator table back from Parquet
    pub fn read_records(&self, path: &Path) -> Result<Vec<ResultRecord>> {
        let file = File::open(path)?;
        let parquet_reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(8192)
            .build()?;

        let mut records = Vec::new();

        for batch_result in parquet_reader {
            let batch = batch_result?;

            let cod_ine = column::<StringArray>(&batch, "COD_INE")?;
            let cod_prov = column::<StringArray>(&batch, "COD_PROV")?;
            let province = column::<StringArray>(&batch, "PROVINCIA")?;
            let name = column::<StringArray>(&batch, "NOMBRE_ACTUAL")?;
            let longitude = column::<Float64Array>(&batch, "LONGITUD_ETRS89")?;
            let latitude = column::<Float64Array>(&batch, "LATITUD_ETRS89")?;
            let altitude = column::<Float64Array>(&batch, "ALTITUD")?;
            let tmy_file = column::<StringArray>(&batch, "ARCHIVO_TMY")?;
            let zci_cte = column::<StringArray>(&batch, "ZCI_CTE_2019")?;
            let zcv_cte = column::<UInt8Array>(&batch, "ZCV_CTE_2019")?;
            let gd_i = column::<Float64Array>(&batch, "GD_I")?;
            let gd_v = column::<Float64Array>(&batch, "GD_V")?;
            let n_n = column::<Float64Array>(&batch, "n_N")?;
            let sci = column::<Float64Array>(&batch, "SCI")?;
            let scv = column::<Float64Array>(&batch, "SCV")?;
            let zci_tmy = column::<StringArray>(&batch, "ZCI_TMY")?;
            let zcv_tmy = column::<UInt8Array>(&batch, "ZCV_TMY")?;
            let zci_diff = column::<Int32Array>(&batch, "ZCI_DIFF")?;
            let zcv_diff = column::<Int32Array>(&batch, "ZCV_DIFF")?;

            for i in 0..batch.num_rows() {
                records.push(ResultRecord {
                    cod_ine: cod_ine.value(i).to_string(),
                    cod_prov: cod_prov.value(i).to_string(),
                    province: province.value(i).to_string(),
                    name: name.value(i).to_string(),
                    longitude: longitude.value(i),
                    latitude: latitude.value(i),
                    altitude: altitude.value(i),
                    tmy_file: tmy_file.value(i).to_string(),
                    winter_zone_cte: zci_cte.value(i).parse::<WinterZone>()?,
                    summer_zone_cte: SummerZone::try_from(zcv_cte.value(i))?,
                    gd_winter: gd_i.value(i),
                    gd_summer: gd_v.value(i),
                    sunshine_fraction: n_n.value(i),
                    sci: sci.value(i),
                    scv: scv.value(i),
                    winter_zone_tmy: zci_tmy.value(i).parse::<WinterZone>()?,
                    summer_zone_tmy: SummerZone::try_from(zcv_tmy.value(i))?,
                    winter_diff: zci_diff.value(i),
                    summer_diff: zcv_diff.value(i),
                });
            }
        }

        Ok(records)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn string_column(records: &[ResultRecord], f: impl Fn(&ResultRecord) -> &str) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(records.iter().map(f)))
}

fn float_column(records: &[ResultRecord], f: impl Fn(&ResultRecord) -> f64) -> ArrayRef {
    Arc::new(Float64Array::from_iter_values(records.iter().map(f)))
}

fn summer_column(records: &[ResultRecord], f: impl Fn(&ResultRecord) -> SummerZone) -> ArrayRef {
    Arc::new(UInt8Array::from_iter_values(
        records.iter().map(|r| u8::from(f(r))),
    ))
}

fn column<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<T>())
        .ok_or_else(|| ProcessingError::InvalidFormat(format!("Invalid or missing column {}", name)))
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression,
        )
    }
}
