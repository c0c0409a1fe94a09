use cte_zoning::analyzers::ZoningAnalyzer;
use cte_zoning::indicators::RegulatoryZoneTable;
use cte_zoning::models::{ResultRecord, SummerZone, WinterZone};
use cte_zoning::processors::IndicatorPipeline;
use cte_zoning::readers::{MunicipalityReader, TmyDirectory};
use cte_zoning::utils::constants::{HOURS_PER_YEAR, SUMMER_HOURS};
use cte_zoning::writers::{read_results, write_results, CsvResultWriter, ParquetWriter};
use cte_zoning::ProcessingError;
use pretty_assertions::assert_eq;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const REGISTRY: &str = "\
COD_INE,COD_PROV,PROVINCIA,NOMBRE_ACTUAL,LONGITUD_ETRS89,LATITUD_ETRS89,ALTITUD,ARCHIVO_TMY
28079,28,Madrid,Madrid,-3.703,40.409,657.0,28079_Madrid.csv
99001,99,Atlantis,Poseidonia,-3.0,40.0,100.0,
35016,35,\"Palmas, Las\",\"Palmas de Gran Canaria, Las\",-15.413,28.1,8.0,35016_Palmas.csv
41091,41,Sevilla,Sevilla,-5.995,37.388,9.0,
03014,03,Alicante/Alacant,Alicante/Alacant,-0.483,38.345,3.0,
";

/// Write a PVGIS-style TMY file with the given hourly temperature
fn write_tmy(dir: &Path, filename: &str, location: (f64, f64, f64), temperature: impl Fn(usize) -> f64) {
    let mut out = String::new();
    writeln!(out, "Latitude (decimal degrees): {}", location.0).unwrap();
    writeln!(out, "Longitude (decimal degrees): {}", location.1).unwrap();
    writeln!(out, "Elevation (m): {}", location.2).unwrap();
    writeln!(out, "month,year").unwrap();
    for month in 1..=12 {
        writeln!(out, "{},2007", month).unwrap();
    }
    writeln!(out, "time(UTC),T2m,RH,G(h),Gb(n),Gd(h),IR(h),WS10m,WD10m,SP").unwrap();
    for h in 0..HOURS_PER_YEAR {
        writeln!(
            out,
            "2007{:02}01:{:02}10,{:.2},55.0,0.0,0.0,0.0,310.0,1.8,200.0,94000.0",
            (h / 744) % 12 + 1,
            h % 24,
            temperature(h)
        )
        .unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "T2m: 2-m air temperature (degree Celsius)").unwrap();
    fs::write(dir.join(filename), out).unwrap();
}

fn setup() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let registry = temp_dir.path().join("Municipios.csv");
    fs::write(&registry, REGISTRY).unwrap();

    let tmy_dir = temp_dir.path().join("tmy");
    fs::create_dir_all(&tmy_dir).unwrap();

    let (summer_start, summer_end) = SUMMER_HOURS;
    write_tmy(&tmy_dir, "28079_Madrid.csv", (40.409, -3.703, 657.0), |h| {
        if (summer_start..summer_end).contains(&h) {
            30.0
        } else {
            10.0
        }
    });
    write_tmy(&tmy_dir, "35016_Palmas.csv", (28.1, -15.413, 8.0), |_| 20.0);
    write_tmy(
        &tmy_dir,
        "03014_Alicante__Alacant.csv",
        (38.345, -0.483, 3.0),
        |_| 20.0,
    );

    (temp_dir, tmy_dir)
}

fn run_batch(temp_dir: &TempDir, tmy_dir: &Path) -> (Vec<ResultRecord>, cte_zoning::processors::BatchReport) {
    let municipalities = MunicipalityReader::new()
        .read_municipalities(&temp_dir.path().join("Municipios.csv"))
        .unwrap();
    let pipeline = IndicatorPipeline::new(
        RegulatoryZoneTable::embedded().unwrap(),
        TmyDirectory::new(tmy_dir),
    )
    .with_max_workers(2);

    pipeline.run(&municipalities, None).unwrap()
}

#[test]
fn test_end_to_end_batch() {
    let (temp_dir, tmy_dir) = setup();
    let (records, report) = run_batch(&temp_dir, &tmy_dir);

    let codes: Vec<&str> = records.iter().map(|r| r.cod_ine.as_str()).collect();
    assert_eq!(codes, vec!["28079", "35016", "03014"]);

    let madrid = &records[0];
    assert_eq!(madrid.regulatory_zone().to_string(), "D3");
    assert_eq!(madrid.gd_winter, 2419.6);
    assert_eq!(madrid.gd_summer, 1229.2);
    assert_eq!(madrid.sci, 1.24);
    assert_eq!(madrid.scv, 3.33);
    assert_eq!(madrid.weather_zone().to_string(), "D4");
    assert_eq!(madrid.winter_diff, 0);
    assert_eq!(madrid.summer_diff, 1);

    let palmas = &records[1];
    assert_eq!(palmas.winter_zone_cte, WinterZone::Alpha);
    assert_eq!(palmas.summer_zone_cte, SummerZone::Three);
    assert_eq!(palmas.weather_zone().to_string(), "a1");
    assert_eq!(palmas.winter_diff, 0);
    assert_eq!(palmas.summer_diff, -2);

    // Weather file found through the default name
    let alicante = &records[2];
    assert_eq!(alicante.regulatory_zone().to_string(), "B4");
    assert_eq!(alicante.winter_diff, -2);
    assert_eq!(alicante.summer_diff, -3);

    assert_eq!(report.total_municipalities, 5);
    assert_eq!(report.succeeded, 3);
    let failed: Vec<&str> = report.failures.iter().map(|f| f.cod_ine.as_str()).collect();
    assert_eq!(failed, vec!["99001", "41091"]);
    assert!(report.location_mismatches.is_empty());
}

#[test]
fn test_output_round_trip_and_idempotence() {
    let (temp_dir, tmy_dir) = setup();
    let (first, _) = run_batch(&temp_dir, &tmy_dir);
    let (second, _) = run_batch(&temp_dir, &tmy_dir);
    assert_eq!(first, second);

    let csv_path = temp_dir.path().join("out").join("Results.csv");
    write_results(&first, &csv_path, "snappy").unwrap();
    assert_eq!(read_results(&csv_path).unwrap(), first);

    let parquet_path = temp_dir.path().join("Results.parquet");
    write_results(&first, &parquet_path, "zstd").unwrap();
    assert_eq!(read_results(&parquet_path).unwrap(), first);

    let info = ParquetWriter::new().get_file_info(&parquet_path).unwrap();
    assert_eq!(info.total_rows, 3);

    // Byte-identical output across runs
    let again = temp_dir.path().join("Results-again.csv");
    CsvResultWriter::new().write_records(&second, &again).unwrap();
    assert_eq!(
        fs::read_to_string(&csv_path).unwrap(),
        fs::read_to_string(&again).unwrap()
    );

    let summary = ZoningAnalyzer::new().analyze_file(&parquet_path).unwrap();
    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.winter_matches, 2);
    assert_eq!(summary.full_matches, 0);
}

#[test]
fn test_failures_file_lists_failed_municipalities() {
    let (temp_dir, tmy_dir) = setup();
    let (_, report) = run_batch(&temp_dir, &tmy_dir);

    let failures_path = temp_dir.path().join("failures.csv");
    CsvResultWriter::new()
        .write_failures(&report.failures, &failures_path)
        .unwrap();

    let content = fs::read_to_string(&failures_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("COD_INE,NOMBRE_ACTUAL,PROVINCIA,ERROR"));
    assert!(lines.next().unwrap().starts_with("99001,Poseidonia,Atlantis,"));
    assert!(lines.next().unwrap().starts_with("41091,Sevilla,Sevilla,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_custom_zone_table_with_dangling_row() {
    let temp_dir = TempDir::new().unwrap();
    let table_path = temp_dir.path().join("bands.csv");
    fs::write(
        &table_path,
        "provincia,capital,altitud_capital,zona_capital,altitud_min,altitud_max,zona\n\
         Girona,Girona,70,D2,-999,100,D2\n\
         Girona,Girona,70,D2,100,9999,E1\n\
         Girona,Girona,70,D2,,,\n",
    )
    .unwrap();

    let table = RegulatoryZoneTable::from_path(&table_path).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup(99.9, "Girona").unwrap().to_string(), "D2");
    assert_eq!(table.lookup(100.0, "Girona").unwrap().to_string(), "E1");
    assert!(matches!(
        table.lookup(9999.0, "Girona"),
        Err(ProcessingError::MalformedBandTable { .. })
    ));
    assert!(matches!(
        table.lookup(100.0, "Madrid"),
        Err(ProcessingError::UnknownProvince { .. })
    ));
}
