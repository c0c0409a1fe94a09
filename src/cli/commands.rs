use crate::analyzers::ZoningAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::config::{Settings, SettingsOverrides};
use crate::error::Result;
use crate::indicators::{classify, RegulatoryZoneTable, SeverityCalculator};
use crate::processors::IndicatorPipeline;
use crate::readers::{MunicipalityReader, TmyDirectory, TmyReader};
use crate::utils::filename::is_parquet_path;
use crate::utils::progress::ProgressReporter;
use crate::writers::{write_results, CsvResultWriter, ParquetWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub async fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;

    match cli.command {
        Commands::Compute {
            municipalities_file,
            tmy_dir,
            output_file,
            zone_table,
            compression,
            max_workers,
            province,
            failures_file,
        } => {
            let overrides = SettingsOverrides {
                municipalities_file,
                tmy_dir,
                output_file,
                zone_table,
                max_workers,
                compression,
            };
            let settings = Settings::load_with(cli.config.as_deref(), &overrides)?;
            debug!(?settings, "Resolved settings");

            println!("Computing CTE climate zones...");
            println!("Municipalities: {}", settings.municipalities_file.display());
            println!("TMY directory: {}", settings.tmy_dir.display());
            println!("Output file: {}", settings.output_file.display());
            println!("Workers: {}", settings.max_workers);

            let table = load_table(settings.zone_table.as_deref())?;
            let mut municipalities =
                MunicipalityReader::new().read_municipalities(&settings.municipalities_file)?;

            if let Some(province) = &province {
                municipalities.retain(|m| &m.province == province);
                info!(
                    province = %province,
                    municipalities = municipalities.len(),
                    "Restricted run to one province"
                );
            }

            if municipalities.is_empty() {
                warn!("No municipalities to process, writing an empty table");
            }

            let pipeline = IndicatorPipeline::new(table, TmyDirectory::new(&settings.tmy_dir))
                .with_max_workers(settings.max_workers);

            // Rayon work runs off the async runtime
            let (records, report) = tokio::task::spawn_blocking(move || {
                let progress = ProgressReporter::new(
                    municipalities.len() as u64,
                    "Computing indicators...",
                    quiet,
                );
                pipeline.run(&municipalities, Some(&progress))
            })
            .await??;

            println!("\n{}", report.generate_summary());

            if let Some(path) = &failures_file {
                CsvResultWriter::new().write_failures(&report.failures, path)?;
                println!("Failures written to {}", path.display());
            }

            // An empty table still replaces the previous run's output
            println!("Writing {} records...", records.len());
            write_results(&records, &settings.output_file, &settings.compression)?;

            if is_parquet_path(&settings.output_file) {
                let file_info = ParquetWriter::new().get_file_info(&settings.output_file)?;
                println!("\n{}", file_info.summary());
            }

            let summary = ZoningAnalyzer::new().analyze(&records);
            println!("\n{}", summary.detailed_summary());

            println!("Processing complete!");
        }

        Commands::Zone {
            province,
            altitude,
            zone_table,
        } => {
            let zone_table = resolve_zone_table(cli.config.as_deref(), zone_table)?;
            let table = load_table(zone_table.as_deref())?;
            let zone = table.lookup(altitude, &province)?;
            let entry = table.province(&province)?;

            println!("{} at {} m: {}", province, altitude, zone);
            println!(
                "Reference: {} ({} m) is {}",
                entry.capital, entry.capital_altitude, entry.reference_zone
            );
        }

        Commands::Inspect {
            tmy_file,
            latitude,
            json,
        } => {
            let series = TmyReader::new().read_file(&tmy_file)?;
            let location = *series.location();
            let latitude = latitude.unwrap_or(location.latitude);

            let severity = SeverityCalculator::new().compute(&series, latitude)?;
            let zone = classify(&severity);

            if json {
                let report = serde_json::json!({
                    "file": tmy_file.display().to_string(),
                    "location": location,
                    "latitude_used": latitude,
                    "severity": severity,
                    "zone": zone.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Weather file: {}", tmy_file.display());
                println!(
                    "Location: {:.3}°, {:.3}°, {:.1} m",
                    location.latitude, location.longitude, location.elevation
                );
                println!("Latitude used: {:.3}°", latitude);
                println!("Winter degree-days (GD_I): {:.1}", severity.gd_winter);
                println!("Summer degree-days (GD_V): {:.1}", severity.gd_summer);
                println!("Sunshine fraction (n/N): {:.3}", severity.sunshine_fraction);
                println!("SCI: {:.2}", severity.sci);
                println!("SCV: {:.2}", severity.scv);
                println!("Climate zone: {}", zone);
            }
        }

        Commands::Provinces { zone_table } => {
            let zone_table = resolve_zone_table(cli.config.as_deref(), zone_table)?;
            let table = load_table(zone_table.as_deref())?;

            println!("{} provinces", table.len());
            for province in table.provinces() {
                let bands: Vec<String> = province
                    .bands
                    .iter()
                    .map(|b| format!("[{}, {}) {}", b.min, b.max, b.zone))
                    .collect();
                println!(
                    "{:<24} {:<28} {:>5} m {:<3} {}",
                    province.name,
                    province.capital,
                    province.capital_altitude,
                    province.reference_zone.to_string(),
                    bands.join(", ")
                );
            }
        }

        Commands::Summary { file } => {
            println!("Analyzing output table: {}", file.display());

            let summary = ZoningAnalyzer::new().analyze_file(&file)?;
            println!("\n{}", summary.detailed_summary());

            if is_parquet_path(&file) {
                let file_info = ParquetWriter::new().get_file_info(&file)?;
                println!("\nFile Details:");
                println!("{}", file_info.summary());
            }
        }
    }

    Ok(())
}

fn load_table(path: Option<&Path>) -> Result<RegulatoryZoneTable> {
    let table = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading reference zone table");
            RegulatoryZoneTable::from_path(path)?
        }
        None => RegulatoryZoneTable::embedded()?,
    };
    debug!(provinces = table.len(), "Reference zone table ready");
    Ok(table)
}

/// A `--zone-table` flag wins; otherwise the settings layers decide
fn resolve_zone_table(config: Option<&Path>, flag: Option<PathBuf>) -> Result<Option<PathBuf>> {
    match flag {
        Some(path) => Ok(Some(path)),
        None => Ok(Settings::load(config)?.zone_table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writers::read_results;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    const REGISTRY: &str = "\
COD_INE,COD_PROV,PROVINCIA,NOMBRE_ACTUAL,LONGITUD_ETRS89,LATITUD_ETRS89,ALTITUD,ARCHIVO_TMY
99001,99,Atlantis,Poseidonia,-3.0,40.0,100.0,
";

    fn compute_cli(dir: &Path, output: &Path, extra: &[&str]) -> Cli {
        let registry = dir.join("Municipios.csv");
        fs::write(&registry, REGISTRY).unwrap();

        let mut args = vec![
            "cte-zoning".to_string(),
            "--quiet".to_string(),
            "compute".to_string(),
            "-m".to_string(),
            registry.display().to_string(),
            "-t".to_string(),
            dir.join("tmy").display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        args.extend(extra.iter().map(|a| a.to_string()));
        Cli::parse_from(args)
    }

    #[tokio::test]
    async fn test_all_failing_run_replaces_previous_output() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let output = temp_dir.path().join("Results.csv");
        let failures = temp_dir.path().join("failures.csv");
        fs::write(&output, "STALE,previous,run\n")?;

        let failures_arg = failures.display().to_string();
        let cli = compute_cli(
            temp_dir.path(),
            &output,
            &["--failures-file", failures_arg.as_str()],
        );
        run(cli).await?;

        let content = fs::read_to_string(&output)?;
        assert!(content.starts_with("COD_INE,COD_PROV,PROVINCIA"));
        assert!(!content.contains("STALE"));
        assert!(read_results(&output)?.is_empty());
        assert!(fs::read_to_string(&failures)?.contains("99001,Poseidonia,Atlantis,"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unmatched_province_replaces_previous_parquet() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let output = temp_dir.path().join("Results.parquet");
        fs::write(&output, "not parquet")?;

        let cli = compute_cli(temp_dir.path(), &output, &["--province", "Madrid"]);
        run(cli).await?;

        assert!(read_results(&output)?.is_empty());

        Ok(())
    }
}
