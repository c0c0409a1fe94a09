use crate::error::{ProcessingError, Result};
use crate::indicators::{classify, RegulatoryZoneTable, SeverityCalculator};
use crate::models::{LocationMismatch, Municipality, ResultRecord, SeriesLocation};
use crate::processors::{BatchReport, MunicipalityFailure};
use crate::readers::WeatherSource;
use crate::utils::constants::{COORDINATE_DECIMALS, ELEVATION_DECIMALS};
use crate::utils::coordinates::{within_decimals, validate_spain_coordinates};
use crate::utils::progress::ProgressReporter;
use chrono::Local;
use rayon::prelude::*;
use tracing::{error, info, warn};

/// Outcome of evaluating one municipality
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub record: ResultRecord,
    pub mismatch: Option<LocationMismatch>,
}

/// Per-municipality indicator evaluation fanned out over a worker pool
///
/// Every municipality is independent: the reference table is read-only and
/// each task owns the series it loads, so workers share no mutable state.
pub struct IndicatorPipeline<S: WeatherSource> {
    table: RegulatoryZoneTable,
    source: S,
    calculator: SeverityCalculator,
    max_workers: usize,
}

impl<S: WeatherSource> IndicatorPipeline<S> {
    pub fn new(table: RegulatoryZoneTable, source: S) -> Self {
        Self {
            table,
            source,
            calculator: SeverityCalculator::new(),
            max_workers: num_cpus::get(),
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn table(&self) -> &RegulatoryZoneTable {
        &self.table
    }

    /// Evaluate a single municipality
    pub fn evaluate(&self, municipality: &Municipality) -> Result<Evaluation> {
        validate_spain_coordinates(municipality.latitude, municipality.longitude)?;

        let regulatory = self
            .table
            .lookup(municipality.altitude, &municipality.province)?;

        let series = self.source.load(municipality)?;
        let mismatch = check_location(municipality, series.location());

        // Registry coordinates win over the file header
        let severity = self.calculator.compute(&series, municipality.latitude)?;
        let weather = classify(&severity);

        Ok(Evaluation {
            record: ResultRecord::assemble(municipality, regulatory, &severity, weather),
            mismatch,
        })
    }

    /// Evaluate every municipality; failures are isolated and reported, and
    /// the records keep registry order.
    pub fn run(
        &self,
        municipalities: &[Municipality],
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<ResultRecord>, BatchReport)> {
        let mut report = BatchReport::new(municipalities.len());

        info!(
            municipalities = municipalities.len(),
            workers = self.max_workers,
            "Computing climate indicators"
        );

        if let Some(p) = progress {
            p.set_message(&format!(
                "Computing indicators for {} municipalities...",
                municipalities.len()
            ));
        }

        // Configure Rayon thread pool
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let outcomes: Vec<Result<Evaluation>> = pool.install(|| {
            municipalities
                .par_iter()
                .map(|municipality| {
                    let outcome = self.evaluate(municipality);

                    if let Some(p) = progress {
                        p.increment(1);
                    }

                    outcome
                })
                .collect()
        });

        let mut records = Vec::with_capacity(municipalities.len());

        for (municipality, outcome) in municipalities.iter().zip(outcomes) {
            match outcome {
                Ok(evaluation) => {
                    if let Some(mismatch) = evaluation.mismatch {
                        warn!(cod_ine = %municipality.cod_ine, "Location mismatch: {}", mismatch);
                        report.location_mismatches.push(mismatch);
                    }
                    records.push(evaluation.record);
                }
                Err(e) => {
                    error!(
                        cod_ine = %municipality.cod_ine,
                        province = %municipality.province,
                        altitude = municipality.altitude,
                        "Municipality failed: {}",
                        e
                    );
                    report.failures.push(MunicipalityFailure {
                        cod_ine: municipality.cod_ine.clone(),
                        name: municipality.name.clone(),
                        province: municipality.province.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report.succeeded = records.len();
        report.finished_at = Local::now();

        info!(
            computed = report.succeeded,
            failed = report.failure_count(),
            mismatches = report.location_mismatches.len(),
            "Indicator batch finished"
        );

        if let Some(p) = progress {
            p.finish_with_message(&format!(
                "Computed {} of {} municipalities",
                report.succeeded,
                municipalities.len()
            ));
        }

        Ok((records, report))
    }
}

/// Compare registry coordinates with the weather file header at the
/// precision both sources share
pub fn check_location(
    municipality: &Municipality,
    embedded: &SeriesLocation,
) -> Option<LocationMismatch> {
    let matches = within_decimals(municipality.latitude, embedded.latitude, COORDINATE_DECIMALS)
        && within_decimals(municipality.longitude, embedded.longitude, COORDINATE_DECIMALS)
        && within_decimals(municipality.altitude, embedded.elevation, ELEVATION_DECIMALS);

    if matches {
        None
    } else {
        Some(LocationMismatch {
            cod_ine: municipality.cod_ine.clone(),
            declared: SeriesLocation::new(
                municipality.latitude,
                municipality.longitude,
                municipality.altitude,
            ),
            embedded: *embedded,
        })
    }
}
