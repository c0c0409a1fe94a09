pub mod batch_report;
pub mod indicator_pipeline;

pub use batch_report::{BatchReport, MunicipalityFailure};
pub use indicator_pipeline::{check_location, Evaluation, IndicatorPipeline};
