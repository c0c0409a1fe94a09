use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cte-zoning")]
#[command(about = "Climate severity indicators and CTE climate zones for Spanish municipalities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress bars")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: cte-zoning.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute indicators and zones for every municipality in the registry
    Compute {
        #[arg(
            short,
            long,
            help = "Municipality registry CSV [default: data/output/Municipios.csv]"
        )]
        municipalities_file: Option<PathBuf>,

        #[arg(short, long, help = "Directory of TMY files [default: data/output/tmy]")]
        tmy_dir: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Output table, .parquet or .csv [default: data/output/Results.csv]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Reference zone table CSV replacing the embedded one")]
        zone_table: Option<PathBuf>,

        #[arg(short, long, help = "Parquet compression [default: snappy]")]
        compression: Option<String>,

        #[arg(long, help = "Worker threads [default: number of CPUs]")]
        max_workers: Option<usize>,

        #[arg(short, long, help = "Only municipalities of this province")]
        province: Option<String>,

        #[arg(long, help = "Write failed municipalities to this CSV")]
        failures_file: Option<PathBuf>,
    },

    /// Look up the regulatory zone for a province and altitude
    Zone {
        #[arg(short, long)]
        province: String,

        #[arg(short, long, allow_negative_numbers = true)]
        altitude: f64,

        #[arg(long, help = "Reference zone table CSV replacing the embedded one")]
        zone_table: Option<PathBuf>,
    },

    /// Compute indicators for a single TMY file
    Inspect {
        #[arg(short, long)]
        tmy_file: PathBuf,

        #[arg(
            short,
            long,
            allow_negative_numbers = true,
            help = "Latitude for the daylight computation [default: from the file header]"
        )]
        latitude: Option<f64>,

        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },

    /// List the reference zone table
    Provinces {
        #[arg(long, help = "Reference zone table CSV replacing the embedded one")]
        zone_table: Option<PathBuf>,
    },

    /// Summarise a previously computed output table
    Summary {
        #[arg(short, long)]
        file: PathBuf,
    },
}
