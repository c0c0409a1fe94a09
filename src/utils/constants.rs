/// Hours in the non-leap typical meteorological year
pub const HOURS_PER_YEAR: usize = 8760;

/// Base temperature for degree-day accumulation (°C)
pub const BASE_TEMPERATURE: f64 = 20.0;

/// WMO sunshine threshold on direct beam irradiance (W/m²)
pub const SUNSHINE_THRESHOLD: f64 = 120.0;

/// Hour index ranges (0-based, half-open) of the winter period: days 1-150 and 274-365
pub const WINTER_HOURS: [(usize, usize); 2] = [(1, 3600), (6552, 8760)];

/// Hour index range (0-based, half-open) of the summer period: June to September
pub const SUMMER_HOURS: (usize, usize) = (3601, 6551);

/// Day-of-year ranges (inclusive) of the winter period
pub const WINTER_DAYS: [(u32, u32); 2] = [(1, 150), (274, 365)];

/// Days in the fixed solar-geometry year
pub const DAYS_PER_YEAR: u32 = 365;

/// Winter severity regression: SCI = a·GD + b·n/N + c·GD² + d·(n/N)² + e
pub const SCI_GD: f64 = 3.564e-4;
pub const SCI_SUN: f64 = -0.4043;
pub const SCI_GD2: f64 = 8.394e-8;
pub const SCI_SUN2: f64 = -0.07325;
pub const SCI_INTERCEPT: f64 = -0.1137;

/// Summer severity regression: SCV = a·GD + b·GD² + c
pub const SCV_GD: f64 = 2.990e-3;
pub const SCV_GD2: f64 = -1.1597e-7;
pub const SCV_INTERCEPT: f64 = -0.1713;

/// Upper (inclusive) SCI bounds for winter zones a, A, B, C, D; above the last is E
pub const WINTER_THRESHOLDS: [f64; 5] = [0.0, 0.23, 0.5, 0.93, 1.51];

/// Upper (inclusive) SCV bounds for summer zones 1, 2, 3; above the last is 4
pub const SUMMER_THRESHOLDS: [f64; 3] = [0.5, 0.83, 1.38];

/// Location cross-check precision (decimal places)
pub const COORDINATE_DECIMALS: i32 = 3;
pub const ELEVATION_DECIMALS: i32 = 1;

/// Weather file layout
pub const TMY_METADATA_LINES: usize = 3;
pub const TMY_SKIPPED_LINES: usize = 13;
pub const TMY_TEMPERATURE_COLUMN: &str = "T2m";
pub const TMY_BEAM_COLUMN: &str = "Gb(n)";
pub const TMY_GLOBAL_COLUMN: &str = "G(h)";
pub const TMY_DIFFUSE_COLUMN: &str = "Gd(h)";
pub const TMY_HUMIDITY_COLUMN: &str = "RH";
pub const TMY_WIND_COLUMN: &str = "WS10m";

/// Spanish territory bounds (Peninsula, Balearic and Canary Islands, Ceuta, Melilla)
pub const SPAIN_MIN_LAT: f64 = 27.5;
pub const SPAIN_MAX_LAT: f64 = 44.0;
pub const SPAIN_MIN_LON: f64 = -18.5;
pub const SPAIN_MAX_LON: f64 = 4.5;

/// Processing defaults
pub const DEFAULT_MUNICIPALITIES_FILE: &str = "data/output/Municipios.csv";
pub const DEFAULT_TMY_DIR: &str = "data/output/tmy";
pub const DEFAULT_OUTPUT_FILE: &str = "data/output/Results.csv";
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
