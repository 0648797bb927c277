// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Options for CSV normalization
// No I/O, no async

mod csv_options;

pub use csv_options::CsvOptions;
