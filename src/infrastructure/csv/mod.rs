// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV parsing, encoding fallback, and row normalization

mod csv_parser;

pub use csv_parser::{parse_csv, CsvParser};
