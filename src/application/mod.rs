pub mod use_cases;

pub use use_cases::chart_input::{ChartInput, ChartPoint};
pub use use_cases::ingest::IngestService;
pub use use_cases::sources::{CsvFileSource, CsvUrlSource, DatasetSource, RemoteJsonSource};
