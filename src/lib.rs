//! Ingestion and normalization of tabular statistics for charting.
//!
//! Rows come either from a JSON API (bare array, `{"data": [...]}` or
//! `{"error": ...}` envelopes) or from CSV text, and end up in the same
//! [`Dataset`] shape: an ordered list of [`Record`]s mapping field names to
//! number-or-text [`Value`]s.

mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use app::{init_tracing, run};
pub use application::{ChartInput, ChartPoint, DatasetSource, IngestService};
pub use domain::app_config::{AppConfig, ContainsFilter, SourceConfig};
pub use domain::columns::{ColumnKind, ColumnRoles, ColumnSelection};
pub use domain::csv::CsvOptions;
pub use domain::dataset::{Dataset, Record, Value};
pub use domain::envelope::Envelope;
pub use domain::error::{AppError, FetchError, Result};
pub use infrastructure::config::ConfigService;
pub use infrastructure::csv::{parse_csv, CsvParser};
pub use infrastructure::http::{fetch_dataset, Endpoint, RemoteFetcher};
