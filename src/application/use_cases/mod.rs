pub mod chart_input;
pub mod ingest;
pub mod sources;
