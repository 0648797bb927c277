pub mod app_config;
pub mod columns;
pub mod dataset;
pub mod envelope;
pub mod error;

// CSV normalization options
pub mod csv;
