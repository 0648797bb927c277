pub mod config;
pub mod csv;
pub mod http;
