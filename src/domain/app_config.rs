use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::columns::ColumnSelection;
use super::csv::CsvOptions;
use super::error::{AppError, Result};

/// Where an ingest reads its rows from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// JSON statistics API
    Remote {
        base_url: String,
        path: String,
        #[serde(default)]
        limit: Option<u32>,
    },
    /// CSV file on local disk
    CsvFile { file: PathBuf },
    /// CSV text served over HTTP
    CsvUrl { url: String },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Remote {
            base_url: "http://localhost:8000".to_string(),
            path: "/api/all-india-stats".to_string(),
            limit: None,
        }
    }
}

/// Keep rows whose `column` contains `contains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainsFilter {
    pub column: String,
    pub contains: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub csv: CsvOptions,
    #[serde(default)]
    pub columns: ColumnSelection,
    #[serde(default)]
    pub filter: Option<ContainsFilter>,
    /// Fields to keep in every record; empty keeps all of them
    #[serde(default)]
    pub project: Vec<String>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.csv
            .validate()
            .map_err(|e| AppError::Validation(format!("Invalid csv options: {}", e)))?;

        if self.columns.max_inferred_values == 0 && self.columns.values.is_empty() {
            return Err(AppError::Validation(
                "columns.max_inferred_values must be > 0 when no value columns are named"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
