// ============================================================
// INGEST USE CASE
// ============================================================
// Load a dataset, apply caller post-processing, resolve chart columns

use std::time::Instant;

use tracing::{info, warn};

use super::chart_input::ChartInput;
use super::sources::{source_from_config, DatasetSource};
use crate::domain::app_config::{AppConfig, ContainsFilter};
use crate::domain::columns::ColumnSelection;
use crate::domain::error::Result;
use crate::infrastructure::http::RemoteFetcher;

/// Single-shot ingestion. Every call to [`IngestService::ingest`] loads the
/// source again; nothing is cached between calls.
pub struct IngestService {
    source: Box<dyn DatasetSource>,
    filter: Option<ContainsFilter>,
    project: Vec<String>,
    columns: ColumnSelection,
}

impl IngestService {
    pub fn new(source: Box<dyn DatasetSource>) -> Self {
        Self {
            source,
            filter: None,
            project: Vec::new(),
            columns: ColumnSelection::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source = source_from_config(&config.source, &config.csv, RemoteFetcher::new())?;
        Ok(Self::new(source)
            .with_filter(config.filter.clone())
            .with_projection(config.project.clone())
            .with_columns(config.columns.clone()))
    }

    pub fn with_filter(mut self, filter: Option<ContainsFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_projection(mut self, project: Vec<String>) -> Self {
        self.project = project;
        self
    }

    pub fn with_columns(mut self, columns: ColumnSelection) -> Self {
        self.columns = columns;
        self
    }

    pub async fn ingest(&self) -> Result<ChartInput> {
        let start = Instant::now();
        let source = self.source.describe();

        let mut dataset = self.source.load().await.map_err(|e| {
            warn!(source = %source, error = %e, "Failed to load dataset");
            e
        })?;
        let loaded = dataset.len();

        if let Some(filter) = &self.filter {
            dataset.filter_contains(&filter.column, &filter.contains);
        }
        if !self.project.is_empty() {
            dataset.project(&self.project);
        }

        let roles = self.columns.resolve(&dataset)?;
        if !self.columns.is_explicit() {
            info!(label = ?roles.label, values = ?roles.values, "Chart columns were inferred");
        }

        info!(
            source = %source,
            loaded,
            records = dataset.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Ingest complete"
        );

        Ok(ChartInput::new(dataset, roles))
    }
}
