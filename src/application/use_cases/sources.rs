use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::domain::app_config::SourceConfig;
use crate::domain::csv::CsvOptions;
use crate::domain::dataset::Dataset;
use crate::domain::error::Result;
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::http::{Endpoint, RemoteFetcher};

/// Anything that can produce a fresh dataset on demand.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load(&self) -> Result<Dataset>;

    /// Short human-readable description used in logs
    fn describe(&self) -> String;
}

/// JSON statistics API.
pub struct RemoteJsonSource {
    endpoint: Endpoint,
    fetcher: RemoteFetcher,
}

impl RemoteJsonSource {
    pub fn new(endpoint: Endpoint, fetcher: RemoteFetcher) -> Self {
        Self { endpoint, fetcher }
    }
}

#[async_trait]
impl DatasetSource for RemoteJsonSource {
    async fn load(&self) -> Result<Dataset> {
        Ok(self.fetcher.fetch_dataset(self.endpoint.as_str()).await?)
    }

    fn describe(&self) -> String {
        format!("remote {}", self.endpoint)
    }
}

/// CSV file on local disk.
pub struct CsvFileSource {
    path: PathBuf,
    parser: CsvParser,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            parser: CsvParser::new().with_options(options),
        }
    }
}

#[async_trait]
impl DatasetSource for CsvFileSource {
    async fn load(&self) -> Result<Dataset> {
        self.parser.parse_file(&self.path)
    }

    fn describe(&self) -> String {
        format!("csv file {}", self.path.display())
    }
}

/// CSV text served over HTTP.
pub struct CsvUrlSource {
    url: String,
    fetcher: RemoteFetcher,
    parser: CsvParser,
}

impl CsvUrlSource {
    pub fn new(url: impl Into<String>, fetcher: RemoteFetcher, options: CsvOptions) -> Self {
        Self {
            url: url.into(),
            fetcher,
            parser: CsvParser::new().with_options(options),
        }
    }
}

#[async_trait]
impl DatasetSource for CsvUrlSource {
    async fn load(&self) -> Result<Dataset> {
        let text = self.fetcher.fetch_text(&self.url).await?;
        Ok(self.parser.parse_content(&text))
    }

    fn describe(&self) -> String {
        format!("csv url {}", self.url)
    }
}

/// Build the source named by `config`.
pub fn source_from_config(
    config: &SourceConfig,
    csv_options: &CsvOptions,
    fetcher: RemoteFetcher,
) -> Result<Box<dyn DatasetSource>> {
    let source: Box<dyn DatasetSource> = match config {
        SourceConfig::Remote {
            base_url,
            path,
            limit,
        } => Box::new(RemoteJsonSource::new(
            Endpoint::new(base_url, path, *limit)?,
            fetcher,
        )),
        SourceConfig::CsvFile { file } => Box::new(CsvFileSource::new(file, csv_options.clone())),
        SourceConfig::CsvUrl { url } => {
            Box::new(CsvUrlSource::new(url, fetcher, csv_options.clone()))
        }
    };

    info!(source = %source.describe(), "Configured dataset source");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;

    #[tokio::test]
    async fn test_csv_file_source_applies_options() {
        let path = std::env::temp_dir().join(format!("chartfeed-{}-source.csv", std::process::id()));
        std::fs::write(&path, "District,Total\nPune,1\nState Total,3\nThane,2\n").unwrap();

        let source = CsvFileSource::new(&path, CsvOptions::new().with_sentinel("District", "STATE TOTAL"));
        let dataset = source.load().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(dataset.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_csv_file_is_load_failure() {
        let source = CsvFileSource::new("/nonexistent/chartfeed.csv", CsvOptions::default());
        assert!(matches!(source.load().await, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_source_from_config_describes_endpoint() {
        let config = SourceConfig::Remote {
            base_url: "http://localhost:8000".to_string(),
            path: "chart-data".to_string(),
            limit: Some(20),
        };

        let source = source_from_config(&config, &CsvOptions::default(), RemoteFetcher::new()).unwrap();
        assert_eq!(source.describe(), "remote http://localhost:8000/chart-data?limit=20");
    }

    #[test]
    fn test_source_from_config_rejects_bad_url() {
        let config = SourceConfig::Remote {
            base_url: "localhost".to_string(),
            path: "/".to_string(),
            limit: None,
        };

        let result = source_from_config(&config, &CsvOptions::default(), RemoteFetcher::new());
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
