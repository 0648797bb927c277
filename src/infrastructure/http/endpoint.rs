use std::fmt;

use url::Url;

use crate::domain::error::{AppError, Result};

/// `<base>/<path>[?limit=<n>]` for the statistics API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    pub fn new(base_url: &str, path: &str, limit: Option<u32>) -> Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Base URL must be http(s): {}",
                base_url
            )));
        }

        let mut joined = url.path().trim_end_matches('/').to_string();
        let path = path.trim_start_matches('/');
        if !path.is_empty() {
            joined.push('/');
            joined.push_str(path);
        }
        url.set_path(&joined);

        if let Some(limit) = limit {
            url.query_pairs_mut().append_pair("limit", &limit.to_string());
        }

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
