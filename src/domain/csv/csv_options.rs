// ============================================================
// CSV NORMALIZATION OPTIONS
// ============================================================
// Caller-supplied post-processing applied after parsing

use serde::{Deserialize, Serialize};

/// Post-processing for a parsed CSV dataset. Nothing is applied by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Column holding the row label, e.g. `District`
    #[serde(default)]
    pub label_column: Option<String>,

    /// Label value marking an aggregate row, e.g. `State Total` (matched
    /// case-insensitively)
    #[serde(default)]
    pub sentinel: Option<String>,

    /// Keep at most this many rows, counted after sentinel filtering
    #[serde(default)]
    pub max_rows: Option<usize>,
}

impl CsvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop rows whose `label_column` equals `sentinel`
    pub fn with_sentinel(mut self, label_column: impl Into<String>, sentinel: impl Into<String>) -> Self {
        self.label_column = Some(label_column.into());
        self.sentinel = Some(sentinel.into());
        self
    }

    /// Truncate to `max_rows` records
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Validate option combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.sentinel.is_some() && self.label_column.is_none() {
            return Err("sentinel requires label_column".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_applies_nothing() {
        let options = CsvOptions::default();
        assert!(options.label_column.is_none());
        assert!(options.sentinel.is_none());
        assert!(options.max_rows.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_sentinel_without_label_column_is_invalid() {
        let options = CsvOptions {
            sentinel: Some("State Total".to_string()),
            ..Default::default()
        };
        assert!(options.validate().is_err());
        assert!(CsvOptions::new()
            .with_sentinel("District", "State Total")
            .with_max_rows(20)
            .validate()
            .is_ok());
    }
}
