// ============================================================
// CSV PARSER
// ============================================================
// Normalize CSV text into a dataset of coerced records

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1252;
use tracing::{debug, warn};

use crate::domain::csv::CsvOptions;
use crate::domain::dataset::{Dataset, Record, Value};
use crate::domain::error::{AppError, Result};

/// Parse `text` with `options`. Malformed rows never fail the call.
pub fn parse_csv(text: &str, options: &CsvOptions) -> Dataset {
    CsvParser::new().with_options(options.clone()).parse_content(text)
}

/// CSV normalizer. Stateless apart from its configuration.
#[derive(Debug, Clone)]
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Post-processing applied to every parsed dataset
    options: CsvOptions,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            options: CsvOptions::default(),
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set post-processing options
    pub fn with_options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Read a CSV file and normalize it. Only an unreadable file is an error.
    pub fn parse_file(&self, path: &Path) -> Result<Dataset> {
        let content = Self::read_with_encoding_detection(path)?;
        Ok(self.parse_content(&content))
    }

    /// Parse CSV content from string. Each line is split on the delimiter as
    /// is; quote characters are ordinary text and never span lines.
    pub fn parse_content(&self, content: &str) -> Dataset {
        let content = content.trim_start_matches('\u{feff}');
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let mut headers: Option<Vec<String>> = None;
        let mut records = Vec::new();

        for result in reader.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable CSV row");
                    continue;
                }
            };

            if Self::is_blank(&row) {
                continue;
            }

            match headers {
                Some(ref headers) => records.push(Self::parse_row(headers, &row)),
                None => headers = Some(row.iter().map(|name| name.trim().to_string()).collect()),
            }
        }

        let mut dataset = Dataset::new(records);
        self.apply_options(&mut dataset);
        dataset
    }

    /// Whitespace-only lines reach us as a single empty field after trimming
    fn is_blank(row: &StringRecord) -> bool {
        row.len() <= 1 && row.iter().all(|field| field.trim().is_empty())
    }

    /// Align fields to headers by position. Missing fields are empty strings,
    /// surplus fields are dropped.
    fn parse_row(headers: &[String], row: &StringRecord) -> Record {
        let mut record = Record::new();
        for (idx, header) in headers.iter().enumerate() {
            record.insert(header.as_str(), Value::coerce(row.get(idx).unwrap_or("")));
        }
        record
    }

    fn apply_options(&self, dataset: &mut Dataset) {
        if let (Some(column), Some(sentinel)) = (&self.options.label_column, &self.options.sentinel) {
            let removed = dataset.remove_sentinel_rows(column, sentinel);
            if removed > 0 {
                debug!(column = %column, sentinel = %sentinel, removed, "Removed sentinel rows");
            }
        }

        if let Some(max_rows) = self.options.max_rows {
            dataset.truncate(max_rows);
        }
    }

    /// Read file as UTF-8, falling back to Windows-1252 for legacy exports
    fn read_with_encoding_detection(path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                AppError::NotFound(format!("CSV file not found: {}", path.display()))
            }
            _ => AppError::Io(format!("Failed to read {}: {}", path.display(), e)),
        })?;

        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(e) => {
                warn!(path = %path.display(), "CSV file is not UTF-8, decoding as Windows-1252");
                let (content, _, _) = WINDOWS_1252.decode(e.as_bytes());
                Ok(content.into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_csv(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("chartfeed-{}-{}.csv", std::process::id(), name));
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_parse_mixed_row() {
        let dataset = parse_csv("a,b,c\n1,hello,2.5", &CsvOptions::default());

        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(record.get("b"), Some(&Value::Text("hello".to_string())));
        assert_eq!(record.get("c"), Some(&Value::Number(2.5)));
    }

    #[test]
    fn test_short_row_is_padded_with_empty_text() {
        let dataset = parse_csv("a,b,c\n1,2", &CsvOptions::default());

        let record = &dataset.records()[0];
        assert_eq!(record.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(record.get("b"), Some(&Value::Number(2.0)));
        assert_eq!(record.get("c"), Some(&Value::Text(String::new())));
    }

    #[test]
    fn test_long_row_drops_extra_fields() {
        let dataset = parse_csv("a,b\n1,2,3,4", &CsvOptions::default());

        let record = &dataset.records()[0];
        assert_eq!(record.len(), 2);
        assert_eq!(record.get_f64("b"), Some(2.0));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let dataset = parse_csv("a,b\n1,2\n\n   \n3,4\n", &CsvOptions::default());

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1].get_f64("a"), Some(3.0));
    }

    #[test]
    fn test_first_non_blank_line_is_header() {
        let dataset = parse_csv("\n\n District , Total \r\nPune,9429408\r\n", &CsvOptions::default());

        assert_eq!(dataset.columns(), vec!["District", "Total"]);
        assert_eq!(dataset.records()[0].get_f64("Total"), Some(9429408.0));
    }

    #[test]
    fn test_duplicate_headers_last_write_wins() {
        let dataset = parse_csv("x,y,x\n1,2,3", &CsvOptions::default());

        let record = &dataset.records()[0];
        assert_eq!(record.len(), 2);
        assert_eq!(record.get_f64("x"), Some(3.0));
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(parse_csv("", &CsvOptions::default()).is_empty());
        assert!(parse_csv("\n  \n", &CsvOptions::default()).is_empty());
        assert!(parse_csv("a,b,c\n", &CsvOptions::default()).is_empty());
    }

    #[test]
    fn test_unbalanced_quote_does_not_swallow_lines() {
        let dataset = parse_csv("District,Total\n\"Pune,1\nThane,2\nNagpur,3\n", &CsvOptions::default());

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].get_str("District"), Some("\"Pune"));
        assert_eq!(dataset.records()[0].get_f64("Total"), Some(1.0));
        assert_eq!(dataset.records()[2].get_str("District"), Some("Nagpur"));
    }

    #[test]
    fn test_quotes_are_kept_verbatim() {
        let dataset = parse_csv("a,b\n\"5\",x\n\"\"\n", &CsvOptions::default());

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].get_str("a"), Some("\"5\""));
        assert_eq!(dataset.records()[1].get_str("a"), Some("\"\""));
        assert_eq!(dataset.records()[1].get_str("b"), Some(""));
    }

    #[test]
    fn test_sentinel_row_is_removed_regardless_of_case() {
        let content = "District,Total\nPune,9429408\nState Total,112374333\nThane,11060148";
        let options = CsvOptions::new().with_sentinel("District", "state total");
        let dataset = parse_csv(content, &options);

        assert_eq!(dataset.len(), 2);
        assert!(dataset
            .iter()
            .all(|record| record.get_str("District") != Some("State Total")));
    }

    #[test]
    fn test_truncation_keeps_first_rows_after_filtering() {
        let mut content = String::from("District,Rank\nState Total,0\n");
        for i in 1..=25 {
            content.push_str(&format!("D{},{}\n", i, i));
        }
        let options = CsvOptions::new()
            .with_sentinel("District", "State Total")
            .with_max_rows(20);

        let dataset = parse_csv(&content, &options);
        assert_eq!(dataset.len(), 20);
        assert_eq!(dataset.records()[0].get_str("District"), Some("D1"));
        assert_eq!(dataset.records()[19].get_str("District"), Some("D20"));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let content = "a,b\n1,x\n\n2,y";
        let parser = CsvParser::new();
        assert_eq!(parser.parse_content(content), parser.parse_content(content));
    }

    #[test]
    fn test_custom_delimiter() {
        let parser = CsvParser::new().with_delimiter(b';');
        let dataset = parser.parse_content("a;b\n1;2");
        assert_eq!(dataset.records()[0].get_f64("b"), Some(2.0));
    }

    #[test]
    fn test_parse_file_strips_bom() {
        let path = temp_csv("bom", b"\xEF\xBB\xBFDistrict,Total\nPune,1\n");
        let dataset = CsvParser::new().parse_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(dataset.columns(), vec!["District", "Total"]);
    }

    #[test]
    fn test_parse_file_falls_back_to_windows_1252() {
        let path = temp_csv("latin", b"District,Total\nKolh\xE2pur,5\n");
        let dataset = CsvParser::new().parse_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(dataset.records()[0].get_str("District"), Some("Kolhâpur"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = std::env::temp_dir().join("chartfeed-does-not-exist.csv");
        let err = CsvParser::new().parse_file(&path).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
