use serde_json::Value as JsonValue;

use super::dataset::{Dataset, Record};
use super::error::FetchError;

/// The outer shape of a statistics API response.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The body itself is the row array.
    Rows(Vec<JsonValue>),
    /// `{"data": [...]}`
    Data(Vec<JsonValue>),
    /// `{"error": ...}`
    Error(String),
    Unrecognized,
}

impl Envelope {
    /// Classify a decoded body. The first matching shape wins, so an object
    /// carrying both a `data` array and an `error` is treated as data. A
    /// `null` or empty `error` does not count as an error report.
    pub fn classify(body: JsonValue) -> Self {
        match body {
            JsonValue::Array(rows) => Envelope::Rows(rows),
            JsonValue::Object(mut object) => {
                if let Some(JsonValue::Array(rows)) = object.remove("data") {
                    return Envelope::Data(rows);
                }
                match object.remove("error") {
                    None | Some(JsonValue::Null) => Envelope::Unrecognized,
                    Some(JsonValue::String(message)) if message.is_empty() => {
                        Envelope::Unrecognized
                    }
                    Some(JsonValue::String(message)) => Envelope::Error(message),
                    Some(other) => Envelope::Error(other.to_string()),
                }
            }
            _ => Envelope::Unrecognized,
        }
    }

    /// Turn the envelope into a dataset or the matching fetch error.
    pub fn into_dataset(self) -> Result<Dataset, FetchError> {
        let rows = match self {
            Envelope::Rows(rows) | Envelope::Data(rows) => rows,
            Envelope::Error(message) => return Err(FetchError::Remote(message)),
            Envelope::Unrecognized => return Err(FetchError::UnexpectedShape),
        };

        rows.into_iter()
            .map(|row| match row {
                JsonValue::Object(object) => Ok(Record::from_json_object(object)),
                _ => Err(FetchError::UnexpectedShape),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Dataset::new)
    }
}
