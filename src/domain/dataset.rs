// ============================================================
// DATASET TYPES
// ============================================================
// Uniform row-oriented shape shared by the remote and CSV paths

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::columns::ColumnKind;

/// A single cell: either a number or verbatim text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Trim `raw` and store it as a number when it parses to a finite float.
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => Value::Number(number),
            _ => Value::Text(trimmed.to_string()),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Value::Number(_) => ColumnKind::Numeric,
            Value::Text(_) => ColumnKind::Textual,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Number(_) => None,
        }
    }

    /// Textual rendering used for label matching and chart labels.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Text(text) => Cow::Borrowed(text),
            Value::Number(number) => Cow::Owned(number.to_string()),
        }
    }

    fn from_json(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            JsonValue::Number(number) => number
                .as_f64()
                .map(Value::Number)
                .or_else(|| Some(Value::Text(number.to_string()))),
            JsonValue::String(text) => Some(Value::Text(text)),
            JsonValue::Bool(flag) => Some(Value::Text(flag.to_string())),
            nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => {
                Some(Value::Text(nested.to_string()))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(number) => write!(f, "{}", number),
            Value::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

/// One row, keyed by field name in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. A repeated name overwrites the value but keeps its
    /// original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from a JSON object. `null` fields are left out.
    pub fn from_json_object(object: Map<String, JsonValue>) -> Self {
        object
            .into_iter()
            .filter_map(|(name, value)| Value::from_json(value).map(|value| (name, value)))
            .collect()
    }

    fn retain_fields(&mut self, columns: &[String]) {
        self.fields.retain(|name, _| columns.iter().any(|c| c == name));
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Ordered sequence of records produced by one ingestion call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Preview of the first `n` records.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// Union of field names across all records, in first-seen order.
    pub fn columns(&self) -> Vec<String> {
        let mut seen: IndexMap<&str, ()> = IndexMap::new();
        for record in &self.records {
            for key in record.keys() {
                seen.entry(key).or_insert(());
            }
        }
        seen.into_keys().map(str::to_string).collect()
    }

    /// Kind of each field of the first record, in header order.
    pub fn classify_columns(&self) -> Vec<(String, ColumnKind)> {
        self.first()
            .map(|record| {
                record
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.kind()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drop rows whose `column` value equals `sentinel`, ignoring case and
    /// surrounding whitespace. Returns how many rows were removed.
    pub fn remove_sentinel_rows(&mut self, column: &str, sentinel: &str) -> usize {
        let sentinel = sentinel.trim().to_lowercase();
        let before = self.records.len();
        self.records.retain(|record| match record.get(column) {
            Some(value) => value.to_text().trim().to_lowercase() != sentinel,
            None => true,
        });
        before - self.records.len()
    }

    /// Keep at most `max_rows` records, the first ones in source order.
    pub fn truncate(&mut self, max_rows: usize) {
        self.records.truncate(max_rows);
    }

    /// Keep rows whose textual `column` value contains `needle`.
    pub fn filter_contains(&mut self, column: &str, needle: &str) {
        self.records
            .retain(|record| record.get_str(column).is_some_and(|text| text.contains(needle)));
    }

    /// Keep only the named fields in every record.
    pub fn project(&mut self, columns: &[String]) {
        for record in &mut self.records {
            record.retain_fields(columns);
        }
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Dataset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
