use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::error::{AppError, Result};

/// How many numeric columns inference picks when the caller does not say.
pub const DEFAULT_MAX_VALUE_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Textual,
}

/// The columns a chart is drawn from: one category axis and one or more series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub label: Option<String>,
    pub values: Vec<String>,
}

impl ColumnRoles {
    /// Guess roles from the first record: its first textual field becomes the
    /// label, its first `max_values` numeric fields become the values.
    ///
    /// Only the first record is sampled, so a reordered or sparse source can
    /// change the outcome. Callers that need a stable choice should name the
    /// columns through [`ColumnSelection`].
    pub fn infer(dataset: &Dataset, max_values: usize) -> Self {
        let mut roles = Self::default();

        for (name, kind) in dataset.classify_columns() {
            match kind {
                ColumnKind::Textual if roles.label.is_none() => roles.label = Some(name),
                ColumnKind::Numeric if roles.values.len() < max_values => roles.values.push(name),
                _ => {}
            }
        }

        roles
    }
}

/// Caller-provided column names. Whatever is left unset is inferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default = "default_max_inferred_values")]
    pub max_inferred_values: usize,
}

fn default_max_inferred_values() -> usize {
    DEFAULT_MAX_VALUE_COLUMNS
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self {
            label: None,
            values: Vec::new(),
            max_inferred_values: DEFAULT_MAX_VALUE_COLUMNS,
        }
    }
}

impl ColumnSelection {
    pub fn explicit(label: impl Into<String>, values: &[&str]) -> Self {
        Self {
            label: Some(label.into()),
            values: values.iter().map(|v| v.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn is_explicit(&self) -> bool {
        self.label.is_some() && !self.values.is_empty()
    }

    /// Resolve the final roles for `dataset`.
    ///
    /// Explicit names must exist in the dataset. An empty dataset has no
    /// columns to check against, so names pass through unchanged.
    pub fn resolve(&self, dataset: &Dataset) -> Result<ColumnRoles> {
        if !dataset.is_empty() {
            let columns = dataset.columns();
            let mut named = self.label.iter().chain(self.values.iter());
            if let Some(unknown) = named.find(|name| !columns.contains(name)) {
                return Err(AppError::Validation(format!(
                    "Unknown column '{}' (available: {})",
                    unknown,
                    columns.join(", ")
                )));
            }
        }

        if self.is_explicit() {
            return Ok(ColumnRoles {
                label: self.label.clone(),
                values: self.values.clone(),
            });
        }

        let inferred = ColumnRoles::infer(dataset, self.max_inferred_values);

        Ok(ColumnRoles {
            label: self.label.clone().or(inferred.label),
            values: if self.values.is_empty() {
                inferred.values
            } else {
                self.values.clone()
            },
        })
    }
}
