use serde::{Deserialize, Serialize};

use crate::domain::columns::ColumnRoles;
use crate::domain::dataset::Dataset;

/// What the chart renderer receives: the rows plus which columns to plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartInput {
    pub dataset: Dataset,
    pub roles: ColumnRoles,
}

/// One category on the chart. Missing or textual cells become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: Option<String>,
    pub values: Vec<Option<f64>>,
}

impl ChartInput {
    pub fn new(dataset: Dataset, roles: ColumnRoles) -> Self {
        Self { dataset, roles }
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn points(&self) -> Vec<ChartPoint> {
        self.dataset
            .iter()
            .map(|record| ChartPoint {
                label: self
                    .roles
                    .label
                    .as_deref()
                    .and_then(|column| record.get(column))
                    .map(|value| value.to_text().into_owned()),
                values: self
                    .roles
                    .values
                    .iter()
                    .map(|column| record.get_f64(column))
                    .collect(),
            })
            .collect()
    }
}
