use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryError;

/// A single named column of observations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Numeric(Vec<f64>),
    Labels(Vec<String>),
}
impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Labels(values) => values.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn label_at(&self, row: usize) -> String {
        match self {
            // -0.0 and 0.0 name the same vehicle
            Column::Numeric(values) => (values[row] + 0.0).to_string(),
            Column::Labels(values) => values[row].clone(),
        }
    }
    fn select(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(values) => Column::Numeric(rows.iter().map(|&r| values[r]).collect()),
            Column::Labels(values) => {
                Column::Labels(rows.iter().map(|&r| values[r].clone()).collect())
            }
        }
    }
}
impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Numeric(values)
    }
}
impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::Labels(values)
    }
}
/// Column-oriented table: one row per observation, all columns the same length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationTable {
    columns: Vec<(String, Column)>,
}
impl ObservationTable {
    pub fn new() -> Self {
        Self::default()
    }
    /// Appends a column, replacing any existing column with the same name.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column: impl Into<Column>,
    ) -> Result<Self, TelemetryError> {
        let name = name.into();
        let column = column.into();
        let existing = self.columns.iter().position(|(n, _)| *n == name);
        let others = self
            .columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != existing)
            .map(|(_, (_, c))| c.len())
            .next();
        if let Some(expected) = others {
            if expected != column.len() {
                return Err(TelemetryError::InvalidShape(format!(
                    "column `{name}` has {} rows, table has {expected}",
                    column.len()
                )));
            }
        }
        match existing {
            Some(idx) => self.columns[idx].1 = column,
            None => self.columns.push((name, column)),
        }
        Ok(self)
    }
    pub fn len(&self) -> usize {
        self.columns.first().map(|(_, c)| c.len()).unwrap_or(0)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }
    pub fn numeric(&self, name: &str) -> Result<&[f64], TelemetryError> {
        match self.column(name) {
            Some(Column::Numeric(values)) => Ok(values),
            Some(Column::Labels(_)) => Err(TelemetryError::NonNumericColumn {
                name: name.to_owned(),
            }),
            None => Err(TelemetryError::missing(name)),
        }
    }
    /// Every row of `name` rendered as an identifier string.
    pub fn labels(&self, name: &str) -> Result<Vec<String>, TelemetryError> {
        let column = self
            .column(name)
            .ok_or_else(|| TelemetryError::missing(name))?;
        Ok((0..column.len()).map(|row| column.label_at(row)).collect())
    }
    /// Distinct identifiers in order of first appearance.
    pub fn unique_labels(&self, name: &str) -> Result<Vec<String>, TelemetryError> {
        let mut seen = HashSet::new();
        Ok(self
            .labels(name)?
            .into_iter()
            .filter(|label| seen.insert(label.clone()))
            .collect())
    }
    pub fn select_rows(&self, rows: &[usize]) -> ObservationTable {
        ObservationTable {
            columns: self
                .columns
                .iter()
                .map(|(n, c)| (n.clone(), c.select(rows)))
                .collect(),
        }
    }
}
