use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mlep_models::{Datapoint, Statistic};
use serde_json::{Map, Value};

/// Time-indexed table of metric values, one column per variant or config.
/// Rows are kept in ascending timestamp order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsTable {
    columns: Vec<String>,
    rows: BTreeMap<DateTime<Utc>, Vec<Option<f64>>>,
}

impl MetricsTable {
    /// Build a single-column table from the `statistic` values of
    /// `datapoints`. The unit field is dropped.
    pub fn from_datapoints(
        column: impl Into<String>,
        statistic: Statistic,
        datapoints: &[Datapoint],
    ) -> Self {
        let rows = datapoints
            .iter()
            .map(|dp| (dp.timestamp, vec![dp.value(statistic)]))
            .collect();
        Self {
            columns: vec![column.into()],
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(
        &self,
    ) -> impl Iterator<Item = (&DateTime<Utc>, &[Option<f64>])> {
        self.rows.iter().map(|(ts, values)| (ts, values.as_slice()))
    }

    pub fn get(&self, timestamp: &DateTime<Utc>, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(timestamp).and_then(|row| row[idx])
    }

    /// Outer join on timestamp. Cells where one side has no row are `None`.
    pub fn outer_join(self, other: MetricsTable) -> MetricsTable {
        let left_width = self.columns.len();
        let right_width = other.columns.len();
        let mut rows: BTreeMap<DateTime<Utc>, Vec<Option<f64>>> =
            BTreeMap::new();

        for (ts, mut values) in self.rows {
            values.resize(left_width + right_width, None);
            rows.insert(ts, values);
        }
        for (ts, values) in other.rows {
            let row = rows
                .entry(ts)
                .or_insert_with(|| vec![None; left_width + right_width]);
            row[left_width..].copy_from_slice(&values);
        }

        let mut columns = self.columns;
        columns.extend(other.columns);
        MetricsTable { columns, rows }
    }

    /// `Timestamp` followed by the value columns, in table order.
    pub fn headers(&self) -> Vec<String> {
        std::iter::once("Timestamp".to_string())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    /// One JSON object per row, keyed by `Timestamp` and the column names.
    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|(ts, values)| {
                let mut obj = Map::new();
                obj.insert("Timestamp".to_string(), Value::from(ts.to_rfc3339()));
                for (column, value) in self.columns.iter().zip(values) {
                    obj.insert(
                        column.clone(),
                        value.map(Value::from).unwrap_or(Value::Null),
                    );
                }
                Value::Object(obj)
            })
            .collect();
        Value::Array(rows)
    }
}
