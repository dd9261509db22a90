use indexmap::IndexMap;

use crate::types::SqlValue;

/// Raw result of one driver round-trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawResponse {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row is a vector of values in column order
    pub rows: Vec<Vec<SqlValue>>,
    /// Number of rows touched by a mutating statement
    pub update_count: Option<u64>,
    /// Output parameters keyed by slot name
    pub out_binds: IndexMap<String, SqlValue>,
}

impl RawResponse {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_update_count(mut self, count: u64) -> Self {
        self.update_count = Some(count);
        self
    }

    pub fn with_out_bind(mut self, slot: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.out_binds.insert(slot.into(), value.into());
        self
    }

    pub fn out_bind(&self, slot: &str) -> Option<&SqlValue> {
        self.out_binds.get(slot)
    }

    /// Pairs every row with the column names.
    pub fn to_rows(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|values| Row::new(&self.columns, values.clone()))
            .collect()
    }
}

/// A single row, with values addressed by column name in select order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: IndexMap<String, SqlValue>,
}

impl Row {
    pub fn new(columns: &[String], values: Vec<SqlValue>) -> Self {
        let values = columns.iter().cloned().zip(values).collect();
        Self { values }
    }

    /// Gets a value by column name.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values.get(column)
    }

    /// Returns all column names in this row.
    pub fn columns(&self) -> Vec<&str> {
        self.values.keys().map(|s| s.as_str()).collect()
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.values.values()
    }

    pub fn into_values(self) -> impl Iterator<Item = SqlValue> {
        self.values.into_values()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_get() {
        let columns = vec!["id".to_string(), "name".to_string()];
        let row = Row::new(&columns, vec![SqlValue::Int64(1), "John".into()]);

        assert_eq!(row.get("id"), Some(&SqlValue::Int64(1)));
        assert_eq!(row.get("name"), Some(&SqlValue::Text("John".to_string())));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.columns(), vec!["id", "name"]);
    }

    #[test]
    fn test_to_rows_keeps_order() {
        let raw = RawResponse::new(
            vec!["id".to_string()],
            vec![vec![SqlValue::Int64(1)], vec![SqlValue::Int64(2)]],
        );
        let rows = raw.to_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("id"), Some(&SqlValue::Int64(2)));
    }

    #[test]
    fn test_out_bind_lookup() {
        let raw = RawResponse::empty().with_out_bind("returnParam", "AAAR3sAAEAAAACXAAA");
        assert_eq!(
            raw.out_bind("returnParam"),
            Some(&SqlValue::Text("AAAR3sAAEAAAACXAAA".to_string()))
        );
        assert_eq!(raw.out_bind("returnParam2"), None);
    }
}
