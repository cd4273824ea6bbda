//! Row payloads for audited INSERT and UPDATE statements.

use crate::value::{SqlValue, ToSqlValue};

/// An insertion-ordered column → value map.
///
/// `set` has last-write-wins semantics: re-setting an existing column
/// replaces its value in place, keeping the original position. This is
/// what lets audit injection override caller-supplied audit keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowValues {
    entries: Vec<(String, SqlValue)>,
}

impl RowValues {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column value, replacing any existing entry for the column.
    pub fn set(&mut self, column: impl Into<String>, value: impl ToSqlValue) {
        let column = column.into();
        let value = value.to_sql_value();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == column) {
            entry.1 = value;
        } else {
            self.entries.push((column, value));
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl ToSqlValue) -> Self {
        self.set(column, value);
        self
    }

    /// Returns the value for a column, if set.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in insertion order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Values in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<SqlValue> {
        self.entries.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: Into<String>, V: ToSqlValue> FromIterator<(C, V)> for RowValues {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.set(column, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_preserves_order_and_replaces_in_place() {
        let mut row = RowValues::new();
        row.set("a", 1i64);
        row.set("b", "two");
        row.set("a", 3i64);

        assert_eq!(row.columns(), vec!["a", "b"]);
        assert_eq!(row.get("a"), Some(&SqlValue::Int(3)));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn from_iterator() {
        let row: RowValues = [("x", 1i64), ("y", 2i64)].into_iter().collect();
        assert_eq!(row.columns(), vec!["x", "y"]);
        assert_eq!(row.values(), vec![SqlValue::Int(1), SqlValue::Int(2)]);
    }
}
