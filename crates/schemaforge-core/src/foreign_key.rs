//! Foreign-key constraint value objects.

use crate::dialect::{quote, ReferenceAction};

/// One foreign-key constraint under construction.
///
/// A spec is only rendered once `column`, `references_column` and
/// `references_table` are all set; partially configured specs are
/// skipped silently at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeySpec {
    /// Column in the owning table.
    pub column: String,
    /// Referenced column in the foreign table.
    pub references_column: Option<String>,
    /// Referenced table name, unprefixed.
    pub references_table: Option<String>,
    pub on_update: Option<ReferenceAction>,
    pub on_delete: Option<ReferenceAction>,
}

impl ForeignKeySpec {
    /// Creates a spec for the given local column.
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            references_column: None,
            references_table: None,
            on_update: None,
            on_delete: None,
        }
    }

    /// Whether all required fields are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.references_column.is_some() && self.references_table.is_some()
    }

    /// Renders the constraint clause. The referenced table is re-prefixed
    /// with the same table prefix as the owning table.
    ///
    /// Returns `None` for incomplete specs.
    #[must_use]
    pub fn render(&self, table_prefix: &str) -> Option<String> {
        let references_column = self.references_column.as_deref()?;
        let references_table = self.references_table.as_deref()?;

        let mut sql = format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            quote(&self.column),
            quote(&format!("{table_prefix}{references_table}")),
            quote(references_column),
        );

        if let Some(action) = self.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }

        if let Some(action) = self.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }

        Some(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_spec_renders_nothing() {
        let spec = ForeignKeySpec::new("customer_id");
        assert!(!spec.is_complete());
        assert_eq!(spec.render(""), None);

        let mut spec = ForeignKeySpec::new("customer_id");
        spec.references_column = Some("id".to_string());
        assert_eq!(spec.render(""), None);
    }

    #[test]
    fn complete_spec_renders_with_prefix() {
        let mut spec = ForeignKeySpec::new("customer_id");
        spec.references_column = Some("id".to_string());
        spec.references_table = Some("customers".to_string());
        spec.on_update = Some(ReferenceAction::Cascade);
        spec.on_delete = Some(ReferenceAction::SetNull);

        assert_eq!(
            spec.render("app_").unwrap(),
            "FOREIGN KEY (`customer_id`) REFERENCES `app_customers` (`id`) \
             ON UPDATE CASCADE ON DELETE SET NULL"
        );
    }

    #[test]
    fn actions_are_optional() {
        let mut spec = ForeignKeySpec::new("customer_id");
        spec.references_column = Some("id".to_string());
        spec.references_table = Some("customers".to_string());

        assert_eq!(
            spec.render("").unwrap(),
            "FOREIGN KEY (`customer_id`) REFERENCES `customers` (`id`)"
        );
    }
}
