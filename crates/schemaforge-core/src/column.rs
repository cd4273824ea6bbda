//! Column value objects.
//!
//! A [`ColumnSpec`] records one column under construction. Which attributes
//! a column accepts depends on its declared type: a width makes no sense on
//! a BLOB, UNSIGNED makes no sense on a CHAR. Attributes a type does not
//! support are modelled with [`Attr::Unsupported`] so that modifier calls
//! against them are accepted and ignored, never an error.

use crate::dialect::{ColumnType, Dialect, GENERIC_INTEGER};

/// A single column attribute that may be unsupported for the column's
/// type, supported but not set, or set to a value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Attr<T> {
    /// The column type does not accept this attribute; writes are ignored.
    Unsupported,
    /// The attribute is accepted but has no value yet.
    #[default]
    Unset,
    /// The attribute has been set.
    Set(T),
}

impl<T> Attr<T> {
    /// Stores a value unless the attribute is unsupported.
    pub fn assign(&mut self, value: T) {
        if !matches!(self, Self::Unsupported) {
            *self = Self::Set(value);
        }
    }

    /// Returns the set value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }
}

/// Positional hint for ALTER TABLE column insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPosition {
    /// Insert as the first column.
    First,
    /// Insert after the named column.
    After(String),
}

/// One column's attributes, dialect-resolved at declaration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name; unique within the table, insertion order is emission
    /// order.
    pub name: String,
    /// Concrete SQL type name, already resolved against the dialect.
    pub sql_type: String,
    /// Optional display width, ignored when the resolved type is the
    /// generic integer type.
    pub width: Attr<u32>,
    pub not_null: Attr<bool>,
    pub unsigned: Attr<bool>,
    /// Raw SQL literal; not escaped by this layer.
    pub default: Attr<String>,
    pub unique: bool,
    pub indexed: bool,
    /// ALTER-only: rename the column to this name.
    pub rename_to: Option<String>,
    /// ALTER-only: positional insertion hint.
    pub position: Option<ColumnPosition>,
}

impl ColumnSpec {
    /// Creates a spec for the given abstract type, resolving the SQL type
    /// against the dialect and applying the per-type presets.
    #[must_use]
    pub fn for_type(name: impl Into<String>, column_type: &ColumnType, dialect: Dialect) -> Self {
        let mut spec = Self {
            name: name.into(),
            sql_type: dialect.type_name(column_type),
            width: Attr::Unsupported,
            not_null: Attr::Unsupported,
            unsigned: Attr::Unsupported,
            default: Attr::Unsupported,
            unique: false,
            indexed: false,
            rename_to: None,
            position: None,
        };

        match column_type {
            ColumnType::BigInteger => {
                spec.width = Attr::Set(20);
                spec.not_null = Attr::Unset;
                spec.unsigned = Attr::Unset;
                spec.default = Attr::Unset;
            }
            ColumnType::Integer
            | ColumnType::MediumInteger
            | ColumnType::SmallInteger
            | ColumnType::TinyInteger
            | ColumnType::Float => {
                spec.width = Attr::Unset;
                spec.not_null = Attr::Unset;
                spec.unsigned = Attr::Unset;
                spec.default = Attr::Unset;
            }
            ColumnType::Boolean => {
                spec.width = Attr::Set(1);
                spec.not_null = Attr::Set(true);
                spec.default = Attr::Set("0".to_string());
            }
            ColumnType::Char => {
                spec.width = Attr::Set(1);
                spec.not_null = Attr::Unset;
                spec.default = Attr::Unset;
            }
            ColumnType::String => {
                spec.width = Attr::Set(255);
                spec.not_null = Attr::Unset;
                spec.default = Attr::Unset;
            }
            ColumnType::Binary | ColumnType::LongText | ColumnType::MediumText => {
                spec.not_null = Attr::Unset;
            }
            ColumnType::Date
            | ColumnType::DateTime
            | ColumnType::Text
            | ColumnType::Time
            | ColumnType::Timestamp => {
                spec.not_null = Attr::Unset;
                spec.default = Attr::Unset;
            }
            ColumnType::Raw(_) => {}
        }

        spec
    }

    /// Renders the column body (everything after the quoted name):
    /// `TYPE[(width)] [UNSIGNED] [NOT NULL] [UNIQUE] [DEFAULT value]`.
    #[must_use]
    pub fn render_body(&self) -> String {
        let mut sql = self.sql_type.clone();

        if self.sql_type != GENERIC_INTEGER {
            if let Some(width) = self.width.value() {
                sql.push_str(&format!("({width})"));
            }
        }

        if self.unsigned.value() == Some(&true) {
            sql.push_str(" UNSIGNED");
        }

        if self.not_null.value() == Some(&true) {
            sql.push_str(" NOT NULL");
        }

        if self.unique {
            sql.push_str(" UNIQUE");
        }

        if let Some(default) = self.default.value() {
            sql.push_str(&format!(" DEFAULT {default}"));
        }

        sql
    }
}
