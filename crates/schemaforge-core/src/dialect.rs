//! SQL dialect resolution and type mapping.
//!
//! All dialect branching lives here: abstract column types are resolved to
//! concrete SQL type names once, at declaration time, instead of being
//! string-compared inside every builder method.

use std::fmt;

use serde::Deserialize;

/// The target SQL engine family.
///
/// Resolved once from the execution layer's adapter name; every
/// type-mapping and clause-availability decision branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL-family engines (backtick identifiers, inline INDEX clauses,
    /// engine/charset/collation suffix on CREATE).
    MySql,
    /// SQLite-family engines (collapsed integer types, no ALTER support
    /// in this design).
    Sqlite,
}

impl Dialect {
    /// Resolves a dialect from an adapter name as reported by the
    /// connection layer. Unknown adapters fall back to MySQL, which is
    /// the default driver.
    #[must_use]
    pub fn from_adapter_name(name: &str) -> Self {
        match name {
            "sqlite" | "sqlite3" => Self::Sqlite,
            _ => Self::MySql,
        }
    }

    /// Returns the concrete SQL type name for an abstract column type.
    ///
    /// MySQL keeps the specific integer width classes; SQLite collapses
    /// the whole integer family (booleans included) to its single
    /// `INTEGER` type.
    #[must_use]
    pub fn type_name(self, column_type: &ColumnType) -> String {
        match (self, column_type) {
            (Self::MySql, ColumnType::BigInteger) => "BIGINT".to_string(),
            (Self::MySql, ColumnType::Integer) => "INT".to_string(),
            (Self::MySql, ColumnType::MediumInteger) => "MEDIUMINT".to_string(),
            (Self::MySql, ColumnType::SmallInteger) => "SMALLINT".to_string(),
            (Self::MySql, ColumnType::TinyInteger | ColumnType::Boolean) => "TINYINT".to_string(),
            (
                Self::Sqlite,
                ColumnType::BigInteger
                | ColumnType::Integer
                | ColumnType::MediumInteger
                | ColumnType::SmallInteger
                | ColumnType::TinyInteger
                | ColumnType::Boolean,
            ) => GENERIC_INTEGER.to_string(),
            (_, ColumnType::Binary) => "BLOB".to_string(),
            (_, ColumnType::Char) => "CHAR".to_string(),
            (_, ColumnType::Date) => "DATE".to_string(),
            (_, ColumnType::DateTime) => "DATETIME".to_string(),
            (_, ColumnType::Float) => "FLOAT".to_string(),
            (_, ColumnType::LongText) => "LONGTEXT".to_string(),
            (_, ColumnType::MediumText) => "MEDIUMTEXT".to_string(),
            (_, ColumnType::String) => "VARCHAR".to_string(),
            (_, ColumnType::Text) => "TEXT".to_string(),
            (_, ColumnType::Time) => "TIME".to_string(),
            (_, ColumnType::Timestamp) => "TIMESTAMP".to_string(),
            (_, ColumnType::Raw(sql)) => sql.clone(),
        }
    }

    /// Returns the fixed primary-key column fragment emitted first in
    /// every CREATE TABLE.
    ///
    /// SQLite integer primary keys alias the rowid and auto-increment
    /// implicitly, so no AUTOINCREMENT keyword is needed there.
    #[must_use]
    pub fn primary_key_fragment(self) -> &'static str {
        match self {
            Self::MySql => "id INT(10) UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY",
            Self::Sqlite => "id INTEGER PRIMARY KEY",
        }
    }

    /// Renders the table-existence probe for this dialect.
    #[must_use]
    pub fn table_exists_sql(self, table: &str) -> String {
        match self {
            Self::MySql => format!("SHOW TABLES LIKE '{table}'"),
            Self::Sqlite => {
                format!("SELECT name FROM sqlite_master WHERE type='table' AND name='{table}'")
            }
        }
    }

    /// Renders the column-existence probe for this dialect.
    ///
    /// The SQLite variant returns every column of the table; the caller
    /// scans the result rows for a name match.
    #[must_use]
    pub fn column_exists_sql(self, column: &str, table: &str) -> String {
        match self {
            Self::MySql => format!("SHOW COLUMNS FROM {} LIKE '{column}'", quote(table)),
            Self::Sqlite => format!("PRAGMA table_info({table})"),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MySql => write!(f, "mysql"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// The generic integer type name that suppresses width clauses.
pub const GENERIC_INTEGER: &str = "INTEGER";

/// Abstract column types understood by the schema builder.
///
/// One variant per typed declarator, plus `Raw` as the escape hatch for
/// an explicit dialect SQL type string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    BigInteger,
    Binary,
    Boolean,
    Char,
    Date,
    DateTime,
    Float,
    Integer,
    LongText,
    MediumInteger,
    MediumText,
    SmallInteger,
    TinyInteger,
    String,
    Text,
    Time,
    Timestamp,
    /// A literal SQL type string, emitted verbatim.
    Raw(String),
}

/// Referential action for ON UPDATE / ON DELETE clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl ReferenceAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// Quotes an identifier with backticks.
#[must_use]
pub fn quote(identifier: &str) -> String {
    format!("`{identifier}`")
}
