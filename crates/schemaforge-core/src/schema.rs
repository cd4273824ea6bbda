//! The fluent schema builder and its DDL rendering.
//!
//! A [`SchemaBuilder`] accumulates column and foreign-key declarations for
//! one table and renders CREATE / ALTER / DROP / RENAME statements for the
//! bound dialect. The `*_sql` methods are pure; execution belongs to the
//! runner crate.
//!
//! Modifier methods resolve against an internal cursor naming the most
//! recently declared column or foreign key, so a chain reads naturally:
//!
//! ```
//! use schemaforge_core::{Dialect, SchemaBuilder, SchemaConfig};
//!
//! let sql = SchemaBuilder::new(Dialect::MySql, SchemaConfig::default())
//!     .table("orders")
//!     .string("status")
//!     .width(10)
//!     .unique()
//!     .create_sql();
//!
//! assert!(sql.contains("`status` VARCHAR(10) UNIQUE"));
//! ```
//!
//! Modifier calls with no cursor target, or targeting an attribute the
//! column's type does not accept, are accepted and ignored.

use tracing::{debug, warn};

use crate::column::{ColumnPosition, ColumnSpec};
use crate::config::SchemaConfig;
use crate::dialect::{quote, ColumnType, Dialect, ReferenceAction};
use crate::error::{Result, SchemaError};
use crate::foreign_key::ForeignKeySpec;

/// Implicit audit column stamped with the row creation time.
pub const DATE_CREATED_COLUMN: &str = "dateCreated";
/// Implicit audit column stamped on every row write.
pub const DATE_UPDATED_COLUMN: &str = "dateUpdated";
/// Implicit audit column holding the generated row identifier.
pub const UID_COLUMN: &str = "uid";

/// Accumulates one table's schema and renders dialect-specific DDL.
///
/// One builder instance per schema operation; state is owned exclusively
/// and never shared across tables or threads.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    dialect: Dialect,
    config: SchemaConfig,
    table: String,
    columns: Vec<ColumnSpec>,
    foreign_keys: Vec<ForeignKeySpec>,
    dropped_indexes: Vec<String>,
    dropped_foreign_keys: Vec<String>,
    dropped_columns: Vec<String>,
    current: Option<String>,
}

impl SchemaBuilder {
    /// Creates a builder bound to a dialect and rendering configuration.
    ///
    /// Call [`table`](Self::table) before declaring columns.
    #[must_use]
    pub fn new(dialect: Dialect, config: SchemaConfig) -> Self {
        Self {
            dialect,
            config,
            table: String::new(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            dropped_indexes: Vec::new(),
            dropped_foreign_keys: Vec::new(),
            dropped_columns: Vec::new(),
            current: None,
        }
    }

    /// Binds the working table name (prefixed with the configured table
    /// prefix) and resets all per-table state.
    #[must_use]
    pub fn table(mut self, name: &str) -> Self {
        self.table = self.config.prefixed(name);
        self.columns.clear();
        self.foreign_keys.clear();
        self.dropped_indexes.clear();
        self.dropped_foreign_keys.clear();
        self.dropped_columns.clear();
        self.current = None;
        self
    }

    /// The bound (prefixed) table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// The dialect this builder renders for.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    // -------------------------------------------------------------------
    // Column declarators
    // -------------------------------------------------------------------

    fn declare(mut self, name: impl Into<String>, column_type: &ColumnType) -> Self {
        let name = name.into();
        let spec = ColumnSpec::for_type(name.clone(), column_type, self.dialect);
        // Redeclaring a name replaces the spec but keeps its position.
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == name) {
            *existing = spec;
        } else {
            self.columns.push(spec);
        }
        self.current = Some(name);
        self
    }

    /// Adds a BIGINT column (generic integer on SQLite).
    #[must_use]
    pub fn big_integer(self, name: &str) -> Self {
        self.declare(name, &ColumnType::BigInteger)
    }

    /// Adds a BLOB column.
    #[must_use]
    pub fn binary(self, name: &str) -> Self {
        self.declare(name, &ColumnType::Binary)
    }

    /// Adds a TINYINT(1) column preset to NOT NULL DEFAULT 0.
    #[must_use]
    pub fn boolean(self, name: &str) -> Self {
        self.declare(name, &ColumnType::Boolean)
    }

    /// Adds a CHAR column with width 1.
    #[must_use]
    pub fn char(self, name: &str) -> Self {
        self.declare(name, &ColumnType::Char)
    }

    /// Adds a DATE column.
    #[must_use]
    pub fn date(self, name: &str) -> Self {
        self.declare(name, &ColumnType::Date)
    }

    /// Adds a DATETIME column.
    #[must_use]
    pub fn date_time(self, name: &str) -> Self {
        self.declare(name, &ColumnType::DateTime)
    }

    /// Adds a FLOAT column.
    #[must_use]
    pub fn float(self, name: &str) -> Self {
        self.declare(name, &ColumnType::Float)
    }

    /// Adds an INT column (generic integer on SQLite).
    #[must_use]
    pub fn integer(self, name: &str) -> Self {
        self.declare(name, &ColumnType::Integer)
    }

    /// Adds a LONGTEXT column.
    #[must_use]
    pub fn long_text(self, name: &str) -> Self {
        self.declare(name, &ColumnType::LongText)
    }

    /// Adds a MEDIUMINT column (generic integer on SQLite).
    #[must_use]
    pub fn medium_integer(self, name: &str) -> Self {
        self.declare(name, &ColumnType::MediumInteger)
    }

    /// Adds a MEDIUMTEXT column.
    #[must_use]
    pub fn medium_text(self, name: &str) -> Self {
        self.declare(name, &ColumnType::MediumText)
    }

    /// Adds a SMALLINT column (generic integer on SQLite).
    #[must_use]
    pub fn small_integer(self, name: &str) -> Self {
        self.declare(name, &ColumnType::SmallInteger)
    }

    /// Adds a TINYINT column (generic integer on SQLite).
    #[must_use]
    pub fn tiny_integer(self, name: &str) -> Self {
        self.declare(name, &ColumnType::TinyInteger)
    }

    /// Adds a VARCHAR column with width 255.
    #[must_use]
    pub fn string(self, name: &str) -> Self {
        self.declare(name, &ColumnType::String)
    }

    /// Adds a TEXT column.
    #[must_use]
    pub fn text(self, name: &str) -> Self {
        self.declare(name, &ColumnType::Text)
    }

    /// Adds a TIME column.
    #[must_use]
    pub fn time(self, name: &str) -> Self {
        self.declare(name, &ColumnType::Time)
    }

    /// Adds a TIMESTAMP column.
    #[must_use]
    pub fn timestamp(self, name: &str) -> Self {
        self.declare(name, &ColumnType::Timestamp)
    }

    /// Adds a column with an explicit SQL type string, emitted verbatim.
    #[must_use]
    pub fn raw(self, name: &str, sql_type: &str) -> Self {
        self.declare(name, &ColumnType::Raw(sql_type.to_string()))
    }

    // -------------------------------------------------------------------
    // Column modifiers (cursor-resolved, guarded)
    // -------------------------------------------------------------------

    fn with_current_column(mut self, apply: impl FnOnce(&mut ColumnSpec)) -> Self {
        if let Some(name) = self.current.clone() {
            if let Some(column) = self.columns.iter_mut().find(|c| c.name == name) {
                apply(column);
            }
        }
        self
    }

    /// Sets the current column's display width. Ignored when the column
    /// type has no width, or when the resolved type is the generic
    /// integer type.
    #[must_use]
    pub fn width(self, width: u32) -> Self {
        self.with_current_column(|column| column.width.assign(width))
    }

    /// Marks the current column NOT NULL.
    #[must_use]
    pub fn not_null(self) -> Self {
        self.set_not_null(true)
    }

    /// Sets or clears NOT NULL on the current column. Clearing lets a
    /// type preset such as boolean's NOT NULL be undone.
    #[must_use]
    pub fn set_not_null(self, not_null: bool) -> Self {
        self.with_current_column(|column| column.not_null.assign(not_null))
    }

    /// Marks the current column UNSIGNED.
    #[must_use]
    pub fn unsigned(self) -> Self {
        self.set_unsigned(true)
    }

    /// Sets or clears UNSIGNED on the current column.
    #[must_use]
    pub fn set_unsigned(self, unsigned: bool) -> Self {
        self.with_current_column(|column| column.unsigned.assign(unsigned))
    }

    /// Sets the current column's default value. The value is a raw SQL
    /// literal and is not escaped by this layer.
    #[must_use]
    pub fn default_value(self, value: &str) -> Self {
        let value = value.to_string();
        self.with_current_column(|column| column.default.assign(value))
    }

    /// Marks the current column UNIQUE.
    #[must_use]
    pub fn unique(self) -> Self {
        self.with_current_column(|column| column.unique = true)
    }

    /// Flags the current column for an index clause (MySQL only; SQLite
    /// has no inline index clause in this design).
    #[must_use]
    pub fn index(self) -> Self {
        self.with_current_column(|column| column.indexed = true)
    }

    /// Renames the current column on the next ALTER.
    #[must_use]
    pub fn rename_to(self, new_name: &str) -> Self {
        let new_name = new_name.to_string();
        self.with_current_column(|column| column.rename_to = Some(new_name))
    }

    /// Positions the current column first on the next ALTER, switching it
    /// to an ADD clause.
    #[must_use]
    pub fn insert_first(self) -> Self {
        self.with_current_column(|column| column.position = Some(ColumnPosition::First))
    }

    /// Positions the current column after another on the next ALTER,
    /// switching it to an ADD clause.
    #[must_use]
    pub fn insert_after(self, column_name: &str) -> Self {
        let after = column_name.to_string();
        self.with_current_column(|column| column.position = Some(ColumnPosition::After(after)))
    }

    // -------------------------------------------------------------------
    // Drop bookkeeping (ALTER only)
    // -------------------------------------------------------------------

    /// Queues an index drop for the next ALTER.
    #[must_use]
    pub fn drop_index(mut self, name: &str) -> Self {
        self.dropped_indexes.push(name.to_string());
        self
    }

    /// Queues a foreign-key drop for the next ALTER.
    #[must_use]
    pub fn drop_foreign(mut self, name: &str) -> Self {
        self.dropped_foreign_keys.push(name.to_string());
        self
    }

    /// Queues a column drop for the next ALTER. The name is recorded for
    /// emission; any declared spec with that name is left untouched.
    #[must_use]
    pub fn drop_column(mut self, name: &str) -> Self {
        self.dropped_columns.push(name.to_string());
        self
    }

    // -------------------------------------------------------------------
    // Foreign-key declarators
    // -------------------------------------------------------------------

    fn with_current_foreign(mut self, apply: impl FnOnce(&mut ForeignKeySpec)) -> Self {
        if let Some(name) = self.current.clone() {
            if let Some(spec) = self.foreign_keys.iter_mut().find(|f| f.column == name) {
                apply(spec);
            }
        }
        self
    }

    /// Starts a foreign-key constraint on the given column and points the
    /// cursor at it.
    #[must_use]
    pub fn foreign(mut self, column: &str) -> Self {
        if !self.foreign_keys.iter().any(|f| f.column == column) {
            self.foreign_keys.push(ForeignKeySpec::new(column));
        }
        self.current = Some(column.to_string());
        self
    }

    /// Sets the referenced column of the current foreign key.
    #[must_use]
    pub fn references(self, column: &str) -> Self {
        let column = column.to_string();
        self.with_current_foreign(|spec| spec.references_column = Some(column))
    }

    /// Sets the referenced table of the current foreign key. The name is
    /// prefixed at render time.
    #[must_use]
    pub fn on_table(self, table: &str) -> Self {
        let table = table.to_string();
        self.with_current_foreign(|spec| spec.references_table = Some(table))
    }

    /// Sets the ON UPDATE action of the current foreign key.
    #[must_use]
    pub fn on_update(self, action: ReferenceAction) -> Self {
        self.with_current_foreign(|spec| spec.on_update = Some(action))
    }

    /// Sets the ON DELETE action of the current foreign key.
    #[must_use]
    pub fn on_delete(self, action: ReferenceAction) -> Self {
        self.with_current_foreign(|spec| spec.on_delete = Some(action))
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    /// Renders the CREATE TABLE statement.
    ///
    /// The fixed primary-key column comes first, then declared columns in
    /// insertion order, then the three implicit audit columns, then (on
    /// MySQL) one INDEX clause per flagged column, then every complete
    /// foreign-key constraint.
    #[must_use]
    pub fn create_sql(&self) -> String {
        let mut fragments = vec![self.dialect.primary_key_fragment().to_string()];

        for column in &self.columns {
            fragments.push(format!("{} {}", quote(&column.name), column.render_body()));
        }

        fragments.push(format!("{} DATETIME", quote(DATE_CREATED_COLUMN)));
        fragments.push(format!("{} DATETIME", quote(DATE_UPDATED_COLUMN)));
        fragments.push(format!("{} CHAR(24)", quote(UID_COLUMN)));

        if self.dialect == Dialect::MySql {
            for column in self.columns.iter().filter(|c| c.indexed) {
                fragments.push(format!("INDEX ({})", quote(&column.name)));
            }
        }

        self.push_foreign_keys(&mut fragments, "");

        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            self.table,
            fragments.join(",\n")
        );

        if self.dialect == Dialect::MySql {
            sql.push_str(&format!(
                " ENGINE={} DEFAULT CHARSET {} COLLATE {}",
                self.config.engine, self.config.charset, self.config.collation
            ));
        }

        debug!(table = %self.table, dialect = %self.dialect, "rendered CREATE TABLE");
        sql
    }

    /// Renders the ALTER TABLE statement.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::AlterUnsupported`] when the bound dialect is
    /// not MySQL-family; no statement is rendered and no I/O happens.
    pub fn alter_sql(&self) -> Result<String> {
        if self.dialect != Dialect::MySql {
            return Err(SchemaError::AlterUnsupported {
                dialect: self.dialect,
            });
        }

        let mut fragments = Vec::new();

        for column in &self.columns {
            let body = column.render_body();
            let fragment = match &column.position {
                Some(position) => {
                    let mut sql = format!("ADD {} {body}", quote(&column.name));
                    match position {
                        ColumnPosition::First => sql.push_str(" FIRST"),
                        ColumnPosition::After(other) => {
                            sql.push_str(&format!(" AFTER {}", quote(other)));
                        }
                    }
                    sql
                }
                None => {
                    let new_name = column.rename_to.as_deref().unwrap_or(&column.name);
                    format!("CHANGE {} {} {body}", quote(&column.name), quote(new_name))
                }
            };
            fragments.push(fragment);
        }

        for column in self.columns.iter().filter(|c| c.indexed) {
            fragments.push(format!("ADD INDEX ({})", quote(&column.name)));
        }

        for name in &self.dropped_indexes {
            fragments.push(format!("DROP INDEX {}", quote(name)));
        }

        self.push_foreign_keys(&mut fragments, "ADD ");

        for name in &self.dropped_foreign_keys {
            fragments.push(format!("DROP FOREIGN KEY {}", quote(name)));
        }

        for name in &self.dropped_columns {
            fragments.push(format!("DROP {}", quote(name)));
        }

        debug!(table = %self.table, "rendered ALTER TABLE");
        Ok(format!(
            "ALTER TABLE {}\n{}",
            self.table,
            fragments.join(",\n")
        ))
    }

    /// Renders the DROP TABLE statement; dialect-independent.
    #[must_use]
    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.table)
    }

    /// Renders the table rename statement for the bound dialect. The new
    /// name is prefixed like any other table name.
    #[must_use]
    pub fn rename_sql(&self, new_name: &str) -> String {
        let new_name = self.config.prefixed(new_name);
        match self.dialect {
            Dialect::MySql => format!("RENAME TABLE {} TO {new_name}", self.table),
            Dialect::Sqlite => format!("ALTER TABLE {} RENAME TO {new_name}", self.table),
        }
    }

    /// Re-binds the builder to the renamed table. Called by the runner
    /// after the rename statement succeeds, so subsequent operations
    /// target the new name.
    pub fn finish_rename(&mut self, new_name: &str) {
        self.table = self.config.prefixed(new_name);
    }

    fn push_foreign_keys(&self, fragments: &mut Vec<String>, clause_prefix: &str) {
        for spec in &self.foreign_keys {
            match spec.render(&self.config.table_prefix) {
                Some(sql) => fragments.push(format!("{clause_prefix}{sql}")),
                None => {
                    // Incomplete specs are dropped rather than failing the
                    // whole statement.
                    warn!(
                        table = %self.table,
                        column = %spec.column,
                        "skipping incomplete foreign key"
                    );
                }
            }
        }
    }
}
