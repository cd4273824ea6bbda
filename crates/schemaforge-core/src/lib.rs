//! # schemaforge-core
//!
//! A dialect-aware SQL schema builder: accumulate column, index, and
//! foreign-key declarations for one table with a fluent API, then render
//! CREATE / ALTER / DROP / RENAME statements for a MySQL-family or
//! SQLite-family dialect.
//!
//! This crate is pure — it renders SQL strings and performs no I/O.
//! Execution against a live database lives in `schemaforge-runner`.
//!
//! ```
//! use schemaforge_core::{Dialect, ReferenceAction, SchemaBuilder, SchemaConfig};
//!
//! let sql = SchemaBuilder::new(Dialect::MySql, SchemaConfig::default())
//!     .table("orders")
//!     .string("status").width(10).unique()
//!     .integer("customer_id").unsigned().not_null()
//!     .foreign("customer_id")
//!     .references("id")
//!     .on_table("customers")
//!     .on_delete(ReferenceAction::Cascade)
//!     .create_sql();
//!
//! assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS orders"));
//! ```
//!
//! Every table rendered by the builder carries three implicit audit
//! columns (`dateCreated`, `dateUpdated`, `uid`); the runner crate
//! populates them on insert and update.

pub mod column;
pub mod config;
pub mod dialect;
pub mod error;
pub mod foreign_key;
pub mod schema;

pub use column::{Attr, ColumnPosition, ColumnSpec};
pub use config::SchemaConfig;
pub use dialect::{quote, ColumnType, Dialect, ReferenceAction, GENERIC_INTEGER};
pub use error::{Result, SchemaError};
pub use foreign_key::ForeignKeySpec;
pub use schema::{
    SchemaBuilder, DATE_CREATED_COLUMN, DATE_UPDATED_COLUMN, UID_COLUMN,
};
