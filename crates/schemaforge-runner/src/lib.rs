//! # schemaforge-runner
//!
//! Execution layer for `schemaforge-core`: runs the schema builder's
//! terminal operations against a SQLite pool and wraps row-level INSERT
//! and UPDATE statements with audit metadata — creation/update
//! timestamps and a generated row identifier — so that every row in a
//! schemaforge table is independently timestamped and identifiable.
//!
//! ```ignore
//! use schemaforge_core::SchemaConfig;
//! use schemaforge_runner::{AuditRunner, RowValues};
//!
//! let runner = AuditRunner::new(pool, SchemaConfig::default());
//!
//! let builder = runner.builder("orders").string("status").width(10);
//! runner.create(&builder).await?;
//!
//! let id = runner
//!     .insert("orders", RowValues::new().with("status", "open"), true)
//!     .await?;
//! ```

pub mod error;
pub mod row;
pub mod runner;
pub mod uid;
pub mod value;

pub use error::{Result, RunnerError};
pub use row::RowValues;
pub use runner::{audit_stamp, AuditRunner, AUDIT_TIMESTAMP_FORMAT};
pub use value::{interpolate, SqlValue, ToSqlValue};
