//! Error types for schema building.

use crate::dialect::Dialect;

/// Errors that can occur while rendering schema DDL.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The bound dialect cannot express ALTER TABLE in this design.
    #[error(
        "the {dialect} dialect does not support ALTER TABLE here; \
         its DDL requires table-rebuild semantics: create a new table, \
         copy the rows across, and drop the old one instead"
    )]
    AlterUnsupported {
        /// The dialect the builder is bound to.
        dialect: Dialect,
    },
}

/// Result type for schema rendering.
pub type Result<T> = std::result::Result<T, SchemaError>;
