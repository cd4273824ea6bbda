//! Schema configuration.

use serde::Deserialize;

/// Rendering configuration consumed by the schema builder.
///
/// Only the table prefix and the MySQL engine/charset/collation suffix
/// affect rendered SQL. Each field falls back to its default when absent
/// from the deserialized source, so partial overrides merge cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Character set for the MySQL CREATE suffix.
    pub charset: String,
    /// Collation for the MySQL CREATE suffix.
    pub collation: String,
    /// Storage engine for the MySQL CREATE suffix.
    pub engine: String,
    /// Prefix prepended to every logical table name.
    pub table_prefix: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            charset: "utf8mb4".to_string(),
            collation: "utf8mb4_general_ci".to_string(),
            engine: "InnoDB".to_string(),
            table_prefix: String::new(),
        }
    }
}

impl SchemaConfig {
    /// Returns the table name with the configured prefix applied.
    #[must_use]
    pub fn prefixed(&self, table: &str) -> String {
        format!("{}{table}", self.table_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SchemaConfig::default();
        assert_eq!(config.charset, "utf8mb4");
        assert_eq!(config.collation, "utf8mb4_general_ci");
        assert_eq!(config.engine, "InnoDB");
        assert_eq!(config.prefixed("users"), "users");
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config: SchemaConfig =
            serde_json::from_str(r#"{"table_prefix": "app_"}"#).unwrap();
        assert_eq!(config.table_prefix, "app_");
        assert_eq!(config.charset, "utf8mb4");
        assert_eq!(config.prefixed("users"), "app_users");
    }
}
