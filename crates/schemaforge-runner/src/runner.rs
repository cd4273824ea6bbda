//! Audited statement execution.
//!
//! [`AuditRunner`] wraps a connection pool and stamps audit metadata
//! (creation/update timestamps and a generated row identifier) onto
//! INSERT and UPDATE payloads before delegating to the execution layer.
//! It also executes the schema builder's terminal operations and exposes
//! table/column existence probes.

use std::time::Instant;

use chrono::Local;
use schemaforge_core::{
    quote, Dialect, SchemaBuilder, SchemaConfig, DATE_CREATED_COLUMN, DATE_UPDATED_COLUMN,
    UID_COLUMN,
};
use sqlx::sqlite::{SqlitePool, SqliteQueryResult};
use sqlx::Row as _;
use tracing::{debug, info};

use crate::error::Result;
use crate::row::RowValues;
use crate::uid;
use crate::value::{interpolate, SqlValue, ToSqlValue};

/// Audit timestamp format. The clock is 12-hour (`%I`), matching the
/// stamp format of the data this layer has always written.
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S";

/// Returns the current local time as an audit stamp.
#[must_use]
pub fn audit_stamp() -> String {
    Local::now().format(AUDIT_TIMESTAMP_FORMAT).to_string()
}

type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>;

/// Binds a [`SqlValue`] parameter to a query.
fn bind_value(query: SqliteQuery<'_>, value: SqlValue) -> SqliteQuery<'_> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
    }
}

/// Executes schema operations and audited row operations against a pool.
///
/// One runner per database; builders produced by [`builder`](Self::builder)
/// are bound to the runner's dialect and table prefix.
pub struct AuditRunner {
    pool: SqlitePool,
    dialect: Dialect,
    config: SchemaConfig,
}

impl AuditRunner {
    /// Creates a runner over a SQLite pool.
    #[must_use]
    pub fn new(pool: SqlitePool, config: SchemaConfig) -> Self {
        Self {
            pool,
            dialect: Dialect::from_adapter_name("sqlite"),
            config,
        }
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The dialect this runner executes against.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns a schema builder bound to this runner's dialect and
    /// configuration, with the working table already selected.
    #[must_use]
    pub fn builder(&self, table: &str) -> SchemaBuilder {
        SchemaBuilder::new(self.dialect, self.config.clone()).table(table)
    }

    /// Executes a statement with bound parameters, logging the
    /// interpolated SQL and the elapsed time.
    async fn run(&self, sql: &str, params: Vec<SqlValue>) -> Result<SqliteQueryResult> {
        debug!(sql = %interpolate(sql, &params), "executing statement");
        let started = Instant::now();

        let mut query = sqlx::query(sql);
        for value in params {
            query = bind_value(query, value);
        }
        let result = query.execute(&self.pool).await?;

        debug!(
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            rows_affected = result.rows_affected(),
            "statement finished"
        );
        Ok(result)
    }

    // -------------------------------------------------------------------
    // Row operations
    // -------------------------------------------------------------------

    /// Inserts a row, stamping `dateCreated`, `dateUpdated` and a fresh
    /// `uid` when `include_audit` is set. Audit stamps overwrite any
    /// caller-supplied values for those columns.
    ///
    /// Returns the inserted row identifier.
    pub async fn insert(
        &self,
        table: &str,
        mut row: RowValues,
        include_audit: bool,
    ) -> Result<i64> {
        if include_audit {
            let stamp = audit_stamp();
            row.set(DATE_CREATED_COLUMN, stamp.clone());
            row.set(DATE_UPDATED_COLUMN, stamp);
            row.set(UID_COLUMN, uid::generate());
        }

        let table = self.config.prefixed(table);
        let columns: Vec<String> = row.columns().iter().map(|c| quote(c)).collect();
        let placeholders: Vec<&str> = row.columns().iter().map(|_| "?").collect();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        );

        let result = self.run(&sql, row.values()).await?;
        Ok(result.last_insert_rowid())
    }

    /// Updates rows matching `key_column = key_value`, stamping
    /// `dateUpdated` when `include_audit` is set. `dateCreated` is left
    /// untouched.
    ///
    /// Returns the number of affected rows.
    pub async fn update(
        &self,
        table: &str,
        mut row: RowValues,
        key_column: &str,
        key_value: impl ToSqlValue,
        include_audit: bool,
    ) -> Result<u64> {
        if include_audit {
            row.set(DATE_UPDATED_COLUMN, audit_stamp());
        }

        let table = self.config.prefixed(table);
        let assignments: Vec<String> = row
            .columns()
            .iter()
            .map(|c| format!("{} = ?", quote(c)))
            .collect();
        let sql = format!(
            "UPDATE {table} SET {} WHERE {} = ?",
            assignments.join(", "),
            quote(key_column)
        );

        let mut params = row.values();
        params.push(key_value.to_sql_value());

        let result = self.run(&sql, params).await?;
        Ok(result.rows_affected())
    }

    // -------------------------------------------------------------------
    // Existence probes
    // -------------------------------------------------------------------

    /// Whether the (prefixed) table exists.
    pub async fn table_exists(&self, table: &str) -> Result<bool> {
        let sql = self.dialect.table_exists_sql(&self.config.prefixed(table));
        debug!(sql = %sql, "probing table existence");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(!rows.is_empty())
    }

    /// Whether the column exists on the (prefixed) table.
    pub async fn column_exists(&self, column: &str, table: &str) -> Result<bool> {
        let table = self.config.prefixed(table);
        let sql = self.dialect.column_exists_sql(column, &table);
        debug!(sql = %sql, "probing column existence");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        match self.dialect {
            Dialect::MySql => Ok(!rows.is_empty()),
            // PRAGMA table_info returns every column; scan for the name.
            Dialect::Sqlite => {
                for row in rows {
                    let name: String = row.try_get("name")?;
                    if name == column {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    // -------------------------------------------------------------------
    // Schema terminal operations
    // -------------------------------------------------------------------

    /// Renders and executes the builder's CREATE TABLE statement.
    pub async fn create(&self, builder: &SchemaBuilder) -> Result<()> {
        info!(table = %builder.table_name(), "creating table");
        self.run(&builder.create_sql(), Vec::new()).await?;
        Ok(())
    }

    /// Renders and executes the builder's DROP TABLE statement.
    pub async fn drop_table(&self, builder: &SchemaBuilder) -> Result<()> {
        info!(table = %builder.table_name(), "dropping table");
        self.run(&builder.drop_sql(), Vec::new()).await?;
        Ok(())
    }

    /// Renders and executes the builder's ALTER TABLE statement.
    ///
    /// Rendering happens first: on a dialect that rejects alteration the
    /// error surfaces before any statement reaches the database.
    pub async fn alter(&self, builder: &SchemaBuilder) -> Result<()> {
        let sql = builder.alter_sql()?;
        info!(table = %builder.table_name(), "altering table");
        self.run(&sql, Vec::new()).await?;
        Ok(())
    }

    /// Renames the builder's table. The builder is re-bound to the new
    /// name only after the statement succeeds.
    pub async fn rename(&self, builder: &mut SchemaBuilder, new_name: &str) -> Result<()> {
        let sql = builder.rename_sql(new_name);
        info!(table = %builder.table_name(), new_name, "renaming table");
        self.run(&sql, Vec::new()).await?;
        builder.finish_rename(new_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunnerError;
    use schemaforge_core::SchemaError;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_runner() -> AuditRunner {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("Failed to create in-memory SQLite pool");
        AuditRunner::new(pool, SchemaConfig::default())
    }

    async fn create_things_table(runner: &AuditRunner) {
        let builder = runner.builder("things").string("name").width(50);
        runner.create(&builder).await.unwrap();
    }

    async fn fetch_audit(runner: &AuditRunner, id: i64) -> (String, String, String) {
        let row = sqlx::query("SELECT dateCreated, dateUpdated, uid FROM things WHERE id = ?")
            .bind(id)
            .fetch_one(runner.pool())
            .await
            .unwrap();
        (row.get("dateCreated"), row.get("dateUpdated"), row.get("uid"))
    }

    #[tokio::test]
    async fn insert_stamps_audit_columns() {
        let runner = test_runner().await;
        create_things_table(&runner).await;

        let id = runner
            .insert("things", RowValues::new().with("name", "widget"), true)
            .await
            .unwrap();
        assert_eq!(id, 1);

        let (created, updated, uid) = fetch_audit(&runner, id).await;
        assert_eq!(created, updated);
        assert!(uid::is_valid(&uid), "bad uid: {uid}");
    }

    #[tokio::test]
    async fn insert_without_audit_leaves_columns_null() {
        let runner = test_runner().await;
        create_things_table(&runner).await;

        let id = runner
            .insert("things", RowValues::new().with("name", "widget"), false)
            .await
            .unwrap();

        let row = sqlx::query("SELECT uid FROM things WHERE id = ?")
            .bind(id)
            .fetch_one(runner.pool())
            .await
            .unwrap();
        let uid: Option<String> = row.get("uid");
        assert!(uid.is_none());
    }

    #[tokio::test]
    async fn audit_stamps_overwrite_caller_keys() {
        let runner = test_runner().await;
        create_things_table(&runner).await;

        let row = RowValues::new()
            .with("name", "widget")
            .with(UID_COLUMN, "not-a-real-uid-at-all!!");
        let id = runner.insert("things", row, true).await.unwrap();

        let (_, _, uid) = fetch_audit(&runner, id).await;
        assert!(uid::is_valid(&uid));
    }

    #[tokio::test]
    async fn update_leaves_date_created_untouched() {
        let runner = test_runner().await;
        create_things_table(&runner).await;

        let id = runner
            .insert("things", RowValues::new().with("name", "widget"), true)
            .await
            .unwrap();
        let (created_before, _, _) = fetch_audit(&runner, id).await;

        let affected = runner
            .update(
                "things",
                RowValues::new().with("name", "gadget"),
                "id",
                id,
                true,
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let (created_after, updated_after, _) = fetch_audit(&runner, id).await;
        assert_eq!(created_before, created_after);
        assert!(!updated_after.is_empty());

        let name: String = sqlx::query("SELECT name FROM things WHERE id = ?")
            .bind(id)
            .fetch_one(runner.pool())
            .await
            .unwrap()
            .get("name");
        assert_eq!(name, "gadget");
    }

    #[tokio::test]
    async fn existence_probes() {
        let runner = test_runner().await;
        create_things_table(&runner).await;

        assert!(runner.table_exists("things").await.unwrap());
        assert!(!runner.table_exists("missing").await.unwrap());

        assert!(runner.column_exists("name", "things").await.unwrap());
        assert!(runner.column_exists("dateCreated", "things").await.unwrap());
        assert!(!runner.column_exists("missing", "things").await.unwrap());
    }

    #[tokio::test]
    async fn probes_respect_table_prefix() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        let config = SchemaConfig {
            table_prefix: "app_".to_string(),
            ..SchemaConfig::default()
        };
        let runner = AuditRunner::new(pool, config);

        let builder = runner.builder("things").string("name");
        runner.create(&builder).await.unwrap();
        assert_eq!(builder.table_name(), "app_things");

        assert!(runner.table_exists("things").await.unwrap());
        assert!(runner.column_exists("name", "things").await.unwrap());
    }

    #[tokio::test]
    async fn alter_fails_before_any_io() {
        let runner = test_runner().await;
        create_things_table(&runner).await;

        let builder = runner.builder("things").string("extra");
        let err = runner.alter(&builder).await.unwrap_err();
        assert!(matches!(
            err,
            RunnerError::Schema(SchemaError::AlterUnsupported { .. })
        ));

        // The column was never added.
        assert!(!runner.column_exists("extra", "things").await.unwrap());
    }

    #[tokio::test]
    async fn rename_rebinds_builder_on_success() {
        let runner = test_runner().await;
        create_things_table(&runner).await;

        let mut builder = runner.builder("things");
        runner.rename(&mut builder, "stuff").await.unwrap();

        assert_eq!(builder.table_name(), "stuff");
        assert!(runner.table_exists("stuff").await.unwrap());
        assert!(!runner.table_exists("things").await.unwrap());
    }

    #[tokio::test]
    async fn create_drop_create_is_idempotent_in_effect() {
        let runner = test_runner().await;

        let builder = runner.builder("things").string("name");
        runner.create(&builder).await.unwrap();
        // Guarded by IF NOT EXISTS, a second create is harmless.
        runner.create(&builder).await.unwrap();
        runner.drop_table(&builder).await.unwrap();
        assert!(!runner.table_exists("things").await.unwrap());
        runner.create(&builder).await.unwrap();
        assert!(runner.table_exists("things").await.unwrap());
        assert!(runner.column_exists("name", "things").await.unwrap());
    }

    #[test]
    fn audit_stamp_shape() {
        let stamp = audit_stamp();
        // YYYY-MM-DD hh:mm:ss
        assert_eq!(stamp.len(), 19);
        assert_eq!(stamp.as_bytes()[4], b'-');
        assert_eq!(stamp.as_bytes()[10], b' ');
        assert_eq!(stamp.as_bytes()[13], b':');
    }
}
