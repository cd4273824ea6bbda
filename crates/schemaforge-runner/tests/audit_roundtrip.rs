//! End-to-end exercise of the schema builder and the audit runner
//! against an in-memory database.

use schemaforge_core::{ReferenceAction, SchemaConfig};
use schemaforge_runner::{uid, AuditRunner, RowValues};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::Row as _;

async fn runner_with_prefix(prefix: &str) -> AuditRunner {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create in-memory SQLite pool");
    let config = SchemaConfig {
        table_prefix: prefix.to_string(),
        ..SchemaConfig::default()
    };
    AuditRunner::new(pool, config)
}

#[tokio::test]
async fn orders_lifecycle() {
    let runner = runner_with_prefix("shop_").await;

    let customers = runner.builder("customers").string("name").not_null();
    runner.create(&customers).await.unwrap();

    let orders = runner
        .builder("orders")
        .string("status")
        .width(10)
        .unique()
        .integer("customer_id")
        .not_null()
        .foreign("customer_id")
        .references("id")
        .on_table("customers")
        .on_delete(ReferenceAction::Cascade);
    runner.create(&orders).await.unwrap();

    assert!(runner.table_exists("customers").await.unwrap());
    assert!(runner.table_exists("orders").await.unwrap());

    let customer_id = runner
        .insert("customers", RowValues::new().with("name", "Ada"), true)
        .await
        .unwrap();

    let order_id = runner
        .insert(
            "orders",
            RowValues::new()
                .with("status", "open")
                .with("customer_id", customer_id),
            true,
        )
        .await
        .unwrap();

    let row = sqlx::query("SELECT status, dateCreated, dateUpdated, uid FROM shop_orders WHERE id = ?")
        .bind(order_id)
        .fetch_one(runner.pool())
        .await
        .unwrap();
    let created: String = row.get("dateCreated");
    let updated: String = row.get("dateUpdated");
    let uid_value: String = row.get("uid");
    assert_eq!(created, updated);
    assert!(uid::is_valid(&uid_value));

    runner
        .update(
            "orders",
            RowValues::new().with("status", "paid"),
            "id",
            order_id,
            true,
        )
        .await
        .unwrap();

    let row = sqlx::query("SELECT status, dateCreated FROM shop_orders WHERE id = ?")
        .bind(order_id)
        .fetch_one(runner.pool())
        .await
        .unwrap();
    let status: String = row.get("status");
    let created_after: String = row.get("dateCreated");
    assert_eq!(status, "paid");
    assert_eq!(created_after, created);

    let builder = runner.builder("orders");
    runner.drop_table(&builder).await.unwrap();
    assert!(!runner.table_exists("orders").await.unwrap());
}
