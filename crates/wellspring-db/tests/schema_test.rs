//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    wellspring_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("user"), "missing user table");
    assert!(info_str.contains("session"), "missing session table");
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    wellspring_db::run_migrations(&db).await.unwrap();
    // A second run must skip the already-applied version.
    wellspring_db::run_migrations(&db).await.unwrap();
}

#[tokio::test]
async fn session_status_is_constrained() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    wellspring_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE session SET owner_id = 'x', title = 't', \
             status = 'archived'",
        )
        .await
        .unwrap()
        .check();
    assert!(result.is_err(), "unknown status must be rejected");
}
