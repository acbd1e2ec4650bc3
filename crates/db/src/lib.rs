//! Persistence layer for the subscription ledger.
//!
//! Owns the connection pool and the `subscriptions` table. Every store
//! failure leaves this crate as a [`CoreError`], never as a raw
//! `sqlx::Error`.

use sqlx::postgres::PgPoolOptions;
use subtrack_core::error::CoreError;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Build a mapper from a store error to [`CoreError::Persistence`],
/// tagged with the operation that failed.
pub(crate) fn persistence(operation: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| CoreError::Persistence(format!("{operation}: {err}"))
}
