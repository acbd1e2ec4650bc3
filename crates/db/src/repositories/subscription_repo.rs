//! Repository for the `subscriptions` table.

use sqlx::PgPool;
use subtrack_core::error::CoreError;
use subtrack_core::subscription::{NewSubscription, PeriodQuery, Subscription, ENTITY};
use subtrack_core::types::DbId;

use crate::models::subscription::SubscriptionRow;
use crate::persistence;
use crate::repositories::PeriodFilter;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, service_name, price, user_id, start_date, end_date";

const TABLE_EXISTS: &str = "SELECT EXISTS ( \
        SELECT FROM information_schema.tables \
        WHERE table_schema = current_schema() AND table_name = 'subscriptions' \
     )";

const CREATE_TABLE: &str = "CREATE TABLE subscriptions ( \
        id SERIAL PRIMARY KEY, \
        service_name VARCHAR(255) NOT NULL, \
        price INTEGER NOT NULL, \
        user_id UUID NOT NULL, \
        start_date DATE NOT NULL, \
        end_date DATE \
     )";

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}

/// Provides CRUD and aggregation over subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Create the `subscriptions` table unless it already exists.
    ///
    /// Safe to call on every start. Returns `true` if the table was created.
    /// The check and the create are separate statements, so two processes
    /// starting against an empty database at once can race.
    pub async fn initialize(pool: &PgPool) -> Result<bool, CoreError> {
        let exists = sqlx::query_scalar::<_, bool>(TABLE_EXISTS)
            .fetch_one(pool)
            .await
            .map_err(persistence("check subscriptions table"))?;
        if exists {
            return Ok(false);
        }

        tracing::info!("Initializing database");
        sqlx::query(CREATE_TABLE)
            .execute(pool)
            .await
            .map_err(persistence("create subscriptions table"))?;
        tracing::info!("Database initialized");
        Ok(true)
    }

    /// Insert a new subscription, returning the generated id.
    pub async fn create(pool: &PgPool, input: &NewSubscription) -> Result<DbId, CoreError> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO subscriptions (service_name, price, user_id, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(&input.service_name)
        .bind(input.price)
        .bind(input.user_id)
        .bind(input.start_date.as_date())
        .bind(input.end_date.map(|d| d.as_date()))
        .fetch_one(pool)
        .await
        .map_err(persistence("create subscription"))
    }

    /// Find a subscription by id.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Subscription, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions WHERE id = $1");
        sqlx::query_as::<_, SubscriptionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(persistence("get subscription"))?
            .map(Subscription::from)
            .ok_or_else(|| not_found(id))
    }

    /// List every subscription, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Subscription>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions ORDER BY id");
        let rows = sqlx::query_as::<_, SubscriptionRow>(&query)
            .fetch_all(pool)
            .await
            .map_err(persistence("list subscriptions"))?;
        Ok(rows.into_iter().map(Subscription::from).collect())
    }

    /// Replace every mutable field of the row with `sub.id`.
    pub async fn update(pool: &PgPool, sub: &Subscription) -> Result<(), CoreError> {
        let result = sqlx::query(
            "UPDATE subscriptions SET \
                service_name = $2, \
                price = $3, \
                user_id = $4, \
                start_date = $5, \
                end_date = $6 \
             WHERE id = $1",
        )
        .bind(sub.id)
        .bind(&sub.service_name)
        .bind(sub.price)
        .bind(sub.user_id)
        .bind(sub.start_date.as_date())
        .bind(sub.end_date.map(|d| d.as_date()))
        .execute(pool)
        .await
        .map_err(persistence("update subscription"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(sub.id));
        }
        Ok(())
    }

    /// Permanently delete a subscription by id.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(persistence("delete subscription"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Sum `price` over rows whose `start_date` lies in `[start, end]`,
    /// narrowed by the optional user and service filters.
    ///
    /// Returns 0 when nothing matches, including when `start > end`.
    pub async fn sum_for_period(pool: &PgPool, query: &PeriodQuery) -> Result<i64, CoreError> {
        let filter = PeriodFilter::from_query(query);
        let statement = sqlx::query_scalar::<_, i64>(filter.sql())
            .bind(query.start.as_date())
            .bind(query.end.as_date());

        filter
            .bind(statement)
            .fetch_one(pool)
            .await
            .map_err(persistence("sum subscriptions for period"))
    }
}
