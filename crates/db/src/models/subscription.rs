//! Row mapping for the `subscriptions` table.

use chrono::NaiveDate;
use sqlx::FromRow;
use subtrack_core::subscription::Subscription;
use subtrack_core::types::DbId;
use uuid::Uuid;

/// A row from the `subscriptions` table, with dates as stored.
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionRow {
    pub id: DbId,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Subscription {
            id: row.id,
            service_name: row.service_name,
            price: row.price,
            user_id: row.user_id,
            start_date: row.start_date.into(),
            end_date: row.end_date.map(Into::into),
        }
    }
}
