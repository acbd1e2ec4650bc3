//! Optional filters of the period-total query.
//!
//! Each combination of filters has its own fixed SQL text. Filter values are
//! only ever bound as parameters (`$3`, `$4`), never spliced into the query.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryScalar;
use subtrack_core::subscription::PeriodQuery;
use uuid::Uuid;

const SUM_ALL: &str = "SELECT COALESCE(SUM(price), 0)::BIGINT FROM subscriptions \
     WHERE start_date BETWEEN $1 AND $2";

const SUM_BY_USER: &str = "SELECT COALESCE(SUM(price), 0)::BIGINT FROM subscriptions \
     WHERE start_date BETWEEN $1 AND $2 AND user_id = $3";

const SUM_BY_SERVICE: &str = "SELECT COALESCE(SUM(price), 0)::BIGINT FROM subscriptions \
     WHERE start_date BETWEEN $1 AND $2 AND service_name = $3";

const SUM_BY_USER_AND_SERVICE: &str = "SELECT COALESCE(SUM(price), 0)::BIGINT FROM subscriptions \
     WHERE start_date BETWEEN $1 AND $2 AND user_id = $3 AND service_name = $4";

/// Which exact-match filters apply on top of the date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFilter<'a> {
    None,
    User(Uuid),
    Service(&'a str),
    UserAndService(Uuid, &'a str),
}

impl<'a> PeriodFilter<'a> {
    pub fn from_query(query: &'a PeriodQuery) -> Self {
        match (query.user_id, query.service_name.as_deref()) {
            (None, None) => PeriodFilter::None,
            (Some(user_id), None) => PeriodFilter::User(user_id),
            (None, Some(service)) => PeriodFilter::Service(service),
            (Some(user_id), Some(service)) => PeriodFilter::UserAndService(user_id, service),
        }
    }

    /// The SQL text for this combination. `$1` and `$2` are the range bounds.
    pub fn sql(&self) -> &'static str {
        match self {
            PeriodFilter::None => SUM_ALL,
            PeriodFilter::User(_) => SUM_BY_USER,
            PeriodFilter::Service(_) => SUM_BY_SERVICE,
            PeriodFilter::UserAndService(..) => SUM_BY_USER_AND_SERVICE,
        }
    }

    /// Bind the filter values after the two range bounds.
    pub fn bind<'q>(
        &self,
        query: QueryScalar<'q, Postgres, i64, PgArguments>,
    ) -> QueryScalar<'q, Postgres, i64, PgArguments>
    where
        'a: 'q,
    {
        match *self {
            PeriodFilter::None => query,
            PeriodFilter::User(user_id) => query.bind(user_id),
            PeriodFilter::Service(service) => query.bind(service),
            PeriodFilter::UserAndService(user_id, service) => query.bind(user_id).bind(service),
        }
    }
}
