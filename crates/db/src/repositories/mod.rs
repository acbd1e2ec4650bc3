//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. A pooled connection is held only
//! for the duration of a single statement.

pub mod period_filter;
pub mod subscription_repo;

pub use period_filter::PeriodFilter;
pub use subscription_repo::SubscriptionRepo;
