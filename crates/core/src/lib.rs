//! Domain types for the subscription ledger.
//!
//! Holds the month-year date convention, the subscription entity with its
//! validators, and the error taxonomy shared by the db and api crates.

pub mod error;
pub mod month_date;
pub mod subscription;
pub mod types;
