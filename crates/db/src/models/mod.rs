//! Row types read from the database.
//!
//! Each submodule holds a `FromRow` struct matching the table columns and
//! its conversion into the domain entity from `subtrack_core`.

pub mod subscription;
