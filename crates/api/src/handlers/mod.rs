//! Request handlers.
//!
//! Handlers validate input through `subtrack_core`, delegate to the
//! repositories in `subtrack_db`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod subscription;
