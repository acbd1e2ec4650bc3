use crate::types::DbId;

/// Domain error shared by the validation and persistence layers.
///
/// Every failure a request can hit is one of these three kinds; the HTTP
/// layer maps each variant to a status code without looking at messages.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A field failed validation. Only the first failing field is reported.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The backing store failed. The message is for logs, not for callers.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl CoreError {
    /// Shorthand for building a [`CoreError::Validation`].
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
