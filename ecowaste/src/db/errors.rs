use thiserror::Error;

/// Unified error type for store operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// Unique constraint violation
    #[error("Unique constraint violation")]
    UniqueViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
        /// The conflicting value that caused the violation (if known)
        conflicting_value: Option<String>,
    },

    /// A running total would leave the representable range
    #[error("Credit total overflowed")]
    CreditOverflow,

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DbError {
    pub fn unique_violation(table: &str, constraint: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        DbError::UniqueViolation {
            constraint: Some(constraint.to_string()),
            table: Some(table.to_string()),
            message: format!("{table}.{constraint} already contains '{value}'"),
            conflicting_value: Some(value),
        }
    }
}

/// Type alias for store operation results
pub type Result<T> = std::result::Result<T, DbError>;
