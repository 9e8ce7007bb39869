use crate::classifier::ClassifierError;
use crate::db::errors::DbError;
use crate::waste::{CreditError, FlowError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use utoipa::ToSchema;

/// Shown whenever detection fails, whatever the cause.
pub const DETECTION_FAILED_MESSAGE: &str = "Failed to detect waste. Please try again.";

#[derive(ThisError, Debug)]
pub enum Error {
    /// Authentication required but not provided, or credentials rejected
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// Invalid request data or business rule violation
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Resource already exists
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The classifier failed or timed out; the client may retry
    #[error("Detection failed: {source}")]
    ClassifierUnavailable {
        #[source]
        source: ClassifierError,
    },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Store operation error
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    pub error: String,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            // Duplicate signups are reported as plain bad requests.
            Error::Conflict { .. } => StatusCode::BAD_REQUEST,
            Error::ClassifierUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } | DbError::CreditOverflow => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthenticated { message } => message.clone().unwrap_or_else(|| "Authentication required".to_string()),
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, id } => format!("{resource} with ID {id} not found"),
            Error::Conflict { message } => message.clone(),
            Error::ClassifierUnavailable { .. } => DETECTION_FAILED_MESSAGE.to_string(),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { .. } => "Resource already exists".to_string(),
                DbError::CreditOverflow => CreditError::CreditOverflow.to_string(),
                DbError::Other(_) => "Database error occurred".to_string(),
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) | Error::Conflict { .. } => {
                tracing::warn!("Conflict error: {}", self);
            }
            Error::ClassifierUnavailable { .. } => {
                tracing::warn!("Classifier error: {}", self);
            }
            Error::Unauthenticated { .. } => {
                tracing::info!("Authentication error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let body = ErrorResponse {
            success: false,
            error: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<CreditError> for Error {
    fn from(err: CreditError) -> Self {
        Error::BadRequest { message: err.to_string() }
    }
}

impl From<ClassifierError> for Error {
    fn from(source: ClassifierError) -> Self {
        Error::ClassifierUnavailable { source }
    }
}

impl From<FlowError> for Error {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::NoPredictions => Error::ClassifierUnavailable {
                source: ClassifierError::NoPredictions,
            },
            FlowError::InvalidTransition { .. } => Error::Internal {
                operation: err.to_string(),
            },
            FlowError::EmptyImage | FlowError::MissingField(_) | FlowError::Credit(_) => {
                Error::BadRequest { message: err.to_string() }
            }
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waste::WasteCategory;
    use std::time::Duration;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Conflict { message: "x".into() }.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::from(ClassifierError::Timeout(Duration::from_secs(1))).status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            Error::from(DbError::unique_violation("users", "users_email_key", "a@b.c")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::Database(DbError::NotFound).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Database(DbError::CreditOverflow).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::Database(DbError::Other(anyhow::anyhow!("disk full"))).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let err = Error::from(ClassifierError::Unavailable("socket closed".into()));
        assert_eq!(err.user_message(), DETECTION_FAILED_MESSAGE);

        let err = Error::Database(DbError::Other(anyhow::anyhow!("lock poisoned")));
        assert_eq!(err.user_message(), "Database error occurred");

        let err = Error::Internal {
            operation: "open session store".into(),
        };
        assert_eq!(err.user_message(), "Internal server error");

        let err = Error::from(DbError::unique_violation("users", "users_email_key", "a@b.c"));
        assert_eq!(err.user_message(), "Resource already exists");

        let err = Error::Database(DbError::CreditOverflow);
        assert_eq!(err.user_message(), "Credit total exceeds the supported maximum");
    }

    #[test]
    fn test_flow_errors_map_to_client_errors() {
        let err = Error::from(FlowError::MissingField("Waste name"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "Waste name is required");

        let err = Error::from(FlowError::Credit(CreditError::InvalidQuantity {
            category: WasteCategory::Plastic,
        }));
        assert_eq!(err.user_message(), "Quantity must be greater than 0 kg for plastic waste");

        assert_eq!(Error::from(FlowError::NoPredictions).status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
