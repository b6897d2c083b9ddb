// HTTP API Error Types
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::database::{DatabaseError, EntityError};
use crate::schema::ValidationErrors;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError {
        message: String,
        field_errors: Option<BTreeMap<String, Vec<String>>>,
    },
    InvalidJson(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        });

        if let ApiError::ValidationError { field_errors: Some(field_errors), .. } = self {
            response["field_errors"] = json!(field_errors);
        }

        response
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation_error(
        message: impl Into<String>,
        field_errors: Option<BTreeMap<String, Vec<String>>>,
    ) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::validation_error("Request body failed validation", Some(errors.into_inner()))
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Constraint { kind, constraint } => {
                tracing::warn!(
                    "Constraint violation: {:?} on {}",
                    kind,
                    constraint.as_deref().unwrap_or("unnamed constraint")
                );
                let message = match constraint {
                    Some(name) => format!("Request conflicts with existing data: {} ({})", kind.describe(), name),
                    None => format!("Request conflicts with existing data: {}", kind.describe()),
                };
                ApiError::conflict(message)
            }
            DatabaseError::Unavailable(msg) => {
                tracing::error!("Database unavailable: {}", msg);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::ConfigMissing(_) | DatabaseError::InvalidDatabaseUrl => {
                tracing::error!("Database misconfigured: {}", err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<EntityError> for ApiError {
    fn from(err: EntityError) -> Self {
        tracing::error!("Failed to prepare record: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_json(rejection.body_text())
    }
}

// Ids are integers, so any other path segment names nothing that exists
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameters: {}", rejection.body_text());
        ApiError::not_found("Resource not found")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ConstraintKind;
    use crate::schema::MSG_MISSING;

    #[test]
    fn validation_errors_become_400_with_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("email", MSG_MISSING);

        let err = ApiError::from(errors);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_json(),
            json!({
                "error": true,
                "message": "Request body failed validation",
                "code": "VALIDATION_ERROR",
                "field_errors": {"email": [MSG_MISSING]}
            })
        );
    }

    #[test]
    fn database_errors_map_to_statuses() {
        let cases = [
            (DatabaseError::NotFound("Order 1 not found".into()), StatusCode::NOT_FOUND),
            (
                DatabaseError::Constraint { kind: ConstraintKind::Unique, constraint: Some("products_pkey".into()) },
                StatusCode::CONFLICT,
            ),
            (DatabaseError::Unavailable("pool timed out".into()), StatusCode::SERVICE_UNAVAILABLE),
            (DatabaseError::QueryError("bad column".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DatabaseError::Sqlx(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (db_err, status) in cases {
            assert_eq!(ApiError::from(db_err).status_code(), status);
        }
    }

    #[test]
    fn not_found_keeps_message() {
        let err = ApiError::from(DatabaseError::NotFound("Customer 7 not found".into()));
        assert_eq!(err.message(), "Customer 7 not found");
        assert_eq!(err.to_json()["code"], "NOT_FOUND");
        assert!(err.to_json().get("field_errors").is_none());
    }

    #[test]
    fn conflict_names_constraint() {
        let err = ApiError::from(DatabaseError::Constraint {
            kind: ConstraintKind::ForeignKey,
            constraint: Some("orders_customer_id_fkey".into()),
        });
        assert!(err.message().contains("orders_customer_id_fkey"));
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::from(DatabaseError::QueryError("SELECT secret FROM x".into()));
        assert!(!err.message().contains("secret"));
    }
}
