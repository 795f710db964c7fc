use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// Field-level validation failure reported back to the client.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Request-terminal error taxonomy. Every variant carries a fixed status and
/// the exact message the client sees; internal detail stays in the logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error")]
    Validation(Vec<FieldError>),

    #[error("No token provided, authorization denied")]
    MissingToken,

    #[error("Token is not valid")]
    InvalidToken,

    // Expired is a distinct signal so clients can prompt re-login instead of
    // rejecting the session outright.
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MissingToken
            | AppError::InvalidToken
            | AppError::TokenExpired
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::Conflict("Unique constraint violation".into());
            }
        }
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Internal(source) = &self {
            error!(error = ?source, "unhandled error");
        }
        let mut body = json!({
            "success": false,
            "message": self.to_string(),
        });
        if let AppError::Validation(errors) = &self {
            body["errors"] = serde_json::to_value(errors).unwrap_or_default();
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            AppError::Validation(vec![]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("nope".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::NotFound("News").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Conflict("dup".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn expired_is_distinguishable_from_invalid() {
        assert_ne!(
            AppError::TokenExpired.to_string(),
            AppError::InvalidToken.to_string()
        );
        assert_eq!(AppError::TokenExpired.to_string(), "Token has expired");
        assert_eq!(AppError::InvalidToken.to_string(), "Token is not valid");
    }

    #[test]
    fn not_found_names_the_resource() {
        assert_eq!(AppError::NotFound("Comment").to_string(), "Comment not found");
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        // sqlx database errors are hard to fabricate without a live pool, but
        // the non-database variants must all funnel to Internal.
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let err = AppError::Internal(anyhow::anyhow!("password for bob is hunter2"));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
