use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::services::{StatsError, StatusChangeError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: &'static str,
    message: String,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".into(),
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            tracing::error!("Internal error: {}", msg);
        }

        let (status, error, message) = self.parts();
        let body = ErrorBody {
            success: false,
            error,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => ApiError::Conflict("Resource already exists".into()),
                Some("23503") => ApiError::NotFound("Referenced resource not found".into()),
                _ => ApiError::Internal(format!("Database error: {}", db_err)),
            },
            sqlx::Error::PoolTimedOut => {
                ApiError::ServiceUnavailable("Database is temporarily unavailable".into())
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();

        let message = match messages.as_slice() {
            [single] => single.clone(),
            _ => format!("{} validation errors", messages.len()),
        };

        ApiError::Validation(message)
    }
}

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Validation(_) => ApiError::Validation(err.to_string()),
            StatsError::UpstreamFetch { .. } | StatsError::UpstreamTimeout(_) => {
                ApiError::ServiceUnavailable(err.to_string())
            }
            StatsError::InvariantViolation(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<StatusChangeError> for ApiError {
    fn from(err: StatusChangeError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (ApiError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::ServiceUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let (_, code, message) = ApiError::Internal("password=hunter2".into()).parts();
        assert_eq!(code, "internal_error");
        assert_eq!(message, "An internal error occurred");
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::NotFound("Officer not found".into()).to_string(),
            "Not found: Officer not found"
        );
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, ApiError::NotFound(msg) if msg == "Resource not found"));
    }

    #[test]
    fn test_from_sqlx_pool_timeout() {
        let error: ApiError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(error, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn test_stats_errors_map_to_statuses() {
        let error: ApiError = StatsError::Validation("start_date is after end_date".into()).into();
        assert!(matches!(
            error,
            ApiError::Validation(ref msg) if msg == "Invalid date range: start_date is after end_date"
        ));

        let error: ApiError = StatsError::fetch("patrol scans", "connection reset").into();
        assert_eq!(error.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let error: ApiError = StatsError::UpstreamTimeout("patrol anomalies").into();
        assert_eq!(error.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let error: ApiError = StatsError::InvariantViolation("patrol scan has no officer".into()).into();
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_change_error_is_validation() {
        let error: ApiError = StatusChangeError::MissingReason.into();
        assert!(matches!(error, ApiError::Validation(ref msg) if msg == "Suspension reason is required"));
    }

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 1, message = "Count must be positive"))]
        count: i64,
    }

    #[test]
    fn test_single_validation_error_keeps_message() {
        let probe = Probe {
            name: String::new(),
            count: 3,
        };
        let error: ApiError = probe.validate().unwrap_err().into();
        assert!(matches!(error, ApiError::Validation(ref msg) if msg == "Name is required"));
    }

    #[test]
    fn test_multiple_validation_errors_are_counted() {
        let probe = Probe {
            name: String::new(),
            count: 0,
        };
        let error: ApiError = probe.validate().unwrap_err().into();
        assert!(matches!(error, ApiError::Validation(ref msg) if msg == "2 validation errors"));
    }
}
