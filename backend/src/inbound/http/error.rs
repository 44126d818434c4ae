//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{DomainError, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &DomainError) -> DomainError {
    if matches!(error.code(), ErrorCode::InternalError) {
        DomainError::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for DomainError {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        DomainError::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
    #[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
    #[case(ErrorCode::Conflict, StatusCode::CONFLICT)]
    #[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_codes_to_statuses(#[case] code: ErrorCode, #[case] status: StatusCode) {
        let error = DomainError::new(code, "boom");
        assert_eq!(error.status_code(), status);
    }

    #[rstest]
    fn internal_errors_are_redacted() {
        let error =
            DomainError::internal("connection string leaked").with_details(json!({"dsn": "x"}));
        let redacted = redact_if_internal(&error);
        assert_eq!(redacted.message(), "Internal server error");
        assert!(redacted.details().is_none());
    }

    #[rstest]
    fn client_errors_pass_through_untouched() {
        let error = DomainError::conflict("reservation changed")
            .with_details(json!({"code": "version_conflict"}));
        let passed = redact_if_internal(&error);
        assert_eq!(passed, error);
    }
}
