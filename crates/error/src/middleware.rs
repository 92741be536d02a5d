//! # Error Response Conversion
//!
//! Converts [`AppError`] values into axum HTTP responses.
//!
//! ## Usage
//!
//! ```rust
//! use error::{middleware::ErrorHandler, AppError};
//!
//! let handler = ErrorHandler::new(true);
//! let error = AppError::not_found("Project not found");
//! let response = handler.to_response(&error);
//! ```

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{response::ApiResponse, AppError};

/// Error handler that converts errors to HTTP responses.
#[derive(Clone)]
pub struct ErrorHandler {
    /// Whether to include error details in the response body.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Convert an error to a response.
    ///
    /// Business errors always surface their message; infrastructure errors
    /// only do so when `include_details` is set.
    pub fn to_response(&self, err: &AppError) -> Response {
        let status = err.status();
        let code = err.code();
        let message = if self.include_details || err.is_business() {
            err.message()
        }
        else {
            match status {
                StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
                _ => "An error occurred".to_string(),
            }
        };

        let body = ApiResponse::<()>::error(code, message);

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(
                serde_json::to_string(&body).unwrap_or_default(),
            ))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if !self.is_business() {
            tracing::error!(error = %self, "Request failed with infrastructure error");
        }
        ErrorHandler::new(false).to_response(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_handler_not_found() {
        let handler = ErrorHandler::new(false);
        let err = AppError::not_found("Project not found");
        let response = handler.to_response(&err);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_handler_capacity_exceeded() {
        let handler = ErrorHandler::new(false);
        let err = AppError::capacity_exceeded("Project is full");
        let response = handler.to_response(&err);

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_handler_hides_infrastructure_details() {
        let handler = ErrorHandler::new(false);
        let err = AppError::database("password=hunter2 connection refused");
        let response = handler.to_response(&err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_handler_with_details() {
        let handler = ErrorHandler::new(true);
        let err = AppError::internal("Detailed error message");
        let response = handler.to_response(&err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response() {
        let err = AppError::forbidden("Only the project creator may do this");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
