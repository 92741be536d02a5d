//! # API Response Types
//!
//! Generic API response types for the Synapse application.
//! Provides a consistent response format for all API endpoints.
//!
//! ## Response Format
//!
//! ```json
//! {
//!   "status": "success",
//!   "data": { ... }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PaginationMeta {
    /// Current page number (1-indexed).
    pub page: u64,

    /// Number of items per page.
    pub per_page: u64,

    /// Total number of items.
    pub total_items: u64,

    /// Total number of pages.
    pub total_pages: u64,

    /// Has next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,

    /// Has previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,
}

impl PaginationMeta {
    /// Maximum allowed page number to prevent integer overflow and excessive offsets
    const MAX_PAGE: u64 = 1_000_000;

    /// Create a new pagination meta with overflow protection.
    ///
    /// # Arguments
    ///
    /// * `page` - Page number (1-based), clamped to `[1, MAX_PAGE]`
    /// * `per_page` - Items per page
    /// * `total_items` - Total number of items
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let page = page.clamp(1, Self::MAX_PAGE);
        let total_pages = if per_page == 0 {
            0
        }
        else {
            total_items.div_ceil(per_page)
        };
        Self {
            page,
            per_page,
            total_items,
            total_pages,
            has_next: Some(page < total_pages),
            has_prev: Some(page > 1),
        }
    }

    /// Calculate offset for database queries with overflow protection.
    ///
    /// Returns `None` if the offset calculation would overflow.
    pub fn offset(&self) -> Option<u64> { self.page.checked_sub(1)?.checked_mul(self.per_page) }

    /// Calculate limit.
    pub fn limit(&self) -> u64 { self.per_page }
}

/// API response type.
///
/// The generic envelope used for all API responses: a success flag plus
/// either the data payload or an error code and message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ApiResponse<T> {
    /// Success response.
    Success {
        /// Response data.
        data: T,
    },

    /// Error response.
    Error {
        /// Error code.
        code: String,

        /// Error message.
        message: String,

        /// Error details.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<serde_json::Value>,
    },
}

impl<T> ApiResponse<T> {
    /// Create a success response with data.
    #[inline]
    pub fn ok(data: T) -> Self {
        ApiResponse::Success {
            data,
        }
    }

    /// Create an error response.
    #[inline]
    pub fn error(code: impl ToString, message: impl ToString) -> Self {
        ApiResponse::Error {
            code:    code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create an error response with details.
    #[inline]
    pub fn error_with_details(code: impl ToString, message: impl ToString, details: serde_json::Value) -> Self {
        ApiResponse::Error {
            code:    code.to_string(),
            message: message.to_string(),
            details: Some(details),
        }
    }

    /// Get a reference to the data if this is a success response.
    #[inline]
    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success {
                data,
            } => Some(data),
            ApiResponse::Error {
                ..
            } => None,
        }
    }

    /// Check if this is a success response.
    #[inline]
    pub fn is_success(&self) -> bool { matches!(self, ApiResponse::Success { .. }) }

    /// Check if this is an error response.
    #[inline]
    pub fn is_error(&self) -> bool { matches!(self, ApiResponse::Error { .. }) }

    /// Convert to a Result type.
    #[inline]
    pub fn into_result(self) -> Result<T, (String, String)> {
        match self {
            ApiResponse::Success {
                data,
            } => Ok(data),
            ApiResponse::Error {
                code,
                message,
                ..
            } => Err((code, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_ok() {
        let response = ApiResponse::ok("test data");
        match response {
            ApiResponse::Success {
                data,
            } => assert_eq!(data, "test data"),
            _ => panic!("Expected success response"),
        }
    }

    #[test]
    fn test_response_error() {
        let response: ApiResponse<()> = ApiResponse::error("NOT_FOUND", "Resource not found");
        match response {
            ApiResponse::Error {
                code,
                message,
                details,
            } => {
                assert_eq!(code, "NOT_FOUND");
                assert_eq!(message, "Resource not found");
                assert!(details.is_none());
            },
            _ => panic!("Expected error response"),
        }
    }

    #[test]
    fn test_response_error_with_details() {
        let details = serde_json::json!({"field": "error"});
        let response: ApiResponse<()> = ApiResponse::error_with_details("VALIDATION", "Failed", details.clone());

        match response {
            ApiResponse::Error {
                details: resp_details,
                ..
            } => assert_eq!(resp_details, Some(details)),
            _ => panic!("Expected error"),
        }
    }

    #[test]
    fn test_response_serialization() {
        let response = ApiResponse::ok("test");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"data\":\"test\""));
    }

    #[test]
    fn test_response_error_serialization() {
        let response: ApiResponse<()> = ApiResponse::error("NOT_FOUND", "Not found");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"error\""));
        assert!(json.contains("\"code\":\"NOT_FOUND\""));
        assert!(json.contains("\"message\":\"Not found\""));
    }

    #[test]
    fn test_is_success_and_is_error() {
        let response_ok = ApiResponse::ok("data");
        let response_err: ApiResponse<()> = ApiResponse::error("CODE", "msg");

        assert!(response_ok.is_success());
        assert!(!response_ok.is_error());
        assert!(response_err.is_error());
        assert!(response_err.data().is_none());
    }

    #[test]
    fn test_into_result() {
        let response_ok: ApiResponse<&str> = ApiResponse::ok("data");
        assert_eq!(response_ok.into_result(), Ok("data"));

        let response_err: ApiResponse<String> = ApiResponse::error("CODE", "msg");
        assert_eq!(
            response_err.into_result(),
            Err(("CODE".to_string(), "msg".to_string()))
        );
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 10, 100);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.per_page, 10);
        assert_eq!(meta.total_items, 100);
        assert_eq!(meta.total_pages, 10);
        assert_eq!(meta.has_next, Some(true));
        assert_eq!(meta.has_prev, Some(false));
    }

    #[test]
    fn test_pagination_offset() {
        let meta = PaginationMeta::new(3, 10, 100);
        assert_eq!(meta.offset(), Some(20));
        assert_eq!(meta.limit(), 10);
    }

    #[test]
    fn test_pagination_edge_cases() {
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.offset(), Some(0));
        assert!(!meta.has_next.unwrap());

        let meta = PaginationMeta::new(10, 10, 100);
        assert_eq!(meta.offset(), Some(90));
        assert!(!meta.has_next.unwrap());
        assert!(meta.has_prev.unwrap());
    }

    #[test]
    fn test_pagination_page_zero_clamped() {
        let meta = PaginationMeta::new(0, 10, 100);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.offset(), Some(0));
    }

    #[test]
    fn test_pagination_page_exceeds_max() {
        let meta = PaginationMeta::new(u64::MAX, 10, 1000);
        assert_eq!(meta.page, 1_000_000);
        assert!(meta.offset().is_some());
    }

    #[test]
    fn test_pagination_per_page_zero() {
        let meta = PaginationMeta::new(1, 0, 100);
        assert_eq!(meta.total_pages, 0);
    }
}
