//! # Data Transfer Objects
//!
//! Request and response types for the Synapse API.

pub mod projects;
pub mod requests;

use serde::{Deserialize, Serialize};

/// Generic success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl SuccessResponse {
    /// Create a success response with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = SuccessResponse::new("Request cancelled");
        assert!(response.success);
        assert_eq!(response.message, "Request cancelled");
    }
}
