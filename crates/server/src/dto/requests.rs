//! # Join Request Data Transfer Objects
//!
//! Request and response types for the join-request endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to join a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct JoinProjectRequest {
    /// Optional message to the project creator
    #[validate(length(max = 2000, message = "Message must not exceed 2000 characters"))]
    pub message: Option<String>,
}

/// Response for a join request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequestResponse {
    /// Request's unique identifier
    pub id:         uuid::Uuid,
    /// Target project ID
    pub project_id: uuid::Uuid,
    /// Requesting user ID
    pub user_id:    uuid::Uuid,
    /// Message to the creator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message:    Option<String>,
    /// Request status
    pub status:     String,
    /// Creation timestamp
    pub created_at: String,
}

/// A request the calling user has sent, with project context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentRequestResponse {
    /// Request's unique identifier
    pub id:            uuid::Uuid,
    /// Request status
    pub status:        String,
    /// Creation timestamp
    pub created_at:    String,
    /// Target project ID
    pub project_id:    uuid::Uuid,
    /// Target project title
    pub project_title: String,
    /// Project creator's display name
    pub creator_name:  String,
}

/// A request received against one of the calling user's projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedRequestResponse {
    /// Request's unique identifier
    pub id:              uuid::Uuid,
    /// Request status
    pub status:          String,
    /// Creation timestamp
    pub created_at:      String,
    /// Message from the requester
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message:         Option<String>,
    /// Target project ID
    pub project_id:      uuid::Uuid,
    /// Target project title
    pub project_title:   String,
    /// Requesting user ID
    pub requester_id:    uuid::Uuid,
    /// Requesting user's display name
    pub requester_name:  String,
    /// Requesting user's email
    pub requester_email: String,
}

/// Response for a list of sent requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentRequestsResponse {
    /// Whether the operation was successful
    pub success:  bool,
    /// Requests, newest first
    pub requests: Vec<SentRequestResponse>,
}

/// Response for a list of received requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedRequestsResponse {
    /// Whether the operation was successful
    pub success:  bool,
    /// Requests, newest first
    pub requests: Vec<ReceivedRequestResponse>,
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn test_join_request_no_message_is_valid() {
        let req = JoinProjectRequest::default();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_join_request_message_too_long() {
        let req = JoinProjectRequest {
            message: Some("x".repeat(2001)),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_join_request_response_omits_empty_message() {
        let response = JoinRequestResponse {
            id:         uuid::Uuid::new_v4(),
            project_id: uuid::Uuid::new_v4(),
            user_id:    uuid::Uuid::new_v4(),
            message:    None,
            status:     "pending".to_string(),
            created_at: "2025-03-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("message"));
    }
}
