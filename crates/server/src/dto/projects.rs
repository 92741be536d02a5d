//! # Project Data Transfer Objects
//!
//! Request and response types for project endpoints.

use error::PaginationMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project title
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    /// Project description
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Description must be between 1 and 5000 characters"
    ))]
    pub description: String,

    /// Skills the project is recruiting for
    #[validate(length(min = 1, message = "At least one required skill must be given"))]
    pub required_skills: Vec<String>,

    /// Maximum number of members including the creator (default: 5)
    #[validate(range(min = 1, message = "Max members must be at least 1"))]
    pub max_members: Option<i32>,

    /// Project visibility (default: public)
    pub visibility: Option<entity::sea_orm_active_enums::ProjectVisibility>,
}

/// Response for a single project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResponse {
    /// Project's unique identifier
    pub id:              uuid::Uuid,
    /// Project title
    pub title:           String,
    /// Project description
    pub description:     String,
    /// Creator user ID
    pub creator_id:      uuid::Uuid,
    /// Skills the project is recruiting for
    pub required_skills: Vec<String>,
    /// Lifecycle status
    pub status:          String,
    /// Visibility
    pub visibility:      String,
    /// Maximum member count including the creator
    pub max_members:     i32,
    /// Current member count including the creator
    pub current_members: i32,
    /// Calling user's relation to the project (joined, pending, rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_status:  Option<String>,
    /// Creation timestamp
    pub created_at:      String,
    /// Last update timestamp
    pub updated_at:      String,
}

/// Response for project list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectListResponse {
    /// Whether the operation was successful
    pub success:    bool,
    /// List of projects
    pub projects:   Vec<ProjectResponse>,
    /// Pagination info
    pub pagination: PaginationMeta,
}

/// Response for a member on a project roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMemberResponse {
    /// User ID
    pub user_id:   uuid::Uuid,
    /// User's display name
    pub name:      String,
    /// User's email
    pub email:     String,
    /// Role on the project
    pub role:      String,
    /// Membership status
    pub status:    String,
    /// When the user joined the project
    pub joined_at: String,
}

/// Response for project detail including the member roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetailResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// The project
    pub project: ProjectResponse,
    /// Accepted members, creator first
    pub members: Vec<ProjectMemberResponse>,
}

/// Response for the calling user's membership status on a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipStatusResponse {
    /// Whether the user is an accepted member (creator included)
    pub is_member: bool,
    /// Role, when a membership row exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role:      Option<String>,
    /// Membership status, when a membership row exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status:    Option<String>,
    /// Whether the user may leave the project
    pub can_leave: bool,
}

/// Query parameters for project list
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListQuery {
    /// Page number (1-based, default: 1)
    pub page:     Option<u64>,
    /// Items per page (default: 20, max: 100)
    pub per_page: Option<u64>,
    /// Search term for title/description/skills
    pub search:   Option<String>,
}

impl ProjectListQuery {
    /// Get page number (1-based, default: 1)
    pub fn page(&self) -> u64 { self.page.unwrap_or(1).max(1) }

    /// Get items per page (default: 20, max: 100)
    pub fn per_page(&self) -> u64 { self.per_page.unwrap_or(20).clamp(1, 100) }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    fn valid_request() -> CreateProjectRequest {
        CreateProjectRequest {
            title:           "Compiler study group".to_string(),
            description:     "Build a toy compiler together".to_string(),
            required_skills: vec!["rust".to_string()],
            max_members:     Some(4),
            visibility:      None,
        }
    }

    #[test]
    fn test_create_project_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_create_project_request_empty_title() {
        let mut req = valid_request();
        req.title = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_project_request_empty_description() {
        let mut req = valid_request();
        req.description = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_project_request_no_skills() {
        let mut req = valid_request();
        req.required_skills = vec![];
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_project_request_zero_max_members() {
        let mut req = valid_request();
        req.max_members = Some(0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_project_request_default_max_members() {
        let mut req = valid_request();
        req.max_members = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_project_list_query_defaults() {
        let q = ProjectListQuery {
            page:     None,
            per_page: None,
            search:   None,
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(), 20);
    }

    #[test]
    fn test_project_list_query_clamp() {
        let q = ProjectListQuery {
            page:     Some(0),
            per_page: Some(1000),
            search:   None,
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(), 100);
    }
}
