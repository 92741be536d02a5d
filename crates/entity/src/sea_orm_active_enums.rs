//! Active enum definitions shared across entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project lifecycle status enumeration
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_status")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Accepting new join requests
    #[sea_orm(string_value = "open")]
    Open,
    /// Work has started, no longer recruiting
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Project work is finished
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Hidden from discovery
    #[sea_orm(string_value = "archived")]
    Archived,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Open => write!(f, "open"),
            ProjectStatus::InProgress => write!(f, "in_progress"),
            ProjectStatus::Completed => write!(f, "completed"),
            ProjectStatus::Archived => write!(f, "archived"),
        }
    }
}

/// Project visibility enumeration
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_visibility")]
#[serde(rename_all = "snake_case")]
pub enum ProjectVisibility {
    /// Discoverable by everyone
    #[sea_orm(string_value = "public")]
    Public,
    /// Visible to members only
    #[sea_orm(string_value = "private")]
    Private,
    /// Title and description discoverable, details hidden
    #[sea_orm(string_value = "teaser")]
    Teaser,
}

impl std::fmt::Display for ProjectVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectVisibility::Public => write!(f, "public"),
            ProjectVisibility::Private => write!(f, "private"),
            ProjectVisibility::Teaser => write!(f, "teaser"),
        }
    }
}

/// Project member role enumeration
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "member_role")]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Created the project; exactly one per project, cannot leave
    #[sea_orm(string_value = "creator")]
    Creator,
    /// Joined through an accepted request
    #[sea_orm(string_value = "member")]
    Member,
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberRole::Creator => write!(f, "creator"),
            MemberRole::Member => write!(f, "member"),
        }
    }
}

/// Project membership status enumeration
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "member_status")]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberStatus::Pending => write!(f, "pending"),
            MemberStatus::Accepted => write!(f, "accepted"),
            MemberStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Join request status enumeration
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "request_status")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting the creator's decision
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Terminal: the requester became a member
    #[sea_orm(string_value = "accepted")]
    Accepted,
    /// Terminal: the requester may file a new request
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Accepted => write!(f, "accepted"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}
