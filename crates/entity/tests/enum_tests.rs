//! Simple enum tests for entity crate
//! These tests avoid complex sea-orm async patterns that require a database

use entity::sea_orm_active_enums::{MemberRole, MemberStatus, ProjectStatus, ProjectVisibility, RequestStatus};

/// Test ProjectStatus enum values
#[test]
fn test_project_status_values() {
    assert_eq!(format!("{}", ProjectStatus::Open), "open");
    assert_eq!(format!("{}", ProjectStatus::InProgress), "in_progress");
    assert_eq!(format!("{}", ProjectStatus::Completed), "completed");
    assert_eq!(format!("{}", ProjectStatus::Archived), "archived");
}

/// Test ProjectVisibility enum values
#[test]
fn test_project_visibility_values() {
    assert_eq!(format!("{}", ProjectVisibility::Public), "public");
    assert_eq!(format!("{}", ProjectVisibility::Private), "private");
    assert_eq!(format!("{}", ProjectVisibility::Teaser), "teaser");
}

/// Test MemberRole enum values
#[test]
fn test_member_role_values() {
    assert_eq!(format!("{}", MemberRole::Creator), "creator");
    assert_eq!(format!("{}", MemberRole::Member), "member");
}

/// Test MemberStatus enum values
#[test]
fn test_member_status_values() {
    assert_eq!(format!("{}", MemberStatus::Pending), "pending");
    assert_eq!(format!("{}", MemberStatus::Accepted), "accepted");
    assert_eq!(format!("{}", MemberStatus::Rejected), "rejected");
}

/// Test RequestStatus enum values
#[test]
fn test_request_status_values() {
    assert_eq!(format!("{}", RequestStatus::Pending), "pending");
    assert_eq!(format!("{}", RequestStatus::Accepted), "accepted");
    assert_eq!(format!("{}", RequestStatus::Rejected), "rejected");
}

/// Test enum equality
#[test]
fn test_enum_equality() {
    assert_eq!(MemberRole::Creator, MemberRole::Creator);
    assert_ne!(MemberRole::Creator, MemberRole::Member);
    assert_eq!(RequestStatus::Pending, RequestStatus::Pending);
    assert_ne!(RequestStatus::Pending, RequestStatus::Rejected);
    assert_ne!(ProjectStatus::Open, ProjectStatus::Archived);
}

/// Test enum Clone
#[test]
fn test_enum_clone() {
    assert_eq!(ProjectStatus::Open.clone(), ProjectStatus::Open);
    assert_eq!(MemberRole::Creator.clone(), MemberRole::Creator);
    assert_eq!(RequestStatus::Accepted.clone(), RequestStatus::Accepted);
}

/// Test serde wire names match the database string values
#[test]
fn test_enum_serde_names() {
    assert_eq!(
        serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
        "\"in_progress\""
    );
    assert_eq!(
        serde_json::to_string(&MemberStatus::Accepted).unwrap(),
        "\"accepted\""
    );
    let parsed: RequestStatus = serde_json::from_str("\"rejected\"").unwrap();
    assert_eq!(parsed, RequestStatus::Rejected);
}

/// Test enum Debug
#[test]
fn test_enum_debug() {
    let debug = format!("{:?}", ProjectStatus::Open);
    assert!(debug.contains("Open"));

    let debug = format!("{:?}", MemberRole::Creator);
    assert!(debug.contains("Creator"));

    let debug = format!("{:?}", RequestStatus::Pending);
    assert!(debug.contains("Pending"));
}
