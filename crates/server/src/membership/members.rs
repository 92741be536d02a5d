//! # Membership Handlers
//!
//! Leaving a project, membership-status reads, and the `is_accepted_member`
//! predicate that gates every leaf collaborator (chat, files, tasks,
//! meetings).

use axum::Json;
use entity::{
    project_members::{Column as MemberColumn, Entity as ProjectMembersEntity},
    projects::{Column as ProjectColumn, Entity as ProjectsEntity},
    sea_orm_active_enums::{MemberRole, MemberStatus},
};
use error::{AppError, Result};
use sea_orm::{sea_query::Expr, ColumnTrait, DbConn, EntityTrait, ModelTrait, QueryFilter, TransactionTrait};
use tracing::{info, warn};

use crate::{
    dto::projects::{MembershipStatusResponse, ProjectResponse},
    membership::projects::project_model_to_response,
    middleware::auth::AuthenticatedUser,
    realtime::{ProjectEvent, EVENT_MEMBER_LEFT},
    AppState,
};

/// Leave a project
///
/// Only accepted members with role `member` may leave; the creator row is
/// permanent. The membership delete and the counter decrement commit
/// together.
pub async fn leave_project_handler(
    state: &AppState,
    user: AuthenticatedUser,
    project_id: uuid::Uuid,
) -> Result<Json<ProjectResponse>> {
    let project = ProjectsEntity::find_by_id(project_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;

    if project.creator_id == user.id {
        return Err(AppError::invalid_operation(
            "Creators cannot leave their own project",
        ));
    }

    let membership = ProjectMembersEntity::find()
        .filter(MemberColumn::ProjectId.eq(project_id))
        .filter(MemberColumn::UserId.eq(user.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("You are not a member of this project"))?;

    if membership.role == MemberRole::Creator {
        return Err(AppError::invalid_operation(
            "Creators cannot leave their own project",
        ));
    }

    if membership.status != MemberStatus::Accepted {
        return Err(AppError::not_found("You are not a member of this project"));
    }

    let now = chrono::Utc::now();
    let txn = state.db.begin().await?;

    // The row delete is the serialization point: a concurrent leave by the
    // same user affects zero rows and must not decrement the counter.
    let deleted = membership.delete(&txn).await?;
    if deleted.rows_affected == 0 {
        txn.rollback().await?;
        return Err(AppError::not_found("You are not a member of this project"));
    }

    // Floored decrement: the creator always counts, so the counter never
    // drops below 1 even if it has drifted.
    let decrement = ProjectsEntity::update_many()
        .col_expr(
            ProjectColumn::CurrentMembers,
            Expr::col(ProjectColumn::CurrentMembers).sub(1),
        )
        .col_expr(ProjectColumn::UpdatedAt, Expr::value(now))
        .filter(ProjectColumn::Id.eq(project_id))
        .filter(Expr::col(ProjectColumn::CurrentMembers).gt(1))
        .exec(&txn)
        .await?;

    if decrement.rows_affected == 0 {
        warn!(project_id = %project_id, "Member count already at floor while removing a member");
    }

    txn.commit().await?;

    info!(project_id = %project_id, user_id = %user.id, "Member left project");

    state.realtime.publish(
        project_id,
        ProjectEvent::new(EVENT_MEMBER_LEFT, project_id, user.id),
    );

    let updated = ProjectsEntity::find_by_id(project_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::internal("Project disappeared while leaving"))?;

    Ok(Json(project_model_to_response(&updated, None)))
}

/// Get the calling user's membership status on a project
///
/// Pure read; never fails for lack of a relation.
pub async fn membership_status_handler(
    state: &AppState,
    user: AuthenticatedUser,
    project_id: uuid::Uuid,
) -> Result<Json<MembershipStatusResponse>> {
    let project = ProjectsEntity::find_by_id(project_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;

    if project.creator_id == user.id {
        return Ok(Json(status_for(
            Some((MemberRole::Creator, MemberStatus::Accepted)),
        )));
    }

    let membership = ProjectMembersEntity::find()
        .filter(MemberColumn::ProjectId.eq(project_id))
        .filter(MemberColumn::UserId.eq(user.id))
        .one(&state.db)
        .await?;

    Ok(Json(status_for(
        membership.map(|m| (m.role, m.status)),
    )))
}

/// Map a membership row (or its absence) to the status DTO.
fn status_for(membership: Option<(MemberRole, MemberStatus)>) -> MembershipStatusResponse {
    match membership {
        Some((role, status)) => {
            let is_member = status == MemberStatus::Accepted;
            let can_leave = is_member && role != MemberRole::Creator;
            MembershipStatusResponse {
                is_member,
                role: Some(role.to_string()),
                status: Some(status.to_string()),
                can_leave,
            }
        },
        None => {
            MembershipStatusResponse {
                is_member: false,
                role:      None,
                status:    None,
                can_leave: false,
            }
        },
    }
}

/// Check whether a user is the creator or an accepted member of a project.
///
/// The sole authorization gate consumed by the leaf collaborators. Two
/// indexed lookups, the first of which is free given the loaded project row.
pub async fn is_accepted_member(db: &DbConn, project: &entity::projects::Model, user_id: uuid::Uuid) -> Result<bool> {
    if project.creator_id == user_id {
        return Ok(true);
    }

    let membership = ProjectMembersEntity::find()
        .filter(MemberColumn::ProjectId.eq(project.id))
        .filter(MemberColumn::UserId.eq(user_id))
        .filter(MemberColumn::Status.eq(MemberStatus::Accepted))
        .one(db)
        .await?;

    Ok(membership.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_creator() {
        let status = status_for(Some((MemberRole::Creator, MemberStatus::Accepted)));
        assert!(status.is_member);
        assert_eq!(status.role, Some("creator".to_string()));
        assert_eq!(status.status, Some("accepted".to_string()));
        assert!(!status.can_leave);
    }

    #[test]
    fn test_status_for_accepted_member() {
        let status = status_for(Some((MemberRole::Member, MemberStatus::Accepted)));
        assert!(status.is_member);
        assert!(status.can_leave);
    }

    #[test]
    fn test_status_for_pending_member() {
        let status = status_for(Some((MemberRole::Member, MemberStatus::Pending)));
        assert!(!status.is_member);
        assert!(!status.can_leave);
        assert_eq!(status.status, Some("pending".to_string()));
    }

    #[test]
    fn test_status_for_no_relation() {
        let status = status_for(None);
        assert!(!status.is_member);
        assert!(status.role.is_none());
        assert!(status.status.is_none());
        assert!(!status.can_leave);
    }
}
