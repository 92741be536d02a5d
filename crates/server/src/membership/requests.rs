//! # Join Request Handlers
//!
//! HTTP request handlers for the join-request lifecycle: submission,
//! accept/reject by the project creator, cancellation, and the sent/received
//! inboxes.
//!
//! `apply_decision` is the correctness-critical path: the request status
//! change, the membership upsert, and the capacity-guarded counter increment
//! commit or roll back as one unit.

use axum::Json;
use chrono::Utc;
use entity::{
    join_requests::{Column as RequestColumn, Entity as JoinRequestsEntity},
    project_members::{Column as MemberColumn, Entity as ProjectMembersEntity},
    projects::{Column as ProjectColumn, Entity as ProjectsEntity},
    sea_orm_active_enums::{MemberRole, MemberStatus, ProjectStatus, RequestStatus},
    users::Entity as UsersEntity,
};
use error::{AppError, Result};
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait,
    ColumnTrait,
    DbConn,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    Set,
    TransactionTrait,
};
use tracing::{info, warn};
use validator::Validate;

use super::RequestDecision;
use crate::{
    dto::{
        requests::{
            JoinProjectRequest,
            JoinRequestResponse,
            ReceivedRequestResponse,
            ReceivedRequestsResponse,
            SentRequestResponse,
            SentRequestsResponse,
        },
        SuccessResponse,
    },
    membership::projects::project_model_to_response,
    middleware::auth::AuthenticatedUser,
    realtime::{ProjectEvent, EVENT_MEMBER_JOINED, EVENT_REQUEST_RECEIVED},
    AppState,
};

/// Request to join a project
///
/// Preconditions are checked in order, each with its own failure kind:
/// the project must exist, the requester must not be the creator, must not
/// already be an accepted member, and must not have a pending request.
pub async fn request_to_join_handler(
    state: &AppState,
    user: AuthenticatedUser,
    project_id: uuid::Uuid,
    req: JoinProjectRequest,
) -> Result<Json<JoinRequestResponse>> {
    // Validate request
    req.validate().map_err(|e| {
        AppError::Validation {
            message: e.to_string(),
        }
    })?;

    let project = ProjectsEntity::find_by_id(project_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;

    if project.creator_id == user.id {
        return Err(AppError::invalid_operation(
            "You cannot join your own project",
        ));
    }

    let existing_member = ProjectMembersEntity::find()
        .filter(MemberColumn::ProjectId.eq(project_id))
        .filter(MemberColumn::UserId.eq(user.id))
        .filter(MemberColumn::Status.eq(MemberStatus::Accepted))
        .one(&state.db)
        .await?;

    if existing_member.is_some() {
        return Err(AppError::conflict(
            "You are already a member of this project",
        ));
    }

    // Only pending duplicates block; a rejected request does not prevent a
    // new attempt.
    let pending_request = JoinRequestsEntity::find()
        .filter(RequestColumn::ProjectId.eq(project_id))
        .filter(RequestColumn::UserId.eq(user.id))
        .filter(RequestColumn::Status.eq(RequestStatus::Pending))
        .one(&state.db)
        .await?;

    if pending_request.is_some() {
        return Err(AppError::conflict(
            "A join request for this project is already pending",
        ));
    }

    if project.status != ProjectStatus::Open {
        return Err(AppError::invalid_operation(
            "Project is not open to join requests",
        ));
    }

    let now = Utc::now();
    let request = entity::join_requests::ActiveModel {
        id:         Set(uuid::Uuid::new_v4()),
        project_id: Set(project_id),
        user_id:    Set(user.id),
        message:    Set(req.message),
        status:     Set(RequestStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    };

    // The partial unique index on pending (project, user) pairs backstops a
    // concurrent duplicate submission that slipped past the check above.
    let created_request = request.insert(&state.db).await.map_err(|e| {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                AppError::conflict("A join request for this project is already pending")
            },
            _ => AppError::database(format!("Failed to create join request: {}", e)),
        }
    })?;

    info!(
        project_id = %project_id,
        request_id = %created_request.id,
        user_id = %user.id,
        "Join request submitted"
    );

    state.realtime.publish(
        project_id,
        ProjectEvent::new(EVENT_REQUEST_RECEIVED, project_id, user.id),
    );

    Ok(Json(request_model_to_response(&created_request)))
}

/// Accept or reject a pending join request
///
/// Only the project creator may act. The underlying transaction is retried
/// once on infrastructure failure; business failures surface immediately.
pub async fn action_request_handler(
    state: &AppState,
    user: AuthenticatedUser,
    project_id: uuid::Uuid,
    request_id: uuid::Uuid,
    decision: RequestDecision,
) -> Result<Json<crate::dto::projects::ProjectResponse>> {
    let project = ProjectsEntity::find_by_id(project_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;

    if project.creator_id != user.id {
        return Err(AppError::forbidden(
            "Only the project creator can act on join requests",
        ));
    }

    let (updated, requester_id) = match apply_decision(&state.db, &project, request_id, decision).await {
        Ok(outcome) => outcome,
        Err(err) if !err.is_business() => {
            warn!(
                project_id = %project_id,
                request_id = %request_id,
                error = %err,
                "Decision transaction failed, retrying once"
            );
            apply_decision(&state.db, &project, request_id, decision).await?
        },
        Err(err) => return Err(err),
    };

    info!(
        project_id = %project_id,
        request_id = %request_id,
        decision = %decision,
        user_id = %user.id,
        "Join request actioned"
    );

    if decision == RequestDecision::Accept {
        state.realtime.publish(
            project_id,
            ProjectEvent::new(EVENT_MEMBER_JOINED, project_id, requester_id),
        );
    }

    Ok(Json(project_model_to_response(&updated, None)))
}

/// Apply a decision to a pending request in a single transaction.
///
/// On accept, the capacity check and counter increment are one conditional
/// update (`current_members < max_members` re-checked by the store under the
/// row lock), so two concurrent accepts on a project with one free slot
/// cannot both succeed.
async fn apply_decision(
    db: &DbConn,
    project: &entity::projects::Model,
    request_id: uuid::Uuid,
    decision: RequestDecision,
) -> Result<(entity::projects::Model, uuid::Uuid)> {
    let now = Utc::now();
    let txn = db.begin().await?;

    // Row lock on the request: a concurrent decision on the same request
    // blocks here and then observes the terminal status instead of
    // double-applying the accept.
    let request = JoinRequestsEntity::find_by_id(request_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Join request not found"))?;

    if request.project_id != project.id {
        return Err(AppError::not_found(
            "Join request not found for this project",
        ));
    }

    if request.status != RequestStatus::Pending {
        return Err(AppError::conflict(
            "Join request has already been actioned",
        ));
    }

    let new_status = match decision {
        RequestDecision::Accept => RequestStatus::Accepted,
        RequestDecision::Reject => RequestStatus::Rejected,
    };

    let requester_id = request.user_id;
    let mut request_model: entity::join_requests::ActiveModel = request.into();
    request_model.status = Set(new_status);
    request_model.updated_at = Set(now);
    request_model.update(&txn).await?;

    if decision == RequestDecision::Accept {
        let increment = ProjectsEntity::update_many()
            .col_expr(
                ProjectColumn::CurrentMembers,
                Expr::col(ProjectColumn::CurrentMembers).add(1),
            )
            .col_expr(ProjectColumn::UpdatedAt, Expr::value(now))
            .filter(ProjectColumn::Id.eq(project.id))
            .filter(Expr::col(ProjectColumn::CurrentMembers).lt(Expr::col(ProjectColumn::MaxMembers)))
            .exec(&txn)
            .await?;

        if increment.rows_affected == 0 {
            // Dropping the transaction rolls back the status change; the
            // request stays pending and may be retried or rejected.
            txn.rollback().await?;
            return Err(AppError::capacity_exceeded(
                "Project is already at member capacity",
            ));
        }

        // Upsert: a leftover non-accepted row for this pair is promoted
        // instead of violating the (project, user) uniqueness.
        let existing = ProjectMembersEntity::find()
            .filter(MemberColumn::ProjectId.eq(project.id))
            .filter(MemberColumn::UserId.eq(requester_id))
            .one(&txn)
            .await?;

        match existing {
            Some(member) => {
                let mut member_model: entity::project_members::ActiveModel = member.into();
                member_model.role = Set(MemberRole::Member);
                member_model.status = Set(MemberStatus::Accepted);
                member_model.joined_at = Set(now);
                member_model.update(&txn).await?;
            },
            None => {
                let member = entity::project_members::ActiveModel {
                    id:         Set(uuid::Uuid::new_v4()),
                    project_id: Set(project.id),
                    user_id:    Set(requester_id),
                    role:       Set(MemberRole::Member),
                    status:     Set(MemberStatus::Accepted),
                    joined_at:  Set(now),
                };
                member.insert(&txn).await?;
            },
        }
    }

    txn.commit().await?;

    let updated = ProjectsEntity::find_by_id(project.id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::internal("Project disappeared while actioning request"))?;

    Ok((updated, requester_id))
}

/// Cancel a join request
///
/// A user may delete their own request whatever its status. Cancelling a
/// request that no longer exists yields NotFound.
pub async fn cancel_request_handler(
    state: &AppState,
    user: AuthenticatedUser,
    request_id: uuid::Uuid,
) -> Result<Json<SuccessResponse>> {
    let request = JoinRequestsEntity::find_by_id(request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Join request not found"))?;

    if request.user_id != user.id {
        return Err(AppError::forbidden(
            "You can only cancel your own join requests",
        ));
    }

    JoinRequestsEntity::delete_by_id(request_id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to cancel join request: {}", e)))?;

    info!(request_id = %request_id, user_id = %user.id, "Join request cancelled");

    Ok(Json(SuccessResponse::new("Request cancelled successfully")))
}

/// List the requests the calling user has sent, newest first
pub async fn list_sent_requests_handler(
    state: &AppState,
    user: AuthenticatedUser,
) -> Result<Json<SentRequestsResponse>> {
    let requests = JoinRequestsEntity::find()
        .filter(RequestColumn::UserId.eq(user.id))
        .find_also_related(ProjectsEntity)
        .order_by_desc(RequestColumn::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch sent requests: {}", e)))?;

    let creator_ids: Vec<uuid::Uuid> = requests
        .iter()
        .filter_map(|(_, p)| p.as_ref().map(|p| p.creator_id))
        .collect();
    let creators = creator_names(state, creator_ids).await?;

    let request_responses: Vec<SentRequestResponse> = requests
        .into_iter()
        .filter_map(|(request, project_opt)| {
            let project = project_opt?;
            Some(SentRequestResponse {
                id:            request.id,
                status:        request.status.to_string(),
                created_at:    request.created_at.to_rfc3339(),
                project_id:    project.id,
                project_title: project.title,
                creator_name:  creators
                    .get(&project.creator_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown User".to_string()),
            })
        })
        .collect();

    Ok(Json(SentRequestsResponse {
        success:  true,
        requests: request_responses,
    }))
}

/// List the requests received against the calling user's projects, newest first
pub async fn list_received_requests_handler(
    state: &AppState,
    user: AuthenticatedUser,
) -> Result<Json<ReceivedRequestsResponse>> {
    let requests = JoinRequestsEntity::find()
        .find_also_related(ProjectsEntity)
        .filter(ProjectColumn::CreatorId.eq(user.id))
        .order_by_desc(RequestColumn::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch received requests: {}", e)))?;

    let requester_ids: Vec<uuid::Uuid> = requests.iter().map(|(r, _)| r.user_id).collect();
    let requesters = UsersEntity::find()
        .filter(entity::users::Column::Id.is_in(requester_ids))
        .all(&state.db)
        .await?;
    let requesters: std::collections::HashMap<uuid::Uuid, entity::users::Model> =
        requesters.into_iter().map(|u| (u.id, u)).collect();

    let request_responses: Vec<ReceivedRequestResponse> = requests
        .into_iter()
        .filter_map(|(request, project_opt)| {
            let project = project_opt?;
            let (requester_name, requester_email) = match requesters.get(&request.user_id) {
                Some(u) => (u.name.clone(), u.email.clone()),
                None => ("Unknown User".to_string(), "unknown".to_string()),
            };
            Some(ReceivedRequestResponse {
                id: request.id,
                status: request.status.to_string(),
                created_at: request.created_at.to_rfc3339(),
                message: request.message,
                project_id: project.id,
                project_title: project.title,
                requester_id: request.user_id,
                requester_name,
                requester_email,
            })
        })
        .collect();

    Ok(Json(ReceivedRequestsResponse {
        success:  true,
        requests: request_responses,
    }))
}

/// Look up display names for a set of users
async fn creator_names(
    state: &AppState,
    ids: Vec<uuid::Uuid>,
) -> Result<std::collections::HashMap<uuid::Uuid, String>> {
    let users = UsersEntity::find()
        .filter(entity::users::Column::Id.is_in(ids))
        .all(&state.db)
        .await?;
    Ok(users.into_iter().map(|u| (u.id, u.name)).collect())
}

/// Convert a join request entity model to a response DTO
fn request_model_to_response(request: &entity::join_requests::Model) -> JoinRequestResponse {
    JoinRequestResponse {
        id:         request.id,
        project_id: request.project_id,
        user_id:    request.user_id,
        message:    request.message.clone(),
        status:     request.status.to_string(),
        created_at: request.created_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_model_to_response() {
        let request = entity::join_requests::Model {
            id:         uuid::Uuid::new_v4(),
            project_id: uuid::Uuid::new_v4(),
            user_id:    uuid::Uuid::new_v4(),
            message:    Some("I know Rust".to_string()),
            status:     RequestStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = request_model_to_response(&request);
        assert_eq!(response.id, request.id);
        assert_eq!(response.status, "pending");
        assert_eq!(response.message, Some("I know Rust".to_string()));
    }
}
