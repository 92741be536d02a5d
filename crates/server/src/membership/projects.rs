//! # Project Handlers
//!
//! HTTP request handlers for project creation, discovery, and detail.

use std::collections::HashMap;

use axum::Json;
use chrono::Utc;
use entity::{
    join_requests::{Column as RequestColumn, Entity as JoinRequestsEntity},
    project_members::{Column as MemberColumn, Entity as ProjectMembersEntity},
    projects::{Column as ProjectColumn, Entity as ProjectsEntity},
    sea_orm_active_enums::{MemberRole, MemberStatus, ProjectStatus, ProjectVisibility, RequestStatus},
    users::Entity as UsersEntity,
};
use error::{AppError, PaginationMeta, Result};
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait,
    ColumnTrait,
    Condition,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
    TransactionTrait,
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::projects::{
        CreateProjectRequest,
        ProjectDetailResponse,
        ProjectListQuery,
        ProjectListResponse,
        ProjectMemberResponse,
        ProjectResponse,
    },
    middleware::auth::AuthenticatedUser,
    utils::escape_like_wildcards,
    AppState,
};

/// Default member capacity when the creator does not specify one
pub const DEFAULT_MAX_MEMBERS: i32 = 5;

/// Create a new project
///
/// The authenticated user becomes the creator and the sole initial member;
/// the project row and the creator membership are written atomically, with
/// `current_members` starting at 1.
pub async fn create_project_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateProjectRequest,
) -> Result<Json<ProjectResponse>> {
    // Validate request
    req.validate().map_err(|e| {
        AppError::Validation {
            message: e.to_string(),
        }
    })?;

    let max_members = req.max_members.unwrap_or(DEFAULT_MAX_MEMBERS);
    let visibility = req.visibility.unwrap_or(ProjectVisibility::Public);

    let now = Utc::now();
    let txn = state.db.begin().await?;

    let project = entity::projects::ActiveModel {
        id: Set(uuid::Uuid::new_v4()),
        title: Set(req.title.clone()),
        description: Set(req.description.clone()),
        creator_id: Set(user.id),
        required_skills: Set(serde_json::json!(req.required_skills)),
        status: Set(ProjectStatus::Open),
        visibility: Set(visibility),
        max_members: Set(max_members),
        current_members: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created_project = project
        .insert(&txn)
        .await
        .map_err(|e| AppError::database(format!("Failed to create project: {}", e)))?;

    // The creator membership is part of the same transaction; a project
    // without its creator row would break the member-count invariant.
    let member = entity::project_members::ActiveModel {
        id:         Set(uuid::Uuid::new_v4()),
        project_id: Set(created_project.id),
        user_id:    Set(user.id),
        role:       Set(MemberRole::Creator),
        status:     Set(MemberStatus::Accepted),
        joined_at:  Set(now),
    };
    member
        .insert(&txn)
        .await
        .map_err(|e| AppError::database(format!("Failed to add creator as project member: {}", e)))?;

    txn.commit().await?;

    info!(project_id = %created_project.id, user_id = %user.id, "Project created");

    Ok(Json(project_model_to_response(&created_project, None)))
}

/// List all projects with pagination and per-user relation annotation
pub async fn list_projects_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: ProjectListQuery,
) -> Result<Json<ProjectListResponse>> {
    let base_query = ProjectsEntity::find();
    paginated_projects(state, &user, base_query, &query).await
}

/// Search projects by title, description, or required skills
pub async fn search_projects_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: ProjectListQuery,
) -> Result<Json<ProjectListResponse>> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request("Search query is required"))?;

    let escaped_search = escape_like_wildcards(search);
    let pattern = format!("%{}%", escaped_search);
    let base_query = ProjectsEntity::find().filter(
        Condition::any()
            .add(ProjectColumn::Title.like(&pattern))
            .add(ProjectColumn::Description.like(&pattern))
            .add(Expr::cust_with_values(
                "required_skills::text ILIKE ?",
                [pattern.clone()],
            )),
    );

    paginated_projects(state, &user, base_query, &query).await
}

/// Shared pagination and annotation for project listings
async fn paginated_projects(
    state: &AppState,
    user: &AuthenticatedUser,
    base_query: sea_orm::Select<ProjectsEntity>,
    query: &ProjectListQuery,
) -> Result<Json<ProjectListResponse>> {
    let page = query.page();
    let per_page = query.per_page();

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count projects: {}", e)))?;

    let projects = base_query
        .order_by_desc(ProjectColumn::CreatedAt)
        .paginate(&state.db, per_page)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch projects: {}", e)))?;

    let relations = user_relations(state, user, &projects).await?;

    let project_responses: Vec<ProjectResponse> = projects
        .iter()
        .map(|p| project_model_to_response(p, relations.get(&p.id).cloned()))
        .collect();

    Ok(Json(ProjectListResponse {
        success:    true,
        projects:   project_responses,
        pagination: PaginationMeta::new(page, per_page, total),
    }))
}

/// Resolve the calling user's relation to each listed project.
///
/// `joined` for the creator or an accepted member, otherwise the status of
/// the user's most recent join request.
async fn user_relations(
    state: &AppState,
    user: &AuthenticatedUser,
    projects: &[entity::projects::Model],
) -> Result<HashMap<uuid::Uuid, String>> {
    let ids: Vec<uuid::Uuid> = projects.iter().map(|p| p.id).collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut relations: HashMap<uuid::Uuid, String> = HashMap::new();

    for project in projects {
        if project.creator_id == user.id {
            relations.insert(project.id, "joined".to_string());
        }
    }

    let memberships = ProjectMembersEntity::find()
        .filter(MemberColumn::UserId.eq(user.id))
        .filter(MemberColumn::ProjectId.is_in(ids.clone()))
        .filter(MemberColumn::Status.eq(MemberStatus::Accepted))
        .all(&state.db)
        .await?;
    for membership in memberships {
        relations.insert(membership.project_id, "joined".to_string());
    }

    let requests = JoinRequestsEntity::find()
        .filter(RequestColumn::UserId.eq(user.id))
        .filter(RequestColumn::ProjectId.is_in(ids))
        .order_by_asc(RequestColumn::CreatedAt)
        .all(&state.db)
        .await?;
    for request in requests {
        // Later requests overwrite earlier ones; membership wins over any request.
        if relations.get(&request.project_id).map(String::as_str) == Some("joined") {
            continue;
        }
        let relation = match request.status {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "joined",
            RequestStatus::Rejected => "rejected",
        };
        relations.insert(request.project_id, relation.to_string());
    }

    Ok(relations)
}

/// Get a single project with its member roster
///
/// Restricted to the creator and accepted members.
pub async fn get_project_handler(
    state: &AppState,
    user: AuthenticatedUser,
    project_id: uuid::Uuid,
) -> Result<Json<ProjectDetailResponse>> {
    let project = ProjectsEntity::find_by_id(project_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;

    if !super::members::is_accepted_member(&state.db, &project, user.id).await? {
        return Err(AppError::forbidden(
            "You do not have access to this project",
        ));
    }

    let members = ProjectMembersEntity::find()
        .filter(MemberColumn::ProjectId.eq(project_id))
        .filter(MemberColumn::Status.eq(MemberStatus::Accepted))
        .find_also_related(UsersEntity)
        .order_by_asc(MemberColumn::Role)
        .order_by_asc(MemberColumn::JoinedAt)
        .all(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch project members: {}", e)))?;

    let member_responses: Vec<ProjectMemberResponse> = members
        .into_iter()
        .map(|(m, user_opt)| {
            let (name, email) = match user_opt {
                Some(u) => (u.name, u.email),
                None => ("Unknown User".to_string(), "unknown".to_string()),
            };
            ProjectMemberResponse {
                user_id: m.user_id,
                name,
                email,
                role: m.role.to_string(),
                status: m.status.to_string(),
                joined_at: m.joined_at.to_rfc3339(),
            }
        })
        .collect();

    Ok(Json(ProjectDetailResponse {
        success: true,
        project: project_model_to_response(&project, None),
        members: member_responses,
    }))
}

/// Convert a project entity model to a response DTO
pub fn project_model_to_response(
    project: &entity::projects::Model,
    request_status: Option<String>,
) -> ProjectResponse {
    ProjectResponse {
        id: project.id,
        title: project.title.clone(),
        description: project.description.clone(),
        creator_id: project.creator_id,
        required_skills: project.skills(),
        status: project.status.to_string(),
        visibility: project.visibility.to_string(),
        max_members: project.max_members,
        current_members: project.current_members,
        request_status,
        created_at: project.created_at.to_rfc3339(),
        updated_at: project.updated_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_model() -> entity::projects::Model {
        entity::projects::Model {
            id:              uuid::Uuid::new_v4(),
            title:           "Robotics club site".to_string(),
            description:     "A site for the robotics club".to_string(),
            creator_id:      uuid::Uuid::new_v4(),
            required_skills: serde_json::json!(["typescript", "css"]),
            status:          ProjectStatus::Open,
            visibility:      ProjectVisibility::Public,
            max_members:     5,
            current_members: 2,
            created_at:      Utc::now(),
            updated_at:      Utc::now(),
        }
    }

    #[test]
    fn test_project_model_to_response() {
        let project = project_model();
        let response = project_model_to_response(&project, Some("pending".to_string()));
        assert_eq!(response.id, project.id);
        assert_eq!(response.title, "Robotics club site");
        assert_eq!(response.status, "open");
        assert_eq!(response.visibility, "public");
        assert_eq!(response.current_members, 2);
        assert_eq!(
            response.required_skills,
            vec!["typescript".to_string(), "css".to_string()]
        );
        assert_eq!(response.request_status, Some("pending".to_string()));
    }

    #[test]
    fn test_project_model_to_response_no_relation() {
        let project = project_model();
        let response = project_model_to_response(&project, None);
        assert!(response.request_status.is_none());

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("request_status"));
    }

    #[test]
    fn test_default_max_members() {
        assert_eq!(DEFAULT_MAX_MEMBERS, 5);
    }
}
