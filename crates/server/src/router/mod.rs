//! # API Router Configuration
//!
//! Configures API routes for the Synapse application.

use axum::{
    extract::{Extension, Path, Query, State as AxumState},
    middleware,
    routing::{delete, get, post},
    Json,
    Router,
};
use error::Result;

use crate::{membership::RequestDecision, middleware::auth::AuthenticatedUser, AppState};

/// Creates the API router with all routes
///
/// # Arguments
///
/// * `state` - Application state containing the DB pool and configuration
///
/// # Returns
///
/// Configured Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    // Every membership route requires an authenticated user
    let protected_routes = Router::new()
        .route("/api/v1/projects", post(create_project_handler))
        .route("/api/v1/projects", get(list_projects_handler))
        .route("/api/v1/projects/search", get(search_projects_handler))
        .route("/api/v1/projects/:project_id", get(get_project_handler))
        .route(
            "/api/v1/projects/:project_id/membership",
            get(membership_status_handler),
        )
        .route(
            "/api/v1/projects/:project_id/request",
            post(request_to_join_handler),
        )
        .route(
            "/api/v1/projects/:project_id/requests/:request_id/accept",
            post(accept_request_handler),
        )
        .route(
            "/api/v1/projects/:project_id/requests/:request_id/reject",
            post(reject_request_handler),
        )
        .route("/api/v1/projects/:project_id/leave", post(leave_project_handler))
        .route("/api/v1/requests/sent", get(list_sent_requests_handler))
        .route(
            "/api/v1/requests/received",
            get(list_received_requests_handler),
        )
        .route("/api/v1/requests/:request_id", delete(cancel_request_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::auth_middleware,
        ));

    protected_routes.with_state(state)
}

/// Wrapper handler for creating a project
async fn create_project_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<crate::dto::projects::CreateProjectRequest>,
) -> Result<Json<crate::dto::projects::ProjectResponse>> {
    crate::membership::projects::create_project_handler(&state, user, req).await
}

/// Wrapper handler for listing projects
async fn list_projects_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<crate::dto::projects::ProjectListQuery>,
) -> Result<Json<crate::dto::projects::ProjectListResponse>> {
    crate::membership::projects::list_projects_handler(&state, user, query).await
}

/// Wrapper handler for searching projects
async fn search_projects_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<crate::dto::projects::ProjectListQuery>,
) -> Result<Json<crate::dto::projects::ProjectListResponse>> {
    crate::membership::projects::search_projects_handler(&state, user, query).await
}

/// Wrapper handler for project detail
async fn get_project_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(project_id): Path<uuid::Uuid>,
) -> Result<Json<crate::dto::projects::ProjectDetailResponse>> {
    crate::membership::projects::get_project_handler(&state, user, project_id).await
}

/// Wrapper handler for membership status
async fn membership_status_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(project_id): Path<uuid::Uuid>,
) -> Result<Json<crate::dto::projects::MembershipStatusResponse>> {
    crate::membership::members::membership_status_handler(&state, user, project_id).await
}

/// Wrapper handler for submitting a join request
async fn request_to_join_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(project_id): Path<uuid::Uuid>,
    Json(req): Json<crate::dto::requests::JoinProjectRequest>,
) -> Result<Json<crate::dto::requests::JoinRequestResponse>> {
    crate::membership::requests::request_to_join_handler(&state, user, project_id, req).await
}

/// Wrapper handler for accepting a join request
async fn accept_request_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((project_id, request_id)): Path<(uuid::Uuid, uuid::Uuid)>,
) -> Result<Json<crate::dto::projects::ProjectResponse>> {
    crate::membership::requests::action_request_handler(&state, user, project_id, request_id, RequestDecision::Accept)
        .await
}

/// Wrapper handler for rejecting a join request
async fn reject_request_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((project_id, request_id)): Path<(uuid::Uuid, uuid::Uuid)>,
) -> Result<Json<crate::dto::projects::ProjectResponse>> {
    crate::membership::requests::action_request_handler(&state, user, project_id, request_id, RequestDecision::Reject)
        .await
}

/// Wrapper handler for leaving a project
async fn leave_project_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(project_id): Path<uuid::Uuid>,
) -> Result<Json<crate::dto::projects::ProjectResponse>> {
    crate::membership::members::leave_project_handler(&state, user, project_id).await
}

/// Wrapper handler for the sent-requests inbox
async fn list_sent_requests_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<crate::dto::requests::SentRequestsResponse>> {
    crate::membership::requests::list_sent_requests_handler(&state, user).await
}

/// Wrapper handler for the received-requests inbox
async fn list_received_requests_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<crate::dto::requests::ReceivedRequestsResponse>> {
    crate::membership::requests::list_received_requests_handler(&state, user).await
}

/// Wrapper handler for cancelling a join request
async fn cancel_request_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(request_id): Path<uuid::Uuid>,
) -> Result<Json<crate::dto::SuccessResponse>> {
    crate::membership::requests::cancel_request_handler(&state, user, request_id).await
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", axum::routing::get(|| async { "OK" })) }

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state containing the DB pool and configuration
///
/// # Returns
///
/// Main router with health checks and API routes
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
}
