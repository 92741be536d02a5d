//! Integration tests for the error crate public API.

use error::{ApiResponse, AppError, ErrorHandler, PaginationMeta, Result, ResultExt};

#[test]
fn test_business_taxonomy_maps_to_client_statuses() {
    let cases: Vec<(AppError, u16, &str)> = vec![
        (AppError::validation("bad input"), 422, "VALIDATION_ERROR"),
        (AppError::not_found("project"), 404, "NOT_FOUND"),
        (AppError::forbidden("not the creator"), 403, "FORBIDDEN"),
        (AppError::conflict("already a member"), 409, "CONFLICT"),
        (
            AppError::invalid_operation("creators cannot leave"),
            400,
            "INVALID_OPERATION",
        ),
        (
            AppError::capacity_exceeded("project is full"),
            409,
            "CAPACITY_EXCEEDED",
        ),
    ];

    for (err, status, code) in cases {
        assert_eq!(err.status().as_u16(), status, "status for {}", code);
        assert_eq!(err.code(), code);
        assert!(err.is_business());
    }
}

#[test]
fn test_infrastructure_errors_are_distinct_from_business_taxonomy() {
    for err in [
        AppError::database("deadlock detected"),
        AppError::internal("worker panicked"),
        AppError::config("missing DATABASE_URL"),
        AppError::migration("m2 failed"),
    ] {
        assert_eq!(err.status().as_u16(), 500);
        assert!(!err.is_business());
    }
}

#[test]
fn test_error_response_body_shape() {
    let handler = ErrorHandler::new(false);
    let response = handler.to_response(&AppError::conflict("Request already pending"));
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(
        response.headers().get("Content-Type").unwrap(),
        "application/json"
    );
}

#[test]
fn test_result_ext_keeps_kind_through_context() {
    fn find_project() -> Result<()> { Err(AppError::not_found("Project not found")) }

    let err = find_project()
        .context("Cancelling join request")
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
    assert!(err.message().starts_with("Cancelling join request"));
}

#[test]
fn test_api_response_round_trip() {
    let response = ApiResponse::ok(vec![1, 2, 3]);
    let json = serde_json::to_string(&response).unwrap();
    let parsed: ApiResponse<Vec<i32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.into_result().unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_pagination_meta_for_listing() {
    let meta = PaginationMeta::new(2, 20, 45);
    assert_eq!(meta.total_pages, 3);
    assert_eq!(meta.offset(), Some(20));
    assert_eq!(meta.has_next, Some(true));
    assert_eq!(meta.has_prev, Some(true));
}

#[test]
fn test_db_err_conversion() {
    let db_err = sea_orm::DbErr::Custom("connection reset".to_string());
    let err: AppError = db_err.into();
    assert_eq!(err.code(), "DATABASE_ERROR");
}
