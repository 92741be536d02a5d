//! # Authentication Middleware
//!
//! Bearer-token authentication middleware for protecting API endpoints.
//! Token issuance is owned by the external identity provider; this layer
//! only resolves a credential to a user identity.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    identity::{extract_bearer_token, validate_token},
    AppState,
};

/// User information extracted from a verified token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID
    pub id:    uuid::Uuid,
    /// User email
    pub email: String,
    /// User display name
    pub name:  String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Verifies the token against the configured issuer/audience
/// 3. Adds the authenticated user to request extensions
/// 4. Rejects requests with invalid/missing tokens
pub async fn auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    // Extract Authorization header
    let auth_header = match request.headers().get(header::AUTHORIZATION) {
        Some(header) => {
            match header.to_str() {
                Ok(h) => h,
                Err(_) => {
                    return create_auth_error_response("Invalid authorization header encoding");
                },
            }
        },
        None => {
            return create_auth_error_response("Missing authorization header");
        },
    };

    // Extract Bearer token
    let token = match extract_bearer_token(auth_header) {
        Some(token) => token,
        None => {
            return create_auth_error_response("Invalid authorization header format");
        },
    };

    // Verify token
    let claims = match validate_token(&state.jwt_config, &token) {
        Ok(claims) => claims,
        Err(e) => {
            return create_auth_error_response(&e.message());
        },
    };

    // The subject must be a user id in our identifier space
    let user_id = match claims.sub.parse::<uuid::Uuid>() {
        Ok(id) => id,
        Err(_) => {
            return create_auth_error_response("Invalid token subject");
        },
    };

    let user = AuthenticatedUser {
        id:    user_id,
        email: claims.email,
        name:  claims.name,
    };

    // Add user to request extensions
    request.extensions_mut().insert(user);

    // Continue with the request
    next.run(request).await
}

/// Create standardized authentication error response
fn create_auth_error_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        axum::Json(json!({
            "success": false,
            "code": "AUTHENTICATION_ERROR",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::extract_bearer_token;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token("Bearer abc123"),
            Some("abc123".to_string())
        );
        assert!(extract_bearer_token("Basic abc123").is_none());
        assert!(extract_bearer_token("Bearer").is_none());
        assert!(extract_bearer_token("").is_none());
    }

    #[test]
    fn test_auth_error_response_shape() {
        let response = create_auth_error_response("Missing authorization header");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
