//! Session middleware
//!
//! Authentication happens at the front boundary; requests arrive with the
//! resulting session in trusted headers. This module extracts it and
//! enforces the role gate (ADMIN everywhere, SECRETARY only on the
//! distribution surface).

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::{UserRole, UserSession};

use crate::error::ErrorResponse;

/// Header carrying the logged-in user's name
pub const USER_NAME_HEADER: &str = "x-user-name";
/// Header carrying the logged-in user's role (ADMIN or SECRETARY)
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Session middleware that resolves the user from the request headers
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let name = match header_value(&request, USER_NAME_HEADER) {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => return unauthorized_response("Missing x-user-name header"),
    };

    let role = match header_value(&request, USER_ROLE_HEADER)
        .and_then(|raw| raw.parse::<UserRole>().ok())
    {
        Some(role) => role,
        None => return unauthorized_response("Missing or invalid x-user-role header"),
    };

    request.extensions_mut().insert(UserSession { name, role });

    next.run(request).await
}

/// Gate for admin-only route groups. Must run after `session_middleware`.
pub async fn require_admin(request: Request, next: Next) -> Response {
    match request.extensions().get::<UserSession>() {
        Some(session) if session.role == UserRole::Admin => next.run(request).await,
        Some(_) => forbidden_response("This page is only available to administrators"),
        None => unauthorized_response("Authentication required"),
    }
}

fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: crate::error::ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message_en: message.to_string(),
            message_es: "No autorizado".to_string(),
            field: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Create forbidden response
fn forbidden_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: crate::error::ErrorDetail {
            code: "FORBIDDEN".to_string(),
            message_en: message.to_string(),
            message_es: "No tiene permisos para acceder".to_string(),
            field: None,
        },
    };

    (StatusCode::FORBIDDEN, Json(error)).into_response()
}

/// Extractor for the current session
/// Use this in handlers to get the acting user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub UserSession);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserSession>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: crate::error::ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message_en: "Authentication required".to_string(),
                        message_es: "Debe iniciar sesión".to_string(),
                        field: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}
