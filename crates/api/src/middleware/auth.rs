//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use qa_history_core::access::Viewer;
use qa_history_core::error::CoreError;
use qa_history_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// User identified by a JWT Bearer token in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (e.g. `"user"`, `"editor"`, `"admin"`).
    pub role: String,
}

impl AuthUser {
    /// The identity handed to access checks.
    pub fn viewer(&self) -> Viewer {
        Viewer {
            user_id: self.user_id,
            role: self.role.clone(),
        }
    }
}

/// Decode an `Authorization` header value.
fn user_from_header(value: &HeaderValue, state: &AppState) -> Result<AuthUser, AppError> {
    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(AuthUser {
        user_id: claims.sub,
        role: claims.role,
    })
}

/// The viewer if one identified themselves, `None` for anonymous requests.
///
/// A request without an `Authorization` header is anonymous; a request with
/// a malformed or expired token is rejected with 401 rather than silently
/// downgraded.
///
/// ```ignore
/// async fn page(OptionalAuth(user): OptionalAuth) -> AppResult<Json<()>> {
///     let viewer = user.as_ref().map(AuthUser::viewer);
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthUser>);

impl OptionalAuth {
    pub fn viewer(&self) -> Option<Viewer> {
        self.0.as_ref().map(AuthUser::viewer)
    }
}

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.headers.get(AUTHORIZATION) {
            None => Ok(OptionalAuth(None)),
            Some(value) => user_from_header(value, state).map(|user| OptionalAuth(Some(user))),
        }
    }
}
