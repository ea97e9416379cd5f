use crate::api::ErrorResponse;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::db::get_user_from_token;

/// Extractor that validates the Authorization header and provides the
/// authenticated user.
///
/// Use this in any handler that requires authentication:
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     // user is the authenticated User
/// }
/// ```
pub struct AuthUser(pub User);

/// Variant for endpoints that serve anonymous viewers too: yields
/// `None` when no Authorization header is present, but still rejects a
/// header that fails validation.
pub struct OptionalAuthUser(pub Option<User>);

pub enum AuthError {
    MissingHeader,
    InvalidHeader,
    InvalidFormat,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingHeader => (StatusCode::UNAUTHORIZED, "Missing Authorization header"),
            AuthError::InvalidHeader => (StatusCode::UNAUTHORIZED, "Invalid Authorization header"),
            AuthError::InvalidFormat => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format",
            ),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

fn user_from_parts<S>(parts: &Parts, state: &S) -> Result<User, AuthError>
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    let state = AppState::from_ref(state);

    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidHeader)?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)?;

    get_user_from_token(&state.pool, token).ok_or(AuthError::InvalidToken)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        user_from_parts(parts, state).map(AuthUser)
    }
}

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if parts.headers.get(header::AUTHORIZATION).is_none() {
            return Ok(OptionalAuthUser(None));
        }
        user_from_parts(parts, state).map(|user| OptionalAuthUser(Some(user)))
    }
}
