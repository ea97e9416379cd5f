use crate::api::users::user_response;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, description = "The authenticated user's profile", body = super::UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn me(AuthUser(user): AuthUser, State(state): State<AppState>) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    // is_subscribed is always false for the self-profile
    match user_response(&mut conn, &user, Some(user.id)) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            tracing::error!("Failed to build user response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch user".to_string(),
                }),
            )
                .into_response()
        }
    }
}
