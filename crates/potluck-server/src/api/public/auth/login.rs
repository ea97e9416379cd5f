use crate::api::ErrorResponse;
use crate::auth::{create_session, verify_password};
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    let user: Option<User> = match users::table
        .filter(users::email.eq(&req.email))
        .select(User::as_select())
        .first(&mut conn)
        .optional()
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to fetch user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to log in".to_string(),
                }),
            )
                .into_response();
        }
    };

    // Same response for unknown email and wrong password
    let valid = user
        .as_ref()
        .map(|u| verify_password(&req.password, &u.password_hash))
        .unwrap_or(false);

    let Some(user) = user.filter(|_| valid) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid email or password".to_string(),
            }),
        )
            .into_response();
    };

    match create_session(&mut conn, user.id) {
        Ok(token) => (
            StatusCode::OK,
            Json(LoginResponse {
                user_id: user.id,
                token,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to log in".to_string(),
                }),
            )
                .into_response()
        }
    }
}
