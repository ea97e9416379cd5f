use super::subscriptions::{author_entry, SubscriptionsParams};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::User;
use crate::relations::{self, RelationError};
use crate::schema::users;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "Author to follow"),
        SubscriptionsParams
    ),
    responses(
        (status = 201, description = "Subscription created", body = super::subscriptions::SubscriptionResponse),
        (status = 400, description = "Already subscribed, or self-subscription", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn subscribe_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<SubscriptionsParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    let author: User = match users::table
        .find(id)
        .select(User::as_select())
        .first(&mut conn)
        .optional()
    {
        Ok(Some(author)) => author,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "User not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch user".to_string(),
                }),
            )
                .into_response();
        }
    };

    match relations::subscribe(&mut conn, user.id, author.id) {
        Ok(()) => {}
        Err(e @ (RelationError::AlreadyExists | RelationError::SelfSubscription)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to subscribe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to subscribe".to_string(),
                }),
            )
                .into_response();
        }
    }

    match author_entry(&mut conn, &author, params.recipes_limit) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => {
            tracing::error!("Failed to build subscription entry: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to subscribe".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "Author to unfollow")
    ),
    responses(
        (status = 204, description = "Subscription removed"),
        (status = 404, description = "Subscription not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn unsubscribe_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    match relations::unsubscribe(&mut conn, user.id, id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(RelationError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Subscription not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to unsubscribe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to unsubscribe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
