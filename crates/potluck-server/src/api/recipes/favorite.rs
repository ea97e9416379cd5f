use super::RecipeShortResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::Recipe;
use crate::relations::{self, RelationError};
use crate::schema::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 201, description = "Recipe added to favorites", body = RecipeShortResponse),
        (status = 400, description = "Recipe already in favorites", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn favorite_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    let recipe: Recipe = match recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(&mut conn)
        .optional()
    {
        Ok(Some(recipe)) => recipe,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    match relations::add_favorite(&mut conn, user.id, recipe.id) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(RecipeShortResponse::from(&recipe)),
        )
            .into_response(),
        Err(RelationError::AlreadyExists) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Recipe is already in favorites".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to add favorite: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add favorite".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/favorite",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe removed from favorites"),
        (status = 404, description = "Recipe was not in favorites", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn unfavorite_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    match relations::remove_favorite(&mut conn, user.id, id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(RelationError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe is not in favorites".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to remove favorite: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to remove favorite".to_string(),
                }),
            )
                .into_response()
        }
    }
}
