use super::{hydrate_recipe, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::OptionalAuthUser;
use crate::get_conn;
use crate::models::{Recipe, User};
use crate::schema::{recipes, users};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes, newest first", body = [RecipeResponse])
    )
)]
pub async fn list_recipes(
    OptionalAuthUser(viewer): OptionalAuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state);
    let viewer_id = viewer.map(|v| v.id);

    let rows: Vec<(Recipe, User)> = match recipes::table
        .inner_join(users::table)
        .order(recipes::created_at.desc())
        .select((Recipe::as_select(), User::as_select()))
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut responses: Vec<RecipeResponse> = Vec::with_capacity(rows.len());
    for (recipe, author) in &rows {
        match hydrate_recipe(&mut conn, recipe, author, viewer_id) {
            Ok(response) => responses.push(response),
            Err(e) => {
                tracing::error!("Failed to hydrate recipe {}: {}", recipe.id, e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to fetch recipes".to_string(),
                    }),
                )
                    .into_response();
            }
        }
    }

    (StatusCode::OK, Json(responses)).into_response()
}
