use super::{insert_portions_and_tags, known_tag_ids, load_recipe_response};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::NewRecipe;
use crate::schema::recipes;
use crate::validation::{validate_recipe, PortionInput, RecipeDraft};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use base64::Engine;
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// One (ingredient, amount) entry of the submitted portion set.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct PortionRequest {
    /// Ingredient ID from the catalog
    pub id: Uuid,
    pub amount: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub text: String,
    /// Base64-encoded image bytes
    pub image: String,
    pub cooking_time: i32,
    pub ingredients: Vec<PortionRequest>,
    pub tags: Vec<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = super::RecipeResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    let image = match base64::engine::general_purpose::STANDARD.decode(&request.image) {
        Ok(bytes) => bytes,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Image is not valid base64".to_string(),
                }),
            )
                .into_response()
        }
    };

    let mut conn = get_conn!(state);

    let portions: Vec<PortionInput> = request
        .ingredients
        .iter()
        .map(|p| PortionInput {
            ingredient_id: p.id,
            amount: p.amount,
        })
        .collect();

    let known_tags = match known_tag_ids(&mut conn, &request.tags) {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!("Failed to resolve tags: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to resolve tags".to_string(),
                }),
            )
                .into_response();
        }
    };

    let draft = RecipeDraft {
        name: &request.name,
        text: &request.text,
        cooking_time: request.cooking_time,
        portions: &portions,
        tag_ids: &request.tags,
    };
    if let Err(e) = validate_recipe(&state.config, &draft, &known_tags) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response();
    }

    // Insert the recipe together with its full portion and tag sets in one
    // transaction: a reader never observes a recipe with a partial set.
    let result: Result<Uuid, diesel::result::Error> = conn.transaction(|conn| {
        let new_recipe = NewRecipe {
            author_id: user.id,
            name: &request.name,
            text: &request.text,
            image: &image,
            cooking_time: request.cooking_time,
        };

        let recipe_id: Uuid = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(recipes::id)
            .get_result(conn)?;

        insert_portions_and_tags(conn, recipe_id, &portions, &request.tags)?;

        Ok(recipe_id)
    });

    let recipe_id = match result {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    match load_recipe_response(&mut conn, recipe_id, Some(user.id)) {
        Ok(Some(response)) => (StatusCode::CREATED, Json(response)).into_response(),
        Ok(None) | Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to load created recipe".to_string(),
            }),
        )
            .into_response(),
    }
}
