use super::{insert_portions_and_tags, known_tag_ids, load_recipe_response};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::schema::{recipe_ingredients, recipe_tags, recipes};
use crate::validation::{validate_recipe, PortionInput, RecipeDraft};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use base64::Engine;
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Full desired state of the recipe. The submitted portion and tag sets
/// replace the stored ones entirely; ingredients or tags left out of the
/// payload are dropped from the recipe.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub name: String,
    pub text: String,
    /// Base64-encoded image bytes
    pub image: String,
    pub cooking_time: i32,
    pub ingredients: Vec<super::create::PortionRequest>,
    pub tags: Vec<Uuid>,
}

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = super::RecipeResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the recipe author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
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

    let author_id: Uuid = match recipes::table
        .find(id)
        .select(recipes::author_id)
        .first(&mut conn)
        .optional()
    {
        Ok(Some(author_id)) => author_id,
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

    if author_id != user.id {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Only the author can edit a recipe".to_string(),
            }),
        )
            .into_response();
    }

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

    // Replace, not merge: clear both child sets, then rebuild from the
    // payload, all inside one transaction so readers never see a recipe
    // with zero portions or tags.
    let result: Result<(), diesel::result::Error> = conn.transaction(|conn| {
        diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(id)))
            .execute(conn)?;
        diesel::delete(
            recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(id)),
        )
        .execute(conn)?;

        diesel::update(recipes::table.find(id))
            .set((
                recipes::name.eq(&request.name),
                recipes::text.eq(&request.text),
                recipes::image.eq(image.as_slice()),
                recipes::cooking_time.eq(request.cooking_time),
            ))
            .execute(conn)?;

        insert_portions_and_tags(conn, id, &portions, &request.tags)?;

        Ok(())
    });

    if let Err(e) = result {
        tracing::error!("Failed to update recipe: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to update recipe".to_string(),
            }),
        )
            .into_response();
    }

    match load_recipe_response(&mut conn, id, Some(user.id)) {
        Ok(Some(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(None) | Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to load updated recipe".to_string(),
            }),
        )
            .into_response(),
    }
}
