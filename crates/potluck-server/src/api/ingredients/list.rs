use super::IngredientResponse;
use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Ingredient;
use crate::schema::ingredients;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    responses(
        (status = 200, description = "The ingredient catalog, ordered by name", body = [IngredientResponse])
    )
)]
pub async fn list_ingredients(State(state): State<AppState>) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    match ingredients::table
        .order(ingredients::name.asc())
        .select(Ingredient::as_select())
        .load::<Ingredient>(&mut conn)
    {
        Ok(rows) => {
            let ingredients: Vec<IngredientResponse> =
                rows.iter().map(IngredientResponse::from).collect();
            (StatusCode::OK, Json(ingredients)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch ingredients: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch ingredients".to_string(),
                }),
            )
                .into_response()
        }
    }
}
