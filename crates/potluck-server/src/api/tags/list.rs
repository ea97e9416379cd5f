use super::TagResponse;
use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Tag;
use crate::schema::tags;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    responses(
        (status = 200, description = "All tags, ordered by name", body = [TagResponse])
    )
)]
pub async fn list_tags(State(state): State<AppState>) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    match tags::table
        .order(tags::name.asc())
        .select(Tag::as_select())
        .load::<Tag>(&mut conn)
    {
        Ok(rows) => {
            let tags: Vec<TagResponse> = rows.iter().map(TagResponse::from).collect();
            (StatusCode::OK, Json(tags)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch tags: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch tags".to_string(),
                }),
            )
                .into_response()
        }
    }
}
