use super::TagResponse;
use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Tag;
use crate::schema::tags;
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
    get,
    path = "/api/tags/{id}",
    tag = "tags",
    params(
        ("id" = Uuid, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag", body = TagResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    )
)]
pub async fn get_tag(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    match tags::table
        .find(id)
        .select(Tag::as_select())
        .first::<Tag>(&mut conn)
        .optional()
    {
        Ok(Some(tag)) => (StatusCode::OK, Json(TagResponse::from(&tag))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Tag not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch tag: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch tag".to_string(),
                }),
            )
                .into_response()
        }
    }
}
