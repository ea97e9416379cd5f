pub mod get;
pub mod list;

use crate::models::Tag;
use crate::AppState;
use axum::routing::get as get_method;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/tags endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get_method(list::list_tags))
        .route("/{id}", get_method(get::get_tag))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
    /// Hex color from the fixed palette, e.g. "#49B64E"
    pub color: String,
    pub slug: String,
}

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
            color: tag.color.clone(),
            slug: tag.slug.clone(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_tags, get::get_tag),
    components(schemas(TagResponse))
)]
pub struct ApiDoc;
