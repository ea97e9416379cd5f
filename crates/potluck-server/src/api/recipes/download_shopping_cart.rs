use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::shopping_list::{build_shopping_list, DocumentRenderer, PlainTextRenderer};
use crate::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

const DOCUMENT_TITLE: &str = "Shopping list";

#[utoipa::path(
    get,
    path = "/api/recipes/download-shopping-cart",
    tag = "recipes",
    responses(
        (status = 200, description = "Aggregated shopping list document", content_type = "text/plain"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn download_shopping_cart(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    let mut lines = match build_shopping_list(&mut conn, user.id) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::error!("Failed to build shopping list: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to build shopping list".to_string(),
                }),
            )
                .into_response();
        }
    };

    // An empty cart still yields a valid (zero-line) document
    let renderer = PlainTextRenderer;
    let document = renderer.render(DOCUMENT_TITLE, &mut lines);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, renderer.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", renderer.filename()),
        )
        .body(Body::from(document))
        .unwrap()
        .into_response()
}
