pub mod get;
pub mod me;
pub mod subscribe;
pub mod subscriptions;

use crate::models::User;
use crate::relations;
use crate::AppState;
use axum::routing::{get as get_method, post};
use axum::Router;
use diesel::prelude::*;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/users endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get_method(me::me))
        .route("/subscriptions", get_method(subscriptions::list_subscriptions))
        .route("/{id}", get_method(get::get_user))
        .route(
            "/{id}/subscribe",
            post(subscribe::subscribe_user).delete(subscribe::unsubscribe_user),
        )
}

/// Public profile representation; `is_subscribed` is computed for the
/// viewing user and is never true for the viewer's own profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

pub(crate) fn user_response(
    conn: &mut PgConnection,
    user: &User,
    viewer: Option<Uuid>,
) -> QueryResult<UserResponse> {
    let is_subscribed = match viewer {
        Some(viewer_id) => relations::is_subscribed(conn, viewer_id, user.id)?,
        None => false,
    };

    Ok(UserResponse {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        is_subscribed,
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        get::get_user,
        me::me,
        subscribe::subscribe_user,
        subscribe::unsubscribe_user,
        subscriptions::list_subscriptions,
    ),
    components(schemas(UserResponse, subscriptions::SubscriptionResponse))
)]
pub struct ApiDoc;
