use crate::api::recipes::RecipeShortResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::{Recipe, User};
use crate::schema::{recipes, subscriptions, users};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// A followed author with their recipe count and a truncated recipe list.
/// `recipes_count` is the true total even when `recipes` is cut short by
/// `recipes_limit`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub recipes_count: i64,
    pub recipes: Vec<RecipeShortResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SubscriptionsParams {
    /// Maximum number of recipes to embed per author (unlimited if absent)
    pub recipes_limit: Option<i64>,
}

pub(super) fn author_entry(
    conn: &mut PgConnection,
    author: &User,
    recipes_limit: Option<i64>,
) -> QueryResult<SubscriptionResponse> {
    let recipes_count: i64 = recipes::table
        .filter(recipes::author_id.eq(author.id))
        .count()
        .get_result(conn)?;

    let mut query = recipes::table
        .filter(recipes::author_id.eq(author.id))
        .order(recipes::created_at.desc())
        .select(Recipe::as_select())
        .into_boxed();
    if let Some(limit) = recipes_limit {
        query = query.limit(limit.max(0));
    }
    let author_recipes: Vec<Recipe> = query.load(conn)?;

    Ok(SubscriptionResponse {
        id: author.id,
        email: author.email.clone(),
        username: author.username.clone(),
        first_name: author.first_name.clone(),
        last_name: author.last_name.clone(),
        is_subscribed: true,
        recipes_count,
        recipes: author_recipes.iter().map(RecipeShortResponse::from).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    tag = "users",
    params(SubscriptionsParams),
    responses(
        (status = 200, description = "Authors the caller follows", body = [SubscriptionResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_subscriptions(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SubscriptionsParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state);

    let authors: Vec<User> = match subscriptions::table
        .inner_join(users::table.on(users::id.eq(subscriptions::author_id)))
        .filter(subscriptions::follower_id.eq(user.id))
        .order(users::username.asc())
        .select(User::as_select())
        .load(&mut conn)
    {
        Ok(authors) => authors,
        Err(e) => {
            tracing::error!("Failed to fetch subscriptions: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch subscriptions".to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut entries = Vec::with_capacity(authors.len());
    for author in &authors {
        match author_entry(&mut conn, author, params.recipes_limit) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::error!("Failed to build subscription entry: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to fetch subscriptions".to_string(),
                    }),
                )
                    .into_response();
            }
        }
    }

    (StatusCode::OK, Json(entries)).into_response()
}
