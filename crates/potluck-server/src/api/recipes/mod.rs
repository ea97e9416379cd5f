pub mod create;
pub mod delete;
pub mod download_shopping_cart;
pub mod favorite;
pub mod get;
pub mod list;
pub mod shopping_cart;
pub mod update;

use crate::api::tags::TagResponse;
use crate::api::users::{user_response, UserResponse};
use crate::models::{Recipe, Tag, User};
use crate::schema::{favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_cart_entries, tags, users};
use crate::validation::PortionInput;
use crate::AppState;
use axum::routing::{get as get_method, post};
use axum::Router;
use base64::Engine;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/recipes endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get_method(list::list_recipes).post(create::create_recipe),
        )
        .route(
            "/download-shopping-cart",
            get_method(download_shopping_cart::download_shopping_cart),
        )
        .route(
            "/{id}",
            get_method(get::get_recipe)
                .patch(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route(
            "/{id}/favorite",
            post(favorite::favorite_recipe).delete(favorite::unfavorite_recipe),
        )
        .route(
            "/{id}/shopping-cart",
            post(shopping_cart::add_to_cart).delete(shopping_cart::remove_from_cart),
        )
}

/// A portion joined with its catalog ingredient.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PortionResponse {
    /// Ingredient ID
    pub id: Uuid,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// The fully hydrated recipe representation returned by every read and by
/// successful create/update. The two relation flags are computed for the
/// viewing user and are `false` for anonymous viewers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<PortionResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    /// Base64-encoded image bytes
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

/// Compact recipe representation embedded in favorite/cart/subscription
/// responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeShortResponse {
    pub id: Uuid,
    pub name: String,
    /// Base64-encoded image bytes
    pub image: String,
    pub cooking_time: i32,
}

impl From<&Recipe> for RecipeShortResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: base64::engine::general_purpose::STANDARD.encode(&recipe.image),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Builds the hydrated representation for an already-loaded recipe row.
pub(crate) fn hydrate_recipe(
    conn: &mut PgConnection,
    recipe: &Recipe,
    author: &User,
    viewer: Option<Uuid>,
) -> QueryResult<RecipeResponse> {
    let portions: Vec<PortionResponse> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq(recipe.id))
        .order(ingredients::name.asc())
        .select((
            ingredients::id,
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load::<(Uuid, String, String, i32)>(conn)?
        .into_iter()
        .map(|(id, name, measurement_unit, amount)| PortionResponse {
            id,
            name,
            measurement_unit,
            amount,
        })
        .collect();

    let recipe_tag_rows: Vec<Tag> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq(recipe.id))
        .order(tags::name.asc())
        .select(Tag::as_select())
        .load(conn)?;

    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(viewer_id) => (
            favorites::table
                .find((viewer_id, recipe.id))
                .select(favorites::user_id)
                .first::<Uuid>(conn)
                .optional()?
                .is_some(),
            shopping_cart_entries::table
                .find((viewer_id, recipe.id))
                .select(shopping_cart_entries::user_id)
                .first::<Uuid>(conn)
                .optional()?
                .is_some(),
        ),
        None => (false, false),
    };

    Ok(RecipeResponse {
        id: recipe.id,
        tags: recipe_tag_rows.iter().map(TagResponse::from).collect(),
        author: user_response(conn, author, viewer)?,
        ingredients: portions,
        is_favorited,
        is_in_shopping_cart,
        name: recipe.name.clone(),
        image: base64::engine::general_purpose::STANDARD.encode(&recipe.image),
        text: recipe.text.clone(),
        cooking_time: recipe.cooking_time,
        created_at: recipe.created_at,
    })
}

/// Fetches a recipe with its author and builds the hydrated
/// representation. Returns `Ok(None)` when the recipe does not exist.
pub(crate) fn load_recipe_response(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    viewer: Option<Uuid>,
) -> QueryResult<Option<RecipeResponse>> {
    let row: Option<(Recipe, User)> = recipes::table
        .inner_join(users::table)
        .filter(recipes::id.eq(recipe_id))
        .select((Recipe::as_select(), User::as_select()))
        .first(conn)
        .optional()?;

    match row {
        Some((recipe, author)) => Ok(Some(hydrate_recipe(conn, &recipe, &author, viewer)?)),
        None => Ok(None),
    }
}

/// Inserts the full portion and tag sets for a recipe. Runs inside the
/// caller's transaction; on update the caller clears the old sets first.
pub(crate) fn insert_portions_and_tags(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    portions: &[PortionInput],
    tag_ids: &[Uuid],
) -> Result<(), diesel::result::Error> {
    use crate::models::{NewRecipeIngredient, NewRecipeTag};

    let portion_rows: Vec<NewRecipeIngredient> = portions
        .iter()
        .map(|p| NewRecipeIngredient {
            recipe_id,
            ingredient_id: p.ingredient_id,
            amount: p.amount,
        })
        .collect();
    diesel::insert_into(recipe_ingredients::table)
        .values(&portion_rows)
        .execute(conn)?;

    let tag_rows: Vec<NewRecipeTag> = tag_ids
        .iter()
        .map(|&tag_id| NewRecipeTag { recipe_id, tag_id })
        .collect();
    diesel::insert_into(recipe_tags::table)
        .values(&tag_rows)
        .execute(conn)?;

    Ok(())
}

/// Resolves the catalog ids for a requested tag set.
pub(crate) fn known_tag_ids(
    conn: &mut PgConnection,
    requested: &[Uuid],
) -> QueryResult<std::collections::HashSet<Uuid>> {
    Ok(tags::table
        .filter(tags::id.eq_any(requested))
        .select(tags::id)
        .load::<Uuid>(conn)?
        .into_iter()
        .collect())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        get::get_recipe,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
        favorite::favorite_recipe,
        favorite::unfavorite_recipe,
        shopping_cart::add_to_cart,
        shopping_cart::remove_from_cart,
        download_shopping_cart::download_shopping_cart,
    ),
    components(schemas(
        RecipeResponse,
        RecipeShortResponse,
        PortionResponse,
        create::CreateRecipeRequest,
        create::PortionRequest,
        update::UpdateRecipeRequest,
    ))
)]
pub struct ApiDoc;
