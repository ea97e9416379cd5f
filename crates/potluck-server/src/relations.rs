//! Existence-only relation sets: favorites, shopping-cart entries and
//! subscriptions. Each is a unique (user, recipe) or (follower, author)
//! pair; adds and removes are individual row operations guarded by the
//! storage-level uniqueness constraint, so a concurrent duplicate insert
//! surfaces as [`RelationError::AlreadyExists`] rather than a raw
//! database error.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewFavorite, NewShoppingCartEntry, NewSubscription};
use crate::schema::{favorites, shopping_cart_entries, subscriptions};

#[derive(Error, Debug)]
pub enum RelationError {
    #[error("Entry already exists")]
    AlreadyExists,

    #[error("Entry not found")]
    NotFound,

    #[error("Subscribing to yourself is not allowed")]
    SelfSubscription,

    #[error(transparent)]
    Storage(#[from] DieselError),
}

fn map_insert_error(e: DieselError) -> RelationError {
    match e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RelationError::AlreadyExists
        }
        other => RelationError::Storage(other),
    }
}

pub fn add_favorite(conn: &mut PgConnection, user_id: Uuid, recipe_id: Uuid) -> Result<(), RelationError> {
    diesel::insert_into(favorites::table)
        .values(NewFavorite { user_id, recipe_id })
        .execute(conn)
        .map_err(map_insert_error)?;
    Ok(())
}

pub fn remove_favorite(
    conn: &mut PgConnection,
    user_id: Uuid,
    recipe_id: Uuid,
) -> Result<(), RelationError> {
    let deleted = diesel::delete(favorites::table.find((user_id, recipe_id))).execute(conn)?;
    if deleted == 0 {
        return Err(RelationError::NotFound);
    }
    Ok(())
}

pub fn add_cart_entry(
    conn: &mut PgConnection,
    user_id: Uuid,
    recipe_id: Uuid,
) -> Result<(), RelationError> {
    diesel::insert_into(shopping_cart_entries::table)
        .values(NewShoppingCartEntry { user_id, recipe_id })
        .execute(conn)
        .map_err(map_insert_error)?;
    Ok(())
}

pub fn remove_cart_entry(
    conn: &mut PgConnection,
    user_id: Uuid,
    recipe_id: Uuid,
) -> Result<(), RelationError> {
    let deleted =
        diesel::delete(shopping_cart_entries::table.find((user_id, recipe_id))).execute(conn)?;
    if deleted == 0 {
        return Err(RelationError::NotFound);
    }
    Ok(())
}

/// Creates a subscription. The self-check runs before any storage access;
/// the database CHECK constraint backs it up.
pub fn subscribe(
    conn: &mut PgConnection,
    follower_id: Uuid,
    author_id: Uuid,
) -> Result<(), RelationError> {
    if follower_id == author_id {
        return Err(RelationError::SelfSubscription);
    }

    diesel::insert_into(subscriptions::table)
        .values(NewSubscription {
            follower_id,
            author_id,
        })
        .execute(conn)
        .map_err(map_insert_error)?;
    Ok(())
}

pub fn unsubscribe(
    conn: &mut PgConnection,
    follower_id: Uuid,
    author_id: Uuid,
) -> Result<(), RelationError> {
    let deleted =
        diesel::delete(subscriptions::table.find((follower_id, author_id))).execute(conn)?;
    if deleted == 0 {
        return Err(RelationError::NotFound);
    }
    Ok(())
}

/// True when `follower` is subscribed to `author`. Never true for the
/// self-profile, regardless of stored state.
pub fn is_subscribed(conn: &mut PgConnection, follower_id: Uuid, author_id: Uuid) -> QueryResult<bool> {
    if follower_id == author_id {
        return Ok(false);
    }

    Ok(subscriptions::table
        .find((follower_id, author_id))
        .select(subscriptions::follower_id)
        .first::<Uuid>(conn)
        .optional()?
        .is_some())
}
