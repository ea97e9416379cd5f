//! Field-level and cross-field validation for recipe authoring and user
//! registration. Every rule runs before anything touches storage, and each
//! rule maps to its own error variant so the API layer can report the
//! exact violation.

use std::collections::HashSet;

use thiserror::Error;
use uuid::Uuid;

use crate::config::AppConfig;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecipeValidationError {
    #[error("Tag list is empty, contains duplicates, or references an unknown tag")]
    InvalidTagReference,

    #[error("Ingredient list is empty or contains the same ingredient twice")]
    DuplicatePortion,

    #[error("Ingredient amount {0} is outside the allowed range")]
    AmountOutOfRange(i32),

    #[error("Cooking time {0} is outside the allowed range")]
    CookingTimeOutOfRange(i32),

    #[error("The {0} field contains banned words")]
    ProfaneContent(&'static str),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username may only contain letters, digits and . _ + -")]
    InvalidCharset,

    #[error("Username contains banned words")]
    Banned,
}

/// An (ingredient, quantity) pair as submitted by the client.
#[derive(Debug, Clone, Copy)]
pub struct PortionInput {
    pub ingredient_id: Uuid,
    pub amount: i32,
}

/// The writable recipe fields, validated as one unit before commit.
#[derive(Debug)]
pub struct RecipeDraft<'a> {
    pub name: &'a str,
    pub text: &'a str,
    pub cooking_time: i32,
    pub portions: &'a [PortionInput],
    pub tag_ids: &'a [Uuid],
}

/// Checks a full recipe draft against the configured limits.
///
/// `known_tag_ids` is the subset of `draft.tag_ids` that resolved against
/// the tag catalog; the caller looks those up so this stays pure.
pub fn validate_recipe(
    config: &AppConfig,
    draft: &RecipeDraft,
    known_tag_ids: &HashSet<Uuid>,
) -> Result<(), RecipeValidationError> {
    let unique_tags: HashSet<Uuid> = draft.tag_ids.iter().copied().collect();
    if draft.tag_ids.is_empty()
        || unique_tags.len() != draft.tag_ids.len()
        || !unique_tags.is_subset(known_tag_ids)
    {
        return Err(RecipeValidationError::InvalidTagReference);
    }

    let unique_ingredients: HashSet<Uuid> =
        draft.portions.iter().map(|p| p.ingredient_id).collect();
    if draft.portions.is_empty() || unique_ingredients.len() != draft.portions.len() {
        return Err(RecipeValidationError::DuplicatePortion);
    }

    for portion in draft.portions {
        if portion.amount < 1 || portion.amount > config.limits.max_ingredient_amount {
            return Err(RecipeValidationError::AmountOutOfRange(portion.amount));
        }
    }

    if draft.cooking_time < config.limits.min_cooking_time
        || draft.cooking_time > config.limits.max_cooking_time
    {
        return Err(RecipeValidationError::CookingTimeOutOfRange(
            draft.cooking_time,
        ));
    }

    if contains_banned_word(&config.banned_words, draft.name) {
        return Err(RecipeValidationError::ProfaneContent("name"));
    }
    if contains_banned_word(&config.banned_words, draft.text) {
        return Err(RecipeValidationError::ProfaneContent("text"));
    }

    Ok(())
}

/// Case-insensitive whole-word match against the banned list. Words are
/// runs of alphanumeric characters; punctuation never hides a match.
pub fn contains_banned_word(banned: &HashSet<String>, text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .any(|w| banned.contains(&w.to_lowercase()))
}

/// Username charset rule plus the banned-word check.
pub fn validate_username(config: &AppConfig, username: &str) -> Result<(), UsernameError> {
    let charset_ok = !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-'));
    if !charset_ok {
        return Err(UsernameError::InvalidCharset);
    }

    if contains_banned_word(&config.banned_words, username) {
        return Err(UsernameError::Banned);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::default()
    }

    fn draft<'a>(
        cooking_time: i32,
        portions: &'a [PortionInput],
        tag_ids: &'a [Uuid],
    ) -> RecipeDraft<'a> {
        RecipeDraft {
            name: "Shakshuka",
            text: "Simmer tomatoes, crack the eggs on top.",
            cooking_time,
            portions,
            tag_ids,
        }
    }

    fn portion(ingredient_id: Uuid, amount: i32) -> PortionInput {
        PortionInput {
            ingredient_id,
            amount,
        }
    }

    #[test]
    fn accepts_a_well_formed_draft() {
        let tag = Uuid::new_v4();
        let known = HashSet::from([tag]);
        let portions = [portion(Uuid::new_v4(), 200)];
        let tags = [tag];

        assert_eq!(
            validate_recipe(&config(), &draft(30, &portions, &tags), &known),
            Ok(())
        );
    }

    #[test]
    fn rejects_empty_tag_list() {
        let portions = [portion(Uuid::new_v4(), 200)];

        assert_eq!(
            validate_recipe(&config(), &draft(30, &portions, &[]), &HashSet::new()),
            Err(RecipeValidationError::InvalidTagReference)
        );
    }

    #[test]
    fn rejects_duplicate_tags() {
        let tag = Uuid::new_v4();
        let known = HashSet::from([tag]);
        let portions = [portion(Uuid::new_v4(), 200)];
        let tags = [tag, tag];

        assert_eq!(
            validate_recipe(&config(), &draft(30, &portions, &tags), &known),
            Err(RecipeValidationError::InvalidTagReference)
        );
    }

    #[test]
    fn rejects_unknown_tag() {
        let known = HashSet::from([Uuid::new_v4()]);
        let portions = [portion(Uuid::new_v4(), 200)];
        let tags = [Uuid::new_v4()];

        assert_eq!(
            validate_recipe(&config(), &draft(30, &portions, &tags), &known),
            Err(RecipeValidationError::InvalidTagReference)
        );
    }

    #[test]
    fn rejects_duplicate_ingredient() {
        let tag = Uuid::new_v4();
        let known = HashSet::from([tag]);
        let shared = Uuid::new_v4();
        let portions = [portion(shared, 100), portion(shared, 50)];
        let tags = [tag];

        assert_eq!(
            validate_recipe(&config(), &draft(30, &portions, &tags), &known),
            Err(RecipeValidationError::DuplicatePortion)
        );
    }

    #[test]
    fn rejects_empty_portion_list() {
        let tag = Uuid::new_v4();
        let known = HashSet::from([tag]);
        let tags = [tag];

        assert_eq!(
            validate_recipe(&config(), &draft(30, &[], &tags), &known),
            Err(RecipeValidationError::DuplicatePortion)
        );
    }

    #[test]
    fn amount_bounds_are_closed() {
        let tag = Uuid::new_v4();
        let known = HashSet::from([tag]);
        let tags = [tag];

        for amount in [1, 5000] {
            let portions = [portion(Uuid::new_v4(), amount)];
            assert_eq!(
                validate_recipe(&config(), &draft(30, &portions, &tags), &known),
                Ok(()),
                "amount {amount} should be accepted"
            );
        }

        for amount in [0, -3, 5001] {
            let portions = [portion(Uuid::new_v4(), amount)];
            assert_eq!(
                validate_recipe(&config(), &draft(30, &portions, &tags), &known),
                Err(RecipeValidationError::AmountOutOfRange(amount))
            );
        }
    }

    #[test]
    fn cooking_time_bounds_are_closed() {
        let tag = Uuid::new_v4();
        let known = HashSet::from([tag]);
        let portions = [portion(Uuid::new_v4(), 200)];
        let tags = [tag];

        for minutes in [1, 600] {
            assert_eq!(
                validate_recipe(&config(), &draft(minutes, &portions, &tags), &known),
                Ok(()),
                "cooking time {minutes} should be accepted"
            );
        }

        for minutes in [0, 601] {
            assert_eq!(
                validate_recipe(&config(), &draft(minutes, &portions, &tags), &known),
                Err(RecipeValidationError::CookingTimeOutOfRange(minutes))
            );
        }
    }

    #[test]
    fn banned_word_in_name_is_rejected() {
        let tag = Uuid::new_v4();
        let known = HashSet::from([tag]);
        let portions = [portion(Uuid::new_v4(), 200)];
        let tags = [tag];
        let bad = RecipeDraft {
            name: "Damn good stew",
            ..draft(30, &portions, &tags)
        };

        assert_eq!(
            validate_recipe(&config(), &bad, &known),
            Err(RecipeValidationError::ProfaneContent("name"))
        );
    }

    #[test]
    fn banned_match_is_whole_word_and_case_insensitive() {
        let banned: HashSet<String> = ["damn".to_string()].into();

        assert!(contains_banned_word(&banned, "DAMN tasty"));
        assert!(contains_banned_word(&banned, "well, damn."));
        // Substrings of longer words do not match.
        assert!(!contains_banned_word(&banned, "damnation"));
        assert!(!contains_banned_word(&banned, "a perfectly fine text"));
    }

    #[test]
    fn username_rules() {
        let config = config();

        assert_eq!(validate_username(&config, "chef_anna-1"), Ok(()));
        assert_eq!(validate_username(&config, "anna.k+test"), Ok(()));
        assert_eq!(
            validate_username(&config, ""),
            Err(UsernameError::InvalidCharset)
        );
        assert_eq!(
            validate_username(&config, "anna k"),
            Err(UsernameError::InvalidCharset)
        );
        assert_eq!(
            validate_username(&config, "admin"),
            Err(UsernameError::Banned)
        );
    }
}
