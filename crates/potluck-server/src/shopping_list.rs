//! Shopping-list aggregation.
//!
//! Walks every recipe in a user's shopping cart, sums portion amounts by
//! catalog identity (ingredient name + measurement unit), and hands the
//! ordered line list to a [`DocumentRenderer`]. Two recipes that use
//! "flour/g" collapse into one line even though their portion rows are
//! distinct.

use std::collections::BTreeMap;

use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::{ingredients, recipe_ingredients, shopping_cart_entries};

/// One aggregated line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

/// A raw portion row joined to its catalog ingredient.
#[derive(Queryable, Debug)]
pub struct PortionRow {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Loads every portion of every recipe in the user's cart.
pub fn load_cart_portions(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<Vec<PortionRow>> {
    recipe_ingredients::table
        .inner_join(ingredients::table)
        .inner_join(
            shopping_cart_entries::table
                .on(shopping_cart_entries::recipe_id.eq(recipe_ingredients::recipe_id)),
        )
        .filter(shopping_cart_entries::user_id.eq(user_id))
        .select((
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load(conn)
}

/// Groups portions by catalog identity, sums amounts, and yields lines
/// ordered by ingredient name ascending (case-sensitive, matching catalog
/// storage order). The result is consumed once by the renderer.
pub fn aggregate(rows: Vec<PortionRow>) -> impl Iterator<Item = ShoppingListLine> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for row in rows {
        *totals
            .entry((row.name, row.measurement_unit))
            .or_insert(0) += i64::from(row.amount);
    }

    totals
        .into_iter()
        .map(|((name, measurement_unit), total_amount)| ShoppingListLine {
            name,
            measurement_unit,
            total_amount,
        })
}

/// Builds the full shopping list for a user: every cart recipe's portions,
/// summed per catalog ingredient, ordered by name.
pub fn build_shopping_list(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> QueryResult<impl Iterator<Item = ShoppingListLine>> {
    Ok(aggregate(load_cart_portions(conn, user_id)?))
}

/// Renders an aggregated line list into downloadable document bytes.
///
/// The core guarantees ordering, summing and deduplication; layout and
/// file format belong to the renderer. Line numbers are 1-based and
/// assigned at render time, never stored.
pub trait DocumentRenderer {
    fn content_type(&self) -> &'static str;
    fn filename(&self) -> &'static str;
    fn render(&self, title: &str, lines: &mut dyn Iterator<Item = ShoppingListLine>) -> Vec<u8>;
}

/// Plain-text renderer: a title line followed by numbered entries.
pub struct PlainTextRenderer;

impl DocumentRenderer for PlainTextRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn filename(&self) -> &'static str {
        "shopping_list.txt"
    }

    fn render(&self, title: &str, lines: &mut dyn Iterator<Item = ShoppingListLine>) -> Vec<u8> {
        let mut out = String::new();
        out.push_str(title);
        out.push('\n');
        out.push('\n');

        for (number, line) in lines.enumerate() {
            out.push_str(&format!(
                "{}. {} - {} {}\n",
                number + 1,
                line.name,
                line.total_amount,
                line.measurement_unit
            ));
        }

        out.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, unit: &str, amount: i32) -> PortionRow {
        PortionRow {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }

    #[test]
    fn sums_by_catalog_identity_across_recipes() {
        // Recipe A: flour 200g, egg 2pc. Recipe B: flour 100g, sugar 50g.
        let rows = vec![
            row("flour", "g", 200),
            row("egg", "pc", 2),
            row("flour", "g", 100),
            row("sugar", "g", 50),
        ];

        let lines: Vec<ShoppingListLine> = aggregate(rows).collect();

        assert_eq!(
            lines,
            vec![
                ShoppingListLine {
                    name: "egg".to_string(),
                    measurement_unit: "pc".to_string(),
                    total_amount: 2,
                },
                ShoppingListLine {
                    name: "flour".to_string(),
                    measurement_unit: "g".to_string(),
                    total_amount: 300,
                },
                ShoppingListLine {
                    name: "sugar".to_string(),
                    measurement_unit: "g".to_string(),
                    total_amount: 50,
                },
            ]
        );
    }

    #[test]
    fn same_name_different_unit_stays_separate() {
        let rows = vec![row("milk", "ml", 200), row("milk", "g", 40)];

        let lines: Vec<ShoppingListLine> = aggregate(rows).collect();

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.name == "milk"));
    }

    #[test]
    fn ordering_is_case_sensitive_ordinal() {
        let rows = vec![row("zucchini", "g", 1), row("Apple", "pc", 1), row("apple", "pc", 1)];

        let names: Vec<String> = aggregate(rows).map(|l| l.name).collect();

        // Uppercase sorts before lowercase in ordinal order.
        assert_eq!(names, vec!["Apple", "apple", "zucchini"]);
    }

    #[test]
    fn totals_survive_i32_overflow() {
        let rows = vec![row("flour", "g", i32::MAX), row("flour", "g", i32::MAX)];

        let lines: Vec<ShoppingListLine> = aggregate(rows).collect();

        assert_eq!(lines[0].total_amount, 2 * i64::from(i32::MAX));
    }

    #[test]
    fn empty_cart_renders_zero_lines() {
        let lines: Vec<ShoppingListLine> = aggregate(Vec::new()).collect();
        assert!(lines.is_empty());

        let bytes = PlainTextRenderer.render("Shopping list", &mut lines.into_iter());
        assert_eq!(String::from_utf8(bytes).unwrap(), "Shopping list\n\n");
    }

    #[test]
    fn renderer_numbers_lines_from_one() {
        let rows = vec![
            row("egg", "pc", 2),
            row("flour", "g", 300),
            row("sugar", "g", 50),
        ];

        let bytes = PlainTextRenderer.render("Shopping list", &mut aggregate(rows));
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "Shopping list\n\n1. egg - 2 pc\n2. flour - 300 g\n3. sugar - 50 g\n"
        );
    }
}
