use std::cmp::Ordering;
use std::collections::HashMap;

use crate::grocery::units::UnitConversions;
use crate::grocery::BULK_SAVINGS_PER_ITEM;
use crate::models::{GroceryItem, Ingredient};

/// Round a quantity up to one decimal place.
///
/// Never returns less than `quantity`, even when `quantity * 10` loses the
/// last bit to float rounding.
pub fn round_quantity(quantity: f64) -> f64 {
    let tenths = (quantity * 10.0).ceil();
    let rounded = tenths / 10.0;
    if rounded < quantity {
        (tenths + 1.0) / 10.0
    } else {
        rounded
    }
}

/// Merge ingredients sharing a case-insensitive name.
///
/// Output keeps first-seen order; `merge` decides how an incoming quantity is
/// added onto the existing line.
fn consolidate_with<'a, I, F>(ingredients: I, mut merge: F) -> Vec<Ingredient>
where
    I: IntoIterator<Item = &'a Ingredient>,
    F: FnMut(&Ingredient, &Ingredient) -> f64,
{
    let mut merged: Vec<Ingredient> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for ingredient in ingredients {
        match positions.get(&ingredient.key()) {
            Some(&pos) => {
                let added = merge(&merged[pos], ingredient);
                merged[pos].quantity += added;
            }
            None => {
                positions.insert(ingredient.key(), merged.len());
                merged.push(ingredient.clone());
            }
        }
    }

    merged
}

/// Group by name and sum quantities verbatim.
///
/// Units are not reconciled: the first-seen unit and category win.
pub fn consolidate_exact<'a, I>(ingredients: I) -> Vec<Ingredient>
where
    I: IntoIterator<Item = &'a Ingredient>,
{
    consolidate_with(ingredients, |_, incoming| incoming.quantity)
}

/// Group by name, converting each incoming quantity into the first-seen unit.
///
/// Pairs missing from `conversions` are added unconverted.
pub fn consolidate_unit_aware<'a, I>(ingredients: I, conversions: &UnitConversions) -> Vec<Ingredient>
where
    I: IntoIterator<Item = &'a Ingredient>,
{
    consolidate_with(ingredients, |existing, incoming| {
        conversions.convert(incoming.quantity, &incoming.unit, &existing.unit)
    })
}

/// Bulk-buying estimate for the optimizer path: 0.15 per line removed.
///
/// A unit count, deliberately not rounded to cents.
pub fn bulk_savings(original_count: usize, consolidated_count: usize) -> f64 {
    original_count.saturating_sub(consolidated_count) as f64 * BULK_SAVINGS_PER_ITEM
}

/// Case-folded comparison approximating a locale collation.
///
/// Strings equal up to case put the lowercase form first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Stable sort of a grocery list by category.
pub fn sort_by_category(items: &mut [GroceryItem]) {
    items.sort_by(|a, b| locale_cmp(&a.category, &b.category));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ing(name: &str, quantity: f64, unit: &str) -> Ingredient {
        Ingredient::new(name, "misc", quantity, unit)
    }

    #[test]
    fn test_round_quantity_up_to_tenth() {
        assert_eq!(round_quantity(5.0), 5.0);
        assert_eq!(round_quantity(2.41), 2.5);
        assert_eq!(round_quantity(0.3), 0.3);
        assert_eq!(round_quantity(0.75), 0.8);
        assert_eq!(round_quantity(round_quantity(1.234)), round_quantity(1.234));
    }

    #[test]
    fn test_round_quantity_never_snaps_down() {
        assert_eq!(round_quantity(0.3000000001), 0.4);
        // 13.700000000000001 * 10 is exactly 137.0 in f64.
        let q = 13.700000000000001;
        assert!(round_quantity(q) >= q);
        assert_eq!(round_quantity(q), 13.8);
    }

    #[test]
    fn test_round_quantity_is_idempotent_on_tenths() {
        for n in 0..5000 {
            let q = n as f64 / 10.0;
            assert_eq!(round_quantity(q), q);
        }
    }

    #[test]
    fn test_round_quantity_bounds() {
        for i in 0..2000 {
            let q = i as f64 * 0.0137;
            let r = round_quantity(q);
            assert!(r >= q, "{} rounded down to {}", q, r);
            assert!(r - q < 0.1, "{} rounded too far to {}", q, r);
        }
    }

    #[test]
    fn test_exact_sums_by_name() {
        let items = vec![ing("eggs", 2.0, "whole"), ing("Eggs", 3.0, "whole")];
        let merged = consolidate_exact(&items);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "eggs");
        assert_eq!(merged[0].quantity, 5.0);
        assert_eq!(merged[0].unit, "whole");
    }

    #[test]
    fn test_exact_ignores_unit_mismatch() {
        let items = vec![ing("milk", 1.0, "cup"), ing("milk", 2.0, "tbsp")];
        let merged = consolidate_exact(&items);
        assert_eq!(merged[0].quantity, 3.0);
        assert_eq!(merged[0].unit, "cup");
    }

    #[test]
    fn test_exact_is_idempotent() {
        let items = vec![
            ing("garlic", 2.0, "cloves"),
            ing("onion", 0.5, "whole"),
            ing("garlic", 3.0, "cloves"),
        ];
        let once = consolidate_exact(&items);
        let twice = consolidate_exact(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unit_aware_converts_into_first_unit() {
        let conversions = UnitConversions::default();
        let items = vec![ing("honey", 1.0, "tbsp"), ing("honey", 3.0, "tsp")];
        let merged = consolidate_unit_aware(&items, &conversions);
        assert!((merged[0].quantity - 2.0).abs() < 1e-9);
        assert_eq!(merged[0].unit, "tbsp");
    }

    #[test]
    fn test_unit_aware_unknown_pair_passes_through() {
        let conversions = UnitConversions::default();
        let items = vec![ing("garlic", 2.0, "cloves"), ing("garlic", 1.0, "tbsp")];
        let merged = consolidate_unit_aware(&items, &conversions);
        assert_eq!(merged[0].quantity, 3.0);
    }

    #[test]
    fn test_bulk_savings_is_unrounded() {
        assert!((bulk_savings(9, 6) - 0.45).abs() < 1e-9);
        assert_eq!(bulk_savings(3, 5), 0.0);
    }

    #[test]
    fn test_sort_by_category_is_stable_and_case_folded() {
        let mut items: Vec<GroceryItem> = [("b", "vegetables"), ("a", "Dairy"), ("c", "dairy"), ("d", "carbs")]
            .iter()
            .map(|(name, category)| GroceryItem {
                name: name.to_string(),
                quantity: 1.0,
                unit: "whole".to_string(),
                category: category.to_string(),
                price: 1.0,
            })
            .collect();
        sort_by_category(&mut items);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["d", "c", "a", "b"]);
    }

    #[test]
    fn test_locale_cmp_lowercase_first() {
        assert_eq!(locale_cmp("dairy", "Dairy"), Ordering::Less);
        assert_eq!(locale_cmp("Dairy", "dairy"), Ordering::Greater);
        assert_eq!(locale_cmp("Carbs", "dairy"), Ordering::Less);
        assert_eq!(locale_cmp("produce", "produce"), Ordering::Equal);
    }
}
