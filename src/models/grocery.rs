use serde::{Deserialize, Serialize};

use crate::grocery::pricing::round_cents;
use crate::grocery::CONSOLIDATION_SAVINGS_PER_ITEM;

/// A priced shopping-list line, one per unique ingredient name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub price: f64,
}

/// Totals derived from a finished list. Never edited by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrocerySummary {
    pub total_items: usize,
    pub total_cost: f64,
    pub estimated_savings: f64,
    pub ingredients_consolidated: usize,
}

impl GrocerySummary {
    /// Summarize `items`, given how many ingredient lines went into them.
    pub fn from_items(items: &[GroceryItem], occurrences: usize) -> Self {
        let consolidated = occurrences.saturating_sub(items.len());
        let total_cost: f64 = items.iter().map(|i| i.price).sum();

        Self {
            total_items: items.len(),
            total_cost: round_cents(total_cost),
            estimated_savings: round_cents(consolidated as f64 * CONSOLIDATION_SAVINGS_PER_ITEM),
            ingredients_consolidated: consolidated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    pub items: Vec<GroceryItem>,
    pub summary: GrocerySummary,
}
