pub mod consolidate;
pub mod consolidator;
pub mod pricing;
pub mod search;
pub mod units;

/// Savings credited for every ingredient line merged away on the grocery list.
pub const CONSOLIDATION_SAVINGS_PER_ITEM: f64 = 2.5;

/// Bulk-buying estimate per line removed by the overlap optimizer.
pub const BULK_SAVINGS_PER_ITEM: f64 = 0.15;

pub use consolidate::{
    bulk_savings, consolidate_exact, consolidate_unit_aware, locale_cmp, round_quantity,
    sort_by_category,
};
pub use consolidator::{GroceryConsolidator, DEFAULT_LOOKUP_TIMEOUT};
pub use pricing::{round_cents, PriceTable, DEFAULT_UNIT_PRICE};
pub use search::{HttpProductSearch, OfflineProductSearch, Product, ProductSearch};
pub use units::{canonical_unit, UnitConversions};
