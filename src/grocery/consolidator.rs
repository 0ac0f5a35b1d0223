use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::PricingConfig;
use crate::error::{PlannerError, Result};
use crate::grocery::consolidate::{consolidate_exact, round_quantity, sort_by_category};
use crate::grocery::pricing::PriceTable;
use crate::grocery::search::{HttpProductSearch, OfflineProductSearch, ProductSearch};
use crate::models::{GroceryItem, GroceryList, GrocerySummary, Ingredient, Recipe, WeeklyPlan};

/// Default per-lookup timeout.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(2500);

/// Turns recipes into a priced, consolidated grocery list.
///
/// Live prices come from the injected [`ProductSearch`]; anything it cannot
/// answer in time is priced from the static [`PriceTable`].
#[derive(Clone)]
pub struct GroceryConsolidator {
    search: Arc<dyn ProductSearch>,
    prices: PriceTable,
    lookup_timeout: Duration,
}

impl GroceryConsolidator {
    pub fn new(search: Arc<dyn ProductSearch>) -> Self {
        Self {
            search,
            prices: PriceTable::default(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Consolidator that prices everything from the static table.
    pub fn offline() -> Self {
        Self::new(Arc::new(OfflineProductSearch))
    }

    /// HTTP search when an endpoint is configured, offline otherwise.
    pub fn from_config(config: &PricingConfig) -> Result<Self> {
        let consolidator = match &config.endpoint {
            Some(endpoint) => {
                info!(endpoint = %endpoint, "Using HTTP product search");
                let search = HttpProductSearch::new(endpoint.clone(), config.default_postal_code.clone())?;
                Self::new(Arc::new(search))
            }
            None => {
                info!("No product search endpoint configured, using static prices");
                Self::offline()
            }
        };
        Ok(consolidator.with_timeout(Duration::from_millis(config.timeout_ms)))
    }

    pub fn with_price_table(mut self, prices: PriceTable) -> Self {
        self.prices = prices;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Grocery list for every meal in `plan`.
    pub async fn build_for_plan(
        &self,
        plan: &WeeklyPlan,
        postal_code: Option<&str>,
        cancel: &CancellationToken,
    ) -> GroceryList {
        self.build_list(plan.recipes(), postal_code, cancel).await
    }

    /// Merge every ingredient of `recipes` by name, price each unique line and
    /// sort the result by category.
    ///
    /// Price lookups run concurrently. A lookup that fails, times out or is
    /// cancelled falls back to the static table, so this never fails.
    pub async fn build_list<'a, I>(
        &self,
        recipes: I,
        postal_code: Option<&str>,
        cancel: &CancellationToken,
    ) -> GroceryList
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let occurrences: Vec<&Ingredient> = recipes
            .into_iter()
            .flat_map(|recipe| recipe.ingredients.iter())
            .collect();
        let merged = consolidate_exact(occurrences.iter().copied());

        let lookups = merged.iter().map(|ingredient| async move {
            let price = self
                .resolve_price(&ingredient.name, ingredient.quantity, postal_code, cancel)
                .await;
            GroceryItem {
                name: ingredient.name.clone(),
                quantity: round_quantity(ingredient.quantity),
                unit: ingredient.unit.clone(),
                category: ingredient.category.clone(),
                price,
            }
        });
        let mut items = join_all(lookups).await;

        sort_by_category(&mut items);
        let summary = GrocerySummary::from_items(&items, occurrences.len());
        info!(
            items = summary.total_items,
            consolidated = summary.ingredients_consolidated,
            total_cost = summary.total_cost,
            "Built grocery list"
        );

        GroceryList { items, summary }
    }

    /// Live price for `name` if a positive one arrives in time, else the
    /// static estimate for the merged, unrounded `quantity`.
    pub async fn resolve_price(
        &self,
        name: &str,
        quantity: f64,
        postal_code: Option<&str>,
        cancel: &CancellationToken,
    ) -> f64 {
        match self.live_price(name, postal_code, cancel).await {
            Ok(Some(price)) => price,
            Ok(None) => {
                debug!(ingredient = name, "No usable live price, using static estimate");
                self.prices.estimate(name, quantity)
            }
            Err(e) => {
                warn!(error = %e, "Price lookup failed");
                self.prices.estimate(name, quantity)
            }
        }
    }

    async fn live_price(
        &self,
        name: &str,
        postal_code: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<f64>> {
        let lookup_failed = |reason: String| PlannerError::PriceLookupFailed {
            ingredient: name.to_string(),
            reason,
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(lookup_failed("cancelled".to_string())),
            outcome = tokio::time::timeout(self.lookup_timeout, self.search.search(name, postal_code)) => {
                let products = outcome
                    .map_err(|_| lookup_failed(format!("timed out after {:?}", self.lookup_timeout)))?
                    .map_err(|e| match e {
                        failed @ PlannerError::PriceLookupFailed { .. } => failed,
                        other => lookup_failed(other.to_string()),
                    })?;
                Ok(products
                    .first()
                    .map(|product| product.price)
                    .filter(|price| price.is_finite() && *price > 0.0))
            }
        }
    }
}
