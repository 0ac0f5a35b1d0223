use std::collections::HashMap;

/// Price used for ingredients missing from the table.
pub const DEFAULT_UNIT_PRICE: f64 = 2.99;

/// Static per-unit prices, keyed by lowercase ingredient name.
const BUILTIN_PRICES: &[(&str, f64)] = &[
    // Proteins
    ("chicken breast", 3.99),
    ("ground beef", 4.49),
    ("salmon", 6.99),
    ("tofu", 3.49),
    ("eggs", 0.50),
    ("black beans", 1.29),
    ("protein powder", 1.50),
    // Carbs
    ("brown rice", 2.99),
    ("quinoa", 4.49),
    ("oats", 2.49),
    ("pasta", 1.99),
    ("sweet potato", 1.49),
    ("whole wheat tortilla", 0.40),
    ("whole wheat bread", 0.35),
    ("granola", 5.99),
    // Produce
    ("broccoli", 2.99),
    ("spinach", 3.49),
    ("bell pepper", 1.99),
    ("onion", 0.79),
    ("garlic", 0.99),
    ("tomato", 1.29),
    ("carrots", 1.99),
    ("banana", 0.30),
    ("blueberries", 4.99),
    ("strawberries", 5.49),
    ("frozen berries", 4.49),
    ("lemon", 0.99),
    ("lime", 0.99),
    ("avocado", 2.49),
    // Dairy
    ("milk", 4.99),
    ("cheddar cheese", 5.99),
    ("greek yogurt", 4.49),
    ("butter", 5.49),
    // Pantry
    ("olive oil", 7.99),
    ("almonds", 5.99),
    ("soy sauce", 3.99),
    ("honey", 5.99),
];

/// Round a currency amount to cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Fallback price estimates for when no live price is available.
#[derive(Debug, Clone)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
    default_price: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new(BUILTIN_PRICES.iter().copied(), DEFAULT_UNIT_PRICE)
    }
}

impl PriceTable {
    pub fn new<I, S>(prices: I, default_price: f64) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let prices = prices
            .into_iter()
            .map(|(name, price)| (name.as_ref().trim().to_lowercase(), price))
            .collect();
        Self {
            prices,
            default_price,
        }
    }

    /// Per-unit price for `name`, falling back to the table default.
    pub fn unit_price(&self, name: &str) -> f64 {
        self.prices
            .get(&name.trim().to_lowercase())
            .copied()
            .unwrap_or(self.default_price)
    }

    /// Estimated cost of buying `quantity` of `name`.
    ///
    /// Quantities above one are charged per started unit; anything up to one
    /// costs a single unit.
    pub fn estimate(&self, name: &str, quantity: f64) -> f64 {
        let units = if quantity > 1.0 { quantity.ceil() } else { 1.0 };
        round_cents(self.unit_price(name) * units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garlic_charged_per_started_unit() {
        let table = PriceTable::default();
        assert_eq!(table.estimate("garlic", 2.4), 2.97);
        assert_eq!(table.estimate("Garlic", 0.5), 0.99);
    }

    #[test]
    fn test_unknown_ingredient_uses_default() {
        let table = PriceTable::default();
        assert_eq!(table.unit_price("saffron"), DEFAULT_UNIT_PRICE);
        assert_eq!(table.estimate("saffron", 1.0), 2.99);
    }

    #[test]
    fn test_estimate_rounds_to_cents() {
        let table = PriceTable::default();
        // 0.35 * 3 = 1.0499999...
        assert_eq!(table.estimate("whole wheat bread", 3.0), 1.05);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(2.971), 2.97);
        assert_eq!(round_cents(7.5), 7.5);
    }
}
