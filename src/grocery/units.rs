use std::collections::HashMap;

use tracing::debug;

/// Normalize common spellings of a kitchen unit.
///
/// Unrecognised units come back lowercased and trimmed.
pub fn canonical_unit(unit: &str) -> String {
    let unit = unit.trim().to_lowercase();
    let canonical = match unit.as_str() {
        "tsp" | "teaspoon" | "teaspoons" => "tsp",
        "tbsp" | "tablespoon" | "tablespoons" => "tbsp",
        "cup" | "cups" => "cup",
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => "ml",
        "oz" | "ounce" | "ounces" => "oz",
        "g" | "gram" | "grams" => "g",
        "lb" | "lbs" | "pound" | "pounds" => "lb",
        _ => return unit,
    };
    canonical.to_string()
}

/// Directed conversion factors between canonical units.
#[derive(Debug, Clone)]
pub struct UnitConversions {
    factors: HashMap<(String, String), f64>,
}

impl Default for UnitConversions {
    fn default() -> Self {
        Self::new([
            ("tsp", "tbsp", 1.0 / 3.0),
            ("tbsp", "cup", 1.0 / 16.0),
            ("cup", "ml", 240.0),
            ("oz", "g", 28.35),
            ("lb", "g", 453.592),
        ])
    }
}

impl UnitConversions {
    pub fn new<I, S>(factors: I) -> Self
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: AsRef<str>,
    {
        let factors = factors
            .into_iter()
            .map(|(from, to, factor)| {
                ((canonical_unit(from.as_ref()), canonical_unit(to.as_ref())), factor)
            })
            .collect();
        Self { factors }
    }

    /// Factor that turns a quantity in `from` into `to`, if one is known.
    pub fn factor(&self, from: &str, to: &str) -> Option<f64> {
        self.factors
            .get(&(canonical_unit(from), canonical_unit(to)))
            .copied()
    }

    /// Express `quantity` of `from` in `to`.
    ///
    /// Identical units pass through. An unknown pair also passes the quantity
    /// through unchanged.
    pub fn convert(&self, quantity: f64, from: &str, to: &str) -> f64 {
        if canonical_unit(from) == canonical_unit(to) {
            return quantity;
        }
        match self.factor(from, to) {
            Some(factor) => quantity * factor,
            None => {
                debug!(from, to, "No conversion between units, keeping quantity as-is");
                quantity
            }
        }
    }
}
