use std::collections::HashMap;

use crate::error::{PlannerError, Result};

/// Length of every built-in feature vector.
pub const VECTOR_DIMENSIONS: usize = 8;

/// Role and macro signal per ingredient: five role-category codes followed by
/// protein, carbs and fat per serving.
const BUILTIN_VECTORS: &[(&str, [f64; VECTOR_DIMENSIONS])] = &[
    // Proteins
    ("chicken breast", [1.0, 0.0, 0.0, 0.0, 0.0, 25.0, 0.0, 0.5]),
    ("ground beef", [1.0, 0.0, 0.0, 0.0, 0.0, 20.0, 0.0, 15.0]),
    ("salmon", [2.0, 0.0, 0.0, 0.0, 0.0, 22.0, 0.0, 13.0]),
    ("eggs", [5.0, 0.0, 0.0, 0.0, 0.0, 6.0, 0.0, 5.0]),
    ("tofu", [3.0, 0.0, 0.0, 0.0, 0.0, 8.0, 0.0, 4.0]),
    ("black beans", [3.0, 2.0, 0.0, 0.0, 0.0, 8.0, 20.0, 0.5]),
    // Carbs
    ("brown rice", [0.0, 4.0, 0.0, 0.0, 0.0, 2.0, 45.0, 1.0]),
    ("pasta", [0.0, 2.0, 0.0, 0.0, 0.0, 5.0, 40.0, 1.0]),
    ("sweet potato", [0.0, 5.0, 2.0, 0.0, 0.0, 2.0, 25.0, 0.1]),
    ("quinoa", [0.0, 4.0, 0.0, 0.0, 0.0, 4.0, 21.0, 2.0]),
    ("oats", [0.0, 1.0, 0.0, 0.0, 0.0, 5.0, 27.0, 3.0]),
    // Vegetables
    ("broccoli", [0.0, 0.0, 3.0, 0.0, 0.0, 3.0, 6.0, 0.3]),
    ("spinach", [0.0, 0.0, 1.0, 0.0, 0.0, 3.0, 3.0, 0.4]),
    ("carrots", [0.0, 0.0, 2.0, 0.0, 0.0, 1.0, 10.0, 0.2]),
    ("bell pepper", [0.0, 0.0, 4.0, 0.0, 0.0, 1.0, 6.0, 0.3]),
    ("onion", [0.0, 0.0, 5.0, 0.0, 0.0, 1.0, 9.0, 0.1]),
    ("tomato", [0.0, 0.0, 4.0, 0.0, 0.0, 1.0, 4.0, 0.2]),
    ("garlic", [0.0, 0.0, 5.0, 0.0, 0.0, 1.0, 3.0, 0.1]),
    // Fats
    ("olive oil", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 14.0]),
    ("avocado", [5.0, 0.0, 0.0, 1.0, 0.0, 2.0, 9.0, 15.0]),
    ("almonds", [2.0, 0.0, 0.0, 0.0, 0.0, 6.0, 6.0, 14.0]),
    // Dairy
    ("milk", [1.0, 0.0, 0.0, 0.0, 0.0, 3.0, 5.0, 3.0]),
    ("cheddar cheese", [2.0, 0.0, 0.0, 0.0, 0.0, 7.0, 1.0, 9.0]),
    ("greek yogurt", [3.0, 0.0, 0.0, 0.0, 0.0, 10.0, 4.0, 0.4]),
];

/// Cosine similarity of two vectors.
///
/// Returns `None` when the lengths differ, a vector is empty, or either has
/// zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        None
    } else {
        Some((dot / denom).clamp(-1.0, 1.0))
    }
}

/// Fixed ingredient → feature-vector table keyed by lowercase name.
#[derive(Debug, Clone)]
pub struct IngredientVectorSpace {
    vectors: HashMap<String, Vec<f64>>,
}

impl Default for IngredientVectorSpace {
    fn default() -> Self {
        Self::new(
            BUILTIN_VECTORS
                .iter()
                .map(|(name, vector)| (*name, vector.to_vec())),
        )
    }
}

impl IngredientVectorSpace {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: AsRef<str>,
    {
        let vectors = entries
            .into_iter()
            .map(|(name, vector)| (name.as_ref().trim().to_lowercase(), vector))
            .collect();
        Self { vectors }
    }

    /// Vector for `name`, if the ingredient is known.
    pub fn vector(&self, name: &str) -> Option<&[f64]> {
        self.vectors
            .get(&name.trim().to_lowercase())
            .map(Vec::as_slice)
    }

    /// Known ingredient names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.vectors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Cosine similarity between two known ingredients.
    ///
    /// Unknown names are `UnknownIngredient`; a zero-magnitude or mismatched
    /// vector is `SimilarityUndefined`.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        let va = self
            .vector(a)
            .ok_or_else(|| PlannerError::UnknownIngredient(a.to_string()))?;
        let vb = self
            .vector(b)
            .ok_or_else(|| PlannerError::UnknownIngredient(b.to_string()))?;

        cosine_similarity(va, vb)
            .ok_or_else(|| PlannerError::SimilarityUndefined(format!("{} ~ {}", a, b)))
    }

    /// Known ingredients ranked by similarity to `name`, best first.
    ///
    /// Pairs whose similarity is undefined are left out.
    pub fn most_similar(&self, name: &str, limit: usize) -> Result<Vec<(String, f64)>> {
        let key = name.trim().to_lowercase();
        let target = self
            .vectors
            .get(&key)
            .ok_or_else(|| PlannerError::UnknownIngredient(name.to_string()))?;

        let mut ranked: Vec<(String, f64)> = self
            .vectors
            .iter()
            .filter(|(other, _)| **other != key)
            .filter_map(|(other, vector)| {
                cosine_similarity(target, vector).map(|score| (other.clone(), score))
            })
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_similarity_is_one() {
        let space = IngredientVectorSpace::default();
        for name in space.names() {
            let sim = space.similarity(name, name).unwrap();
            assert!((sim - 1.0).abs() < 1e-9, "{} -> {}", name, sim);
        }
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let space = IngredientVectorSpace::default();
        let ab = space.similarity("salmon", "Olive Oil").unwrap();
        let ba = space.similarity("olive oil", "SALMON").unwrap();
        assert_eq!(ab, ba);
        assert!((-1.0..=1.0).contains(&ab));
    }

    #[test]
    fn test_unknown_ingredient_has_no_vector() {
        let space = IngredientVectorSpace::default();
        assert!(space.vector("dragon fruit").is_none());
        assert!(matches!(
            space.similarity("dragon fruit", "salmon"),
            Err(PlannerError::UnknownIngredient(_))
        ));
    }

    #[test]
    fn test_zero_vector_is_undefined() {
        let space = IngredientVectorSpace::new(vec![
            ("water", vec![0.0, 0.0, 0.0]),
            ("salt", vec![1.0, 0.0, 0.0]),
        ]);
        assert!(matches!(
            space.similarity("water", "salt"),
            Err(PlannerError::SimilarityUndefined(_))
        ));
    }

    #[test]
    fn test_most_similar_skips_self_and_undefined() {
        let space = IngredientVectorSpace::new(vec![
            ("rice", vec![1.0, 0.0]),
            ("pasta", vec![0.9, 0.1]),
            ("beans", vec![0.0, 1.0]),
            ("water", vec![0.0, 0.0]),
        ]);
        let ranked = space.most_similar("rice", 10).unwrap();
        let names: Vec<&str> = ranked.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["pasta", "beans"]);
        assert!(ranked[0].1 > ranked[1].1);
    }

    #[test]
    fn test_cosine_mismatched_lengths() {
        assert!(cosine_similarity(&[1.0, 2.0], &[1.0]).is_none());
        assert!(cosine_similarity(&[], &[]).is_none());
    }
}
