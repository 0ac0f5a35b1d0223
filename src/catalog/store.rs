use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::warn;

use crate::models::{MealSlot, Recipe};

/// Read-only recipe collection with a many-to-many category mapping.
///
/// Recipes keep the order they were loaded in; every lookup returns them in
/// that order, which the selectors rely on for tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,

    /// Position in `recipes` keyed by recipe id.
    index: HashMap<String, usize>,

    /// Recipe ids keyed by lowercase category name.
    categories: BTreeMap<String, HashSet<String>>,
}

impl RecipeCatalog {
    /// Build a catalog from recipes and a category → recipe-id mapping.
    ///
    /// A repeated id keeps its first position but takes the later contents.
    /// Category entries naming unknown ids are dropped.
    pub fn new(recipes: Vec<Recipe>, categories: BTreeMap<String, Vec<String>>) -> Self {
        let mut ordered: Vec<Recipe> = Vec::with_capacity(recipes.len());
        let mut index: HashMap<String, usize> = HashMap::new();

        for recipe in recipes {
            match index.get(&recipe.id) {
                Some(&pos) => ordered[pos] = recipe,
                None => {
                    index.insert(recipe.id.clone(), ordered.len());
                    ordered.push(recipe);
                }
            }
        }

        let mut mapped: BTreeMap<String, HashSet<String>> = BTreeMap::new();
        for (category, ids) in categories {
            let entry = mapped.entry(category.to_lowercase()).or_default();
            for id in ids {
                if index.contains_key(&id) {
                    entry.insert(id);
                } else {
                    warn!(category = %category, recipe = %id, "Category references unknown recipe");
                }
            }
        }

        Self {
            recipes: ordered,
            index,
            categories: mapped,
        }
    }

    /// Recipes tagged with `category`, in catalog order.
    ///
    /// An unknown category yields an empty list.
    pub fn by_category(&self, category: &str) -> Vec<&Recipe> {
        match self.categories.get(&category.trim().to_lowercase()) {
            Some(ids) => self.recipes.iter().filter(|r| ids.contains(&r.id)).collect(),
            None => Vec::new(),
        }
    }

    /// The eligible pool for a meal slot.
    pub fn slot_pool(&self, slot: MealSlot) -> Vec<&Recipe> {
        self.by_category(slot.as_str())
    }

    /// All recipes in catalog order.
    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.index.get(id).map(|&pos| &self.recipes[pos])
    }

    /// Category → ids mapping with ids listed in catalog order.
    pub fn category_map(&self) -> BTreeMap<String, Vec<String>> {
        self.categories
            .keys()
            .map(|category| {
                let ids = self
                    .by_category(category)
                    .into_iter()
                    .map(|r| r.id.clone())
                    .collect();
                (category.clone(), ids)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
