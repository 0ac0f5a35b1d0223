use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::RecipeCatalog;
use crate::error::Result;
use crate::models::Recipe;

/// Catalog bundled with the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/recipes.json");

/// On-disk catalog layout: recipes plus the category → recipe-id mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub recipes: Vec<Recipe>,

    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
}

impl From<CatalogDocument> for RecipeCatalog {
    fn from(doc: CatalogDocument) -> Self {
        RecipeCatalog::new(doc.recipes, doc.categories)
    }
}

impl From<&RecipeCatalog> for CatalogDocument {
    fn from(catalog: &RecipeCatalog) -> Self {
        CatalogDocument {
            recipes: catalog.all().to_vec(),
            categories: catalog.category_map(),
        }
    }
}

/// The curated catalog shipped in `data/recipes.json`.
pub fn builtin_catalog() -> Result<RecipeCatalog> {
    parse_catalog(BUILTIN_CATALOG)
}

pub fn parse_catalog(json: &str) -> Result<RecipeCatalog> {
    let doc: CatalogDocument = serde_json::from_str(json)?;
    Ok(doc.into())
}

/// Load a catalog from a JSON file.
///
/// Recipes sharing an id collapse into one (last occurrence wins).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<RecipeCatalog> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Save a catalog to a JSON file.
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &RecipeCatalog) -> Result<()> {
    let doc = CatalogDocument::from(catalog);
    let json = serde_json::to_string_pretty(&doc)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.len(), 16);
        assert_eq!(catalog.by_category("breakfast").len(), 9);
        assert_eq!(catalog.by_category("lunch").len(), 7);
        assert_eq!(catalog.by_category("dinner").len(), 7);
    }

    #[test]
    fn test_builtin_catalog_is_many_to_many() {
        let catalog = builtin_catalog().unwrap();
        let in_breakfast = catalog.by_category("breakfast").iter().any(|r| r.id == "veggie-omelet");
        let in_lunch = catalog.by_category("lunch").iter().any(|r| r.id == "veggie-omelet");
        assert!(in_breakfast && in_lunch);
    }

    #[test]
    fn test_load_and_save_roundtrip() {
        let json = r#"{
            "recipes": [
                {"id": "oats", "name": "Oats", "calories": 380, "ingredients": [
                    {"name": "oats", "category": "carbs", "quantity": 0.5, "unit": "cup"}
                ]}
            ],
            "categories": {"breakfast": ["oats"]}
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.by_category("breakfast")[0].ingredients.len(), 1);

        let out_file = NamedTempFile::new().unwrap();
        save_catalog(out_file.path(), &catalog).unwrap();

        let reloaded = load_catalog(out_file.path()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.by_category("breakfast")[0].id, "oats");
    }

    #[test]
    fn test_deduplication() {
        let json = r#"{"recipes": [
            {"id": "oats", "name": "Oats", "calories": 380},
            {"id": "oats", "name": "Oats v2", "calories": 400}
        ]}"#;

        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.len(), 1);
        // Last occurrence wins
        assert_eq!(catalog.get("oats").unwrap().calories, 400.0);
        assert!(catalog.by_category("breakfast").is_empty());
    }
}
