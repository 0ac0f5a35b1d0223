mod persistence;
mod store;

pub use persistence::{
    builtin_catalog, load_catalog, parse_catalog, save_catalog, CatalogDocument,
};
pub use store::RecipeCatalog;
