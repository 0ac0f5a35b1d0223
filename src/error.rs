use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Insufficient catalog: no {0} recipes available")]
    InsufficientCatalog(String),

    #[error("Price lookup failed for '{ingredient}': {reason}")]
    PriceLookupFailed { ingredient: String, reason: String },

    #[error("Similarity undefined for '{0}': zero-magnitude vector")]
    SimilarityUndefined(String),

    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
