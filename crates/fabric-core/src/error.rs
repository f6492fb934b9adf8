use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FabricError {
    #[error("failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("catalog is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("failed to load request from {path}: {reason}")]
    RequestLoad { path: PathBuf, reason: String },

    #[error("invalid request: {0}")]
    RequestInvalid(String),

    #[error("invalid delivery tiers: {0}")]
    TiersInvalid(String),

    #[error("unknown delivery tier '{tier}'. Available: {}", .available.join(", "))]
    UnknownTier {
        tier: String,
        available: Vec<String>,
    },

    #[error("AHP weights sum to zero; at least one weight must be positive")]
    ZeroWeights,

    #[error("catalog cache already holds {cached}, cannot load {requested}")]
    CacheConflict { cached: PathBuf, requested: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
