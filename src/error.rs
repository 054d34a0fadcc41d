use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("unknown season: {0:?}")]
    UnknownSeason(String),

    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid crop {id:?}: {reason}")]
    InvalidCrop { id: String, reason: String },
}

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("failed to access favorites file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed favorites file: {0}")]
    Json(#[from] serde_json::Error),
}
