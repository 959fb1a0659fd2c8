use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse recipe catalog JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Invalid recipe catalog: {0}")]
    CatalogError(String),

    #[error("Invalid challenge configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
