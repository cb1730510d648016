//! Error types for catalog processing

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while compacting or loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid reference \"{reference}\"")]
    Lookup { reference: String },

    #[error("Star record \"{reference}\" needs numeric declination and right ascension")]
    MalformedStar { reference: String },

    #[error("Star {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("Line {line} position {position} references star {index} but the catalog has {stars} stars")]
    IndexOutOfRange {
        line: usize,
        position: usize,
        index: usize,
        stars: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
