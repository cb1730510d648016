//! Error types for the engine

use globe_data::CatalogError;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Animation loop started twice or stopped while not running
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Unknown scene node: {0}")]
    UnknownNode(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Options error: {0}")]
    Options(#[from] serde_json::Error),
}
