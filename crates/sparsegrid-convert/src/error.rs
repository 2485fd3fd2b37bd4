use sparsegrid_core::GridError;
use thiserror::Error;

/// Conversion error type
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
