use thiserror::Error;

use crate::core::attention::AttentionError;
use crate::core::contact::ContactError;
use crate::core::io::LoadError;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Contact map construction failed: {source}")]
    Contact {
        #[from]
        source: ContactError,
    },

    #[error("Attention scoring failed: {source}")]
    Attention {
        #[from]
        source: AttentionError,
    },

    #[error("Failed to load chain '{code}': {source}")]
    ChainLoad { code: String, source: LoadError },

    #[error("failed to scan structure folder: {0}")]
    Scan(#[from] LoadError),

    #[error(
        "Model shape {found_layers}x{found_heads} does not match the accumulated shape {expected_layers}x{expected_heads}"
    )]
    ModelShapeMismatch {
        expected_layers: usize,
        expected_heads: usize,
        found_layers: usize,
        found_heads: usize,
    },

    #[error("No chains selected for processing")]
    EmptySelection,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
