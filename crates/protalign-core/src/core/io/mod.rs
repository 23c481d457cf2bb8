//! Input for the two data streams the pipeline consumes: protein structures
//! (PDB/mmCIF) and per-chain attention weights.
//!
//! Loading is a per-chain concern: any [`LoadError`] is recoverable in the
//! batch workflow, which skips the chain and records the failure.

pub mod attention;
pub mod pdb;
pub mod traits;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse structure for chain '{code}': {message}")]
    Structure { code: String, message: String },

    #[error("no structure file for chain '{code}' under '{folder}'")]
    FileNotFound { code: String, folder: String },

    #[error("chain '{code}' contains no usable residues")]
    NoResidues { code: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid attention data for chain '{code}': {message}")]
    Attention { code: String, message: String },
}
