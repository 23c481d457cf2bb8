use super::LoadError;
use super::traits::AttentionSource;
use crate::core::attention::AttentionStack;
use nalgebra::DMatrix;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One record of the attention sidecar file: a sparse triplet entry for one
/// head matrix. Indices are zero-based; unlisted entries are zero.
#[derive(Debug, Deserialize)]
struct AttentionRecord {
    layer: usize,
    head: usize,
    row: usize,
    col: usize,
    weight: f64,
}

/// Reads attention stacks from per-chain CSV sidecar files named
/// `<CODE>.attn.csv`, with columns `layer,head,row,col,weight`.
#[derive(Debug, Clone)]
pub struct CsvAttentionSource {
    folder: PathBuf,
}

impl CsvAttentionSource {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    fn file_for(&self, code: &str) -> PathBuf {
        self.folder.join(format!("{code}.attn.csv"))
    }
}

impl AttentionSource for CsvAttentionSource {
    fn attention_for(&self, code: &str, expected_dim: usize) -> Result<AttentionStack, LoadError> {
        let path = self.file_for(code);
        if !path.is_file() {
            return Err(LoadError::FileNotFound {
                code: code.to_string(),
                folder: self.folder.display().to_string(),
            });
        }
        read_stack(&path, code, expected_dim)
    }
}

fn read_stack(path: &Path, code: &str, dim: usize) -> Result<AttentionStack, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    let mut n_layers = 0usize;
    let mut n_heads = 0usize;

    for record in reader.deserialize() {
        let record: AttentionRecord = record?;
        if record.row >= dim || record.col >= dim {
            return Err(LoadError::Attention {
                code: code.to_string(),
                message: format!(
                    "index ({}, {}) out of range for a chain of {} residues",
                    record.row, record.col, dim
                ),
            });
        }
        if record.weight < 0.0 {
            return Err(LoadError::Attention {
                code: code.to_string(),
                message: format!(
                    "negative weight {} at layer {} head {}",
                    record.weight, record.layer, record.head
                ),
            });
        }
        n_layers = n_layers.max(record.layer + 1);
        n_heads = n_heads.max(record.head + 1);
        records.push(record);
    }

    if records.is_empty() {
        return Err(LoadError::Attention {
            code: code.to_string(),
            message: "attention file contains no records".to_string(),
        });
    }

    let mut layers = vec![vec![DMatrix::zeros(dim, dim); n_heads]; n_layers];
    for record in records {
        layers[record.layer][record.head][(record.row, record.col)] = record.weight;
    }

    debug!(
        chain = code,
        layers = n_layers,
        heads = n_heads,
        dim,
        "loaded attention stack"
    );
    AttentionStack::new(layers).map_err(|e| LoadError::Attention {
        code: code.to_string(),
        message: e.to_string(),
    })
}

/// In-memory attention source, for tests and library embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryAttentionSource {
    stacks: HashMap<String, AttentionStack>,
}

impl MemoryAttentionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, stack: AttentionStack) {
        self.stacks.insert(code.into(), stack);
    }
}

impl AttentionSource for MemoryAttentionSource {
    fn attention_for(&self, code: &str, expected_dim: usize) -> Result<AttentionStack, LoadError> {
        let stack = self.stacks.get(code).ok_or_else(|| LoadError::Attention {
            code: code.to_string(),
            message: "no attention registered for this chain".to_string(),
        })?;
        if stack.dim() != expected_dim {
            return Err(LoadError::Attention {
                code: code.to_string(),
                message: format!(
                    "attention dimension {} does not match chain length {}",
                    stack.dim(),
                    expected_dim
                ),
            });
        }
        Ok(stack.clone())
    }
}
