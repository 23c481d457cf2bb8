//! Attention mathematics: thresholding, layer averaging, contact alignment,
//! and head-to-head similarity.
//!
//! The alignment metric is the Jaccard index between the thresholded
//! attention mask and the contact map, taken over off-diagonal pairs. The
//! similarity metric is the mean cosine similarity over all distinct pairs of
//! attention heads. Both are bounded in [0, 1] for non-negative attention.

use crate::core::models::properties::AMINO_ACIDS;
use nalgebra::DMatrix;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AttentionError {
    #[error("matrix dimensions disagree: expected {expected}x{expected}, found {found_rows}x{found_cols}")]
    ShapeMismatch {
        expected: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("attention stack has no layers or no heads")]
    EmptyStack,

    #[error("attention weight at ({row}, {col}) is negative: {value}")]
    NegativeWeight { row: usize, col: usize, value: f64 },
}

/// Per-model attention: `layers x heads` square matrices of non-negative
/// weights, all sharing one dimension equal to the chain length.
#[derive(Debug, Clone, PartialEq)]
pub struct AttentionStack {
    layers: Vec<Vec<DMatrix<f64>>>,
    dim: usize,
}

impl AttentionStack {
    /// Validate and wrap a rectangular layer/head grid of square matrices.
    pub fn new(layers: Vec<Vec<DMatrix<f64>>>) -> Result<Self, AttentionError> {
        let first = layers
            .first()
            .and_then(|heads| heads.first())
            .ok_or(AttentionError::EmptyStack)?;
        let dim = first.nrows();
        let n_heads = layers[0].len();

        for heads in &layers {
            if heads.len() != n_heads {
                return Err(AttentionError::EmptyStack);
            }
            for matrix in heads {
                let (rows, cols) = matrix.shape();
                if rows != dim || cols != dim {
                    return Err(AttentionError::ShapeMismatch {
                        expected: dim,
                        found_rows: rows,
                        found_cols: cols,
                    });
                }
                for col in 0..cols {
                    for row in 0..rows {
                        let value = matrix[(row, col)];
                        if value < 0.0 {
                            return Err(AttentionError::NegativeWeight { row, col, value });
                        }
                    }
                }
            }
        }
        Ok(Self { layers, dim })
    }

    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn n_heads(&self) -> usize {
        self.layers[0].len()
    }

    /// Matrix dimension, equal to the chain length the stack refers to.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn head(&self, layer: usize, head: usize) -> &DMatrix<f64> {
        &self.layers[layer][head]
    }

    /// All head matrices in (layer, head) order.
    pub fn heads(&self) -> impl Iterator<Item = &DMatrix<f64>> {
        self.layers.iter().flatten()
    }

    /// Mean attention matrix of each layer, across its heads.
    pub fn layer_averages(&self) -> Vec<DMatrix<f64>> {
        self.layers
            .iter()
            .map(|heads| {
                let mut sum = DMatrix::zeros(self.dim, self.dim);
                for matrix in heads {
                    sum += matrix;
                }
                sum / heads.len() as f64
            })
            .collect()
    }

    /// Mean attention matrix of the whole model, across all heads of all
    /// layers.
    pub fn model_average(&self) -> DMatrix<f64> {
        let mut sum = DMatrix::zeros(self.dim, self.dim);
        let mut count = 0usize;
        for matrix in self.heads() {
            sum += matrix;
            count += 1;
        }
        sum / count as f64
    }
}

/// Binarize an attention matrix: entries at or above `cutoff` are kept.
///
/// The comparison is `>=`, so a cutoff of 0 selects every non-negative
/// weight.
pub fn threshold(matrix: &DMatrix<f64>, cutoff: f64) -> DMatrix<bool> {
    matrix.map(|value| value >= cutoff)
}

/// Jaccard alignment between a binary attention mask and a contact map,
/// over off-diagonal pairs: |mask AND contact| / |mask OR contact|.
///
/// Returns 0 when the union is empty. The result is always in [0, 1].
pub fn alignment(mask: &DMatrix<bool>, contacts: &DMatrix<bool>) -> Result<f64, AttentionError> {
    if mask.shape() != contacts.shape() || mask.nrows() != mask.ncols() {
        return Err(AttentionError::ShapeMismatch {
            expected: contacts.nrows(),
            found_rows: mask.nrows(),
            found_cols: mask.ncols(),
        });
    }

    let n = mask.nrows();
    let mut intersection = 0usize;
    let mut union = 0usize;
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let m = mask[(i, j)];
            let c = contacts[(i, j)];
            if m && c {
                intersection += 1;
            }
            if m || c {
                union += 1;
            }
        }
    }

    if union == 0 {
        Ok(0.0)
    } else {
        Ok(intersection as f64 / union as f64)
    }
}

/// Self-consistency of attention across heads: the mean cosine similarity
/// over all distinct pairs of head matrices. A head with zero norm
/// contributes 0 to each of its pairs.
///
/// With fewer than two heads there are no pairs to compare; a lone head is
/// trivially consistent with itself, so the result is 1.
pub fn pairwise_similarity(stack: &AttentionStack) -> f64 {
    let heads: Vec<&DMatrix<f64>> = stack.heads().collect();
    if heads.len() < 2 {
        return 1.0;
    }

    let mut sum = 0.0;
    let mut pairs = 0usize;
    for a in 0..heads.len() {
        for b in (a + 1)..heads.len() {
            sum += cosine(heads[a], heads[b]);
            pairs += 1;
        }
    }
    sum / pairs as f64
}

/// Share of the model-average attention received by each amino acid type.
///
/// Both vectors follow [`AMINO_ACIDS`] order. `relative` is the fraction of
/// the total attention that lands on residues of each type; `weighted`
/// divides that fraction by the type's occurrence count, so a type cannot
/// dominate merely by being frequent in the chain. Types absent from the
/// chain hold 0 in both.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueTypeAttention {
    pub relative: Vec<f64>,
    pub weighted: Vec<f64>,
}

/// Attribute the model-average attention to amino acid types.
///
/// Attention "to" a residue is the sum of its column in the model-average
/// matrix; columns are grouped by the one-letter code at the same position of
/// `sequence`, whose length must equal the stack dimension. Characters
/// outside the standard alphabet are ignored.
pub fn residue_type_attention(
    stack: &AttentionStack,
    sequence: &str,
) -> Result<ResidueTypeAttention, AttentionError> {
    let codes: Vec<char> = sequence.chars().collect();
    if codes.len() != stack.dim() {
        return Err(AttentionError::ShapeMismatch {
            expected: stack.dim(),
            found_rows: codes.len(),
            found_cols: codes.len(),
        });
    }

    let average = stack.model_average();
    let mut absolute = vec![0.0; AMINO_ACIDS.len()];
    let mut occurrences = vec![0usize; AMINO_ACIDS.len()];
    for (column, code) in codes.iter().enumerate() {
        let Some(index) = AMINO_ACIDS.iter().position(|aa| aa == code) else {
            continue;
        };
        occurrences[index] += 1;
        absolute[index] += average.column(column).sum();
    }

    let total: f64 = absolute.iter().sum();
    let relative: Vec<f64> = absolute
        .iter()
        .map(|&sum| if total == 0.0 { 0.0 } else { sum / total })
        .collect();
    let weighted = relative
        .iter()
        .zip(&occurrences)
        .map(|(&share, &count)| if count == 0 { 0.0 } else { share / count as f64 })
        .collect();

    Ok(ResidueTypeAttention { relative, weighted })
}

fn cosine(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
    let dot = a.zip_fold(b, 0.0, |acc, x, y| acc + x * y);
    let norm = a.norm() * b.norm();
    if norm == 0.0 { 0.0 } else { dot / norm }
}
