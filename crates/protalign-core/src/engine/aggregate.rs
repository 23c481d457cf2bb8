//! Score aggregation over a chain set.
//!
//! The accumulator keeps running sums of per-chain scores and divides once at
//! the end. Chains that failed to load or score are recorded as skipped with
//! a reason; they never disappear silently.

use super::error::EngineError;
use crate::core::attention::ResidueTypeAttention;
use nalgebra::DMatrix;
use serde::Serialize;

/// The per-chain result of the alignment workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainAnalysis {
    pub code: String,
    pub residue_count: usize,
    /// Jaccard alignment of the thresholded model-average attention with the
    /// contact map; in [0, 1].
    pub alignment_score: f64,
    /// Mean cosine similarity over all distinct head pairs; in [0, 1].
    pub attention_similarity: f64,
    /// Alignment of each head with the contact map, `layers x heads`.
    pub head_alignment: DMatrix<f64>,
    /// Alignment of each layer-average matrix with the contact map.
    pub layer_alignment: Vec<f64>,
    /// Share of attention received by each amino acid type, relative and
    /// occurrence-weighted.
    pub type_attention: ResidueTypeAttention,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedChain {
    pub code: String,
    pub reason: String,
}

/// Means over the successfully processed chains. Present only when at least
/// one chain was processed.
#[derive(Debug, Clone, PartialEq)]
pub struct SetMeans {
    pub alignment_score: f64,
    pub attention_similarity: f64,
    pub head_alignment: DMatrix<f64>,
    pub layer_alignment: Vec<f64>,
    pub type_attention: ResidueTypeAttention,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetSummary {
    pub processed: usize,
    pub skipped: Vec<SkippedChain>,
    pub means: Option<SetMeans>,
}

#[derive(Default)]
pub struct SetAccumulator {
    sum_alignment: f64,
    sum_similarity: f64,
    sum_head_alignment: Option<DMatrix<f64>>,
    sum_layer_alignment: Option<Vec<f64>>,
    sum_type_relative: Vec<f64>,
    sum_type_weighted: Vec<f64>,
    processed: usize,
    skipped: Vec<SkippedChain>,
}

impl SetAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one chain's scores into the running sums.
    ///
    /// All chains of a set come from the same model, so the head-alignment
    /// shape must be consistent across calls.
    pub fn record(&mut self, analysis: &ChainAnalysis) -> Result<(), EngineError> {
        match &mut self.sum_head_alignment {
            Some(sum) => {
                if sum.shape() != analysis.head_alignment.shape() {
                    return Err(EngineError::ModelShapeMismatch {
                        expected_layers: sum.nrows(),
                        expected_heads: sum.ncols(),
                        found_layers: analysis.head_alignment.nrows(),
                        found_heads: analysis.head_alignment.ncols(),
                    });
                }
                *sum += &analysis.head_alignment;
            }
            None => self.sum_head_alignment = Some(analysis.head_alignment.clone()),
        }

        match &mut self.sum_layer_alignment {
            Some(sum) => {
                if sum.len() != analysis.layer_alignment.len() {
                    return Err(EngineError::ModelShapeMismatch {
                        expected_layers: sum.len(),
                        expected_heads: 0,
                        found_layers: analysis.layer_alignment.len(),
                        found_heads: 0,
                    });
                }
                for (acc, value) in sum.iter_mut().zip(&analysis.layer_alignment) {
                    *acc += value;
                }
            }
            None => self.sum_layer_alignment = Some(analysis.layer_alignment.clone()),
        }

        if self.sum_type_relative.is_empty() {
            self.sum_type_relative = vec![0.0; analysis.type_attention.relative.len()];
            self.sum_type_weighted = vec![0.0; analysis.type_attention.weighted.len()];
        }
        for (acc, value) in self
            .sum_type_relative
            .iter_mut()
            .zip(&analysis.type_attention.relative)
        {
            *acc += value;
        }
        for (acc, value) in self
            .sum_type_weighted
            .iter_mut()
            .zip(&analysis.type_attention.weighted)
        {
            *acc += value;
        }

        self.sum_alignment += analysis.alignment_score;
        self.sum_similarity += analysis.attention_similarity;
        self.processed += 1;
        Ok(())
    }

    /// Record a chain that could not be processed.
    pub fn skip(&mut self, code: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(SkippedChain {
            code: code.into(),
            reason: reason.into(),
        });
    }

    pub fn finish(self) -> SetSummary {
        let n = self.processed as f64;
        let means = match (self.sum_head_alignment, self.sum_layer_alignment) {
            (Some(head), Some(layer)) if self.processed > 0 => Some(SetMeans {
                alignment_score: self.sum_alignment / n,
                attention_similarity: self.sum_similarity / n,
                head_alignment: head / n,
                layer_alignment: layer.into_iter().map(|sum| sum / n).collect(),
                type_attention: ResidueTypeAttention {
                    relative: self.sum_type_relative.iter().map(|sum| sum / n).collect(),
                    weighted: self.sum_type_weighted.iter().map(|sum| sum / n).collect(),
                },
            }),
            _ => None,
        };
        SetSummary {
            processed: self.processed,
            skipped: self.skipped,
            means,
        }
    }
}
