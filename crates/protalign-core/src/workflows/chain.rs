//! Single-chain analysis: contact map construction plus attention scoring.

use crate::core::attention::{self, AttentionError, AttentionStack};
use crate::core::contact;
use crate::core::models::chain::ProteinChain;
use crate::engine::aggregate::ChainAnalysis;
use crate::engine::config::Cutoffs;
use crate::engine::error::EngineError;
use nalgebra::DMatrix;
use tracing::{debug, info, instrument};

/// Score one chain's attention stack against its structural contact map.
///
/// Fails before any scoring when the stack dimension does not match the
/// chain's residue count.
#[instrument(skip_all, fields(chain = %chain.code()))]
pub fn analyze(
    chain: &ProteinChain,
    stack: &AttentionStack,
    cutoffs: &Cutoffs,
) -> Result<ChainAnalysis, EngineError> {
    if stack.dim() != chain.len() {
        return Err(AttentionError::ShapeMismatch {
            expected: chain.len(),
            found_rows: stack.dim(),
            found_cols: stack.dim(),
        }
        .into());
    }

    let distances = contact::distance_map(&chain.positions())?;
    let contacts = contact::binarize(&distances, cutoffs.distance, cutoffs.position)?;
    debug!(
        contacts = contacts.iter().filter(|&&c| c).count() / 2,
        "contact map built"
    );

    let model_mask = attention::threshold(&stack.model_average(), cutoffs.attention);
    let alignment_score = attention::alignment(&model_mask, &contacts)?;

    let mut head_alignment = DMatrix::zeros(stack.n_layers(), stack.n_heads());
    for layer in 0..stack.n_layers() {
        for head in 0..stack.n_heads() {
            let mask = attention::threshold(stack.head(layer, head), cutoffs.attention);
            head_alignment[(layer, head)] = attention::alignment(&mask, &contacts)?;
        }
    }

    let layer_alignment = stack
        .layer_averages()
        .iter()
        .map(|average| {
            let mask = attention::threshold(average, cutoffs.attention);
            attention::alignment(&mask, &contacts)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let attention_similarity = attention::pairwise_similarity(stack);
    let type_attention = attention::residue_type_attention(stack, &chain.sequence())?;

    info!(
        alignment = alignment_score,
        similarity = attention_similarity,
        "chain scored"
    );
    Ok(ChainAnalysis {
        code: chain.code().to_string(),
        residue_count: chain.len(),
        alignment_score,
        attention_similarity,
        head_alignment,
        layer_alignment,
        type_attention,
    })
}
