use super::LoadError;
use crate::core::attention::AttentionStack;

/// Supplies the attention stack for a chain.
///
/// This is the seam between the pipeline and whatever produced the attention:
/// the shipped implementation reads CSV sidecar files, tests hold stacks in
/// memory, and library users can plug in a live model.
pub trait AttentionSource {
    /// Fetch the attention stack for `code`.
    ///
    /// `expected_dim` is the residue count of the loaded chain; every matrix
    /// in the returned stack must be `expected_dim x expected_dim`.
    fn attention_for(&self, code: &str, expected_dim: usize) -> Result<AttentionStack, LoadError>;
}
