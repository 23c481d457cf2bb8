//! Chain selection for batch runs.
//!
//! An explicit `PROTEIN_CODES` list always wins. Without one, candidates are
//! filtered by inclusive residue-count bounds and capped at the sample size,
//! preserving the order of the candidate pool.

use super::config::ChainSelection;
use tracing::debug;

/// A chain the selector can choose from: its code and residue count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainCandidate {
    pub code: String,
    pub residue_count: usize,
}

impl ChainCandidate {
    pub fn new(code: impl Into<String>, residue_count: usize) -> Self {
        Self {
            code: code.into(),
            residue_count,
        }
    }
}

/// Resolve the ordered list of chain codes a batch run will process.
pub fn select_chains(selection: &ChainSelection, pool: &[ChainCandidate]) -> Vec<String> {
    if !selection.protein_codes.is_empty() {
        debug!(
            codes = selection.protein_codes.len(),
            "using explicit protein codes, ignoring length filter"
        );
        return selection.protein_codes.clone();
    }

    pool.iter()
        .filter(|candidate| {
            candidate.residue_count >= selection.min_length
                && candidate.residue_count <= selection.max_length
        })
        .take(selection.sample_size)
        .map(|candidate| candidate.code.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<ChainCandidate> {
        vec![
            ChainCandidate::new("AAAA", 10),
            ChainCandidate::new("BBBB", 20),
            ChainCandidate::new("CCCC", 400),
            ChainCandidate::new("DDDD", 50),
        ]
    }

    #[test]
    fn explicit_codes_win_over_length_filter() {
        let selection = ChainSelection {
            protein_codes: vec!["1ABC".into(), "2XYZ".into()],
            min_length: 1000,
            max_length: 2000,
            sample_size: 0,
        };
        let chosen = select_chains(&selection, &pool());
        assert_eq!(chosen, vec!["1ABC", "2XYZ"]);
    }

    #[test]
    fn length_filter_keeps_in_range_chains_in_pool_order() {
        let selection = ChainSelection {
            protein_codes: Vec::new(),
            min_length: 15,
            max_length: 300,
            sample_size: 2,
        };
        let chosen = select_chains(&selection, &pool());
        assert_eq!(chosen, vec!["BBBB", "DDDD"]);
    }

    #[test]
    fn sample_size_caps_the_selection() {
        let selection = ChainSelection {
            protein_codes: Vec::new(),
            min_length: 0,
            max_length: 1000,
            sample_size: 3,
        };
        let chosen = select_chains(&selection, &pool());
        assert_eq!(chosen, vec!["AAAA", "BBBB", "CCCC"]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let selection = ChainSelection {
            protein_codes: Vec::new(),
            min_length: 20,
            max_length: 50,
            sample_size: 10,
        };
        let chosen = select_chains(&selection, &pool());
        assert_eq!(chosen, vec!["BBBB", "DDDD"]);
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let selection = ChainSelection {
            protein_codes: Vec::new(),
            min_length: 0,
            max_length: 1000,
            sample_size: 5,
        };
        assert!(select_chains(&selection, &[]).is_empty());
    }
}
