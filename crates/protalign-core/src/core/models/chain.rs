use nalgebra::Point3;

/// A single amino acid in a peptide chain, reduced to its alpha-carbon.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// One-letter amino acid code (e.g., 'A' for alanine).
    pub code: char,
    /// Residue sequence number from the source file.
    pub number: isize,
    /// Position of the alpha-carbon, in Angstrom.
    pub position: Point3<f64>,
}

impl Residue {
    pub fn new(code: char, number: isize, position: Point3<f64>) -> Self {
        Self {
            code,
            number,
            position,
        }
    }
}

/// An immutable peptide chain: a unique code plus an ordered residue list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinChain {
    code: String,
    residues: Vec<Residue>,
}

impl ProteinChain {
    pub fn new(code: impl Into<String>, residues: Vec<Residue>) -> Self {
        Self {
            code: code.into(),
            residues,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Number of residues in the chain.
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Alpha-carbon positions in sequence order.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.residues.iter().map(|r| r.position).collect()
    }

    /// The chain sequence as one-letter codes.
    pub fn sequence(&self) -> String {
        self.residues.iter().map(|r| r.code).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(codes: &str) -> ProteinChain {
        let residues = codes
            .chars()
            .enumerate()
            .map(|(i, c)| Residue::new(c, i as isize + 1, Point3::new(i as f64, 0.0, 0.0)))
            .collect();
        ProteinChain::new("1ABC", residues)
    }

    #[test]
    fn len_matches_residue_count() {
        let chain = chain_of("GAVL");
        assert_eq!(chain.len(), 4);
        assert!(!chain.is_empty());
    }

    #[test]
    fn sequence_preserves_residue_order() {
        let chain = chain_of("GAVL");
        assert_eq!(chain.sequence(), "GAVL");
    }

    #[test]
    fn positions_are_returned_in_sequence_order() {
        let chain = chain_of("GA");
        let positions = chain.positions();
        assert_eq!(positions[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(positions[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn empty_chain_reports_empty() {
        let chain = ProteinChain::new("0XXX", Vec::new());
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }
}
