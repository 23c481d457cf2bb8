//! Per-residue physicochemical property tables.
//!
//! One-letter codes cover the 20 standard amino acids. Lookups on any other
//! character return `None`; callers decide whether that is an error or a
//! residue to skip.

/// The 20 standard amino acids, one-letter codes in alphabetical order.
/// Per-type statistics index into this alphabet.
#[rustfmt::skip]
pub const AMINO_ACIDS: [char; 20] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W', 'Y',
];

/// Map a three-letter residue name (as found in PDB files) to its one-letter
/// code. Case-insensitive. Non-standard residues map to `None`.
pub fn one_letter_code(name: &str) -> Option<char> {
    let code = match name.to_ascii_uppercase().as_str() {
        "ALA" => 'A',
        "ARG" => 'R',
        "ASN" => 'N',
        "ASP" => 'D',
        "CYS" => 'C',
        "GLN" => 'Q',
        "GLU" => 'E',
        "GLY" => 'G',
        "HIS" => 'H',
        "ILE" => 'I',
        "LEU" => 'L',
        "LYS" => 'K',
        "MET" => 'M',
        "PHE" => 'F',
        "PRO" => 'P',
        "SER" => 'S',
        "THR" => 'T',
        "TRP" => 'W',
        "TYR" => 'Y',
        "VAL" => 'V',
        _ => return None,
    };
    Some(code)
}

/// Kyte-Doolittle hydropathy index.
#[rustfmt::skip]
pub fn hydropathy(code: char) -> Option<f64> {
    let value = match code.to_ascii_uppercase() {
        'A' =>  1.8, 'R' => -4.5, 'N' => -3.5, 'D' => -3.5, 'C' =>  2.5,
        'Q' => -3.5, 'E' => -3.5, 'G' => -0.4, 'H' => -3.2, 'I' =>  4.5,
        'L' =>  3.8, 'K' => -3.9, 'M' =>  1.9, 'F' =>  2.8, 'P' => -1.6,
        'S' => -0.8, 'T' => -0.7, 'W' => -0.9, 'Y' => -1.3, 'V' =>  4.2,
        _ => return None,
    };
    Some(value)
}

/// Net side-chain charge at physiological pH.
pub fn charge(code: char) -> Option<f64> {
    let value = match code.to_ascii_uppercase() {
        'D' | 'E' => -1.0,
        'K' | 'R' => 1.0,
        'A' | 'C' | 'F' | 'G' | 'H' | 'I' | 'L' | 'M' | 'N' | 'P' | 'Q' | 'S' | 'T' | 'V'
        | 'W' | 'Y' => 0.0,
        _ => return None,
    };
    Some(value)
}

/// Residue volume in cubic Angstrom (Zamyatnin, 1972).
#[rustfmt::skip]
pub fn volume(code: char) -> Option<f64> {
    let value = match code.to_ascii_uppercase() {
        'A' =>  88.6, 'R' => 173.4, 'N' => 114.1, 'D' => 111.1, 'C' => 108.5,
        'Q' => 143.8, 'E' => 138.4, 'G' =>  60.1, 'H' => 153.2, 'I' => 166.7,
        'L' => 166.7, 'K' => 168.6, 'M' => 162.9, 'F' => 189.9, 'P' => 112.7,
        'S' =>  89.0, 'T' => 116.1, 'W' => 227.8, 'Y' => 193.6, 'V' => 140.0,
        _ => return None,
    };
    Some(value)
}
