//! Contact-map construction from alpha-carbon coordinates.
//!
//! A residue pair (i, j) is a contact when its Euclidean distance is at most
//! the distance cutoff AND the pair is at least the position cutoff apart in
//! the sequence. The second criterion removes trivially adjacent residues.

use nalgebra::{DMatrix, Point3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ContactError {
    #[error("coordinate set is empty")]
    EmptyInput,

    #[error("distance map must be square, got {rows}x{cols}")]
    Dimension { rows: usize, cols: usize },
}

/// Pairwise alpha-carbon distance map, in Angstrom. Symmetric, zero diagonal.
pub fn distance_map(positions: &[Point3<f64>]) -> Result<DMatrix<f64>, ContactError> {
    if positions.is_empty() {
        return Err(ContactError::EmptyInput);
    }
    let n = positions.len();
    let mut map = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = (positions[i] - positions[j]).norm();
            map[(i, j)] = d;
            map[(j, i)] = d;
        }
    }
    Ok(map)
}

/// Binarize a distance map into a contact map.
///
/// Pairs closer in sequence than `position_cutoff` are never contacts,
/// regardless of their spatial distance. The diagonal is always false.
pub fn binarize(
    distances: &DMatrix<f64>,
    distance_cutoff: f64,
    position_cutoff: usize,
) -> Result<DMatrix<bool>, ContactError> {
    let (rows, cols) = distances.shape();
    if rows != cols {
        return Err(ContactError::Dimension { rows, cols });
    }
    if rows == 0 {
        return Err(ContactError::EmptyInput);
    }

    let mut contacts = DMatrix::from_element(rows, cols, false);
    for i in 0..rows {
        for j in 0..cols {
            let separation = i.abs_diff(j);
            contacts[(i, j)] = separation >= position_cutoff.max(1)
                && distances[(i, j)] <= distance_cutoff;
        }
    }
    Ok(contacts)
}

/// Normalized inverse-distance map: how close each residue is to every other,
/// rescaled to [0, 1]. The diagonal is zero by convention.
pub fn normalized_inverse(distances: &DMatrix<f64>) -> Result<DMatrix<f64>, ContactError> {
    let (rows, cols) = distances.shape();
    if rows != cols {
        return Err(ContactError::Dimension { rows, cols });
    }
    if rows == 0 {
        return Err(ContactError::EmptyInput);
    }

    let mut inverse = DMatrix::zeros(rows, cols);
    let mut max = 0.0f64;
    for i in 0..rows {
        for j in 0..cols {
            if i != j && distances[(i, j)] > 0.0 {
                let w = 1.0 / distances[(i, j)];
                inverse[(i, j)] = w;
                max = max.max(w);
            }
        }
    }
    if max > 0.0 {
        inverse /= max;
    }
    Ok(inverse)
}
