use super::LoadError;
use crate::core::models::chain::{ProteinChain, Residue};
use crate::core::models::properties::one_letter_code;
use nalgebra::Point3;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load the alpha-carbon trace of the first chain in a PDB/mmCIF file.
///
/// Residues that are not one of the 20 standard amino acids (waters, ligands,
/// modified residues) are ignored; standard residues without a CA atom are
/// skipped with a warning.
pub fn load_chain(path: &Path, code: &str) -> Result<ProteinChain, LoadError> {
    let path_str = path.to_str().ok_or_else(|| LoadError::Structure {
        code: code.to_string(),
        message: format!("path is not valid UTF-8: {}", path.display()),
    })?;

    let (structure, _warnings) = pdbtbx::open(path_str).map_err(|errors| LoadError::Structure {
        code: code.to_string(),
        message: errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; "),
    })?;

    let chain = structure
        .chains()
        .next()
        .ok_or_else(|| LoadError::NoResidues {
            code: code.to_string(),
        })?;

    let mut residues = Vec::new();
    for residue in chain.residues() {
        let Some(letter) = residue.name().and_then(one_letter_code) else {
            continue;
        };
        let (number, _insertion_code) = residue.id();
        match residue.atoms().find(|atom| atom.name() == "CA") {
            Some(ca) => {
                let (x, y, z) = ca.pos();
                residues.push(Residue::new(letter, number, Point3::new(x, y, z)));
            }
            None => {
                warn!(
                    chain = code,
                    residue = number,
                    "residue has no CA atom, skipping"
                );
            }
        }
    }

    if residues.is_empty() {
        return Err(LoadError::NoResidues {
            code: code.to_string(),
        });
    }

    debug!(
        chain = code,
        residues = residues.len(),
        "loaded alpha-carbon trace"
    );
    Ok(ProteinChain::new(code, residues))
}

/// Resolve the structure file for a chain code inside a folder.
///
/// Tries `<CODE>.pdb`, `<code>.pdb`, the `.cif` variants, and the legacy
/// `pdb<code>.ent` naming, in that order.
pub fn find_structure_file(folder: &Path, code: &str) -> Result<PathBuf, LoadError> {
    let upper = code.to_ascii_uppercase();
    let lower = code.to_ascii_lowercase();
    let candidates = [
        format!("{upper}.pdb"),
        format!("{lower}.pdb"),
        format!("{upper}.cif"),
        format!("{lower}.cif"),
        format!("pdb{lower}.ent"),
    ];

    for name in candidates {
        let path = folder.join(&name);
        if path.is_file() {
            return Ok(path);
        }
    }
    Err(LoadError::FileNotFound {
        code: code.to_string(),
        folder: folder.display().to_string(),
    })
}

/// List the structure files in a folder in lexicographic filename order,
/// paired with the chain code derived from the file stem.
pub fn list_structure_files(folder: &Path) -> Result<Vec<(String, PathBuf)>, LoadError> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        let is_structure = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "pdb" | "cif" | "ent"));
        if !is_structure {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let code = stem
            .strip_prefix("pdb")
            .unwrap_or(stem)
            .to_ascii_uppercase();
        entries.push((code, path));
    }
    entries.sort_by(|a, b| a.1.file_name().cmp(&b.1.file_name()));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_pdb(dir: &Path, name: &str, residues: &[(&str, f64)]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for (i, (res_name, x)) in residues.iter().enumerate() {
            writeln!(
                file,
                "ATOM  {:>5} {:^4} {:>3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                i + 1,
                "CA",
                res_name,
                i + 1,
                x,
                0.0,
                0.0,
                1.0,
                0.0,
                "C"
            )
            .unwrap();
        }
        writeln!(file, "END").unwrap();
        path
    }

    #[test]
    fn load_chain_reads_ca_trace_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write_pdb(dir.path(), "1abc.pdb", &[("GLY", 0.0), ("ALA", 3.8), ("VAL", 7.6)]);
        let chain = load_chain(&path, "1ABC").unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.sequence(), "GAV");
        assert!((chain.residues()[1].position.x - 3.8).abs() < 1e-6);
    }

    #[test]
    fn load_chain_skips_non_standard_residues() {
        let dir = TempDir::new().unwrap();
        let path = write_pdb(dir.path(), "2xyz.pdb", &[("GLY", 0.0), ("HOH", 3.0), ("ALA", 6.0)]);
        let chain = load_chain(&path, "2XYZ").unwrap();
        assert_eq!(chain.sequence(), "GA");
    }

    #[test]
    fn load_chain_fails_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_chain(&dir.path().join("none.pdb"), "NONE").unwrap_err();
        assert!(matches!(err, LoadError::Structure { .. }));
    }

    #[test]
    fn find_structure_file_prefers_pdb_over_ent() {
        let dir = TempDir::new().unwrap();
        write_pdb(dir.path(), "1abc.pdb", &[("GLY", 0.0)]);
        write_pdb(dir.path(), "pdb1abc.ent", &[("GLY", 0.0)]);
        let path = find_structure_file(dir.path(), "1ABC").unwrap();
        assert!(path.ends_with("1abc.pdb"));
    }

    #[test]
    fn find_structure_file_reports_missing_code() {
        let dir = TempDir::new().unwrap();
        let err = find_structure_file(dir.path(), "9ZZZ").unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn list_structure_files_is_sorted_and_uppercased() {
        let dir = TempDir::new().unwrap();
        write_pdb(dir.path(), "2xyz.pdb", &[("GLY", 0.0)]);
        write_pdb(dir.path(), "1abc.pdb", &[("GLY", 0.0)]);
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let files = list_structure_files(dir.path()).unwrap();
        let codes: Vec<_> = files.iter().map(|(code, _)| code.as_str()).collect();
        assert_eq!(codes, vec!["1ABC", "2XYZ"]);
    }
}
