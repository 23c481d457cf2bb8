use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The on-disk configuration: INI-style sections with the documented
/// upper-case keys. Sections may be omitted entirely (defaults apply), but a
/// present section must be complete.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub cutoffs: Option<FileCutoffs>,
    pub paths: Option<FilePaths>,
    pub proteins: Option<FileProteins>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileCutoffs {
    #[serde(rename = "ATTENTION_CUTOFF")]
    pub attention_cutoff: f64,
    #[serde(rename = "DISTANCE_CUTOFF")]
    pub distance_cutoff: f64,
    #[serde(rename = "POSITION_CUTOFF")]
    pub position_cutoff: usize,
    #[serde(rename = "INSTABILITY_CUTOFF")]
    pub instability_cutoff: f64,
    #[serde(rename = "STABILITY_CUTOFF")]
    pub stability_cutoff: f64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FilePaths {
    #[serde(rename = "PDB_FOLDER")]
    pub pdb_folder: PathBuf,
    #[serde(rename = "FILE_FOLDER")]
    pub file_folder: PathBuf,
    #[serde(rename = "PLOT_FOLDER")]
    pub plot_folder: PathBuf,
    #[serde(rename = "NET_FOLDER")]
    pub net_folder: PathBuf,
    #[serde(rename = "TEST_FOLDER")]
    pub test_folder: PathBuf,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileProteins {
    /// Whitespace-separated chain codes; empty means "sample by length".
    #[serde(rename = "PROTEIN_CODES", default)]
    pub protein_codes: String,
    #[serde(rename = "MIN_LENGTH")]
    pub min_length: usize,
    #[serde(rename = "MAX_LENGTH")]
    pub max_length: usize,
    #[serde(rename = "SAMPLE_SIZE")]
    pub sample_size: usize,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!(
                "cannot read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: FileConfig = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: anyhow::anyhow!(e),
        })?;
        debug!(path = %path.display(), "configuration file parsed");
        Ok(config)
    }
}

impl FileProteins {
    /// The explicit chain codes, upper-cased, in file order.
    pub fn codes(&self) -> Vec<String> {
        self.protein_codes
            .split_whitespace()
            .map(|code| code.to_ascii_uppercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[cutoffs]
ATTENTION_CUTOFF = 0.1
DISTANCE_CUTOFF = 8.0
POSITION_CUTOFF = 6
INSTABILITY_CUTOFF = 6.0
STABILITY_CUTOFF = 2.0

[paths]
PDB_FOLDER = "pdb_files"
FILE_FOLDER = "files"
PLOT_FOLDER = "plots"
NET_FOLDER = "networks"
TEST_FOLDER = "tests"

[proteins]
PROTEIN_CODES = "1abc 2xyz"
MIN_LENGTH = 15
MAX_LENGTH = 300
SAMPLE_SIZE = 10
"#;

    #[test]
    fn full_config_parses_all_sections() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        let cutoffs = config.cutoffs.unwrap();
        assert_eq!(cutoffs.position_cutoff, 6);
        let paths = config.paths.unwrap();
        assert_eq!(paths.net_folder, PathBuf::from("networks"));
        let proteins = config.proteins.unwrap();
        assert_eq!(proteins.codes(), vec!["1ABC", "2XYZ"]);
    }

    #[test]
    fn missing_sections_are_allowed() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.cutoffs.is_none());
        assert!(config.paths.is_none());
        assert!(config.proteins.is_none());
    }

    #[test]
    fn incomplete_cutoffs_section_is_rejected() {
        let result: std::result::Result<FileConfig, _> =
            toml::from_str("[cutoffs]\nATTENTION_CUTOFF = 0.1\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<FileConfig, _> =
            toml::from_str("[cutoffs]\nTYPO_CUTOFF = 1.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn empty_protein_codes_mean_sampling() {
        let config: FileConfig = toml::from_str(
            "[proteins]\nPROTEIN_CODES = \"\"\nMIN_LENGTH = 1\nMAX_LENGTH = 2\nSAMPLE_SIZE = 3\n",
        )
        .unwrap();
        assert!(config.proteins.unwrap().codes().is_empty());
    }
}
