use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid parameter value for {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },
}

/// Numeric thresholds controlling the binary decisions of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Cutoffs {
    /// Attention weights at or above this value count as "high attention".
    pub attention: f64,
    /// Maximum CA-CA distance (Angstrom) for a residue pair to be a contact.
    pub distance: f64,
    /// Minimum sequence separation for a residue pair to be a contact.
    pub position: usize,
    /// Hydropathy gap at or above which a contact edge is labeled unstable.
    pub instability: f64,
    /// Hydropathy gap at or below which a contact edge is labeled stable.
    pub stability: f64,
}

/// Folders the pipeline reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folders {
    /// Structure files (PDB/mmCIF).
    pub pdb: PathBuf,
    /// Attention sidecar files and score tables.
    pub files: PathBuf,
    /// Plot output (written by external tooling, resolved here).
    pub plots: PathBuf,
    /// Network export output.
    pub networks: PathBuf,
    /// Fixture data for integration testing.
    pub test: PathBuf,
}

/// Which chains a batch run processes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainSelection {
    /// Explicit chain codes. When non-empty, this list wins and the length
    /// filter below is ignored.
    pub protein_codes: Vec<String>,
    /// Inclusive residue-count bounds for sampled chains.
    pub min_length: usize,
    pub max_length: usize,
    /// Cap on the number of sampled chains.
    pub sample_size: usize,
}

/// The complete, immutable configuration of one pipeline run. Built once and
/// passed down explicitly; no component reads global state.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub cutoffs: Cutoffs,
    pub folders: Folders,
    pub selection: ChainSelection,
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    attention_cutoff: Option<f64>,
    distance_cutoff: Option<f64>,
    position_cutoff: Option<usize>,
    instability_cutoff: Option<f64>,
    stability_cutoff: Option<f64>,
    pdb_folder: Option<PathBuf>,
    file_folder: Option<PathBuf>,
    plot_folder: Option<PathBuf>,
    net_folder: Option<PathBuf>,
    test_folder: Option<PathBuf>,
    protein_codes: Vec<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    sample_size: Option<usize>,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attention_cutoff(mut self, cutoff: f64) -> Self {
        self.attention_cutoff = Some(cutoff);
        self
    }
    pub fn distance_cutoff(mut self, cutoff: f64) -> Self {
        self.distance_cutoff = Some(cutoff);
        self
    }
    pub fn position_cutoff(mut self, cutoff: usize) -> Self {
        self.position_cutoff = Some(cutoff);
        self
    }
    pub fn instability_cutoff(mut self, cutoff: f64) -> Self {
        self.instability_cutoff = Some(cutoff);
        self
    }
    pub fn stability_cutoff(mut self, cutoff: f64) -> Self {
        self.stability_cutoff = Some(cutoff);
        self
    }
    pub fn pdb_folder(mut self, path: PathBuf) -> Self {
        self.pdb_folder = Some(path);
        self
    }
    pub fn file_folder(mut self, path: PathBuf) -> Self {
        self.file_folder = Some(path);
        self
    }
    pub fn plot_folder(mut self, path: PathBuf) -> Self {
        self.plot_folder = Some(path);
        self
    }
    pub fn net_folder(mut self, path: PathBuf) -> Self {
        self.net_folder = Some(path);
        self
    }
    pub fn test_folder(mut self, path: PathBuf) -> Self {
        self.test_folder = Some(path);
        self
    }
    pub fn protein_codes(mut self, codes: Vec<String>) -> Self {
        self.protein_codes = codes;
        self
    }
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }
    pub fn sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        let cutoffs = Cutoffs {
            attention: self
                .attention_cutoff
                .ok_or(ConfigError::MissingParameter("attention_cutoff"))?,
            distance: self
                .distance_cutoff
                .ok_or(ConfigError::MissingParameter("distance_cutoff"))?,
            position: self
                .position_cutoff
                .ok_or(ConfigError::MissingParameter("position_cutoff"))?,
            instability: self
                .instability_cutoff
                .ok_or(ConfigError::MissingParameter("instability_cutoff"))?,
            stability: self
                .stability_cutoff
                .ok_or(ConfigError::MissingParameter("stability_cutoff"))?,
        };
        if cutoffs.distance <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "distance_cutoff",
                message: format!("must be positive, got {}", cutoffs.distance),
            });
        }
        if cutoffs.attention < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "attention_cutoff",
                message: format!("must be non-negative, got {}", cutoffs.attention),
            });
        }

        let folders = Folders {
            pdb: self
                .pdb_folder
                .ok_or(ConfigError::MissingParameter("pdb_folder"))?,
            files: self
                .file_folder
                .ok_or(ConfigError::MissingParameter("file_folder"))?,
            plots: self
                .plot_folder
                .ok_or(ConfigError::MissingParameter("plot_folder"))?,
            networks: self
                .net_folder
                .ok_or(ConfigError::MissingParameter("net_folder"))?,
            test: self
                .test_folder
                .ok_or(ConfigError::MissingParameter("test_folder"))?,
        };

        let selection = ChainSelection {
            protein_codes: self.protein_codes,
            min_length: self
                .min_length
                .ok_or(ConfigError::MissingParameter("min_length"))?,
            max_length: self
                .max_length
                .ok_or(ConfigError::MissingParameter("max_length"))?,
            sample_size: self
                .sample_size
                .ok_or(ConfigError::MissingParameter("sample_size"))?,
        };
        if selection.min_length > selection.max_length {
            return Err(ConfigError::InvalidParameter {
                name: "min_length",
                message: format!(
                    "min_length {} exceeds max_length {}",
                    selection.min_length, selection.max_length
                ),
            });
        }

        Ok(PipelineConfig {
            cutoffs,
            folders,
            selection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
            .attention_cutoff(0.1)
            .distance_cutoff(8.0)
            .position_cutoff(6)
            .instability_cutoff(6.0)
            .stability_cutoff(2.0)
            .pdb_folder(PathBuf::from("pdb_files"))
            .file_folder(PathBuf::from("files"))
            .plot_folder(PathBuf::from("plots"))
            .net_folder(PathBuf::from("networks"))
            .test_folder(PathBuf::from("tests"))
            .min_length(15)
            .max_length(300)
            .sample_size(10)
    }

    #[test]
    fn build_succeeds_with_all_parameters() {
        let config = full_builder().build().unwrap();
        assert_eq!(config.cutoffs.position, 6);
        assert!(config.selection.protein_codes.is_empty());
    }

    #[test]
    fn build_fails_on_missing_cutoff() {
        let result = PipelineConfigBuilder::new()
            .distance_cutoff(8.0)
            .position_cutoff(6)
            .instability_cutoff(6.0)
            .stability_cutoff(2.0)
            .pdb_folder(PathBuf::from("pdb_files"))
            .file_folder(PathBuf::from("files"))
            .plot_folder(PathBuf::from("plots"))
            .net_folder(PathBuf::from("networks"))
            .test_folder(PathBuf::from("tests"))
            .min_length(15)
            .max_length(300)
            .sample_size(10)
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingParameter("attention_cutoff")
        );
    }

    #[test]
    fn build_rejects_inverted_length_bounds() {
        let result = full_builder().min_length(400).max_length(300).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidParameter {
                name: "min_length",
                ..
            }
        ));
    }

    #[test]
    fn build_rejects_negative_attention_cutoff() {
        let result = full_builder().attention_cutoff(-0.1).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidParameter {
                name: "attention_cutoff",
                ..
            }
        ));
    }
}
