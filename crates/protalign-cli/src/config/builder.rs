use super::file::FileConfig;
use crate::error::{CliError, Result};
use protalign::engine::config::{PipelineConfig, PipelineConfigBuilder};
use std::path::Path;
use tracing::info;

/// Load the configuration file and assemble the immutable pipeline config,
/// filling absent sections with the built-in defaults.
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig> {
    let file = FileConfig::from_file(path)?;
    build(file)
}

fn build(file: FileConfig) -> Result<PipelineConfig> {
    let cutoffs = file.cutoffs.unwrap_or_default();
    let paths = file.paths.unwrap_or_default();
    let proteins = file.proteins.unwrap_or_default();
    let codes = proteins.codes();

    if !codes.is_empty() {
        info!(codes = codes.len(), "explicit protein codes configured");
    }

    PipelineConfigBuilder::new()
        .attention_cutoff(cutoffs.attention_cutoff)
        .distance_cutoff(cutoffs.distance_cutoff)
        .position_cutoff(cutoffs.position_cutoff)
        .instability_cutoff(cutoffs.instability_cutoff)
        .stability_cutoff(cutoffs.stability_cutoff)
        .pdb_folder(paths.pdb_folder)
        .file_folder(paths.file_folder)
        .plot_folder(paths.plot_folder)
        .net_folder(paths.net_folder)
        .test_folder(paths.test_folder)
        .protein_codes(codes)
        .min_length(proteins.min_length)
        .max_length(proteins.max_length)
        .sample_size(proteins.sample_size)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_yields_the_default_pipeline_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file).unwrap();
        let config = load_pipeline_config(file.path()).unwrap();
        assert_eq!(config.cutoffs.position, 6);
        assert_eq!(config.selection.sample_size, 10);
        assert!(config.selection.protein_codes.is_empty());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[proteins]\nPROTEIN_CODES = \"1abc\"\nMIN_LENGTH = 5\nMAX_LENGTH = 50\nSAMPLE_SIZE = 2\n"
        )
        .unwrap();
        let config = load_pipeline_config(file.path()).unwrap();
        assert_eq!(config.selection.protein_codes, vec!["1ABC"]);
        assert_eq!(config.selection.max_length, 50);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_pipeline_config(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn inverted_length_bounds_are_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[proteins]\nMIN_LENGTH = 500\nMAX_LENGTH = 50\nSAMPLE_SIZE = 2\n"
        )
        .unwrap();
        assert!(load_pipeline_config(file.path()).is_err());
    }
}
