//! Built-in values used when a configuration section is absent.

use super::file::{FileCutoffs, FilePaths, FileProteins};
use std::path::PathBuf;

pub const ATTENTION_CUTOFF: f64 = 0.1;
pub const DISTANCE_CUTOFF: f64 = 8.0;
pub const POSITION_CUTOFF: usize = 6;
pub const INSTABILITY_CUTOFF: f64 = 6.0;
pub const STABILITY_CUTOFF: f64 = 2.0;

pub const MIN_LENGTH: usize = 15;
pub const MAX_LENGTH: usize = 300;
pub const SAMPLE_SIZE: usize = 10;

impl Default for FileCutoffs {
    fn default() -> Self {
        Self {
            attention_cutoff: ATTENTION_CUTOFF,
            distance_cutoff: DISTANCE_CUTOFF,
            position_cutoff: POSITION_CUTOFF,
            instability_cutoff: INSTABILITY_CUTOFF,
            stability_cutoff: STABILITY_CUTOFF,
        }
    }
}

impl Default for FilePaths {
    fn default() -> Self {
        Self {
            pdb_folder: PathBuf::from("pdb_files"),
            file_folder: PathBuf::from("files"),
            plot_folder: PathBuf::from("plots"),
            net_folder: PathBuf::from("networks"),
            test_folder: PathBuf::from("tests"),
        }
    }
}

impl Default for FileProteins {
    fn default() -> Self {
        Self {
            protein_codes: String::new(),
            min_length: MIN_LENGTH,
            max_length: MAX_LENGTH,
            sample_size: SAMPLE_SIZE,
        }
    }
}
