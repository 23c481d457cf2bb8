//! Batch analysis over a set of peptide chains.
//!
//! Chains are independent, so they are processed in parallel; results are
//! folded into the accumulator sequentially afterwards. A per-chain failure
//! is recorded as a skip and never aborts the batch.

use crate::core::io::pdb;
use crate::core::io::traits::AttentionSource;
use crate::core::models::properties::AMINO_ACIDS;
use crate::engine::aggregate::{ChainAnalysis, SetAccumulator, SetMeans, SetSummary};
use crate::engine::config::PipelineConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::selection::{self, ChainCandidate};
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Serialize)]
struct ScoreRecord<'a> {
    code: &'a str,
    residue_count: usize,
    alignment_score: f64,
    attention_similarity: f64,
}

/// The result of a batch run: the aggregate summary plus the per-chain
/// analyses it was computed from, in processing order.
#[derive(Debug)]
pub struct SetOutcome {
    pub summary: SetSummary,
    pub analyses: Vec<ChainAnalysis>,
}

/// Run the alignment pipeline over the configured chain set.
///
/// The chain list comes from `PROTEIN_CODES` when present; otherwise the PDB
/// folder is scanned and filtered by the configured length bounds. Per-chain
/// scores are written to `chain_scores.csv` in the file folder, and the mean
/// per-type attention shares to `residue_type_attention.csv` next to it.
#[instrument(skip_all)]
pub fn run(
    config: &PipelineConfig,
    source: &(dyn AttentionSource + Sync),
    reporter: &ProgressReporter,
) -> Result<SetOutcome, EngineError> {
    let codes = resolve_codes(config)?;
    if codes.is_empty() {
        return Err(EngineError::EmptySelection);
    }
    info!(chains = codes.len(), "starting batch analysis");
    reporter.report(Progress::SetStart {
        total_chains: codes.len() as u64,
    });

    let outcomes: Vec<(String, Result<ChainAnalysis, EngineError>)> = codes
        .par_iter()
        .map(|code| {
            reporter.report(Progress::ChainStart { code: code.clone() });
            let outcome = process_chain(code, config, source);
            match &outcome {
                Ok(_) => reporter.report(Progress::ChainFinish { code: code.clone() }),
                Err(e) => reporter.report(Progress::ChainSkipped {
                    code: code.clone(),
                    reason: e.to_string(),
                }),
            }
            (code.clone(), outcome)
        })
        .collect();

    let mut accumulator = SetAccumulator::new();
    let mut analyses = Vec::new();
    for (code, outcome) in outcomes {
        match outcome {
            Ok(analysis) => {
                accumulator.record(&analysis)?;
                analyses.push(analysis);
            }
            Err(e) => {
                warn!(chain = %code, error = %e, "chain skipped");
                accumulator.skip(code, e.to_string());
            }
        }
    }

    let summary = accumulator.finish();
    write_score_table(&config.folders.files, &analyses)?;
    if let Some(means) = &summary.means {
        write_type_attention_table(&config.folders.files, means)?;
        reporter.report(Progress::Message(format!(
            "score tables written to '{}'",
            config.folders.files.display()
        )));
    }
    reporter.report(Progress::SetFinish);

    info!(
        processed = summary.processed,
        skipped = summary.skipped.len(),
        "batch analysis finished"
    );
    Ok(SetOutcome { summary, analyses })
}

/// Load and score a single chain by code, resolving its structure file and
/// attention sidecar from the configured folders.
pub fn process_chain(
    code: &str,
    config: &PipelineConfig,
    source: &dyn AttentionSource,
) -> Result<ChainAnalysis, EngineError> {
    let wrap = |source| EngineError::ChainLoad {
        code: code.to_string(),
        source,
    };
    let path = pdb::find_structure_file(&config.folders.pdb, code).map_err(wrap)?;
    let chain = pdb::load_chain(&path, code).map_err(wrap)?;
    let stack = source.attention_for(code, chain.len()).map_err(wrap)?;
    super::chain::analyze(&chain, &stack, &config.cutoffs)
}

fn resolve_codes(config: &PipelineConfig) -> Result<Vec<String>, EngineError> {
    if !config.selection.protein_codes.is_empty() {
        return Ok(selection::select_chains(&config.selection, &[]));
    }

    let mut pool = Vec::new();
    for (code, path) in pdb::list_structure_files(&config.folders.pdb)? {
        match pdb::load_chain(&path, &code) {
            Ok(chain) => pool.push(ChainCandidate::new(code, chain.len())),
            Err(e) => {
                warn!(chain = %code, error = %e, "unreadable structure excluded from pool");
            }
        }
    }
    Ok(selection::select_chains(&config.selection, &pool))
}

fn write_score_table(folder: &Path, analyses: &[ChainAnalysis]) -> Result<(), EngineError> {
    if analyses.is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(folder)?;
    let mut writer = csv::Writer::from_path(folder.join("chain_scores.csv"))?;
    for analysis in analyses {
        writer.serialize(ScoreRecord {
            code: &analysis.code,
            residue_count: analysis.residue_count,
            alignment_score: analysis.alignment_score,
            attention_similarity: analysis.attention_similarity,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Save the set-mean attention share per amino acid type, in percent, both
/// relative and occurrence-weighted.
fn write_type_attention_table(folder: &Path, means: &SetMeans) -> Result<(), EngineError> {
    std::fs::create_dir_all(folder)?;
    let mut writer = csv::Writer::from_path(folder.join("residue_type_attention.csv"))?;
    writer.write_record(["residue", "relative_pct", "weighted_pct"])?;
    for (index, code) in AMINO_ACIDS.iter().enumerate() {
        writer.write_record([
            code.to_string(),
            format!("{:.6}", means.type_attention.relative[index] * 100.0),
            format!("{:.6}", means.type_attention.weighted[index] * 100.0),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attention::AttentionStack;
    use crate::core::io::attention::MemoryAttentionSource;
    use crate::engine::config::PipelineConfigBuilder;
    use nalgebra::DMatrix;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn write_line_pdb(folder: &Path, name: &str, n: usize) {
        let path = folder.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for i in 0..n {
            writeln!(
                file,
                "ATOM  {:>5} {:^4} {:>3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                i + 1,
                "CA",
                "GLY",
                i + 1,
                i as f64 * 3.0,
                0.0,
                0.0,
                1.0,
                0.0,
                "C"
            )
            .unwrap();
        }
        writeln!(file, "END").unwrap();
    }

    fn config_for(dir: &TempDir, codes: &[&str]) -> PipelineConfig {
        let root = dir.path();
        PipelineConfigBuilder::new()
            .attention_cutoff(0.1)
            .distance_cutoff(8.0)
            .position_cutoff(2)
            .instability_cutoff(6.0)
            .stability_cutoff(2.0)
            .pdb_folder(root.join("pdb"))
            .file_folder(root.join("files"))
            .plot_folder(root.join("plots"))
            .net_folder(root.join("networks"))
            .test_folder(PathBuf::from("tests"))
            .protein_codes(codes.iter().map(|c| c.to_string()).collect())
            .min_length(1)
            .max_length(1000)
            .sample_size(10)
            .build()
            .unwrap()
    }

    fn uniform_stack(n: usize) -> AttentionStack {
        AttentionStack::new(vec![vec![DMatrix::from_element(n, n, 0.5)]]).unwrap()
    }

    #[test]
    fn batch_skips_failing_chains_without_aborting() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pdb")).unwrap();
        write_line_pdb(&dir.path().join("pdb"), "1abc.pdb", 10);

        let mut source = MemoryAttentionSource::new();
        source.insert("1ABC", uniform_stack(10));
        // "2BAD" has no structure file at all.

        let config = config_for(&dir, &["1ABC", "2BAD"]);
        let reporter = ProgressReporter::new();
        let outcome = run(&config, &source, &reporter).unwrap();

        let summary = outcome.summary;
        assert_eq!(outcome.analyses.len(), 1);
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].code, "2BAD");
        assert!(summary.means.is_some());
    }

    #[test]
    fn batch_writes_the_score_table() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pdb")).unwrap();
        write_line_pdb(&dir.path().join("pdb"), "1abc.pdb", 10);

        let mut source = MemoryAttentionSource::new();
        source.insert("1ABC", uniform_stack(10));

        let config = config_for(&dir, &["1ABC"]);
        run(&config, &source, &ProgressReporter::new()).unwrap();

        let table = std::fs::read_to_string(dir.path().join("files/chain_scores.csv")).unwrap();
        assert!(table.starts_with("code,residue_count,alignment_score,attention_similarity"));
        assert!(table.contains("1ABC,10"));
    }

    #[test]
    fn batch_writes_the_type_attention_table() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pdb")).unwrap();
        write_line_pdb(&dir.path().join("pdb"), "1abc.pdb", 10);

        let mut source = MemoryAttentionSource::new();
        source.insert("1ABC", uniform_stack(10));

        let config = config_for(&dir, &["1ABC"]);
        run(&config, &source, &ProgressReporter::new()).unwrap();

        let table =
            std::fs::read_to_string(dir.path().join("files/residue_type_attention.csv")).unwrap();
        assert!(table.starts_with("residue,relative_pct,weighted_pct"));
        // An all-glycine chain puts 100% of the attention on G, 10% per
        // occurrence; every other type stays at zero.
        assert!(table.contains("G,100.000000,10.000000"));
        assert!(table.contains("A,0.000000,0.000000"));
        assert_eq!(table.lines().count(), 1 + AMINO_ACIDS.len());
    }

    #[test]
    fn batch_reports_table_writes_through_progress() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pdb")).unwrap();
        write_line_pdb(&dir.path().join("pdb"), "1abc.pdb", 10);

        let mut source = MemoryAttentionSource::new();
        source.insert("1ABC", uniform_stack(10));
        let config = config_for(&dir, &["1ABC"]);

        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));
        run(&config, &source, &reporter).unwrap();
        drop(reporter);

        let messages = messages.into_inner().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("score tables written"));
    }

    #[test]
    fn empty_selection_is_a_fatal_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pdb")).unwrap();
        let config = config_for(&dir, &[]);
        let source = MemoryAttentionSource::new();
        assert!(matches!(
            run(&config, &source, &ProgressReporter::new()).unwrap_err(),
            EngineError::EmptySelection
        ));
    }

    #[test]
    fn pool_scan_respects_length_bounds_and_sample_size() {
        let dir = TempDir::new().unwrap();
        let pdb = dir.path().join("pdb");
        std::fs::create_dir_all(&pdb).unwrap();
        write_line_pdb(&pdb, "1sho.pdb", 5);
        write_line_pdb(&pdb, "2mid.pdb", 20);
        write_line_pdb(&pdb, "3big.pdb", 60);
        write_line_pdb(&pdb, "4mid.pdb", 30);

        let mut config = config_for(&dir, &[]);
        config.selection.min_length = 10;
        config.selection.max_length = 40;
        config.selection.sample_size = 1;

        let codes = resolve_codes(&config).unwrap();
        assert_eq!(codes, vec!["2MID"]);
    }
}
