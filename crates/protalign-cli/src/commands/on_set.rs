use crate::cli::OnSetArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use protalign::core::io::attention::CsvAttentionSource;
use protalign::engine::aggregate::ChainAnalysis;
use protalign::engine::config::PipelineConfig;
use protalign::engine::progress::ProgressReporter;
use protalign::workflows;
use std::path::Path;
use tracing::info;

pub fn run(args: OnSetArgs, config: &PipelineConfig) -> Result<()> {
    let source = CsvAttentionSource::new(config.folders.files.clone());

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting batch attention alignment...");
    let outcome = workflows::set::run(config, &source, &reporter)?;

    if args.save_single {
        for analysis in &outcome.analyses {
            write_head_alignment(&config.folders.files, analysis)?;
        }
        info!(
            chains = outcome.analyses.len(),
            "per-chain head alignment tables written"
        );
    }

    let summary = &outcome.summary;
    println!("\nChains processed: {}", summary.processed);
    if !summary.skipped.is_empty() {
        println!("Chains skipped:   {}", summary.skipped.len());
        for skipped in &summary.skipped {
            println!("  - {}: {}", skipped.code, skipped.reason);
        }
    }

    match &summary.means {
        Some(means) => {
            println!("Mean attention-contact alignment: {:.4}", means.alignment_score);
            println!("Mean attention similarity:        {:.4}", means.attention_similarity);
            println!("Mean alignment per layer:");
            for (layer, value) in means.layer_alignment.iter().enumerate() {
                println!("  layer {:>2}: {:.4}", layer, value);
            }
        }
        None => println!("No chain could be processed; nothing to average."),
    }

    Ok(())
}

/// Write one chain's per-head alignment matrix as a layer-by-head CSV table.
fn write_head_alignment(folder: &Path, analysis: &ChainAnalysis) -> Result<()> {
    let path = folder.join(format!("{}_head_alignment.csv", analysis.code));
    let mut writer = csv::Writer::from_path(&path).map_err(anyhow::Error::from)?;

    let n_heads = analysis.head_alignment.ncols();
    let mut header = vec!["layer".to_string()];
    header.extend((0..n_heads).map(|h| format!("head_{h}")));
    writer.write_record(&header).map_err(anyhow::Error::from)?;

    for layer in 0..analysis.head_alignment.nrows() {
        let mut record = vec![layer.to_string()];
        record.extend(
            (0..n_heads).map(|head| format!("{:.6}", analysis.head_alignment[(layer, head)])),
        );
        writer.write_record(&record).map_err(anyhow::Error::from)?;
    }
    writer.flush()?;
    Ok(())
}
