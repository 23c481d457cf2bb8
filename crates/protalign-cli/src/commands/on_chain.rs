use crate::cli::OnChainArgs;
use crate::error::Result;
use protalign::core::io::attention::CsvAttentionSource;
use protalign::engine::config::PipelineConfig;
use protalign::workflows;
use tracing::info;

pub fn run(args: OnChainArgs, config: &PipelineConfig) -> Result<()> {
    let code = args.chain_code.to_ascii_uppercase();
    let source = CsvAttentionSource::new(config.folders.files.clone());

    info!(chain = %code, "analyzing single chain");
    let analysis = workflows::set::process_chain(&code, config, &source)?;

    println!("Chain {code} ({} residues)", analysis.residue_count);
    println!("Attention-contact alignment: {:.4}", analysis.alignment_score);
    println!("Attention similarity:        {:.4}", analysis.attention_similarity);
    println!("Alignment per layer:");
    for (layer, value) in analysis.layer_alignment.iter().enumerate() {
        println!("  layer {:>2}: {:.4}", layer, value);
    }

    Ok(())
}
