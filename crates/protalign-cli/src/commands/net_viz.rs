use crate::cli::NetVizArgs;
use crate::error::{CliError, Result};
use protalign::core::io::attention::CsvAttentionSource;
use protalign::core::io::pdb;
use protalign::core::io::traits::AttentionSource;
use protalign::engine::config::PipelineConfig;
use protalign::engine::error::EngineError;
use protalign::workflows::network;
use tracing::info;

pub fn run(args: NetVizArgs, config: &PipelineConfig) -> Result<()> {
    let code = args.chain_code.to_ascii_uppercase();

    let wrap = |source| {
        CliError::Core(EngineError::ChainLoad {
            code: code.clone(),
            source,
        })
    };
    let path = pdb::find_structure_file(&config.folders.pdb, &code).map_err(wrap)?;
    let chain = pdb::load_chain(&path, &code).map_err(wrap)?;

    let source = CsvAttentionSource::new(config.folders.files.clone());
    let stack = source.attention_for(&code, chain.len()).map_err(wrap)?;

    info!(chain = %code, property = %args.property, "exporting contact network");
    let files = network::export(
        &chain,
        &stack,
        &config.cutoffs,
        &config.folders.networks,
        args.property,
    )?;

    println!("Contact network for {code} written:");
    println!("  nodes: {}", files.nodes.display());
    println!("  edges: {}", files.edges.display());

    Ok(())
}
