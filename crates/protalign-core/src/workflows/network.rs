//! Contact-network export for one chain.
//!
//! Instead of rendering, the network is written as two CSV tables: one of
//! nodes (residues with a selected physicochemical property) and one of
//! edges (contact pairs with distance, model-average attention, and a
//! stability label derived from the hydropathy gap of the pair).

use crate::core::attention::AttentionStack;
use crate::core::contact;
use crate::core::models::chain::ProteinChain;
use crate::core::models::properties;
use crate::engine::config::Cutoffs;
use crate::engine::error::EngineError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, instrument};

/// Node attribute selectable on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeProperty {
    Hydropathy,
    Charge,
    Volume,
}

impl NodeProperty {
    fn value_for(&self, code: char) -> Option<f64> {
        match self {
            NodeProperty::Hydropathy => properties::hydropathy(code),
            NodeProperty::Charge => properties::charge(code),
            NodeProperty::Volume => properties::volume(code),
        }
    }
}

impl FromStr for NodeProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hydropathy" => Ok(NodeProperty::Hydropathy),
            "charge" => Ok(NodeProperty::Charge),
            "volume" => Ok(NodeProperty::Volume),
            other => Err(format!(
                "unknown property '{other}', expected one of: hydropathy, charge, volume"
            )),
        }
    }
}

impl fmt::Display for NodeProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeProperty::Hydropathy => "hydropathy",
            NodeProperty::Charge => "charge",
            NodeProperty::Volume => "volume",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Serialize)]
struct NodeRecord {
    index: usize,
    residue: char,
    position: isize,
    property: String,
    value: Option<f64>,
}

#[derive(Debug, Serialize)]
struct EdgeRecord {
    source: usize,
    target: usize,
    distance: f64,
    attention: f64,
    stability: &'static str,
}

/// Paths of the two tables written by [`export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkFiles {
    pub nodes: PathBuf,
    pub edges: PathBuf,
}

/// Stability label for a contact edge, from the hydropathy gap of its
/// endpoints. Residues without a hydropathy value yield "neutral".
fn stability_label(a: char, b: char, cutoffs: &Cutoffs) -> &'static str {
    let (Some(ha), Some(hb)) = (properties::hydropathy(a), properties::hydropathy(b)) else {
        return "neutral";
    };
    let gap = (ha - hb).abs();
    if gap <= cutoffs.stability {
        "stable"
    } else if gap >= cutoffs.instability {
        "unstable"
    } else {
        "neutral"
    }
}

/// Write the contact network of a chain into `net_folder`.
///
/// Edges are the upper-triangle contact pairs; the attention column is the
/// symmetrized model-average weight of the pair.
#[instrument(skip_all, fields(chain = %chain.code(), property = %property))]
pub fn export(
    chain: &ProteinChain,
    stack: &AttentionStack,
    cutoffs: &Cutoffs,
    net_folder: &Path,
    property: NodeProperty,
) -> Result<NetworkFiles, EngineError> {
    let distances = contact::distance_map(&chain.positions())?;
    let contacts = contact::binarize(&distances, cutoffs.distance, cutoffs.position)?;
    let average = stack.model_average();

    std::fs::create_dir_all(net_folder)?;
    let files = NetworkFiles {
        nodes: net_folder.join(format!("{}_nodes.csv", chain.code())),
        edges: net_folder.join(format!("{}_edges.csv", chain.code())),
    };

    let mut nodes = csv::Writer::from_path(&files.nodes)?;
    for (index, residue) in chain.residues().iter().enumerate() {
        nodes.serialize(NodeRecord {
            index,
            residue: residue.code,
            position: residue.number,
            property: property.to_string(),
            value: property.value_for(residue.code),
        })?;
    }
    nodes.flush()?;

    let residues = chain.residues();
    let mut edge_count = 0usize;
    let mut edges = csv::Writer::from_path(&files.edges)?;
    for i in 0..chain.len() {
        for j in (i + 1)..chain.len() {
            if !contacts[(i, j)] {
                continue;
            }
            edges.serialize(EdgeRecord {
                source: i,
                target: j,
                distance: distances[(i, j)],
                attention: (average[(i, j)] + average[(j, i)]) / 2.0,
                stability: stability_label(residues[i].code, residues[j].code, cutoffs),
            })?;
            edge_count += 1;
        }
    }
    edges.flush()?;

    info!(
        nodes = chain.len(),
        edges = edge_count,
        "contact network exported"
    );
    Ok(files)
}
