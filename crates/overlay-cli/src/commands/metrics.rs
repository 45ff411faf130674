use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use overlay_graph::{average_clustering, average_path_length, canonical_hash, topology_from_json};
use serde_json::json;

#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Topology snapshot (graph.json) produced by `overlay run`.
    #[arg(long)]
    pub graph: PathBuf,
    /// Optional path for a JSON report; printed to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &MetricsArgs) -> Result<(), Box<dyn Error>> {
    let topology = topology_from_json(&fs::read_to_string(&args.graph)?)?;
    let report = json!({
        "nodes": topology.node_count(),
        "edges": topology.edge_count(),
        "avg_path_length": average_path_length(&topology),
        "clustering": average_clustering(&topology),
        "graph_hash": canonical_hash(&topology)?,
    });
    let rendered = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(path) => fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }
    Ok(())
}
