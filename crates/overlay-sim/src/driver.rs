//! Round orchestration: partial activation, sequential perceive/act cycles,
//! per-round observation, then the search measurement phase.

use overlay_core::rng::RngHandle;
use overlay_core::{NodeId, OverlayError};
use overlay_graph::{
    average_clustering, average_path_length, canonical_hash, gen_connected_random, Topology,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::agent::PeerAgent;
use crate::config::SimConfig;
use crate::determinism;
use crate::history::{HistoryRecorder, RoundSample};
use crate::router::{run_queries, SearchStats};

/// Summary returned to callers after a run completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Per-round observational history.
    pub rounds: Vec<RoundSample>,
    /// Aggregate statistics from the search phase.
    pub search: SearchStats,
    /// Edge count of the final topology.
    pub final_edge_count: usize,
    /// Canonical structural hash of the final topology.
    pub final_graph_hash: String,
}

/// Bootstraps a connected random overlay and runs the full simulation.
pub fn run(config: &SimConfig, seed: u64) -> Result<(Topology, RunSummary), OverlayError> {
    config.validate()?;
    let mut rng = RngHandle::from_seed(determinism::bootstrap_seed(seed));
    let mut topology = gen_connected_random(config.num_nodes, config.initial_degree, &mut rng)?;
    let summary = run_with_topology(config, seed, &mut topology)?;
    Ok((topology, summary))
}

/// Runs rewiring rounds and the search phase against a caller-supplied
/// topology.
///
/// Within a round the awake agents execute strictly in sampled order; each
/// agent observes the cumulative effect of every earlier mutation in the
/// same and prior rounds. That sequential discipline is the whole
/// concurrency model: exactly one agent touches the topology at a time.
pub fn run_with_topology(
    config: &SimConfig,
    seed: u64,
    topology: &mut Topology,
) -> Result<RunSummary, OverlayError> {
    config.validate()?;
    let ids: Vec<NodeId> = topology.nodes().collect();
    let mut agents: Vec<PeerAgent> = ids
        .iter()
        .map(|&id| PeerAgent::new(id, topology))
        .collect();

    let mut recorder = HistoryRecorder::new();
    for round in 0..config.iterations {
        let mut activation_rng = RngHandle::from_seed(determinism::activation_seed(seed, round));
        let awake = sample_awake(topology, config.rewiring_prob, &mut activation_rng);
        let mut rewires = 0usize;
        for (slot, &node) in awake.iter().enumerate() {
            let mut agent_rng = RngHandle::from_seed(determinism::agent_seed(seed, round, slot));
            let agent = &mut agents[node.as_raw() as usize];
            agent.perceive(topology, config.k_discovery, &mut agent_rng);
            let outcome = agent.act(topology, &config.weights, &mut agent_rng)?;
            if outcome.changed {
                rewires += 1;
            }
        }
        recorder.push(RoundSample {
            round,
            avg_path_length: average_path_length(topology),
            clustering: average_clustering(topology),
            edges: topology.edge_count(),
            activated: awake.len(),
            rewires,
        });
    }

    let search = run_queries(
        topology,
        &agents,
        config.num_search_queries,
        config.query_ttl,
        seed,
    );
    let final_graph_hash = canonical_hash(topology)?;
    Ok(RunSummary {
        rounds: recorder.samples().to_vec(),
        search,
        final_edge_count: topology.edge_count(),
        final_graph_hash,
    })
}

/// Samples this round's awake agents: `round(n * rewiring_prob)` distinct
/// peers, uniformly without replacement.
fn sample_awake(topology: &Topology, rewiring_prob: f64, rng: &mut RngHandle) -> Vec<NodeId> {
    let nodes: Vec<NodeId> = topology.nodes().collect();
    let count = ((nodes.len() as f64 * rewiring_prob).round() as usize).min(nodes.len());
    nodes.choose_multiple(rng, count).copied().collect()
}
