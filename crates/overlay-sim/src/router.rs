//! Memory-assisted gradient-ascent search over the evolved overlay.

use overlay_core::rng::RngHandle;
use overlay_core::NodeId;
use overlay_graph::Topology;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::PeerAgent;
use crate::determinism;

/// Why a search trial did not reach its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// Every neighbor of the current peer was already on the path.
    DeadEnd,
    /// The hop budget ran out before the target was reached.
    TtlExhausted,
}

/// Outcome of a single routed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialOutcome {
    /// The target was reached within the hop budget.
    Success {
        /// Number of edges traversed from source to target.
        hops: usize,
    },
    /// The query terminated without reaching the target.
    Failure(FailureReason),
    /// The trial drew `source == target` and ran no hops.
    Skipped,
}

/// Aggregate statistics over a batch of search trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total number of trials drawn, including skipped self-pairs.
    pub queries: usize,
    /// Trials that reached their target.
    pub successes: usize,
    /// Trials that dead-ended or exhausted their hop budget.
    pub failures: usize,
    /// Self-pair draws that ran no hops.
    pub skipped: usize,
    /// `successes / queries`. Skipped self-pairs stay in the denominator.
    pub success_rate: f64,
    /// Mean hops over successful trials, `0.0` when nothing succeeded.
    pub mean_hops: f64,
}

/// Routes one query from `source` toward `target` with at most `ttl` hops.
///
/// Each step first consults the current peer's belief set: a remembered
/// target that is a direct neighbor completes the query, and otherwise a
/// bridge neighbor adjacent to the target completes it in two hops. Stale
/// memory (the topology no longer supports the remembered reachability)
/// falls through to greedy forwarding toward the highest-degree neighbor not
/// yet on the path, lowest id on degree ties. A `ttl` of zero fails every
/// non-skipped trial before any memory lookup.
pub fn route_query(
    topology: &Topology,
    agents: &[PeerAgent],
    source: NodeId,
    target: NodeId,
    ttl: usize,
) -> TrialOutcome {
    if source == target {
        return TrialOutcome::Skipped;
    }
    let mut path = vec![source];
    let mut current = source;
    for _ in 0..ttl {
        if remembers(agents, current, target) {
            if topology.has_edge(current, target) {
                path.push(target);
                return TrialOutcome::Success {
                    hops: path.len() - 1,
                };
            }
            if let Ok(neighbors) = topology.neighbors(current) {
                if let Some(&bridge) = neighbors.iter().find(|&&b| topology.has_edge(b, target)) {
                    path.push(bridge);
                    path.push(target);
                    return TrialOutcome::Success {
                        hops: path.len() - 1,
                    };
                }
            }
            // Stale memory: fall through to gradient ascent.
        }

        let Ok(neighbors) = topology.neighbors(current) else {
            return TrialOutcome::Failure(FailureReason::DeadEnd);
        };
        let mut next: Option<(NodeId, usize)> = None;
        for &candidate in neighbors {
            if path.contains(&candidate) {
                continue;
            }
            let degree = topology.degree(candidate).unwrap_or(0);
            match next {
                None => next = Some((candidate, degree)),
                Some((_, best)) if degree > best => next = Some((candidate, degree)),
                _ => {}
            }
        }
        let Some((hop, _)) = next else {
            return TrialOutcome::Failure(FailureReason::DeadEnd);
        };
        path.push(hop);
        current = hop;
        if current == target {
            return TrialOutcome::Success {
                hops: path.len() - 1,
            };
        }
    }
    TrialOutcome::Failure(FailureReason::TtlExhausted)
}

/// Runs `trials` independent search queries against the final topology and
/// the agents' accumulated memories, with per-trial derived seeds.
pub fn run_queries(
    topology: &Topology,
    agents: &[PeerAgent],
    trials: usize,
    ttl: usize,
    master_seed: u64,
) -> SearchStats {
    let n = topology.node_count() as u64;
    if n == 0 {
        return SearchStats {
            queries: trials,
            successes: 0,
            failures: trials,
            skipped: 0,
            success_rate: 0.0,
            mean_hops: 0.0,
        };
    }
    let mut successes = 0usize;
    let mut failures = 0usize;
    let mut skipped = 0usize;
    let mut total_hops = 0usize;
    for trial in 0..trials {
        let mut rng = RngHandle::from_seed(determinism::query_seed(master_seed, trial));
        let source = NodeId::from_raw(rng.gen_range(0..n));
        let target = NodeId::from_raw(rng.gen_range(0..n));
        match route_query(topology, agents, source, target, ttl) {
            TrialOutcome::Success { hops } => {
                successes += 1;
                total_hops += hops;
            }
            TrialOutcome::Failure(_) => failures += 1,
            TrialOutcome::Skipped => skipped += 1,
        }
    }
    let success_rate = if trials == 0 {
        0.0
    } else {
        successes as f64 / trials as f64
    };
    let mean_hops = if successes == 0 {
        0.0
    } else {
        total_hops as f64 / successes as f64
    };
    SearchStats {
        queries: trials,
        successes,
        failures,
        skipped,
        success_rate,
        mean_hops,
    }
}

fn remembers(agents: &[PeerAgent], peer: NodeId, target: NodeId) -> bool {
    agents
        .get(peer.as_raw() as usize)
        .map(|agent| agent.memory().contains(&target))
        .unwrap_or(false)
}
