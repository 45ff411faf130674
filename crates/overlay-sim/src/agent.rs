//! Autonomous peer agents: bounded belief sets and utility-driven rewiring.

use std::collections::BTreeSet;

use overlay_core::rng::RngHandle;
use overlay_core::{NodeId, OverlayError, UtilityWeights};
use overlay_graph::Topology;
use rand::seq::SliceRandom;

/// Maximum number of memory candidates scored per [`PeerAgent::act`] call.
pub const CANDIDATE_SAMPLE: usize = 10;

/// Strict relative improvement a candidate must clear before an agent drops
/// an existing connection for it. The margin prevents oscillation on
/// marginal utility differences.
pub const REWIRE_MARGIN: f64 = 1.1;

/// Divisor applied to the agent's own degree in the connection cost term.
const COST_SCALE: f64 = 10.0;

/// Result of a single [`PeerAgent::act`] invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewireOutcome {
    /// Whether the topology edge set changed.
    pub changed: bool,
    /// Neighbor whose edge was dropped, when a rewire happened.
    pub dropped: Option<NodeId>,
    /// Peer that gained an edge, when a rewire happened.
    pub added: Option<NodeId>,
}

impl RewireOutcome {
    fn unchanged() -> Self {
        Self {
            changed: false,
            dropped: None,
            added: None,
        }
    }
}

/// Decision rule shared by [`PeerAgent::act`] and the hysteresis tests: the
/// sampled best candidate must beat the worst current neighbor by a strict
/// ten percent margin.
pub fn should_rewire(best_utility: f64, worst_utility: f64) -> bool {
    best_utility > worst_utility * REWIRE_MARGIN
}

/// One agent per peer: a fixed identifier plus the bounded set of peers it
/// believes are reachable.
///
/// Agents never own or copy the topology; every operation takes the shared
/// [`Topology`] explicitly and reads degrees and neighbor sets live, since
/// earlier agents in the same round may already have mutated the graph.
#[derive(Debug, Clone)]
pub struct PeerAgent {
    id: NodeId,
    memory: BTreeSet<NodeId>,
}

impl PeerAgent {
    /// Creates the agent for `id`, seeding its belief set with the peer's
    /// current neighbors.
    pub fn new(id: NodeId, topology: &Topology) -> Self {
        let memory = topology
            .neighbors(id)
            .map(|neighbors| neighbors.clone())
            .unwrap_or_default();
        Self { id, memory }
    }

    /// Returns the peer this agent controls.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the agent's current belief set.
    pub fn memory(&self) -> &BTreeSet<NodeId> {
        &self.memory
    }

    /// Perception step: merge direct neighbors and a capped two-hop frontier
    /// into memory.
    ///
    /// The frontier cap subsamples uniformly and applies to newly discovered
    /// ids only; entries already in memory are never evicted. An isolated
    /// peer perceives nothing and the call degrades to a no-op. The agent
    /// itself is always removed from memory: it never targets itself.
    pub fn perceive(&mut self, topology: &Topology, k_discovery: usize, rng: &mut RngHandle) {
        let Ok(neighbors) = topology.neighbors(self.id) else {
            return;
        };
        let current: Vec<NodeId> = neighbors.iter().copied().collect();
        self.memory.extend(current.iter().copied());

        let mut frontier = BTreeSet::new();
        for &hop in &current {
            if let Ok(two_hop) = topology.neighbors(hop) {
                frontier.extend(two_hop.iter().copied());
            }
        }
        let discovered: Vec<NodeId> = frontier
            .into_iter()
            .filter(|id| !self.memory.contains(id))
            .collect();
        if discovered.len() > k_discovery {
            self.memory
                .extend(discovered.choose_multiple(rng, k_discovery).copied());
        } else {
            self.memory.extend(discovered);
        }
        self.memory.remove(&self.id);
    }

    /// Scores a candidate connection against the live topology.
    ///
    /// Reads are never cached across calls: the topology may have changed
    /// since the previous evaluation. An unknown candidate scores as if it
    /// had no neighbors, so stale memory degrades instead of erroring.
    pub fn utility(
        &self,
        topology: &Topology,
        weights: &UtilityWeights,
        candidate: NodeId,
    ) -> f64 {
        let candidate_degree = topology.degree(candidate).unwrap_or(0);
        let own_degree = topology.degree(self.id).unwrap_or(0);
        let benefit = weights.alpha * (1.0 + candidate_degree as f64).ln();
        let cost = weights.beta * (own_degree as f64 / COST_SCALE);
        let similarity = match (topology.neighbors(self.id), topology.neighbors(candidate)) {
            (Ok(mine), Ok(theirs)) => {
                let union = mine.union(theirs).count();
                if union == 0 {
                    0.0
                } else {
                    mine.intersection(theirs).count() as f64 / union as f64
                }
            }
            _ => 0.0,
        };
        benefit - cost + weights.gamma * similarity
    }

    /// Decision step: replace the worst current connection with the best
    /// sampled memory candidate when the hysteresis margin is cleared.
    ///
    /// This is the only place the topology's edge set changes. The total
    /// edge count moves by at most one (one removal plus one addition,
    /// possibly netting zero when the dropped edge was already gone).
    /// Utility ties resolve to the lowest peer id on both the argmin and the
    /// argmax, keeping runs reproducible under a fixed seed.
    pub fn act(
        &mut self,
        topology: &mut Topology,
        weights: &UtilityWeights,
        rng: &mut RngHandle,
    ) -> Result<RewireOutcome, OverlayError> {
        let Ok(neighbors) = topology.neighbors(self.id) else {
            return Ok(RewireOutcome::unchanged());
        };
        let current: BTreeSet<NodeId> = neighbors.clone();
        if current.is_empty() {
            return Ok(RewireOutcome::unchanged());
        }

        let mut worst = None;
        for &neighbor in &current {
            let utility = self.utility(topology, weights, neighbor);
            match worst {
                None => worst = Some((neighbor, utility)),
                Some((_, lowest)) if utility < lowest => worst = Some((neighbor, utility)),
                _ => {}
            }
        }
        let Some((worst, worst_utility)) = worst else {
            return Ok(RewireOutcome::unchanged());
        };

        let candidates: Vec<NodeId> = self.memory.difference(&current).copied().collect();
        if candidates.is_empty() {
            return Ok(RewireOutcome::unchanged());
        }
        let sample_size = candidates.len().min(CANDIDATE_SAMPLE);
        let mut sample: Vec<NodeId> = candidates
            .choose_multiple(rng, sample_size)
            .copied()
            .collect();
        sample.sort();

        let mut best = None;
        for &candidate in &sample {
            let utility = self.utility(topology, weights, candidate);
            match best {
                None => best = Some((candidate, utility)),
                Some((_, highest)) if utility > highest => best = Some((candidate, utility)),
                _ => {}
            }
        }
        let Some((best, best_utility)) = best else {
            return Ok(RewireOutcome::unchanged());
        };

        // Candidates are drawn from memory minus current neighbors, so the
        // eviction target and the replacement cannot normally coincide; the
        // guard keeps a coinciding pair from deleting and re-adding an edge.
        if best == worst || !should_rewire(best_utility, worst_utility) {
            return Ok(RewireOutcome::unchanged());
        }

        topology.remove_edge(self.id, worst)?;
        topology.add_edge(self.id, best)?;
        Ok(RewireOutcome {
            changed: true,
            dropped: Some(worst),
            added: Some(best),
        })
    }
}
