use overlay_core::errors::{ErrorInfo, OverlayError};
use overlay_core::rng::RngHandle;
use overlay_core::NodeId;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::metrics::connected_components;
use crate::topology::Topology;

/// Generates the initial connected overlay with deterministic randomness.
///
/// The bootstrap is an Erdős–Rényi draw with edge probability
/// `initial_degree / n_nodes`, followed by a connectivity repair pass that
/// links a random representative of each component to a random
/// representative of the next. The result is connected but otherwise
/// unstructured, a plausible cold-start overlay before any agent has
/// optimized its connections.
pub fn gen_connected_random(
    n_nodes: usize,
    initial_degree: usize,
    rng: &mut RngHandle,
) -> Result<Topology, OverlayError> {
    if n_nodes == 0 {
        return Err(OverlayError::Graph(ErrorInfo::new(
            "empty-graph",
            "random bootstrap requires at least one peer",
        )));
    }
    let probability = (initial_degree as f64 / n_nodes as f64).min(1.0);
    let mut topology = Topology::new(n_nodes);
    for a in 0..n_nodes as u64 {
        for b in (a + 1)..n_nodes as u64 {
            if rng.gen::<f64>() < probability {
                topology.add_edge(NodeId::from_raw(a), NodeId::from_raw(b))?;
            }
        }
    }
    repair_connectivity(&mut topology, rng)?;
    Ok(topology)
}

/// Bridges disconnected components with single random edges.
fn repair_connectivity(topology: &mut Topology, rng: &mut RngHandle) -> Result<(), OverlayError> {
    let components = connected_components(topology);
    for pair in components.windows(2) {
        let [left, right] = pair else {
            continue;
        };
        let Some(&a) = left.choose(rng) else {
            continue;
        };
        let Some(&b) = right.choose(rng) else {
            continue;
        };
        topology.add_edge(a, b)?;
    }
    Ok(())
}
