use overlay_core::errors::OverlayError;
use sha2::{Digest, Sha256};

use crate::topology::Topology;

/// Computes the canonical structural hash for the provided topology.
///
/// The hash covers the peer count and the sorted undirected edge list, so
/// two topologies hash equal exactly when they are structurally identical.
/// Used by run summaries and by tests asserting that an operation left the
/// edge set untouched.
pub fn canonical_hash(topology: &Topology) -> Result<String, OverlayError> {
    let mut hasher = Sha256::new();
    hasher.update((topology.node_count() as u64).to_le_bytes());
    let edges = topology.edges();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (a, b) in edges {
        hasher.update(a.as_raw().to_le_bytes());
        hasher.update(b.as_raw().to_le_bytes());
    }
    Ok(format!("{:x}", hasher.finalize()))
}
