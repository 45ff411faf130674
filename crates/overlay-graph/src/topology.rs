use std::collections::BTreeSet;

use overlay_core::{ErrorInfo, NodeId, OverlayError};

/// Mutable undirected simple graph over a fixed peer-id range.
///
/// The node set is fixed at construction: a topology over `n` peers owns the
/// identifiers `0..n` and never grows or shrinks. Edges are the only mutable
/// state. Invariants maintained by every mutation: no self-loops, at most one
/// edge per unordered pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    adjacency: Vec<BTreeSet<NodeId>>,
    edge_count: usize,
}

impl Topology {
    /// Creates an edgeless topology over `node_count` peers.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
            edge_count: 0,
        }
    }

    /// Returns the number of peers in the topology.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges currently present.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns an iterator over all peer identifiers in ascending order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        (0..self.adjacency.len()).map(|idx| NodeId::from_raw(idx as u64))
    }

    /// Returns whether the identifier names a peer of this topology.
    pub fn contains(&self, node: NodeId) -> bool {
        (node.as_raw() as usize) < self.adjacency.len()
    }

    /// Returns the neighbor set of a peer.
    pub fn neighbors(&self, node: NodeId) -> Result<&BTreeSet<NodeId>, OverlayError> {
        self.adjacency
            .get(node.as_raw() as usize)
            .ok_or_else(|| unknown_node(node))
    }

    /// Returns the degree of a peer.
    pub fn degree(&self, node: NodeId) -> Result<usize, OverlayError> {
        Ok(self.neighbors(node)?.len())
    }

    /// Returns whether an edge between the two peers is present.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency
            .get(a.as_raw() as usize)
            .map(|set| set.contains(&b))
            .unwrap_or(false)
    }

    /// Inserts the undirected edge `{a, b}`.
    ///
    /// Returns `true` when the edge set changed, `false` when the edge was
    /// already present. Self-loops and unknown peers are rejected.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool, OverlayError> {
        self.check_endpoints(a, b)?;
        let inserted = self.adjacency[a.as_raw() as usize].insert(b);
        if inserted {
            self.adjacency[b.as_raw() as usize].insert(a);
            self.edge_count += 1;
        }
        Ok(inserted)
    }

    /// Removes the undirected edge `{a, b}` when present.
    ///
    /// Returns `true` when the edge set changed. Removing an absent edge is
    /// not an error: rewiring agents race against topology changes made by
    /// earlier agents in the same round.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool, OverlayError> {
        self.check_endpoints(a, b)?;
        let removed = self.adjacency[a.as_raw() as usize].remove(&b);
        if removed {
            self.adjacency[b.as_raw() as usize].remove(&a);
            self.edge_count -= 1;
        }
        Ok(removed)
    }

    /// Returns every edge as an ordered pair `(low, high)`, sorted.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (idx, neighbors) in self.adjacency.iter().enumerate() {
            let node = NodeId::from_raw(idx as u64);
            for &other in neighbors.iter() {
                if node < other {
                    edges.push((node, other));
                }
            }
        }
        edges
    }

    fn check_endpoints(&self, a: NodeId, b: NodeId) -> Result<(), OverlayError> {
        if !self.contains(a) {
            return Err(unknown_node(a));
        }
        if !self.contains(b) {
            return Err(unknown_node(b));
        }
        if a == b {
            return Err(OverlayError::Graph(
                ErrorInfo::new("self-loop", "peers cannot connect to themselves")
                    .with_context("node", a.as_raw().to_string()),
            ));
        }
        Ok(())
    }
}

fn unknown_node(node: NodeId) -> OverlayError {
    OverlayError::Graph(
        ErrorInfo::new("unknown-node", "peer does not exist")
            .with_context("node", node.as_raw().to_string()),
    )
}
