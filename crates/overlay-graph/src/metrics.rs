use std::collections::VecDeque;

use overlay_core::NodeId;

use crate::topology::Topology;

/// Returns the connected components of the topology.
///
/// Components are discovered in ascending order of their lowest peer id and
/// each component lists its members in ascending order, so the output is
/// fully deterministic for a given edge set.
pub fn connected_components(topology: &Topology) -> Vec<Vec<NodeId>> {
    let n = topology.node_count();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    for start in topology.nodes() {
        if visited[start.as_raw() as usize] {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited[start.as_raw() as usize] = true;
        while let Some(node) = queue.pop_front() {
            component.push(node);
            if let Ok(neighbors) = topology.neighbors(node) {
                for &next in neighbors {
                    let slot = &mut visited[next.as_raw() as usize];
                    if !*slot {
                        *slot = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        component.sort();
        components.push(component);
    }
    components
}

/// Returns the members of the largest connected component.
///
/// Ties between equally sized components resolve to the one containing the
/// lowest peer id.
pub fn largest_component(topology: &Topology) -> Vec<NodeId> {
    connected_components(topology)
        .into_iter()
        .max_by_key(|component| component.len())
        .unwrap_or_default()
}

/// Computes the average shortest-path length over the largest component.
///
/// Disconnected topologies are measured on their largest component only, so
/// the value stays finite while agents are mid-rewire. Returns `0.0` when
/// fewer than two peers are reachable from each other.
pub fn average_path_length(topology: &Topology) -> f64 {
    let component = largest_component(topology);
    if component.len() < 2 {
        return 0.0;
    }
    let mut member = vec![false; topology.node_count()];
    for node in &component {
        member[node.as_raw() as usize] = true;
    }
    let mut total = 0u64;
    let mut pairs = 0u64;
    for &source in &component {
        for (node, distance) in bfs_distances(topology, source, &member) {
            if node != source {
                total += distance as u64;
                pairs += 1;
            }
        }
    }
    if pairs == 0 {
        return 0.0;
    }
    total as f64 / pairs as f64
}

/// Computes the average clustering coefficient over all peers.
///
/// A peer with fewer than two neighbors contributes `0.0`, matching the
/// standard convention for the global average.
pub fn average_clustering(topology: &Topology) -> f64 {
    let n = topology.node_count();
    if n == 0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for node in topology.nodes() {
        let Ok(neighbors) = topology.neighbors(node) else {
            continue;
        };
        let k = neighbors.len();
        if k < 2 {
            continue;
        }
        let mut closed = 0usize;
        let neighbor_list: Vec<NodeId> = neighbors.iter().copied().collect();
        for (idx, &a) in neighbor_list.iter().enumerate() {
            for &b in &neighbor_list[idx + 1..] {
                if topology.has_edge(a, b) {
                    closed += 1;
                }
            }
        }
        sum += 2.0 * closed as f64 / (k * (k - 1)) as f64;
    }
    sum / n as f64
}

fn bfs_distances(topology: &Topology, source: NodeId, member: &[bool]) -> Vec<(NodeId, usize)> {
    let mut distances = vec![usize::MAX; topology.node_count()];
    distances[source.as_raw() as usize] = 0;
    let mut queue = VecDeque::from([source]);
    let mut reached = Vec::new();
    while let Some(node) = queue.pop_front() {
        let here = distances[node.as_raw() as usize];
        reached.push((node, here));
        if let Ok(neighbors) = topology.neighbors(node) {
            for &next in neighbors {
                let idx = next.as_raw() as usize;
                if member[idx] && distances[idx] == usize::MAX {
                    distances[idx] = here + 1;
                    queue.push_back(next);
                }
            }
        }
    }
    reached
}
