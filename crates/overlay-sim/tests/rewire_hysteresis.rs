use overlay_core::rng::RngHandle;
use overlay_core::{NodeId, UtilityWeights};
use overlay_graph::{canonical_hash, Topology};
use overlay_sim::{should_rewire, PeerAgent};

fn node(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

fn ring(n: u64) -> Topology {
    let mut topology = Topology::new(n as usize);
    for i in 0..n {
        topology.add_edge(node(i), node((i + 1) % n)).unwrap();
    }
    topology
}

#[test]
fn margin_boundary_is_strict() {
    for worst in [0.5, 1.0, 2.0, 7.25] {
        let exactly_at_margin = worst * 1.1;
        assert!(!should_rewire(exactly_at_margin, worst));
        assert!(should_rewire(exactly_at_margin + 1e-9, worst));
    }
}

#[test]
fn exact_margin_boundary_leaves_the_edge_set_unchanged() {
    // Jaccard-only weights make the utilities exact binary fractions:
    // the worst neighbor (1) scores 10/16 = 0.625, the best memory
    // candidate (13) scores 11/16 = 0.6875, and 0.625 * 1.1 rounds to
    // exactly 0.6875 in f64, landing on the strict boundary.
    let weights = UtilityWeights {
        alpha: 0.0,
        beta: 0.0,
        gamma: 1.0,
    };
    let mut topology = Topology::new(21);
    for peer in 1..=12 {
        topology.add_edge(node(0), node(peer)).unwrap();
    }
    for shared in 2..=11 {
        topology.add_edge(node(1), node(shared)).unwrap();
    }
    for outsider in 14..=16 {
        topology.add_edge(node(1), node(outsider)).unwrap();
    }
    for a in 2..=12 {
        for b in (a + 1)..=12 {
            topology.add_edge(node(a), node(b)).unwrap();
        }
    }
    for shared in 2..=12 {
        topology.add_edge(node(13), node(shared)).unwrap();
    }
    for outsider in 17..=20 {
        topology.add_edge(node(13), node(outsider)).unwrap();
    }

    let mut agent = PeerAgent::new(node(0), &topology);
    let mut rng = RngHandle::from_seed(42);
    agent.perceive(&topology, 100, &mut rng);
    assert!(agent.memory().contains(&node(13)));

    assert_eq!(agent.utility(&topology, &weights, node(1)), 0.625);
    assert_eq!(agent.utility(&topology, &weights, node(13)), 0.6875);
    assert_eq!(0.625f64 * 1.1, 0.6875);

    let before = canonical_hash(&topology).unwrap();
    let outcome = agent.act(&mut topology, &weights, &mut rng).unwrap();
    assert!(!outcome.changed);
    assert_eq!(canonical_hash(&topology).unwrap(), before);

    // One extra edge lifts the candidate to 12/16 = 0.75, strictly past
    // the margin, while dropping the worst neighbor to 10/17.
    topology.add_edge(node(1), node(13)).unwrap();
    assert_eq!(agent.utility(&topology, &weights, node(13)), 0.75);
    let outcome = agent.act(&mut topology, &weights, &mut rng).unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.dropped, Some(node(1)));
    assert_eq!(outcome.added, Some(node(13)));
}

#[test]
fn symmetric_ring_never_rewires() {
    // Seeded scenario: a 6-ring offers no candidate with a ten percent
    // utility edge, so node 0 keeps its connections.
    let mut topology = ring(6);
    let weights = UtilityWeights {
        alpha: 2.0,
        beta: 0.5,
        gamma: 1.0,
    };
    let before = canonical_hash(&topology).unwrap();
    let mut agent = PeerAgent::new(node(0), &topology);
    let mut rng = RngHandle::from_seed(42);
    let outcome = agent.act(&mut topology, &weights, &mut rng).unwrap();
    assert!(!outcome.changed);
    assert_eq!(canonical_hash(&topology).unwrap(), before);
}

#[test]
fn clear_improvement_triggers_a_rewire() {
    // Peer 0 holds a leaf connection (1) while its memory knows a hub (2).
    let mut topology = Topology::new(9);
    topology.add_edge(node(0), node(1)).unwrap();
    topology.add_edge(node(0), node(3)).unwrap();
    topology.add_edge(node(3), node(2)).unwrap();
    for spoke in 4..9 {
        topology.add_edge(node(2), node(spoke)).unwrap();
    }
    let weights = UtilityWeights::default();
    let mut agent = PeerAgent::new(node(0), &topology);
    let mut rng = RngHandle::from_seed(42);
    agent.perceive(&topology, 100, &mut rng);
    assert!(agent.memory().contains(&node(2)));

    let edges_before = topology.edge_count();
    let outcome = agent.act(&mut topology, &weights, &mut rng).unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.dropped, Some(node(1)));
    assert_eq!(outcome.added, Some(node(2)));
    assert!(topology.has_edge(node(0), node(2)));
    assert!(!topology.has_edge(node(0), node(1)));
    // One removal plus one addition nets out.
    assert_eq!(topology.edge_count(), edges_before);
}

#[test]
fn isolated_peer_act_is_a_no_op() {
    let mut topology = Topology::new(4);
    topology.add_edge(node(1), node(2)).unwrap();
    let weights = UtilityWeights::default();
    let mut agent = PeerAgent::new(node(0), &topology);
    let mut rng = RngHandle::from_seed(0);
    let before = canonical_hash(&topology).unwrap();
    let outcome = agent.act(&mut topology, &weights, &mut rng).unwrap();
    assert!(!outcome.changed);
    assert_eq!(canonical_hash(&topology).unwrap(), before);
}

#[test]
fn no_candidates_beyond_neighbors_is_a_no_op() {
    // Memory equals the neighbor set, leaving nothing to switch to.
    let mut topology = ring(4);
    let weights = UtilityWeights::default();
    let mut agent = PeerAgent::new(node(1), &topology);
    let mut rng = RngHandle::from_seed(0);
    let outcome = agent.act(&mut topology, &weights, &mut rng).unwrap();
    assert!(!outcome.changed);
}

#[test]
fn act_preserves_topology_invariants() {
    let mut topology = Topology::new(9);
    topology.add_edge(node(0), node(1)).unwrap();
    topology.add_edge(node(0), node(3)).unwrap();
    topology.add_edge(node(3), node(2)).unwrap();
    for spoke in 4..9 {
        topology.add_edge(node(2), node(spoke)).unwrap();
    }
    let weights = UtilityWeights::default();
    let mut agent = PeerAgent::new(node(0), &topology);
    let mut rng = RngHandle::from_seed(1);
    agent.perceive(&topology, 100, &mut rng);
    agent.act(&mut topology, &weights, &mut rng).unwrap();

    for peer in topology.nodes() {
        let neighbors = topology.neighbors(peer).unwrap();
        assert!(!neighbors.contains(&peer));
        for &other in neighbors {
            assert!(topology.has_edge(other, peer));
        }
    }
}
