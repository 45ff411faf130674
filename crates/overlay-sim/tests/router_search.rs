use overlay_core::rng::RngHandle;
use overlay_core::NodeId;
use overlay_graph::Topology;
use overlay_sim::{route_query, run_queries, FailureReason, PeerAgent, TrialOutcome};

fn node(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

fn agents_for(topology: &Topology) -> Vec<PeerAgent> {
    topology
        .nodes()
        .map(|id| PeerAgent::new(id, topology))
        .collect()
}

#[test]
fn remembered_direct_neighbor_takes_one_hop() {
    let mut topology = Topology::new(2);
    topology.add_edge(node(0), node(1)).unwrap();
    let agents = agents_for(&topology);
    assert_eq!(
        route_query(&topology, &agents, node(0), node(1), 5),
        TrialOutcome::Success { hops: 1 }
    );
}

#[test]
fn zero_ttl_fails_every_real_trial() {
    let mut topology = Topology::new(2);
    topology.add_edge(node(0), node(1)).unwrap();
    let agents = agents_for(&topology);
    assert_eq!(
        route_query(&topology, &agents, node(0), node(1), 0),
        TrialOutcome::Failure(FailureReason::TtlExhausted)
    );
}

#[test]
fn self_pair_is_skipped_before_any_hop() {
    let topology = Topology::new(3);
    let agents = agents_for(&topology);
    assert_eq!(
        route_query(&topology, &agents, node(1), node(1), 0),
        TrialOutcome::Skipped
    );
}

#[test]
fn star_routes_leaf_to_leaf_through_the_center() {
    let mut topology = Topology::new(6);
    for leaf in 1..6 {
        topology.add_edge(node(0), node(leaf)).unwrap();
    }
    let agents = agents_for(&topology);
    // The leaf knows only the center; gradient ascent climbs to the hub,
    // whose own memory completes the query.
    for (source, target) in [(1, 3), (5, 2), (2, 4)] {
        assert_eq!(
            route_query(&topology, &agents, node(source), node(target), 2),
            TrialOutcome::Success { hops: 2 }
        );
    }
}

#[test]
fn stale_memory_falls_back_to_a_bridge_downstream() {
    // Peer 0 once learned about 2 via the 1-2 edge; after that edge goes
    // away the query must recover through gradient ascent and the bridge
    // at peer 3.
    let mut topology = Topology::new(4);
    topology.add_edge(node(0), node(1)).unwrap();
    topology.add_edge(node(1), node(2)).unwrap();
    topology.add_edge(node(1), node(3)).unwrap();
    topology.add_edge(node(2), node(3)).unwrap();
    let mut agents = agents_for(&topology);
    let mut rng = RngHandle::from_seed(0);
    for agent in &mut agents {
        agent.perceive(&topology, 100, &mut rng);
    }
    assert!(agents[0].memory().contains(&node(2)));

    topology.remove_edge(node(1), node(2)).unwrap();
    let outcome = route_query(&topology, &agents, node(0), node(2), 5);
    // Hop to 1 by gradient ascent, then bridge 3 -> 2 from memory.
    assert_eq!(outcome, TrialOutcome::Success { hops: 3 });
}

#[test]
fn exhausted_neighborhood_is_a_dead_end() {
    let mut topology = Topology::new(3);
    topology.add_edge(node(0), node(1)).unwrap();
    let agents = agents_for(&topology);
    assert_eq!(
        route_query(&topology, &agents, node(0), node(2), 5),
        TrialOutcome::Failure(FailureReason::DeadEnd)
    );
}

#[test]
fn self_pair_draws_stay_in_denominator() {
    // Skipped self pairs still divide the success rate, undercounting it.
    let mut topology = Topology::new(2);
    topology.add_edge(node(0), node(1)).unwrap();
    let agents = agents_for(&topology);
    let stats = run_queries(&topology, &agents, 200, 5, 42);

    assert_eq!(stats.queries, 200);
    assert_eq!(stats.successes + stats.failures + stats.skipped, 200);
    assert!(stats.skipped > 0);
    assert_eq!(stats.failures, 0);
    assert_eq!(
        stats.success_rate,
        stats.successes as f64 / stats.queries as f64
    );
    assert!(stats.success_rate < 1.0);
    assert_eq!(stats.mean_hops, 1.0);
}

#[test]
fn no_successes_reports_zero_mean_hops() {
    let mut topology = Topology::new(2);
    topology.add_edge(node(0), node(1)).unwrap();
    let agents = agents_for(&topology);
    let stats = run_queries(&topology, &agents, 50, 0, 7);
    assert_eq!(stats.successes, 0);
    assert_eq!(stats.mean_hops, 0.0);
    assert_eq!(stats.success_rate, 0.0);
}
