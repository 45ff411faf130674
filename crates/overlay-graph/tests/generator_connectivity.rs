use overlay_core::rng::RngHandle;
use overlay_graph::{canonical_hash, connected_components, gen_connected_random};

#[test]
fn bootstrap_is_connected() {
    for seed in [1, 7, 42, 1234] {
        let mut rng = RngHandle::from_seed(seed);
        let topology = gen_connected_random(60, 4, &mut rng).unwrap();
        assert_eq!(topology.node_count(), 60);
        assert_eq!(connected_components(&topology).len(), 1);
    }
}

#[test]
fn bootstrap_is_deterministic_per_seed() {
    let mut rng_a = RngHandle::from_seed(99);
    let mut rng_b = RngHandle::from_seed(99);
    let a = gen_connected_random(40, 4, &mut rng_a).unwrap();
    let b = gen_connected_random(40, 4, &mut rng_b).unwrap();
    assert_eq!(canonical_hash(&a).unwrap(), canonical_hash(&b).unwrap());
}

#[test]
fn sparse_bootstrap_still_connects() {
    // Degree zero would leave every peer isolated without the repair pass.
    let mut rng = RngHandle::from_seed(3);
    let topology = gen_connected_random(10, 0, &mut rng).unwrap();
    assert_eq!(connected_components(&topology).len(), 1);
}

#[test]
fn empty_bootstrap_is_rejected() {
    let mut rng = RngHandle::from_seed(3);
    let err = gen_connected_random(0, 4, &mut rng).unwrap_err();
    assert_eq!(err.info().code, "empty-graph");
}
