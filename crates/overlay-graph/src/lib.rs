#![deny(missing_docs)]

//! Shared mutable overlay topology: an undirected simple graph over a fixed
//! peer-id range, plus bootstrap generators, observational metrics, canonical
//! hashing, and snapshot serialization.

mod generators;
mod hash;
mod metrics;
mod serialization;
mod topology;

pub use generators::gen_connected_random;
pub use hash::canonical_hash;
pub use metrics::{
    average_clustering, average_path_length, connected_components, largest_component,
};
pub use serialization::{
    topology_from_bytes, topology_from_json, topology_to_bytes, topology_to_json,
};
pub use topology::Topology;
