#![deny(missing_docs)]
#![doc = "Core identifiers, error types, and deterministic randomness shared by the overlay simulator crates."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, OverlayError};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::UtilityWeights;

/// Identifier for a peer within the shared overlay topology.
///
/// Identifiers are dense: a topology over `n` peers uses exactly the raw
/// values `0..n`, and nodes are never added or removed after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}
