//! Substream seed derivation: every source of randomness in a run gets its
//! own seed derived from the master seed, so replays match bit for bit.

use overlay_core::derive_substream_seed;

/// Derives the deterministic seed for the topology bootstrap.
pub fn bootstrap_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed ^ 0xB007_57A9_B007_57A9, 0)
}

/// Derives the deterministic seed for a round's activation sample.
pub fn activation_seed(master_seed: u64, round: usize) -> u64 {
    derive_substream_seed(master_seed ^ 0xA5A5_A5A5_A5A5_A5A5, round as u64)
}

/// Derives the deterministic seed for one awake agent's perceive/act cycle.
pub fn agent_seed(master_seed: u64, round: usize, slot: usize) -> u64 {
    let intermediate = derive_substream_seed(master_seed, round as u64);
    derive_substream_seed(intermediate, slot as u64)
}

/// Derives the deterministic seed for a single search trial.
pub fn query_seed(master_seed: u64, trial: usize) -> u64 {
    derive_substream_seed(master_seed ^ 0x5EA2_C85E_A2C8_5EA2, trial as u64)
}
