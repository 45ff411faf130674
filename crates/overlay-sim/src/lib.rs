#![deny(missing_docs)]

//! Agent decision engine, rewiring driver, and memory-assisted router for the
//! self-organizing peer overlay.
//!
//! The simulation runs in two phases. During rewiring, a sampled subset of
//! agents wakes each round, refreshes its belief set from the shared
//! topology, and replaces its least useful connection when a sampled memory
//! candidate clears the hysteresis margin. Afterwards the router measures the
//! evolved overlay with independent search trials that combine a per-peer
//! memory short-circuit with greedy highest-degree forwarding.

pub mod agent;
pub mod config;
pub mod determinism;
pub mod driver;
pub mod history;
pub mod router;

pub use agent::{should_rewire, PeerAgent, RewireOutcome, CANDIDATE_SAMPLE, REWIRE_MARGIN};
pub use config::{SeedPolicy, SimConfig};
pub use driver::{run, run_with_topology, RunSummary};
pub use history::{HistoryRecorder, RoundSample};
pub use router::{route_query, run_queries, FailureReason, SearchStats, TrialOutcome};
