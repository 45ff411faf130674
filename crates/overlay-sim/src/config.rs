//! Run configuration: sizing, activation, utility weights, and seeding.

use overlay_core::errors::{ErrorInfo, OverlayError};
use overlay_core::UtilityWeights;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of peers in the overlay.
    #[serde(default = "default_num_nodes")]
    pub num_nodes: usize,
    /// Target average degree of the random bootstrap graph.
    #[serde(default = "default_initial_degree")]
    pub initial_degree: usize,
    /// Number of rewiring rounds to execute.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Probability that a given peer wakes to optimize during a round.
    #[serde(default = "default_rewiring_prob")]
    pub rewiring_prob: f64,
    /// Weights of the additive utility score.
    #[serde(default)]
    pub weights: UtilityWeights,
    /// Cap on newly discovered two-hop peers merged per perception step.
    #[serde(default = "default_k_discovery")]
    pub k_discovery: usize,
    /// Maximum forwarding hops before a search trial fails.
    #[serde(default = "default_query_ttl")]
    pub query_ttl: usize,
    /// Number of independent search trials in the measurement phase.
    #[serde(default = "default_num_search_queries")]
    pub num_search_queries: usize,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_num_nodes() -> usize {
    500
}

fn default_initial_degree() -> usize {
    4
}

fn default_iterations() -> usize {
    20
}

fn default_rewiring_prob() -> f64 {
    0.1
}

fn default_k_discovery() -> usize {
    100
}

fn default_query_ttl() -> usize {
    16
}

fn default_num_search_queries() -> usize {
    1000
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_nodes: default_num_nodes(),
            initial_degree: default_initial_degree(),
            iterations: default_iterations(),
            rewiring_prob: default_rewiring_prob(),
            weights: UtilityWeights::default(),
            k_discovery: default_k_discovery(),
            query_ttl: default_query_ttl(),
            num_search_queries: default_num_search_queries(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl SimConfig {
    /// Rejects parameter combinations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.num_nodes == 0 {
            return Err(config_error("zero-nodes", "num_nodes must be positive"));
        }
        if !(0.0..=1.0).contains(&self.rewiring_prob) {
            return Err(config_error(
                "activation-probability",
                "rewiring_prob must lie in [0, 1]",
            ));
        }
        if self.weights.alpha < 0.0 || self.weights.beta < 0.0 || self.weights.gamma < 0.0 {
            return Err(config_error(
                "negative-weight",
                "utility weights must be nonnegative",
            ));
        }
        Ok(())
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label used when documenting substream derivation in reports.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    42
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

fn config_error(code: &str, message: &str) -> OverlayError {
    OverlayError::Config(ErrorInfo::new(code, message))
}
