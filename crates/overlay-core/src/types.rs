use serde::{Deserialize, Serialize};

/// Weights of the additive utility score an agent assigns to a candidate
/// connection.
///
/// `utility = alpha * ln(1 + deg(candidate)) - beta * deg(self) / 10 +
/// gamma * jaccard(neighbors(self), neighbors(candidate))`. All weights are
/// nonnegative policy constants held fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilityWeights {
    /// Weight of the centrality benefit term (attraction to hubs).
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Weight of the connection cost term (penalty on own degree).
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Weight of the social similarity bonus (shared-neighbor overlap).
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

fn default_alpha() -> f64 {
    2.0
}

fn default_beta() -> f64 {
    0.5
}

fn default_gamma() -> f64 {
    1.0
}

impl Default for UtilityWeights {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            beta: default_beta(),
            gamma: default_gamma(),
        }
    }
}
