//! Per-round observational history and its CSV export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Observational snapshot appended after each rewiring round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSample {
    /// Round number, starting at zero.
    pub round: usize,
    /// Average shortest-path length over the largest connected component.
    pub avg_path_length: f64,
    /// Average clustering coefficient over all peers.
    pub clustering: f64,
    /// Undirected edge count after the round.
    pub edges: usize,
    /// Number of agents activated during the round.
    pub activated: usize,
    /// Number of activations that actually rewired an edge.
    pub rewires: usize,
}

/// Collects per-round samples for later export.
#[derive(Debug, Default)]
pub struct HistoryRecorder {
    samples: Vec<RoundSample>,
}

impl HistoryRecorder {
    /// Creates a new recorder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one round's snapshot.
    pub fn push(&mut self, sample: RoundSample) {
        self.samples.push(sample);
    }

    /// Returns an immutable view over the recorded samples.
    pub fn samples(&self) -> &[RoundSample] {
        &self.samples
    }

    /// Writes the recorded history to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "round,avg_path_length,clustering,edges,activated,rewires")?;
        for sample in &self.samples {
            writeln!(
                file,
                "{},{:.6},{:.6},{},{},{}",
                sample.round,
                sample.avg_path_length,
                sample.clustering,
                sample.edges,
                sample.activated,
                sample.rewires
            )?;
        }
        Ok(())
    }
}
