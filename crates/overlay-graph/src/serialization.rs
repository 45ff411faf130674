use overlay_core::errors::{ErrorInfo, OverlayError};
use overlay_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::topology::Topology;

/// Serializes the topology to a compact binary representation using `bincode`.
pub fn topology_to_bytes(topology: &Topology) -> Result<Vec<u8>, OverlayError> {
    let serializable = SerializableTopology::from_topology(topology);
    bincode::serialize(&serializable)
        .map_err(|err| OverlayError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a topology from its binary representation.
pub fn topology_from_bytes(bytes: &[u8]) -> Result<Topology, OverlayError> {
    let serializable: SerializableTopology = bincode::deserialize(bytes)
        .map_err(|err| OverlayError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_topology()
}

/// Serializes the topology to a JSON string.
pub fn topology_to_json(topology: &Topology) -> Result<String, OverlayError> {
    let serializable = SerializableTopology::from_topology(topology);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| OverlayError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a topology from a JSON string.
pub fn topology_from_json(json: &str) -> Result<Topology, OverlayError> {
    let serializable: SerializableTopology = serde_json::from_str(json)
        .map_err(|err| OverlayError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_topology()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableTopology {
    node_count: u64,
    edges: Vec<(u64, u64)>,
}

impl SerializableTopology {
    fn from_topology(topology: &Topology) -> Self {
        Self {
            node_count: topology.node_count() as u64,
            edges: topology
                .edges()
                .into_iter()
                .map(|(a, b)| (a.as_raw(), b.as_raw()))
                .collect(),
        }
    }

    fn into_topology(self) -> Result<Topology, OverlayError> {
        let mut topology = Topology::new(self.node_count as usize);
        for (a, b) in self.edges {
            topology.add_edge(NodeId::from_raw(a), NodeId::from_raw(b))?;
        }
        Ok(topology)
    }
}
