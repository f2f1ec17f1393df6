//! Topology type definitions.
//!
//! A topology is an insertion-ordered map from node id to [`NodeRecord`].
//! Iteration order is the order of the source document and drives both
//! layout placement and document order, so it is never re-sorted.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Errors raised while validating the structure of a topology document
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("Invalid topology format (expected a mapping of node ids, got {0})")]
    NotAMapping(&'static str),
    #[error("Invalid entry for node '{node_id}' (expected a mapping, got {found})")]
    NodeNotAMapping { node_id: String, found: &'static str },
    #[error("Malformed entry for node '{node_id}': {source}")]
    MalformedNode {
        node_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid topology JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single port-to-port connection, stored on the wire as `[local, remote]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Connection {
    pub local_port: String,
    pub remote_port: String,
}

impl Connection {
    pub fn new(local_port: impl Into<String>, remote_port: impl Into<String>) -> Self {
        Self {
            local_port: local_port.into(),
            remote_port: remote_port.into(),
        }
    }
}

impl From<(String, String)> for Connection {
    fn from((local_port, remote_port): (String, String)) -> Self {
        Self { local_port, remote_port }
    }
}

impl From<Connection> for (String, String) {
    fn from(conn: Connection) -> Self {
        (conn.local_port, conn.remote_port)
    }
}

/// Link from one node to a peer, carrying every known port pairing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub connections: Vec<Connection>,
}

/// Identifying strings for a device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
}

/// One device in the topology
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "node_details", default, deserialize_with = "null_as_default")]
    pub details: NodeDetails,
    #[serde(default, deserialize_with = "null_as_default")]
    pub peers: IndexMap<String, PeerLink>,
}

impl NodeRecord {
    pub fn new(ip: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            details: NodeDetails {
                ip: ip.into(),
                platform: platform.into(),
            },
            peers: IndexMap::new(),
        }
    }

    /// Add (or replace) a peer link, returning the record for chaining
    pub fn with_peer<I, L, R>(mut self, peer_id: impl Into<String>, connections: I) -> Self
    where
        I: IntoIterator<Item = (L, R)>,
        L: Into<String>,
        R: Into<String>,
    {
        let connections = connections
            .into_iter()
            .map(|(local, remote)| Connection::new(local, remote))
            .collect();
        self.peers.insert(peer_id.into(), PeerLink { connections });
        self
    }

    pub fn platform(&self) -> &str {
        &self.details.platform
    }

    pub fn ip(&self) -> &str {
        &self.details.ip
    }
}

/// Insertion-ordered network topology
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topology {
    nodes: IndexMap<String, NodeRecord>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a topology from already-parsed JSON, validating its structure.
    ///
    /// The top level must be an object and every node entry must itself be an
    /// object; anything else is rejected before any processing happens.
    /// Missing `node_details` or `peers` fields default to empty.
    pub fn from_value(value: Value) -> Result<Self, TopologyError> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(TopologyError::NotAMapping(json_kind(&other))),
        };

        let mut nodes = IndexMap::with_capacity(map.len());
        for (node_id, entry) in map {
            if !entry.is_object() {
                return Err(TopologyError::NodeNotAMapping {
                    found: json_kind(&entry),
                    node_id,
                });
            }
            let record: NodeRecord = serde_json::from_value(entry).map_err(|source| {
                TopologyError::MalformedNode {
                    node_id: node_id.clone(),
                    source,
                }
            })?;
            nodes.insert(node_id, record);
        }

        Ok(Self { nodes })
    }

    /// Parse and validate a topology from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, TopologyError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn get(&self, node_id: &str) -> Option<&NodeRecord> {
        self.nodes.get(node_id)
    }

    /// Insert a node. An existing id keeps its position and gets the new record.
    pub fn insert(&mut self, node_id: impl Into<String>, record: NodeRecord) -> Option<NodeRecord> {
        self.nodes.insert(node_id.into(), record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &NodeRecord)> {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub(crate) fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&String, &mut NodeRecord) -> bool,
    {
        self.nodes.retain(keep);
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut NodeRecord> {
        self.nodes.values_mut()
    }
}

impl FromIterator<(String, NodeRecord)> for Topology {
    fn from_iter<T: IntoIterator<Item = (String, NodeRecord)>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_preserves_document_order() {
        let topology = Topology::from_value(json!({
            "zeta": {"node_details": {"ip": "10.0.0.3", "platform": "Arista vEOS"}, "peers": {}},
            "alpha": {"node_details": {"ip": "10.0.0.1", "platform": ""}, "peers": {}},
            "mid": {"peers": {}}
        }))
        .unwrap();

        let ids: Vec<&str> = topology.node_ids().collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
        assert_eq!(topology.get("zeta").unwrap().ip(), "10.0.0.3");
        assert_eq!(topology.get("mid").unwrap().platform(), "");
    }

    #[test]
    fn test_connections_parse_as_port_pairs() {
        let topology = Topology::from_json_str(
            r#"{"sw1": {"node_details": {"ip": null, "platform": "C9300"},
                        "peers": {"sw2": {"connections": [["Gi1/0/1", "Gi1/0/2"], ["Gi1/0/3", "Gi1/0/4"]]}}}}"#,
        )
        .unwrap();

        let record = topology.get("sw1").unwrap();
        assert_eq!(record.ip(), "");
        let link = &record.peers["sw2"];
        assert_eq!(link.connections.len(), 2);
        assert_eq!(link.connections[1], Connection::new("Gi1/0/3", "Gi1/0/4"));
    }

    #[test]
    fn test_rejects_non_mapping_topology() {
        let err = Topology::from_value(json!(["sw1", "sw2"])).unwrap_err();
        assert!(matches!(err, TopologyError::NotAMapping("an array")));
    }

    #[test]
    fn test_rejects_non_mapping_node_entry() {
        let err = Topology::from_value(json!({"sw1": {"peers": {}}, "sw2": "oops"})).unwrap_err();
        match err {
            TopologyError::NodeNotAMapping { node_id, found } => {
                assert_eq!(node_id, "sw2");
                assert_eq!(found, "a string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_malformed_connections() {
        let err = Topology::from_value(json!({
            "sw1": {"peers": {"sw2": {"connections": [["only-one"]]}}}
        }))
        .unwrap_err();
        assert!(matches!(err, TopologyError::MalformedNode { ref node_id, .. } if node_id == "sw1"));
    }

    #[test]
    fn test_builder_helpers() {
        let record = NodeRecord::new("10.1.1.1", "ISR4451").with_peer("core", [("Gi0/0/0", "Te1/1")]);
        assert_eq!(record.peers["core"].connections, vec![Connection::new("Gi0/0/0", "Te1/1")]);
    }
}
