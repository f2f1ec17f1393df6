//! Topology normalization.
//!
//! Turns a possibly incomplete topology into a closed graph: every
//! referenced peer gets a node, then the optional endpoint and connectivity
//! filters run in that order. The input is never modified.

use std::collections::HashSet;

use indexmap::IndexSet;
use log::debug;

use super::classify::is_endpoint;
use super::types::{NodeRecord, Topology};

/// Filters applied during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Keep endpoint devices (phones, cameras, PCs...)
    pub include_endpoints: bool,
    /// Drop nodes that neither have peers nor are anyone's peer
    pub connected_only: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            include_endpoints: true,
            connected_only: false,
        }
    }
}

/// Normalize a topology into a new, closed topology.
///
/// # Arguments
/// * `topology` - The source topology (read only)
/// * `options` - Endpoint and connectivity filters
///
/// # Returns
/// A new topology in which every peer id has a node record, with filtered
/// nodes and the peer entries pointing at them removed.
pub fn normalize(topology: &Topology, options: NormalizeOptions) -> Topology {
    let mut result = close_topology(topology);

    if !options.include_endpoints {
        filter_endpoints(&mut result);
    }

    if options.connected_only {
        filter_unconnected(&mut result);
    }

    result
}

/// Synthesize empty records for peers referenced but never defined.
///
/// Synthetic nodes are appended after the defined ones, in order of first
/// reference.
fn close_topology(topology: &Topology) -> Topology {
    let mut result = topology.clone();

    let missing: IndexSet<String> = topology
        .iter()
        .flat_map(|(_, record)| record.peers.keys())
        .filter(|peer_id| !topology.contains(peer_id))
        .cloned()
        .collect();

    if !missing.is_empty() {
        debug!("Synthesizing {} referenced but undefined nodes", missing.len());
    }

    for node_id in missing {
        result.insert(node_id, NodeRecord::default());
    }

    result
}

/// Remove endpoints and every peer entry that points at one
fn filter_endpoints(topology: &mut Topology) {
    let endpoints: HashSet<String> = topology
        .iter()
        .filter(|(node_id, record)| is_endpoint(node_id, record.platform()))
        .map(|(node_id, _)| node_id.clone())
        .collect();

    if endpoints.is_empty() {
        return;
    }

    debug!("Filtering {} endpoint nodes", endpoints.len());
    topology.retain(|node_id, _| !endpoints.contains(node_id));
    for record in topology.records_mut() {
        record.peers.retain(|peer_id, _| !endpoints.contains(peer_id));
    }
}

/// Keep only nodes that have a peer or are referenced as one
fn filter_unconnected(topology: &mut Topology) {
    let mut connected: HashSet<String> = HashSet::new();
    for (node_id, record) in topology.iter() {
        if !record.peers.is_empty() {
            connected.insert(node_id.clone());
            connected.extend(record.peers.keys().cloned());
        }
    }

    let before = topology.len();
    topology.retain(|node_id, _| connected.contains(node_id));
    debug!("Dropped {} standalone nodes", before - topology.len());
}
