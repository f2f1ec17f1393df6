//! Network topology module.
//!
//! This module contains the topology data model, structural validation of
//! parsed topology documents, endpoint classification and normalization.

pub mod types;
pub mod classify;
pub mod normalize;

// Re-export key types and functions for easier access
pub use types::{Connection, NodeDetails, NodeRecord, PeerLink, Topology, TopologyError};
pub use classify::is_endpoint;
pub use normalize::{normalize, NormalizeOptions};
