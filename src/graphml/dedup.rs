//! Connection deduplication.
//!
//! Each physical link is usually reported by both of its ends. A link is
//! identified by the sorted pair of `node:port` strings, so the reverse
//! report maps to the same key and is dropped.

use std::collections::HashSet;

/// Direction-independent identity of a port-to-port link
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionKey {
    low: String,
    high: String,
}

impl ConnectionKey {
    pub fn new(source_id: &str, local_port: &str, target_id: &str, remote_port: &str) -> Self {
        let a = format!("{}:{}", source_id, local_port);
        let b = format!("{}:{}", target_id, remote_port);
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

/// Tracks links already emitted during one export and hands out edge ids
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<ConnectionKey>,
    next_edge: usize,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for a new edge, or `None` if this link was already emitted.
    ///
    /// Ids are `e0`, `e1`, ... in admission order and unique within one export.
    pub fn admit(
        &mut self,
        source_id: &str,
        local_port: &str,
        target_id: &str,
        remote_port: &str,
    ) -> Option<String> {
        let key = ConnectionKey::new(source_id, local_port, target_id, remote_port);
        if !self.seen.insert(key) {
            return None;
        }

        let edge_id = format!("e{}", self.next_edge);
        self.next_edge += 1;
        Some(edge_id)
    }

    /// Number of edges admitted so far
    pub fn admitted(&self) -> usize {
        self.next_edge
    }
}
