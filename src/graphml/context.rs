//! Per-export render state.
//!
//! A fresh [`RenderContext`] is built for every export and dropped when it
//! ends, so icon caches, resource ids and emitted links never leak from one
//! document into the next.

use base64::Engine as _;
use indexmap::IndexMap;
use log::{debug, warn};

use crate::icons::{icon_base_name, IconSource};

use super::dedup::Deduplicator;

/// An icon embedded in the document's resource section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedIcon {
    pub resource_id: u32,
    pub base64: String,
}

/// Mutable state for a single export
#[derive(Debug)]
pub struct RenderContext {
    /// Icon file name -> loaded icon, `None` when the icon could not be found
    icons: IndexMap<String, Option<EmbeddedIcon>>,
    next_resource_id: u32,
    pub dedup: Deduplicator,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            icons: IndexMap::new(),
            next_resource_id: 1,
            dedup: Deduplicator::new(),
        }
    }

    /// Resource id for an icon file, loading and encoding it on first use.
    ///
    /// Returns `None` if the source has no bytes for the icon; the miss is
    /// logged once and remembered for the rest of the export.
    pub fn icon_resource(&mut self, file_name: &str, source: &dyn IconSource) -> Option<u32> {
        if let Some(cached) = self.icons.get(file_name) {
            return cached.as_ref().map(|icon| icon.resource_id);
        }

        let loaded = match source.get(icon_base_name(file_name)) {
            Some(bytes) => {
                let icon = EmbeddedIcon {
                    resource_id: self.next_resource_id,
                    base64: base64::engine::general_purpose::STANDARD.encode(bytes),
                };
                debug!("Embedding icon {} as resource {}", file_name, icon.resource_id);
                self.next_resource_id += 1;
                Some(icon)
            }
            None => {
                warn!("Icon {} not found, falling back to shape nodes", file_name);
                None
            }
        };

        let resource_id = loaded.as_ref().map(|icon| icon.resource_id);
        self.icons.insert(file_name.to_string(), loaded);
        resource_id
    }

    /// Icons actually embedded, in resource id order
    pub fn embedded_icons(&self) -> impl Iterator<Item = &EmbeddedIcon> {
        self.icons.values().flatten()
    }

    pub fn embedded_count(&self) -> usize {
        self.embedded_icons().count()
    }
}
