//! Device-to-icon resolution.

use crate::topology::is_endpoint;

use super::mapping::{IconMapping, DEFAULT_ENDPOINT, DEFAULT_ROUTER, DEFAULT_SWITCH, DEFAULT_UNKNOWN};

/// How an icon was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconCategory {
    PatternMatched,
    DefaultEndpoint,
    DefaultRouter,
    DefaultSwitch,
    DefaultUnknown,
}

/// Result of resolving a device to an icon file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconMatch {
    pub file_name: String,
    pub category: IconCategory,
}

/// Picks an icon file for each device from an [`IconMapping`]
#[derive(Debug, Clone)]
pub struct IconResolver {
    mapping: IconMapping,
    enabled: bool,
}

impl IconResolver {
    pub fn new(mapping: IconMapping, enabled: bool) -> Self {
        Self { mapping, enabled }
    }

    /// Resolve the icon for a device, or `None` when icons are disabled.
    ///
    /// Patterns are tried in mapping order against both the platform and the
    /// node id, case-insensitively; the first hit wins. Without a hit the
    /// device falls back to a default icon by role.
    pub fn resolve(&self, node_id: &str, platform: &str) -> Option<IconMatch> {
        if !self.enabled {
            return None;
        }

        let platform_lower = platform.to_lowercase();
        let node_id_lower = node_id.to_lowercase();

        for (pattern, icon_file) in self.mapping.patterns() {
            let pattern = pattern.to_lowercase();
            if platform_lower.contains(&pattern) || node_id_lower.contains(&pattern) {
                return Some(IconMatch {
                    file_name: icon_file.to_string(),
                    category: IconCategory::PatternMatched,
                });
            }
        }

        let (role, category) = if is_endpoint(node_id, platform) {
            (DEFAULT_ENDPOINT, IconCategory::DefaultEndpoint)
        } else if node_id_lower.contains("router") || node_id_lower.contains("rtr") {
            (DEFAULT_ROUTER, IconCategory::DefaultRouter)
        } else if node_id_lower.contains("switch") || node_id_lower.contains("sw") {
            (DEFAULT_SWITCH, IconCategory::DefaultSwitch)
        } else {
            (DEFAULT_UNKNOWN, IconCategory::DefaultUnknown)
        };

        Some(IconMatch {
            file_name: self.mapping.default_icon(role).to_string(),
            category,
        })
    }
}
