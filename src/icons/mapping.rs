//! Platform-to-icon mapping tables.
//!
//! Pattern order is significant: the first pattern found in a device's
//! platform or id wins. Built-in patterns come first, configured patterns
//! overwrite built-in entries in place and append new ones at the end.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// File name of the icon configuration looked up inside an icon directory
pub const ICON_CONFIG_FILE: &str = "platform_icon_map.json";

/// Built-in platform patterns, in match order
const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    // Cisco
    ("catalyst", "cisco_switch.jpg"),
    ("nexus", "cisco_nexus.jpg"),
    ("c9", "cisco_switch.jpg"),
    ("c3", "cisco_switch.jpg"),
    ("ws-c", "cisco_switch.jpg"),
    ("isr", "cisco_router.jpg"),
    ("asr", "cisco_router.jpg"),
    ("csr", "cisco_router.jpg"),
    ("ios", "cisco_switch.jpg"),
    ("nx-os", "cisco_nexus.jpg"),
    // Arista
    ("arista", "arista_switch.jpg"),
    ("dcs-", "arista_switch.jpg"),
    ("eos", "arista_switch.jpg"),
    ("veos", "arista_switch.jpg"),
    // Juniper
    ("juniper", "juniper_switch.jpg"),
    ("junos", "juniper_switch.jpg"),
    ("ex4", "juniper_switch.jpg"),
    ("qfx", "juniper_switch.jpg"),
    ("mx", "juniper_router.jpg"),
    ("srx", "juniper_firewall.jpg"),
    // Palo Alto
    ("palo", "paloalto_firewall.jpg"),
    ("pan-", "paloalto_firewall.jpg"),
    // Fortinet
    ("forti", "fortinet_firewall.jpg"),
    // Generic
    ("router", "router.jpg"),
    ("switch", "workgroup_switch.jpg"),
    ("firewall", "firewall.jpg"),
    ("wireless", "wireless_router.jpg"),
    ("wap", "wireless_router.jpg"),
    ("ap", "wireless_router.jpg"),
];

/// Role keys of the default icon table
pub const DEFAULT_SWITCH: &str = "default_switch";
pub const DEFAULT_ROUTER: &str = "default_router";
pub const DEFAULT_UNKNOWN: &str = "default_unknown";
pub const DEFAULT_ENDPOINT: &str = "default_endpoint";

const DEFAULT_ICONS: &[(&str, &str)] = &[
    (DEFAULT_SWITCH, "workgroup_switch.jpg"),
    (DEFAULT_ROUTER, "router.jpg"),
    (DEFAULT_UNKNOWN, "cloud.jpg"),
    (DEFAULT_ENDPOINT, "pc.jpg"),
];

/// Icon configuration as found in `platform_icon_map.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconConfig {
    #[serde(default)]
    pub platform_patterns: IndexMap<String, String>,
    #[serde(default)]
    pub defaults: IndexMap<String, String>,
}

impl IconConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Ordered pattern table plus per-role default icons
#[derive(Debug, Clone, PartialEq)]
pub struct IconMapping {
    patterns: IndexMap<String, String>,
    defaults: IndexMap<String, String>,
}

impl Default for IconMapping {
    fn default() -> Self {
        Self::builtin()
    }
}

impl IconMapping {
    /// The built-in tables with no configuration applied
    pub fn builtin() -> Self {
        Self {
            patterns: to_table(DEFAULT_PATTERNS),
            defaults: to_table(DEFAULT_ICONS),
        }
    }

    /// Merge a configuration into the tables.
    ///
    /// Existing keys keep their position and take the configured icon, new
    /// keys are appended after everything already present.
    pub fn merge(&mut self, config: IconConfig) {
        // IndexMap::insert on an existing key updates in place
        self.patterns.extend(config.platform_patterns);
        self.defaults.extend(config.defaults);
    }

    /// Built-in tables extended with the configuration file at `path`.
    ///
    /// A missing file leaves the built-in tables untouched; an unreadable or
    /// malformed one is reported and ignored.
    pub fn load(path: &Path) -> Self {
        let mut mapping = Self::builtin();

        if !path.exists() {
            debug!("No icon configuration at {:?}, using built-in icon map", path);
            return mapping;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read icon config {:?}: {}", path, e);
                return mapping;
            }
        };

        match IconConfig::from_json_str(&content) {
            Ok(config) => {
                debug!(
                    "Loaded icon config {:?}: {} patterns, {} defaults",
                    path,
                    config.platform_patterns.len(),
                    config.defaults.len()
                );
                mapping.merge(config);
            }
            Err(e) => warn!("Could not parse icon config {:?}: {}", path, e),
        }

        mapping
    }

    /// Built-in tables extended with `platform_icon_map.json` from an icon directory
    pub fn load_from_dir(icons_dir: &Path) -> Self {
        Self::load(&icons_dir.join(ICON_CONFIG_FILE))
    }

    /// Patterns in match order
    pub fn patterns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.patterns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Icon file for a default role, falling back to the built-in table
    pub fn default_icon(&self, role: &str) -> &str {
        self.defaults
            .get(role)
            .map(String::as_str)
            .or_else(|| DEFAULT_ICONS.iter().find(|(r, _)| *r == role).map(|(_, f)| *f))
            .unwrap_or("cloud.jpg")
    }
}

fn to_table(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_order() {
        let mapping = IconMapping::builtin();
        let keys: Vec<&str> = mapping.patterns().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"catalyst"));
        assert_eq!(keys.last(), Some(&"ap"));
        let catalyst = keys.iter().position(|k| *k == "catalyst").unwrap();
        let switch = keys.iter().position(|k| *k == "switch").unwrap();
        assert!(catalyst < switch);
    }

    #[test]
    fn test_merge_overwrites_in_place_and_appends() {
        let mut mapping = IconMapping::builtin();
        let config = IconConfig::from_json_str(
            r#"{
                "platform_patterns": {"zz-new": "custom.png", "nexus": "nexus_custom.jpg"},
                "defaults": {"default_unknown": "question.png"}
            }"#,
        )
        .unwrap();
        mapping.merge(config);

        let patterns: Vec<(&str, &str)> = mapping.patterns().collect();
        assert_eq!(patterns[1], ("nexus", "nexus_custom.jpg"));
        assert_eq!(patterns.last(), Some(&("zz-new", "custom.png")));
        assert_eq!(patterns.len(), DEFAULT_PATTERNS.len() + 1);
        assert_eq!(mapping.default_icon(DEFAULT_UNKNOWN), "question.png");
        assert_eq!(mapping.default_icon(DEFAULT_ROUTER), "router.jpg");
    }

    #[test]
    fn test_load_missing_file_uses_builtin() {
        let mapping = IconMapping::load(Path::new("/nonexistent/platform_icon_map.json"));
        assert_eq!(mapping, IconMapping::builtin());
    }

    #[test]
    fn test_load_malformed_config_is_ignored() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{ not json").unwrap();

        let mapping = IconMapping::load(temp_file.path());
        assert_eq!(mapping, IconMapping::builtin());
    }

    #[test]
    fn test_load_partial_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"defaults": {{"default_endpoint": "laptop.png"}}}}"#).unwrap();

        let mapping = IconMapping::load(temp_file.path());
        assert_eq!(mapping.default_icon(DEFAULT_ENDPOINT), "laptop.png");
        assert_eq!(mapping.patterns().count(), DEFAULT_PATTERNS.len());
    }
}
