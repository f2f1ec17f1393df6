//! Device classification.
//!
//! Shared by the normalizer (endpoint filtering) and the icon resolver
//! (default endpoint icon).

use std::sync::LazyLock;

use regex::Regex;

/// Cisco-style dotted MAC address, e.g. `aabb.ccdd.eeff`
static MAC_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9a-f]{4}\.){2}[0-9a-f]{4}$").expect("Invalid MAC address regex")
});

/// Platform keywords that mark a leaf device
const ENDPOINT_KEYWORDS: [&str; 6] = ["endpoint", "camera", "phone", "printer", "pc", "workstation"];

/// Returns true if the node is an endpoint rather than network infrastructure.
///
/// A node id shaped like a dotted MAC address is always an endpoint, whatever
/// its platform says. Otherwise the lower-cased platform is searched for
/// endpoint keywords.
///
/// # Examples
/// ```
/// use netgraphml::topology::is_endpoint;
///
/// assert!(is_endpoint("aabb.ccdd.eeff", "Cisco IOS"));
/// assert!(is_endpoint("lobby-cam", "Axis Camera P3245"));
/// assert!(!is_endpoint("SW-CORE-1", ""));
/// ```
pub fn is_endpoint(node_id: &str, platform: &str) -> bool {
    if MAC_ADDRESS.is_match(node_id) {
        return true;
    }

    let platform_lower = platform.to_lowercase();
    ENDPOINT_KEYWORDS.iter().any(|kw| platform_lower.contains(kw))
}
