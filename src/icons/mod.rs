//! Device icons.
//!
//! - `mapping`: ordered platform pattern table and default icons per role
//! - `source`: where icon bytes come from (directory or in-memory bundle)
//! - `resolver`: picks the icon file for a device

pub mod mapping;
pub mod resolver;
pub mod source;

pub use mapping::{IconConfig, IconMapping, ICON_CONFIG_FILE};
pub use resolver::{IconCategory, IconMatch, IconResolver};
pub use source::{icon_base_name, BundledIconSource, DirectoryIconSource, IconSource};
