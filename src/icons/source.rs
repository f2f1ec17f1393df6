//! Icon byte providers.
//!
//! The exporter only asks "give me the bytes for this icon name"; where the
//! bytes live is up to the provider. Both providers try the same extension
//! list in order, so `router.jpg` may be satisfied by `router.png`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

/// Extensions tried, in order, for every icon lookup
pub const ICON_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Supplies raw icon bytes by logical name
pub trait IconSource {
    /// Bytes of the icon whose file stem is `base_name`, or `None` if absent
    fn get(&self, base_name: &str) -> Option<Vec<u8>>;
}

/// Strip any extension from an icon file name (`router.jpg` -> `router`)
pub fn icon_base_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}

/// Icons stored as files in a directory
#[derive(Debug, Clone)]
pub struct DirectoryIconSource {
    dir: PathBuf,
}

impl DirectoryIconSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl IconSource for DirectoryIconSource {
    fn get(&self, base_name: &str) -> Option<Vec<u8>> {
        for ext in ICON_EXTENSIONS {
            let path = self.dir.join(format!("{}.{}", base_name, ext));
            if !path.exists() {
                continue;
            }
            match fs::read(&path) {
                Ok(bytes) => return Some(bytes),
                Err(e) => warn!("Could not load icon {:?}: {}", path, e),
            }
        }
        None
    }
}

/// Icons held in memory, keyed by file name (e.g. an embedded bundle)
#[derive(Debug, Clone, Default)]
pub struct BundledIconSource {
    icons: HashMap<String, Vec<u8>>,
}

impl BundledIconSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an icon under its full file name, returning the bundle for chaining
    pub fn with_icon(mut self, file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.icons.insert(file_name.into(), bytes.into());
        self
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl IconSource for BundledIconSource {
    fn get(&self, base_name: &str) -> Option<Vec<u8>> {
        ICON_EXTENSIONS
            .iter()
            .find_map(|ext| self.icons.get(&format!("{}.{}", base_name, ext)))
            .cloned()
    }
}
