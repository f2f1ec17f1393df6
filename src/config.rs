//! Export options.
//!
//! The options a caller can set on an export, loadable from a YAML profile
//! and overridable from the command line.

use serde::{Deserialize, Serialize};

use crate::graphml::LabelFont;
use crate::layout::Layout;
use crate::topology::NormalizeOptions;

/// Options validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid font configuration: {0}")]
    InvalidFont(String),
}

/// Options controlling a GraphML export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Embed device icons instead of drawing plain shapes
    pub use_icons: bool,
    /// Keep endpoint devices (phones, cameras, PCs...)
    pub include_endpoints: bool,
    /// Only keep devices with at least one connection
    pub connected_only: bool,
    /// Initial layout
    pub layout: Layout,
    /// Label font size in points
    pub font_size: u32,
    /// Label font family
    pub font_family: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            use_icons: true,
            include_endpoints: true,
            connected_only: false,
            layout: Layout::Grid,
            font_size: 12,
            font_family: "Dialog".to_string(),
        }
    }
}

impl ExportOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.font_size == 0 {
            return Err(ValidationError::InvalidFont(
                "font_size must be greater than zero".to_string(),
            ));
        }
        if self.font_family.trim().is_empty() {
            return Err(ValidationError::InvalidFont(
                "font_family cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            include_endpoints: self.include_endpoints,
            connected_only: self.connected_only,
        }
    }

    pub fn label_font(&self) -> LabelFont {
        LabelFont {
            family: self.font_family.clone(),
            size: self.font_size,
        }
    }
}
