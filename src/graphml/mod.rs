//! yEd GraphML output.
//!
//! This module contains the fixed dialect tables, per-export render state,
//! link deduplication and the streaming document writer.

pub mod context;
pub mod dedup;
pub mod schema;
pub mod writer;

pub use context::{EmbeddedIcon, RenderContext};
pub use dedup::{ConnectionKey, Deduplicator};
pub use writer::{format_coordinate, EdgeGraphic, GraphmlWriter, LabelFont, NodeGraphic, NodeVisual};
