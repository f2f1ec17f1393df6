//! GraphML export engine.
//!
//! [`GraphmlExporter`] ties the pipeline together:
//!
//! 1. **Normalize**: close the topology and apply the endpoint and
//!    connectivity filters
//! 2. **Nodes**: place each node with the layout, resolve its icon and emit
//!    an image node (or a shape node when no icon is available)
//! 3. **Edges**: walk every peer connection, emitting each physical link once
//! 4. **Resources**: embed every icon that was used
//!
//! All per-export state lives in a [`RenderContext`] created inside
//! [`GraphmlExporter::render`], so one exporter can be reused for any number
//! of exports without state carrying over.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::{ExportOptions, ValidationError};
use crate::graphml::{EdgeGraphic, GraphmlWriter, NodeGraphic, NodeVisual, RenderContext};
use crate::icons::{BundledIconSource, DirectoryIconSource, IconMapping, IconResolver, IconSource};
use crate::topology::{normalize, NodeRecord, Topology, TopologyError};

/// Errors that can occur during an export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error(transparent)]
    Options(#[from] ValidationError),
    #[error("Failed to serialize GraphML: {0}")]
    Serialize(#[from] std::io::Error),
    #[error("GraphML output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Counts describing a finished export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Nodes written after normalization
    pub nodes: usize,
    /// Edges written after deduplication
    pub edges: usize,
    /// Distinct icons embedded
    pub icons: usize,
}

/// A rendered document and its summary
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub xml: String,
    pub summary: ExportSummary,
}

/// Converts topologies into yEd GraphML documents
pub struct GraphmlExporter {
    options: ExportOptions,
    resolver: IconResolver,
    icons: Box<dyn IconSource>,
}

impl GraphmlExporter {
    /// Create an exporter from options, an icon mapping and an icon byte source
    pub fn new(
        options: ExportOptions,
        mapping: IconMapping,
        icons: Box<dyn IconSource>,
    ) -> Result<Self, ExportError> {
        options.validate()?;
        let resolver = IconResolver::new(mapping, options.use_icons);
        Ok(Self {
            options,
            resolver,
            icons,
        })
    }

    /// Create an exporter reading icons, and `platform_icon_map.json`, from a directory
    pub fn with_icons_dir(options: ExportOptions, icons_dir: &Path) -> Result<Self, ExportError> {
        let mapping = IconMapping::load_from_dir(icons_dir);
        Self::new(options, mapping, Box::new(DirectoryIconSource::new(icons_dir)))
    }

    /// Options in effect, after any adjustment made at construction
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Create an exporter that draws every node as a shape and reads no icons
    pub fn shapes_only(options: ExportOptions) -> Result<Self, ExportError> {
        let options = ExportOptions {
            use_icons: false,
            ..options
        };
        Self::new(options, IconMapping::builtin(), Box::new(BundledIconSource::new()))
    }

    /// Render a topology to a GraphML document in memory
    pub fn render(&self, topology: &Topology) -> Result<RenderedDocument, ExportError> {
        let graph = normalize(topology, self.options.normalize_options());
        let mut context = RenderContext::new();
        let mut writer = GraphmlWriter::new(&self.options.label_font());

        writer.begin_document()?;

        let total = graph.len();
        for (index, (node_id, record)) in graph.iter().enumerate() {
            let (x, y) = self.options.layout.position(index, total);
            let visual = self.node_visual(node_id, record, &mut context);
            writer.write_node(&NodeGraphic {
                node_id,
                ip: record.ip(),
                platform: record.platform(),
                x,
                y,
                visual,
            })?;
        }

        for (source, record) in graph.iter() {
            for (target, link) in &record.peers {
                for connection in &link.connections {
                    let Some(edge_id) = context.dedup.admit(
                        source,
                        &connection.local_port,
                        target,
                        &connection.remote_port,
                    ) else {
                        continue;
                    };
                    writer.write_edge(&EdgeGraphic {
                        edge_id: &edge_id,
                        source,
                        target,
                        connection,
                    })?;
                }
            }
        }

        writer.end_graph()?;
        writer.write_resources(context.embedded_icons())?;
        let xml = writer.finish()?;

        let summary = ExportSummary {
            nodes: total,
            edges: context.dedup.admitted(),
            icons: context.embedded_count(),
        };
        debug!(
            "Rendered {} nodes, {} edges, {} icons ({} layout)",
            summary.nodes, summary.edges, summary.icons, self.options.layout
        );

        Ok(RenderedDocument { xml, summary })
    }

    /// Render a topology and return only the document text
    pub fn export_to_string(&self, topology: &Topology) -> Result<String, ExportError> {
        Ok(self.render(topology)?.xml)
    }

    /// Render a topology and write it to `output_path`.
    ///
    /// The file is only written once the whole document rendered successfully.
    pub fn export(&self, topology: &Topology, output_path: &Path) -> Result<ExportSummary, ExportError> {
        let rendered = self.render(topology)?;

        fs::write(output_path, &rendered.xml).map_err(|source| ExportError::Write {
            path: output_path.to_path_buf(),
            source,
        })?;

        info!(
            "Exported {} nodes and {} edges to {:?}",
            rendered.summary.nodes, rendered.summary.edges, output_path
        );
        Ok(rendered.summary)
    }

    /// Validate parsed topology JSON, then export it to `output_path`
    pub fn export_value(
        &self,
        topology: serde_json::Value,
        output_path: &Path,
    ) -> Result<ExportSummary, ExportError> {
        let topology = Topology::from_value(topology)?;
        self.export(&topology, output_path)
    }

    fn node_visual(&self, node_id: &str, record: &NodeRecord, context: &mut RenderContext) -> NodeVisual {
        self.resolver
            .resolve(node_id, record.platform())
            .and_then(|icon| {
                debug!("Node {} -> {} ({:?})", node_id, icon.file_name, icon.category);
                context.icon_resource(&icon.file_name, self.icons.as_ref())
            })
            .map_or(NodeVisual::Shape, |resource_id| NodeVisual::Image { resource_id })
    }
}
