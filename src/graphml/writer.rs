//! GraphML document assembly.
//!
//! Writes the yEd dialect element by element with `quick_xml`: XML
//! declaration, root with namespaces, key declarations, the graph with its
//! nodes and edges, then the resource section holding embedded icons.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::exporter::ExportError;
use crate::topology::Connection;

use super::context::EmbeddedIcon;
use super::schema::*;

/// Font applied to every node and edge label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFont {
    pub family: String,
    pub size: u32,
}

/// How a node is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeVisual {
    /// Embedded icon referenced by resource id
    Image { resource_id: u32 },
    /// Rounded rectangle, used when no icon is available
    Shape,
}

/// Everything needed to emit one `<node>`
#[derive(Debug, Clone)]
pub struct NodeGraphic<'a> {
    pub node_id: &'a str,
    pub ip: &'a str,
    pub platform: &'a str,
    pub x: f64,
    pub y: f64,
    pub visual: NodeVisual,
}

impl NodeGraphic<'_> {
    /// Label lines: id, then ip and platform (platform first on shapes), skipping blanks
    fn label_text(&self) -> String {
        let details = match self.visual {
            NodeVisual::Image { .. } => [self.ip, self.platform],
            NodeVisual::Shape => [self.platform, self.ip],
        };
        std::iter::once(self.node_id)
            .chain(details.into_iter().filter(|part| !part.is_empty()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Everything needed to emit one `<edge>`
#[derive(Debug, Clone)]
pub struct EdgeGraphic<'a> {
    pub edge_id: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub connection: &'a Connection,
}

/// Streaming writer for a single yEd GraphML document
pub struct GraphmlWriter {
    writer: Writer<Vec<u8>>,
    font_family: String,
    font_size: String,
}

impl GraphmlWriter {
    pub fn new(font: &LabelFont) -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
            font_family: font.family.clone(),
            font_size: font.size.to_string(),
        }
    }

    /// XML declaration, root element, key declarations and the graph opening tag
    pub fn begin_document(&mut self) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.start("graphml", &ROOT_ATTRIBUTES)?;

        for key in KEYS.iter() {
            let mut attrs = vec![("for", key.target), ("id", key.id)];
            if let Some(name) = key.attr_name {
                attrs.push(("attr.name", name));
            }
            if let Some(attr_type) = key.attr_type {
                attrs.push(("attr.type", attr_type));
            }
            if let Some(yfiles_type) = key.yfiles_type {
                attrs.push(("yfiles.type", yfiles_type));
            }
            self.empty("key", &attrs)?;
        }

        self.start("graph", &[("id", GRAPH_ID), ("edgedefault", EDGE_DEFAULT)])
    }

    pub fn write_node(&mut self, node: &NodeGraphic<'_>) -> Result<(), ExportError> {
        self.start("node", &[("id", node.node_id)])?;
        self.start("data", &[("key", NODE_GRAPHICS_KEY)])?;

        let x = format_coordinate(node.x);
        let y = format_coordinate(node.y);
        let label = node.label_text();
        let font_family = self.font_family.clone();
        let font_size = self.font_size.clone();

        match node.visual {
            NodeVisual::Image { resource_id } => {
                let refid = resource_id.to_string();
                self.start("y:ImageNode", &[])?;
                self.empty(
                    "y:Geometry",
                    &[
                        ("height", IMAGE_NODE_HEIGHT),
                        ("width", IMAGE_NODE_WIDTH),
                        ("x", x.as_str()),
                        ("y", y.as_str()),
                    ],
                )?;
                self.empty("y:Fill", &[("color", IMAGE_NODE_FILL), ("transparent", "false")])?;
                self.border_style()?;
                self.text_element(
                    "y:NodeLabel",
                    &[
                        ("alignment", "center"),
                        ("autoSizePolicy", "content"),
                        ("fontFamily", font_family.as_str()),
                        ("fontSize", font_size.as_str()),
                        ("fontStyle", "plain"),
                        ("hasBackgroundColor", "false"),
                        ("hasLineColor", "false"),
                        ("modelName", "eight_pos"),
                        ("modelPosition", "s"),
                        ("textColor", IMAGE_LABEL_COLOR),
                        ("visible", "true"),
                    ],
                    &label,
                )?;
                self.empty("y:Image", &[("refid", refid.as_str())])?;
                self.end("y:ImageNode")?;
            }
            NodeVisual::Shape => {
                self.start("y:ShapeNode", &[])?;
                self.empty(
                    "y:Geometry",
                    &[
                        ("height", SHAPE_NODE_HEIGHT),
                        ("width", SHAPE_NODE_WIDTH),
                        ("x", x.as_str()),
                        ("y", y.as_str()),
                    ],
                )?;
                self.empty("y:Fill", &[("color", SHAPE_NODE_FILL), ("transparent", "false")])?;
                self.border_style()?;
                self.empty("y:Shape", &[("type", SHAPE_TYPE)])?;
                self.text_element(
                    "y:NodeLabel",
                    &[
                        ("alignment", "center"),
                        ("autoSizePolicy", "content"),
                        ("fontFamily", font_family.as_str()),
                        ("fontSize", font_size.as_str()),
                        ("modelName", "internal"),
                        ("modelPosition", "c"),
                        ("textColor", BLACK),
                        ("visible", "true"),
                    ],
                    &label,
                )?;
                self.end("y:ShapeNode")?;
            }
        }

        self.end("data")?;
        self.end("node")
    }

    /// One undirected polyline edge with a port label at each end
    pub fn write_edge(&mut self, edge: &EdgeGraphic<'_>) -> Result<(), ExportError> {
        self.start(
            "edge",
            &[("id", edge.edge_id), ("source", edge.source), ("target", edge.target)],
        )?;
        self.start("data", &[("key", EDGE_GRAPHICS_KEY)])?;
        self.start("y:PolyLineEdge", &[])?;

        self.empty("y:LineStyle", &[("color", BLACK), ("type", "line"), ("width", LINE_WIDTH)])?;
        self.empty("y:Arrows", &[("source", "none"), ("target", "none")])?;
        self.edge_label(&edge.connection.local_port, true)?;
        self.edge_label(&edge.connection.remote_port, false)?;
        self.empty("y:BendStyle", &[("smoothed", "false")])?;

        self.end("y:PolyLineEdge")?;
        self.end("data")?;
        self.end("edge")
    }

    pub fn end_graph(&mut self) -> Result<(), ExportError> {
        self.end("graph")
    }

    /// Resource section with every embedded icon; nothing is written when empty
    pub fn write_resources<'i, I>(&mut self, icons: I) -> Result<(), ExportError>
    where
        I: IntoIterator<Item = &'i EmbeddedIcon>,
    {
        let mut icons = icons.into_iter().peekable();
        if icons.peek().is_none() {
            return Ok(());
        }

        self.start("data", &[("key", RESOURCES_KEY)])?;
        self.start("y:Resources", &[])?;
        for icon in icons {
            let resource_id = icon.resource_id.to_string();
            self.text_element(
                "y:Resource",
                &[
                    ("id", resource_id.as_str()),
                    ("type", IMAGE_RESOURCE_TYPE),
                    ("xml:space", "preserve"),
                ],
                &wrap_base64(&icon.base64, BASE64_LINE_WIDTH),
            )?;
        }
        self.end("y:Resources")?;
        self.end("data")
    }

    /// Close the root element and return the serialized document
    pub fn finish(mut self) -> Result<String, ExportError> {
        self.end("graphml")?;
        let mut xml = String::from_utf8(self.writer.into_inner())?;
        xml.push('\n');
        Ok(xml)
    }

    fn border_style(&mut self) -> Result<(), ExportError> {
        self.empty("y:BorderStyle", &[("color", BLACK), ("type", "line"), ("width", LINE_WIDTH)])
    }

    fn edge_label(&mut self, port: &str, at_source: bool) -> Result<(), ExportError> {
        let (ratio, placement) = if at_source {
            (SOURCE_LABEL_RATIO, "source_on_edge")
        } else {
            (TARGET_LABEL_RATIO, "target_on_edge")
        };
        let font_family = self.font_family.clone();
        let font_size = self.font_size.clone();
        self.text_element(
            "y:EdgeLabel",
            &[
                ("alignment", "center"),
                ("backgroundColor", SHAPE_NODE_FILL),
                ("configuration", "AutoFlippingLabel"),
                ("fontFamily", font_family.as_str()),
                ("fontSize", font_size.as_str()),
                ("fontStyle", "plain"),
                ("hasLineColor", "false"),
                ("modelName", "free"),
                ("modelPosition", "anywhere"),
                ("textColor", BLACK),
                ("visible", "true"),
                ("distance", EDGE_LABEL_DISTANCE),
                ("ratio", ratio),
                ("preferredPlacement", placement),
            ],
            port,
        )
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
        self.writer.write_event(Event::Start(element(name, attrs)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
        self.writer.write_event(Event::Empty(element(name, attrs)))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), ExportError> {
        self.start(name, attrs)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }
}

fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    elem
}

/// Decimal form that always keeps a fractional part (`200.0`, `-35.5`)
pub fn format_coordinate(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Split base64 text into lines of at most `width` characters
fn wrap_base64(data: &str, width: usize) -> String {
    let clean: String = data.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    clean
        .as_bytes()
        .chunks(width.max(1))
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join("\n")
}
