//! Fixed parts of the yEd GraphML dialect.
//!
//! Namespaces, key ids and attribute spellings must match what yEd writes
//! itself or the file will not open cleanly.

/// Root element attributes, in output order
pub const ROOT_ATTRIBUTES: [(&str, &str); 8] = [
    ("xmlns", "http://graphml.graphdrawing.org/xmlns"),
    ("xmlns:java", "http://www.yworks.com/xml/yfiles-common/1.0/java"),
    ("xmlns:sys", "http://www.yworks.com/xml/yfiles-common/markup/primitives/2.0"),
    ("xmlns:x", "http://www.yworks.com/xml/yfiles-common/markup/2.0"),
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xmlns:y", "http://www.yworks.com/xml/graphml"),
    ("xmlns:yed", "http://www.yworks.com/xml/yed/3"),
    (
        "xsi:schemaLocation",
        "http://graphml.graphdrawing.org/xmlns http://www.yworks.com/xml/schema/graphml/1.1/ygraphml.xsd",
    ),
];

/// A `<key>` declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDecl {
    pub target: &'static str,
    pub id: &'static str,
    pub attr_name: Option<&'static str>,
    pub attr_type: Option<&'static str>,
    pub yfiles_type: Option<&'static str>,
}

const fn attr_key(target: &'static str, id: &'static str, name: &'static str) -> KeyDecl {
    KeyDecl {
        target,
        id,
        attr_name: Some(name),
        attr_type: Some("string"),
        yfiles_type: None,
    }
}

const fn yfiles_key(target: &'static str, id: &'static str, yfiles_type: &'static str) -> KeyDecl {
    KeyDecl {
        target,
        id,
        attr_name: None,
        attr_type: None,
        yfiles_type: Some(yfiles_type),
    }
}

pub const NODE_GRAPHICS_KEY: &str = "d6";
pub const RESOURCES_KEY: &str = "d7";
pub const EDGE_GRAPHICS_KEY: &str = "d10";

/// Every key declared by the document, in output order
pub const KEYS: [KeyDecl; 11] = [
    attr_key("graph", "d0", "Description"),
    yfiles_key("port", "d1", "portgraphics"),
    yfiles_key("port", "d2", "portgeometry"),
    yfiles_key("port", "d3", "portuserdata"),
    attr_key("node", "d4", "url"),
    attr_key("node", "d5", "description"),
    yfiles_key("node", NODE_GRAPHICS_KEY, "nodegraphics"),
    yfiles_key("graphml", RESOURCES_KEY, "resources"),
    attr_key("edge", "d8", "url"),
    attr_key("edge", "d9", "description"),
    yfiles_key("edge", EDGE_GRAPHICS_KEY, "edgegraphics"),
];

pub const GRAPH_ID: &str = "G";
pub const EDGE_DEFAULT: &str = "directed";

/// Resource type yEd uses for embedded bitmaps
pub const IMAGE_RESOURCE_TYPE: &str = "java.awt.image.BufferedImage";
/// Column width of embedded base64 data
pub const BASE64_LINE_WIDTH: usize = 76;

// Image node styling
pub const IMAGE_NODE_WIDTH: &str = "90.0";
pub const IMAGE_NODE_HEIGHT: &str = "51.0";
pub const IMAGE_NODE_FILL: &str = "#CCCCFF";
pub const IMAGE_LABEL_COLOR: &str = "#333333";

// Shape node styling
pub const SHAPE_NODE_WIDTH: &str = "120";
pub const SHAPE_NODE_HEIGHT: &str = "60";
pub const SHAPE_NODE_FILL: &str = "#FFFFFF";
pub const SHAPE_TYPE: &str = "roundrectangle";

pub const BLACK: &str = "#000000";
pub const LINE_WIDTH: &str = "1.0";

// Edge label placement
pub const EDGE_LABEL_DISTANCE: &str = "10.0";
pub const SOURCE_LABEL_RATIO: &str = "0.2";
pub const TARGET_LABEL_RATIO: &str = "0.8";
