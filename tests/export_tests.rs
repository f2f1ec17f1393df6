//! End-to-end export tests against files on disk

use std::fs;
use std::path::Path;

use base64::Engine as _;
use netgraphml::config::ExportOptions;
use netgraphml::config_loader::load_topology;
use netgraphml::exporter::{ExportError, GraphmlExporter};
use netgraphml::icons::{BundledIconSource, IconMapping, ICON_CONFIG_FILE};
use netgraphml::layout::Layout;
use netgraphml::topology::{NodeRecord, Topology};
use tempfile::tempdir;

const CAMPUS_MAP: &str = r#"{
    "core-sw1": {
        "node_details": {"ip": "10.0.0.1", "platform": "Cisco Catalyst 9500"},
        "peers": {
            "edge-rtr1": {"connections": [["Te1/0/1", "Gi0/0/0"]]},
            "dist-sw1": {"connections": [["Te1/0/2", "Te1/1/1"], ["Te1/0/3", "Te1/1/2"]]}
        }
    },
    "dist-sw1": {
        "node_details": {"ip": "10.0.0.2", "platform": "Cisco Catalyst 9300"},
        "peers": {
            "core-sw1": {"connections": [["Te1/1/1", "Te1/0/2"], ["Te1/1/2", "Te1/0/3"]]},
            "0011.2233.4455": {"connections": [["Gi1/0/10", "Port 1"]]}
        }
    },
    "edge-rtr1": {
        "node_details": {"ip": "10.0.0.254", "platform": "Cisco ISR4451"},
        "peers": {}
    }
}"#;

fn write_icon(dir: &Path, file_name: &str, bytes: &[u8]) {
    fs::write(dir.join(file_name), bytes).unwrap();
}

#[test]
fn test_full_export_with_icons_dir() {
    let dir = tempdir().unwrap();
    let icons_dir = dir.path().join("icons");
    fs::create_dir(&icons_dir).unwrap();
    write_icon(&icons_dir, "cisco_switch.jpg", b"switch-bytes");
    write_icon(&icons_dir, "cisco_router.png", b"router-bytes");

    let map_path = dir.path().join("map.json");
    fs::write(&map_path, CAMPUS_MAP).unwrap();
    let output = dir.path().join("campus.graphml");

    let topology = load_topology(&map_path).unwrap();
    let exporter = GraphmlExporter::with_icons_dir(ExportOptions::default(), &icons_dir).unwrap();
    let summary = exporter.export(&topology, &output).unwrap();

    // Three defined nodes plus the phone referenced only as a peer
    assert_eq!(summary.nodes, 4);
    // core<->edge-rtr, two core<->dist links, dist<->phone
    assert_eq!(summary.edges, 4);
    // cisco_switch.jpg and cisco_router (found as .png); phone's pc.jpg is missing
    assert_eq!(summary.icons, 2);

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.ends_with("</graphml>\n"));
    assert_eq!(xml.matches("<node id=").count(), 4);
    assert_eq!(xml.matches("<edge id=").count(), 4);
    assert!(xml.contains("<node id=\"0011.2233.4455\">"));
    assert_eq!(xml.matches("<y:Resource id=").count(), 2);

    let encoded = base64::engine::general_purpose::STANDARD.encode(b"switch-bytes");
    assert!(xml.contains(&encoded));
}

#[test]
fn test_icon_map_file_in_icons_dir_overrides_builtin() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(ICON_CONFIG_FILE),
        r#"{"platform_patterns": {"catalyst": "campus_switch.jpg"}}"#,
    )
    .unwrap();
    write_icon(dir.path(), "campus_switch.jpg", b"campus");

    let mut topology = Topology::new();
    topology.insert("core-sw1", NodeRecord::new("10.0.0.1", "Cisco Catalyst 9500"));

    let exporter = GraphmlExporter::with_icons_dir(ExportOptions::default(), dir.path()).unwrap();
    let rendered = exporter.render(&topology).unwrap();

    assert_eq!(rendered.summary.icons, 1);
    let encoded = base64::engine::general_purpose::STANDARD.encode(b"campus");
    assert!(rendered.xml.contains(&encoded));
}

#[test]
fn test_first_matching_pattern_wins() {
    // "catalyst" is listed before "router", so a Catalyst router gets the switch icon
    let icons = BundledIconSource::new()
        .with_icon("cisco_switch.jpg", b"switch".to_vec())
        .with_icon("router.jpg", b"router".to_vec());

    let mut topology = Topology::new();
    topology.insert("x", NodeRecord::new("", "Catalyst Router Edition"));

    let exporter =
        GraphmlExporter::new(ExportOptions::default(), IconMapping::builtin(), Box::new(icons)).unwrap();
    let xml = exporter.export_to_string(&topology).unwrap();

    let switch = base64::engine::general_purpose::STANDARD.encode(b"switch");
    let router = base64::engine::general_purpose::STANDARD.encode(b"router");
    assert!(xml.contains(&switch));
    assert!(!xml.contains(&router));
}

#[test]
fn test_endpoint_and_connectivity_filters() {
    let dir = tempdir().unwrap();
    let map_path = dir.path().join("map.json");
    fs::write(&map_path, CAMPUS_MAP).unwrap();
    let topology = load_topology(&map_path).unwrap();

    let options = ExportOptions {
        use_icons: false,
        include_endpoints: false,
        connected_only: true,
        layout: Layout::List,
        ..Default::default()
    };
    let exporter =
        GraphmlExporter::new(options, IconMapping::builtin(), Box::new(BundledIconSource::new())).unwrap();
    let rendered = exporter.render(&topology).unwrap();

    assert_eq!(rendered.summary.nodes, 3);
    assert_eq!(rendered.summary.edges, 3);
    assert!(!rendered.xml.contains("0011.2233.4455"));
    assert!(!rendered.xml.contains("y:ImageNode"));
}

#[test]
fn test_zero_node_document() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("empty.graphml");

    let exporter = GraphmlExporter::with_icons_dir(ExportOptions::default(), dir.path()).unwrap();
    let summary = exporter.export_value(serde_json::json!({}), &output).unwrap();

    assert_eq!(summary.nodes, 0);
    let xml = fs::read_to_string(&output).unwrap();
    assert_eq!(xml.matches("<key ").count(), 11);
    assert!(xml.contains("<graph id=\"G\" edgedefault=\"directed\">"));
    assert!(!xml.contains("<node "));
    assert!(!xml.contains("y:Resources"));
}

#[test]
fn test_malformed_input_writes_nothing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("never.graphml");

    let exporter = GraphmlExporter::with_icons_dir(ExportOptions::default(), dir.path()).unwrap();
    let result = exporter.export_value(serde_json::json!(["core-sw1", "dist-sw1"]), &output);

    assert!(matches!(result, Err(ExportError::Topology(_))));
    assert!(!output.exists());

    let result = exporter.export_value(serde_json::json!({"core-sw1": "10.0.0.1"}), &output);
    assert!(matches!(result, Err(ExportError::Topology(_))));
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_reports_path() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("out.graphml");

    let mut topology = Topology::new();
    topology.insert("a", NodeRecord::new("10.0.0.1", ""));

    let exporter = GraphmlExporter::with_icons_dir(ExportOptions::default(), dir.path()).unwrap();
    match exporter.export(&topology, &output) {
        Err(ExportError::Write { path, .. }) => assert_eq!(path, output),
        other => panic!("expected write error, got {:?}", other),
    }
}

#[test]
fn test_repeated_exports_are_identical() {
    let dir = tempdir().unwrap();
    write_icon(dir.path(), "cisco_switch.jpg", b"switch-bytes");
    let topology = Topology::from_json_str(CAMPUS_MAP).unwrap();

    let exporter = GraphmlExporter::with_icons_dir(ExportOptions::default(), dir.path()).unwrap();
    let first = dir.path().join("first.graphml");
    let second = dir.path().join("second.graphml");
    exporter.export(&topology, &first).unwrap();
    exporter.export(&topology, &second).unwrap();

    assert_eq!(fs::read_to_string(first).unwrap(), fs::read_to_string(second).unwrap());
}
