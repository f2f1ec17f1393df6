//! # netgraphml - Network topology export to yEd GraphML
//!
//! This library converts a discovered network topology (devices with IP and
//! platform strings, and port-to-port links between them) into a GraphML
//! document in the dialect used by the yEd graph editor, with device icons
//! embedded in the file.
//!
//! ## Pipeline
//!
//! 1. **Normalize**: every referenced peer gets a node; endpoints and
//!    standalone devices are optionally filtered out
//! 2. **Layout**: each node gets an initial grid, circle or list position
//! 3. **Icons**: platform strings and node ids are matched against an ordered
//!    pattern table to pick an icon, falling back to per-role defaults
//! 4. **Edges**: links reported by both ends are emitted once, labelled with
//!    the port at each end
//! 5. **Assemble**: keys, nodes, edges and the embedded icon resources are
//!    written as indented XML
//!
//! ## Architecture
//!
//! - `topology`: topology data model, validation, endpoint test, normalization
//! - `icons`: icon mapping tables, icon byte sources, icon resolution
//! - `layout`: initial node placement
//! - `graphml`: dialect tables, per-export state, deduplication, XML writer
//! - `exporter`: the export engine
//! - `config`: export options
//! - `config_loader`: topology and options file loading
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use netgraphml::{config::ExportOptions, config_loader, exporter::GraphmlExporter};
//!
//! let topology = config_loader::load_topology(Path::new("map.json"))?;
//!
//! let exporter = GraphmlExporter::with_icons_dir(ExportOptions::default(), Path::new("icons"))?;
//! let summary = exporter.export(&topology, Path::new("network.graphml"))?;
//! println!("{} nodes, {} edges", summary.nodes, summary.edges);
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Topology Format
//!
//! ```json
//! {
//!   "core-sw1": {
//!     "node_details": {"ip": "10.0.0.1", "platform": "Cisco Catalyst 9500"},
//!     "peers": {
//!       "dist-sw1": {"connections": [["Te1/0/1", "Te1/1/1"]]}
//!     }
//!   }
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return typed errors (`TopologyError`, `ValidationError`,
//! `ExportError`). File loading helpers and the binary use `color_eyre` for
//! error reporting with context. Missing icons and malformed icon
//! configuration are not errors: they are logged and the export continues.

pub mod config;
pub mod config_loader;
pub mod exporter;
pub mod graphml;
pub mod icons;
pub mod layout;
pub mod topology;
