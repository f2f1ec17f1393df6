use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::path::{Path, PathBuf};

use netgraphml::config::ExportOptions;
use netgraphml::config_loader;
use netgraphml::exporter::GraphmlExporter;
use netgraphml::icons::{DirectoryIconSource, IconMapping};
use netgraphml::layout::Layout;

/// Network topology export tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export to yEd GraphML format
    Graphml(GraphmlArgs),
}

#[derive(Args, Debug)]
struct GraphmlArgs {
    /// Input topology JSON file (map.json)
    input: PathBuf,

    /// Output GraphML file path
    output: PathBuf,

    /// Export options YAML profile; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use shapes instead of embedded icons
    #[arg(long)]
    no_icons: bool,

    /// Exclude endpoint devices (phones, cameras, etc.)
    #[arg(long)]
    no_endpoints: bool,

    /// Only include devices that have at least one connection
    #[arg(long)]
    connected_only: bool,

    /// Directory containing icon files and platform_icon_map.json
    #[arg(long)]
    icons_dir: Option<PathBuf>,

    /// Icon mapping JSON, overriding the one in the icons directory
    #[arg(long)]
    icon_map: Option<PathBuf>,

    /// Initial layout algorithm [default: grid]
    #[arg(long, value_enum)]
    layout: Option<Layout>,

    /// Font size for labels [default: 12]
    #[arg(long)]
    font_size: Option<u32>,

    /// Font family for labels [default: Dialog]
    #[arg(long)]
    font_family: Option<String>,
}

impl GraphmlArgs {
    /// Options from the profile (or defaults) with command-line overrides applied
    fn export_options(&self) -> Result<ExportOptions> {
        let mut options = match &self.config {
            Some(path) => config_loader::load_options(path)?,
            None => ExportOptions::default(),
        };

        if self.no_icons {
            options.use_icons = false;
        }
        if self.no_endpoints {
            options.include_endpoints = false;
        }
        if self.connected_only {
            options.connected_only = true;
        }
        if let Some(layout) = self.layout {
            options.layout = layout;
        }
        if let Some(font_size) = self.font_size {
            options.font_size = font_size;
        }
        if let Some(font_family) = &self.font_family {
            options.font_family = font_family.clone();
        }

        options.validate()?;
        Ok(options)
    }

    /// Icon mapping for an icons directory; `--icon-map` takes priority
    fn icon_mapping(&self, icons_dir: &Path) -> IconMapping {
        match &self.icon_map {
            Some(path) => IconMapping::load(path),
            None => IconMapping::load_from_dir(icons_dir),
        }
    }

    /// Exporter reading icons from `--icons-dir`, or drawing shapes without one
    fn exporter(&self, options: ExportOptions) -> Result<GraphmlExporter> {
        let exporter = match &self.icons_dir {
            Some(dir) => GraphmlExporter::new(
                options,
                self.icon_mapping(dir),
                Box::new(DirectoryIconSource::new(dir)),
            ),
            None => {
                if options.use_icons {
                    warn!("No icons directory given; drawing nodes as shapes");
                }
                GraphmlExporter::shapes_only(options)
            }
        };
        exporter.wrap_err("Failed to initialize exporter")
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    match cli.command {
        Commands::Graphml(args) => cmd_graphml(&args),
    }
}

fn cmd_graphml(args: &GraphmlArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(eyre!("Input file not found: {}", args.input.display()));
    }

    let options = args.export_options()?;
    let topology = config_loader::load_topology(&args.input)?;
    let exporter = args.exporter(options)?;
    let options = exporter.options();

    let summary = exporter
        .export(&topology, &args.output)
        .wrap_err("Export failed")?;

    info!("Exported to {:?}", args.output);
    info!("  Nodes: {} ({} in source)", summary.nodes, topology.len());
    info!("  Edges: {}", summary.edges);
    info!(
        "  Icons: {}",
        if options.use_icons {
            format!("enabled ({} embedded)", summary.icons)
        } else {
            "disabled".to_string()
        }
    );
    info!("  Layout: {}", options.layout);
    info!(
        "  Endpoints: {}",
        if options.include_endpoints { "included" } else { "excluded" }
    );
    if options.connected_only {
        info!("  Filter: connected devices only");
    }

    Ok(())
}
