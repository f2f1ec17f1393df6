use crate::config::ExportOptions;
use crate::topology::Topology;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load and validate a topology map from a JSON file
pub fn load_topology(topology_path: &Path) -> Result<Topology> {
    info!("Loading topology from: {:?}", topology_path);

    let file = File::open(topology_path)
        .wrap_err_with(|| format!("Failed to read topology '{}'", topology_path.display()))?;

    // Parse into a generic value first so structural problems are reported
    // as topology errors rather than serde type mismatches
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("Invalid JSON in '{}'", topology_path.display()))?;

    let topology = Topology::from_value(value)
        .wrap_err_with(|| format!("Invalid topology in '{}'", topology_path.display()))?;

    info!("Loaded {} nodes", topology.len());
    Ok(topology)
}

/// Load and validate export options from a YAML profile
pub fn load_options(options_path: &Path) -> Result<ExportOptions> {
    info!("Loading export options from: {:?}", options_path);

    let file = File::open(options_path)
        .wrap_err_with(|| format!("Failed to read options '{}'", options_path.display()))?;

    let options: ExportOptions = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Invalid options in '{}'", options_path.display()))?;

    options.validate()?;

    Ok(options)
}
