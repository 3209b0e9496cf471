//! sparnet command-line interface.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use sparnet_core::{ComponentKind, Netlist};
use sparnet_devices::{FrequencyGrid, ModelLibrary, SimulationConfig, StraightWaveguideRegression};
use sparnet_solver::{get_sparameters, CircuitSParameters};

#[derive(Parser)]
#[command(name = "sparnet")]
#[command(about = "S-parameter simulation of photonic netlists", long_about = None)]
#[command(version)]
struct Cli {
    /// Input netlist file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Simulation configuration (JSON)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Straight-waveguide regression model (JSON)
    #[arg(short, long, value_name = "PATH")]
    regression: Option<PathBuf>,

    /// Write the parsed component list as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Compute and print the circuit s-parameters
    #[arg(short, long)]
    sparams: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Some(ref input) = cli.input {
        run(input, &cli)?;
    } else {
        println!("sparnet - photonic circuit s-parameter simulator");
        println!();
        println!("Usage: sparnet <netlist.spi> [options]");
        println!();
        println!("Options:");
        println!("  -c, --config <PATH>      Simulation configuration (JSON)");
        println!("  -r, --regression <PATH>  Waveguide regression model (JSON)");
        println!("  --json <PATH>            Write the component list as JSON");
        println!("  -s, --sparams            Compute circuit s-parameters");
        println!("  -v, --verbose            Verbose output");
        println!("  -h, --help               Show help");
        println!("  -V, --version            Show version");
    }

    Ok(())
}

fn run(input: &Path, cli: &Cli) -> Result<()> {
    let netlist = sparnet_parser::parse_file(input)
        .with_context(|| format!("Failed to parse netlist: {}", input.display()))?;

    print_summary(&netlist);

    if let Some(ref path) = cli.json {
        let json = netlist
            .to_json_pretty()
            .context("Failed to serialize netlist")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write JSON: {}", path.display()))?;
        log::info!("wrote component list to {}", path.display());
    }

    if cli.sparams {
        let config = match cli.config {
            Some(ref path) => SimulationConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        let mut library = ModelLibrary::new(config.models.clone());
        if let Some(ref path) = cli.regression {
            let regression = StraightWaveguideRegression::load(path)
                .with_context(|| format!("Failed to load regression: {}", path.display()))?;
            library = library.with_regression(regression);
        }

        let grid = FrequencyGrid::from_sweep(&config.sweep).context("Invalid wavelength sweep")?;
        let result = get_sparameters(&netlist, &library, &grid)
            .context("Failed to compute circuit s-parameters")?;
        print_sparameters(&result);
    }

    Ok(())
}

fn print_summary(netlist: &Netlist) {
    println!("Components: {}", netlist.len());
    println!("Highest internal net: {}", netlist.net_count());
    println!();
    println!("{:<32}{:<28}{}", "Instance", "Type", "Nets");
    println!("{}", "-".repeat(80));

    for component in netlist.components() {
        let nets: Vec<String> = component.nets.iter().map(|n| n.to_string()).collect();
        let mut line = format!(
            "{:<32}{:<28}{}",
            component.instance,
            component.type_name(),
            nets.join(" ")
        );
        match &component.kind {
            ComponentKind::Waveguide { length, width, .. } => {
                line.push_str(&format!("  (L={:.3} um, W={:.3} um)", length * 1e6, width));
            }
            ComponentKind::HalfRing { radius } => {
                line.push_str(&format!("  (R={:.3} um)", radius * 1e6));
            }
            _ => {}
        }
        println!("{}", line);
    }
    println!();

    let edges: Vec<&str> = netlist
        .external_components()
        .iter()
        .map(|c| c.instance.as_str())
        .collect();
    println!("External components: {}", edges.join(", "));
    println!();
}

/// `|S[i, j]|` in dB for every port pair, row-major.
fn magnitude_columns(result: &CircuitSParameters) -> Vec<Vec<f64>> {
    let ports = result.nports();
    (0..ports)
        .flat_map(|i| (0..ports).map(move |j| (i, j)))
        .map(|(i, j)| result.s.magnitude_db(i, j))
        .collect()
}

fn print_sparameters(result: &CircuitSParameters) {
    let ports = result.nports();
    println!("S-Parameters ({} ports, {} points)", ports, result.s.nfreq());
    println!("==========================================");
    println!();

    let externals: Vec<String> = result.externals.iter().map(|n| n.to_string()).collect();
    println!("Port order (nets): {}", externals.join(", "));
    println!();

    print!("{:>14}", "Lambda(nm)");
    for i in 0..ports {
        for j in 0..ports {
            print!("{:>14}", format!("|S{}{}|(dB)", i + 1, j + 1));
        }
    }
    println!();
    println!("{}", "-".repeat(14 + 14 * ports * ports));

    let columns = magnitude_columns(result);
    for (k, wavelength) in result.wavelengths().iter().enumerate() {
        print!("{:>14.4}", wavelength * 1e9);
        for column in &columns {
            print!("{:>14.4}", column[k]);
        }
        println!();
    }

    println!();
    println!("Simulation complete ({} points).", result.s.nfreq());
    println!();
}
