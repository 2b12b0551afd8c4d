//! CLI utility for checking navigation context configurations

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec3;
use std::fs;
use std::path::{Path, PathBuf};

use detour_context::memory::{NavMeshParams, StaticMeshSource};
use detour_context::{AvoidanceConfigSet, NavigationConfig, NavigationContext};

/// A CLI utility for building and releasing navigation contexts against the
/// in-memory reference backend
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a context, print its state and optionally reset it
    Check {
        /// Navigation config file (JSON); flags override its values
        #[clap(long, value_parser)]
        config: Option<PathBuf>,

        /// Avoidance configuration set file (JSON)
        #[clap(long, value_parser)]
        avoidance: Option<PathBuf>,

        /// Disable crowd simulation
        #[clap(long)]
        no_crowd: bool,

        /// Size of the query engine's node pool
        #[clap(long)]
        max_query_nodes: Option<usize>,

        /// Capacity of the crowd agent table
        #[clap(long)]
        max_crowd_agents: Option<usize>,

        /// Maximum agent radius
        #[clap(long)]
        max_agent_radius: Option<f32>,

        /// Default search extents when running without a crowd (x,y,z)
        #[clap(long, value_parser = parse_vector)]
        extents: Option<Vec3>,

        /// Initialize without a navigation mesh
        #[clap(long)]
        no_mesh: bool,

        /// Clear the host enable signal after initialization
        #[clap(long)]
        host_disabled: bool,

        /// Reset the context after printing its state
        #[clap(long)]
        reset: bool,
    },

    /// Print a default configuration as JSON
    Config {
        /// Print the default avoidance configuration set instead
        #[clap(long)]
        avoidance: bool,

        /// Output file
        #[clap(long, value_parser)]
        output: Option<PathBuf>,
    },
}

/// Parse a comma-separated vector
fn parse_vector(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').collect();

    if parts.len() != 3 {
        return Err(format!(
            "Vector must have 3 components, got {}",
            parts.len()
        ));
    }

    let x = parts[0].trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = parts[1].trim().parse::<f32>().map_err(|e| e.to_string())?;
    let z = parts[2].trim().parse::<f32>().map_err(|e| e.to_string())?;

    Ok(Vec3::new(x, y, z))
}

/// Values given on the command line, applied over the loaded config
#[derive(Debug, Default)]
struct ConfigOverrides {
    no_crowd: bool,
    max_query_nodes: Option<usize>,
    max_crowd_agents: Option<usize>,
    max_agent_radius: Option<f32>,
    extents: Option<Vec3>,
}

impl ConfigOverrides {
    fn apply(&self, mut config: NavigationConfig) -> NavigationConfig {
        if self.no_crowd {
            config.crowd_enabled = false;
        }
        if let Some(nodes) = self.max_query_nodes {
            config.max_query_nodes = nodes;
        }
        if let Some(agents) = self.max_crowd_agents {
            config.max_crowd_agents = agents;
        }
        if let Some(radius) = self.max_agent_radius {
            config.max_agent_radius = radius;
        }
        if let Some(extents) = self.extents {
            config.initial_extents = extents;
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Check {
            config,
            avoidance,
            no_crowd,
            max_query_nodes,
            max_crowd_agents,
            max_agent_radius,
            extents,
            no_mesh,
            host_disabled,
            reset,
        } => {
            let overrides = ConfigOverrides {
                no_crowd,
                max_query_nodes,
                max_crowd_agents,
                max_agent_radius,
                extents,
            };
            let config = overrides.apply(load_config(config.as_deref())?);
            let avoidance = load_avoidance(avoidance.as_deref())?;
            check(config, avoidance, no_mesh, host_disabled, reset)
        }
        Commands::Config { avoidance, output } => print_config(avoidance, output.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<NavigationConfig> {
    let Some(path) = path else {
        return Ok(NavigationConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    NavigationConfig::from_json(&json)
        .map_err(|e| anyhow!("Failed to parse config {}: {}", path.display(), e))
}

fn load_avoidance(path: Option<&Path>) -> Result<AvoidanceConfigSet> {
    let Some(path) = path else {
        return Ok(AvoidanceConfigSet::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read avoidance file: {}", path.display()))?;
    AvoidanceConfigSet::from_json(&json)
        .map_err(|e| anyhow!("Failed to parse avoidance set {}: {}", path.display(), e))
}

/// Initialize a context on the reference backend and report its state
fn check(
    config: NavigationConfig,
    avoidance: AvoidanceConfigSet,
    no_mesh: bool,
    host_disabled: bool,
    reset: bool,
) -> Result<()> {
    let source = if no_mesh {
        StaticMeshSource::empty()
    } else {
        StaticMeshSource::new(NavMeshParams::default())
            .map_err(|e| anyhow!("Failed to create mesh source: {}", e))?
    };

    let mut context = NavigationContext::with_reference_backend(config)
        .with_mesh_source(source)
        .with_avoidance_configs(avoidance);

    println!("Initializing navigation context...");
    if let Err(e) = context.initialize() {
        print_state(&context);
        return Err(anyhow!("Initialization failed: {}", e));
    }

    if host_disabled {
        context.set_enabled(false);
        println!("Host enable signal cleared");
    }

    print_state(&context);

    if reset {
        if context.reset() {
            println!("Context reset");
        } else {
            println!("Context inactive, reset skipped");
        }
        print_state(&context);
    }

    context.close();
    Ok(())
}

fn print_state(context: &NavigationContext) {
    println!("Active: {}", context.is_active());

    match context.shared_query() {
        Some(query) => println!(
            "Query: {} nodes (disposed: {})",
            query.max_nodes(),
            query.is_disposed()
        ),
        None => println!("Query: none"),
    }

    match context.crowd() {
        Some(crowd) => {
            let crowd = crowd.borrow();
            println!(
                "Crowd: {} agents, radius {}, {} avoidance slots",
                crowd.max_agents(),
                crowd.max_agent_radius(),
                crowd.max_avoidance_params()
            );
        }
        None => println!("Crowd: none"),
    }

    if let Some(defaults) = context.default_parameters() {
        let source = if defaults.is_borrowed() { "crowd" } else { "context" };
        if let Some(extents) = context.default_extents() {
            println!("Default extents: {:?} (from {})", extents, source);
        }
        if let Some(filter) = context.default_filter() {
            println!(
                "Default filter: include {:?}, exclude {:?}",
                filter.include_flags, filter.exclude_flags
            );
        }
    }

    let stats = context.stats();
    println!(
        "Initializations: {}, failures: {}, resets: {}",
        stats.initializations, stats.failures, stats.resets
    );
}

/// Print the default navigation config or avoidance set as JSON
fn print_config(avoidance: bool, output: Option<&Path>) -> Result<()> {
    let json = if avoidance {
        AvoidanceConfigSet::default().to_json()
    } else {
        NavigationConfig::default().to_json()
    }
    .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

    match output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote default config to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
