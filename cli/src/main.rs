use clap::{Parser, Subcommand};
use rsmt_common::db::parser::xml;
use rsmt_common::db::writer;
use rsmt_common::error::InvariantViolation;
use rsmt_common::util::config::Config;
use rsmt_common::util::profiler::ScopedTimer;
use rsmt_common::util::{check, generator, logger, visualization};
use rsmt_router::RoutedNet;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "rsmt.toml", global = true)]
    config: PathBuf,

    /// Also render the routed net to a PNG.
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,

    /// Pin descriptor to route.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a random pin descriptor.
    Generate {
        #[arg(long, default_value_t = 20)]
        pins: usize,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value = "inputs/random.xml")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    if config.grid.size == 0 {
        return Err(anyhow::anyhow!("Grid size must be at least 1"));
    }

    match args.command {
        Some(Commands::Generate {
            pins,
            size,
            seed,
            output,
        }) => {
            let size = size.unwrap_or(config.grid.size);
            prepare_output_dir(&output)?;
            let written = generator::generate_random_pins(&output, pins, size, seed)?;
            log::info!("Generated {} pins: {}", written, output.display());
        }
        None => {
            let Some(input) = args.input else {
                return Err(anyhow::anyhow!("usage: rsmt [--config FILE] [--png FILE] <INPUT>"));
            };
            run_routing(&config, &input, args.png.as_deref())?;
        }
    }

    Ok(())
}

fn prepare_output_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn run_routing(config: &Config, input: &Path, png: Option<&Path>) -> anyhow::Result<()> {
    let output = config.output.output_path_for(input);

    let pins = {
        let _t = ScopedTimer::new("Parsing");
        log::info!("Parsing pin descriptor: {}", input.display());
        xml::parse(input, config.grid.size).map_err(|e| {
            anyhow::anyhow!("Bad descriptor '{}': {}", input.display(), e)
        })?
    };

    let net = {
        let _t = ScopedTimer::new("Steiner tree construction");
        rsmt_router::route(&pins, config).unwrap_or_else(|e| abort_on_invariant(e))
    };
    report(&net);

    if config.output.verify {
        check::run(&net.grid, net.tree.weight())
            .map_err(|e| anyhow::anyhow!("Verification Failed: {}", e))?;
    }

    if let Some(png) = png {
        log::info!("Generating routed visualization: {}", png.display());
        if let Err(e) = visualization::draw_routed_grid(&net.grid, png, 6) {
            log::warn!("Could not write {}: {}", png.display(), e);
        }
    }

    log::info!("Writing routed descriptor to {}", output.display());
    writer::write_xml(&net.grid, &output, &config.output)
        .map_err(|e| anyhow::anyhow!("Bad descriptor '{}': {}", output.display(), e))?;

    Ok(())
}

fn report(net: &RoutedNet) {
    let saved = net.mst_weight.saturating_sub(net.tree.weight());
    log::info!(
        "Tree: {} edges, weight {} (MST {}, saved {}), {} pseudo-nodes",
        net.tree.len(),
        net.tree.weight(),
        net.mst_weight,
        saved,
        net.pseudo_nodes.len()
    );
    for p in &net.pseudo_nodes {
        log::debug!("Pseudo-node at {}", p);
    }
}

fn abort_on_invariant(e: InvariantViolation) -> ! {
    log::error!("Internal invariant violated: {}", e);
    std::process::abort()
}
