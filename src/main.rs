use gravsim::{bench_gravity, bench_methods, run_directory};
use gravsim::{Parameters, RunConfig, ThreeBodyFractal, UnitSystem};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about = "2D Newtonian n-body integrator")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate every file in the configured input directory
    Run {
        #[arg(short, long, default_value = "scenarios/config.yaml")]
        config: PathBuf,
    },
    /// Write the input files of the three-body fractal experiment
    Generate {
        #[arg(short, long, default_value = "input/3body-fractal")]
        output_dir: PathBuf,
        #[arg(long, default_value = "3body-fractal")]
        stem: String,
        #[arg(long, default_value_t = 101)]
        impact_steps: usize,
        #[arg(long, default_value_t = 101)]
        phase_steps: usize,
    },
    /// Time the acceleration pass and one step of each integrator
    Bench {
        #[arg(short, long, default_value = "G1")]
        unit_system: String,
    },
}

// RUST_LOG filters, LOG_FORMAT=json switches to json lines
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn run(config_path: PathBuf) -> Result<()> {
    // Configuration problems abort before any input file is touched
    let cfg = RunConfig::load(&config_path)?;
    let params = Parameters::from_config(&cfg)
        .with_context(|| format!("invalid configuration in '{}'", config_path.display()))?;

    info!(
        unit_system = %params.unit_system.id,
        method = %params.integration_method,
        output_dir = %cfg.output_dir.display(),
        "simulations started"
    );

    let report = run_directory(&params, &cfg.input_files_dir, &cfg.output_dir)
        .context("could not list input files")?;

    // per-file errors were already logged by the runner
    let failed = report.failed().count();
    info!(succeeded = report.succeeded(), failed, "simulations finished");

    if failed > 0 {
        bail!("{failed} of {} simulations failed", report.outcomes.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Run { config } => run(config),
        Command::Generate {
            output_dir,
            stem,
            impact_steps,
            phase_steps,
        } => {
            let scenario = ThreeBodyFractal {
                impact_steps,
                phase_steps,
                ..ThreeBodyFractal::default()
            };
            let paths = scenario
                .write_inputs(&output_dir, &stem)
                .with_context(|| format!("could not write inputs to '{}'", output_dir.display()))?;
            info!(files = paths.len(), output_dir = %output_dir.display(), "generated inputs");
            Ok(())
        }
        Command::Bench { unit_system } => {
            let units = Arc::new(UnitSystem::new(&unit_system)?);
            bench_gravity(&units);
            bench_methods(&units);
            Ok(())
        }
    }
}
