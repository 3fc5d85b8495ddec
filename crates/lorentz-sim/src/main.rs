//! lorentz-cli: run a Lorentz-force simulation scenario from JSON

use anyhow::{Context, Result};
use clap::Parser;
use lorentz_sim::{simulate, SimulationInput};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lorentz-cli")]
#[command(about = "Simulate charged-particle trajectories under the Lorentz force")]
#[command(version)]
struct Args {
    /// Input JSON file (simulation scenario)
    #[arg(short, long)]
    input: PathBuf,

    /// Output JSON file (omit to print to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input file: {:?}", args.input))?;
    let input: SimulationInput =
        serde_json::from_str(&json).context("Failed to parse simulation scenario")?;

    let result = simulate(&input).context("Simulation failed")?;

    let rendered = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            eprintln!("Wrote simulation result: {:?}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
