//! The `swing` command: simulate a double pendulum and print bob positions as CSV.
//!
//! ```text
//! swing T TH1 TH2 W1 W2 [--step 0.05] [--output path.csv]
//! ```
//!
//! Each output line is `x1,y1,x2,y2` for one integration step. Logs go to
//! stderr and are controlled with `RUST_LOG`.

mod args;
mod output;

use std::{
    fs::File,
    io::{self, BufWriter},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let simulation = args
        .simulation()
        .context("invalid simulation configuration")?;
    let initial = args.initial_state().context("invalid initial state")?;
    let trajectory = simulation.trajectory(initial);

    let written = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            output::write_csv(&mut BufWriter::new(file), trajectory)
        }
        None => output::write_csv(&mut BufWriter::new(io::stdout().lock()), trajectory),
    }
    .context("failed to write trajectory")?;

    info!(points = written, "trajectory written");

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
