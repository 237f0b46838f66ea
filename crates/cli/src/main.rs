// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! odl - Open Data Layer CLI
//!
//! A local debug tool over the in-process event pipeline: it replays
//! newline-delimited JSON action records through an `OpenDataLayer` and
//! prints the surviving event records.

mod config;
mod replay;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "odl", version, about = "Open Data Layer - event pipeline debug tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay NDJSON action records through the pipeline
    Replay(replay::ReplayArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay(args) => {
            let stats = replay::replay(args)?;
            tracing::info!(
                records = stats.records,
                delivered = stats.delivered,
                "replay finished"
            );
        }
    }
    Ok(())
}

/// Resolve an input path: `-` or absent means stdin.
fn input_reader(path: Option<&PathBuf>) -> Result<Box<dyn std::io::BufRead>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let file = std::fs::File::open(path)
                .map_err(|e| anyhow::anyhow!("cannot open {}: {e}", path.display()))?;
            Ok(Box::new(std::io::BufReader::new(file)))
        }
        _ => Ok(Box::new(std::io::BufReader::new(std::io::stdin()))),
    }
}
