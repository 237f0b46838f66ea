// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replay NDJSON action records through an `OpenDataLayer`

use crate::config::Config;
use anyhow::{Context as _, Result};
use clap::Args;
use odl_core::{Dimension, OpenDataLayer, Options, Plugin, PluginError};
use odl_plugins::{ConsentFilterPlugin, DebugPlugin};
use serde::Deserialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Args)]
pub struct ReplayArgs {
    /// NDJSON input file; `-` or absent reads stdin
    pub input: Option<PathBuf>,

    /// TOML config with initial context and source metadata
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log every delivered event via the debug plugin
    #[arg(long)]
    pub debug: bool,

    /// Drop events without `consent.analytics = true` in context
    #[arg(long)]
    pub require_consent: bool,
}

/// One input line: the caller-supplied part of an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActionRecord {
    pub event: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub custom_dimensions: Option<BTreeMap<String, Dimension>>,
}

#[derive(Debug, Default)]
pub struct ReplayStats {
    pub records: usize,
    pub delivered: usize,
}

pub fn replay(args: ReplayArgs) -> Result<ReplayStats> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut plugins: Vec<Rc<dyn Plugin>> = Vec::new();
    if args.require_consent {
        plugins.push(Rc::new(ConsentFilterPlugin::new()));
    }
    if args.debug {
        plugins.push(Rc::new(DebugPlugin::new()));
    }

    let odl = OpenDataLayer::new(Options {
        plugins,
        context: config.context.clone(),
        source: config.source(),
    })
    .map_err(|e| anyhow::anyhow!("failed to build data layer: {e}"))?;

    let input = crate::input_reader(args.input.as_ref())?;
    let stdout = Rc::new(RefCell::new(std::io::stdout().lock()));
    run(&odl, input, stdout)
}

/// Drive the replay: track each record, print each survivor as one JSON
/// line. Survivors are observed through a `"*"` subscription, so cancelled
/// events produce no output.
pub fn run<W: Write + 'static>(
    odl: &OpenDataLayer,
    input: impl BufRead,
    out: Rc<RefCell<W>>,
) -> Result<ReplayStats> {
    let sink = Rc::clone(&out);
    let printer = odl.on("*", move |event| {
        let line = serde_json::to_string(event).map_err(|e| PluginError::msg(e.to_string()))?;
        writeln!(sink.borrow_mut(), "{line}").map_err(|e| PluginError::msg(e.to_string()))?;
        Ok(())
    });

    let mut stats = ReplayStats::default();
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ActionRecord = serde_json::from_str(&line)
            .with_context(|| format!("invalid action record: {line}"))?;

        odl.track(&record.event, record.data, record.custom_dimensions)
            .with_context(|| format!("pipeline rejected event {}", record.event))?;
        stats.records += 1;
    }
    printer.unsubscribe();

    stats.delivered = odl.data_layer().event_count();
    Ok(stats)
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
