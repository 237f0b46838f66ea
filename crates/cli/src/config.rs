// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML configuration for the replay tool
//!
//! ```toml
//! [source]
//! name = "storefront"
//! version = "2.1.0"
//!
//! [context.user]
//! id = "42"
//!
//! [context.consent]
//! analytics = true
//! ```

use anyhow::{Context as _, Result};
use odl_core::{ContextMap, Source};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Initial context domains, applied key-by-key at construction.
    #[serde(default)]
    pub context: ContextMap,
    /// Source metadata stamped into every event.
    #[serde(default)]
    pub source: Option<SourceConfig>,
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub version: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn source(&self) -> Option<Source> {
        self.source
            .as_ref()
            .map(|s| Source::new(s.name.clone(), s.version.clone()))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
