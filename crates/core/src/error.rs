// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the event pipeline

use thiserror::Error;

/// Error raised by consumer code: a plugin hook or an event subscriber.
///
/// Plugins and subscribers are external collaborators, so their failures
/// arrive as opaque messages or boxed errors rather than typed variants.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl PluginError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Errors surfaced by the data layer itself.
///
/// Only filtering and setup failures are loud: `before_event` and
/// `initialize` errors propagate to the caller, while `after_event`,
/// `destroy`, and subscriber failures are logged and discarded so one
/// broken consumer never blocks the others.
#[derive(Debug, Error)]
pub enum OdlError {
    #[error("plugin {plugin}: before_event failed: {source}")]
    BeforeEvent {
        plugin: String,
        #[source]
        source: PluginError,
    },
    #[error("plugin {plugin}: initialize failed: {source}")]
    Initialize {
        plugin: String,
        #[source]
        source: PluginError,
    },
    #[error("middleware failed: {0}")]
    Middleware(#[from] PluginError),
}
