// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Debug plugin: logs every delivered event through `tracing`

use odl_core::{Event, Plugin, PluginError};

/// Observes delivered events and logs the full record at `info` level.
///
/// Purely an `after_event` consumer: it never filters or transforms, so it
/// sees exactly what every other subscriber sees.
#[derive(Clone, Default)]
pub struct DebugPlugin;

impl DebugPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for DebugPlugin {
    fn name(&self) -> &str {
        "debug"
    }

    fn after_event(&self, event: &Event) -> Result<(), PluginError> {
        match serde_json::to_string(event) {
            Ok(record) => {
                tracing::info!(event = %event.event, id = %event.id, %record, "event delivered");
            }
            Err(e) => {
                tracing::warn!(event = %event.event, error = %e, "failed to render event record");
            }
        }
        Ok(())
    }
}
