// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static enrichment plugin

use odl_core::{deep_merge, Event, Plugin, PluginError};
use serde_json::Value;

/// Deep-merges a fixed payload into every event's `data` before delivery.
///
/// Nested objects merge key by key; arrays and scalars in the payload
/// replace the event's values wholesale, with the same semantics as
/// context updates. An event without `data` receives the payload as-is.
pub struct EnrichPlugin {
    payload: Value,
}

impl EnrichPlugin {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }
}

impl Plugin for EnrichPlugin {
    fn name(&self) -> &str {
        "enrich"
    }

    fn before_event(&self, mut event: Event) -> Result<Option<Event>, PluginError> {
        let mut data = event.data.take().unwrap_or(Value::Null);
        deep_merge(&mut data, self.payload.clone());
        event.data = Some(data);
        Ok(Some(event))
    }
}
