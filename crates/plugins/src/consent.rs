// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consent filter plugin

use odl_core::{Event, Plugin, PluginError};
use serde_json::Value;

/// Cancels events unless the event's context grants a consent flag.
///
/// The check runs against the context snapshot frozen into the event, not
/// the live store: consent revoked after an event was created does not
/// retroactively drop it, and consent granted mid-pipeline does not rescue
/// it. Missing domain, missing flag, and non-boolean values all count as
/// "not granted".
pub struct ConsentFilterPlugin {
    domain: String,
    flag: String,
}

impl ConsentFilterPlugin {
    /// Filter on the default `consent.analytics` flag.
    pub fn new() -> Self {
        Self::with_flag("consent", "analytics")
    }

    /// Filter on `<domain>.<flag>` in the event context.
    pub fn with_flag(domain: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            flag: flag.into(),
        }
    }

    fn granted(&self, event: &Event) -> bool {
        event
            .context
            .as_ref()
            .and_then(|ctx| ctx.get(self.domain.as_str()))
            .and_then(|domain| domain.get(self.flag.as_str()))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl Default for ConsentFilterPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ConsentFilterPlugin {
    fn name(&self) -> &str {
        "consent-filter"
    }

    fn before_event(&self, event: Event) -> Result<Option<Event>, PluginError> {
        if self.granted(&event) {
            Ok(Some(event))
        } else {
            tracing::debug!(event = %event.event, "dropping event without consent");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "consent_tests.rs"]
mod tests;
