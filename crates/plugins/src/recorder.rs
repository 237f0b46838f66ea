// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recorder plugin for testing

use odl_core::{DataLayer, Event, Plugin, PluginError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Scripted verdict for `before_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeforeVerdict {
    /// Pass the event through unchanged.
    #[default]
    Pass,
    /// Cancel the event (`Ok(None)`).
    Cancel,
    /// Fail the hook (`Err`), which propagates out of `track`.
    Fail,
}

/// One recorded hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginCall {
    Initialize,
    BeforeEvent { event: String },
    AfterEvent { event: String },
    Destroy,
}

/// Fake plugin that records every hook invocation.
///
/// Clones share the call log and verdict, so tests keep one handle while
/// the façade owns another.
#[derive(Clone)]
pub struct RecorderPlugin {
    name: String,
    calls: Rc<RefCell<Vec<PluginCall>>>,
    verdict: Rc<Cell<BeforeVerdict>>,
}

impl RecorderPlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: Rc::default(),
            verdict: Rc::default(),
        }
    }

    /// Script the `before_event` behavior.
    pub fn with_verdict(self, verdict: BeforeVerdict) -> Self {
        self.verdict.set(verdict);
        self
    }

    /// Change the scripted verdict mid-test.
    pub fn set_verdict(&self, verdict: BeforeVerdict) {
        self.verdict.set(verdict);
    }

    /// All recorded hook invocations, in order.
    pub fn calls(&self) -> Vec<PluginCall> {
        self.calls.borrow().clone()
    }

    pub fn destroy_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, PluginCall::Destroy))
            .count()
    }
}

impl Plugin for RecorderPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&self, _data_layer: &DataLayer) -> Result<(), PluginError> {
        self.calls.borrow_mut().push(PluginCall::Initialize);
        Ok(())
    }

    fn before_event(&self, event: Event) -> Result<Option<Event>, PluginError> {
        self.calls.borrow_mut().push(PluginCall::BeforeEvent {
            event: event.event.clone(),
        });
        match self.verdict.get() {
            BeforeVerdict::Pass => Ok(Some(event)),
            BeforeVerdict::Cancel => Ok(None),
            BeforeVerdict::Fail => Err(PluginError::msg("scripted before_event failure")),
        }
    }

    fn after_event(&self, event: &Event) -> Result<(), PluginError> {
        self.calls.borrow_mut().push(PluginCall::AfterEvent {
            event: event.event.clone(),
        });
        Ok(())
    }

    fn destroy(&self) -> Result<(), PluginError> {
        self.calls.borrow_mut().push(PluginCall::Destroy);
        Ok(())
    }
}

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;
