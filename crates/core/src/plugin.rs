// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin contract
//!
//! A plugin is a capability set, not a class: any subset of the four hooks
//! may be overridden, and a default no-op body is behaviorally identical to
//! an absent capability. Each plugin is owned, in registration order, by
//! exactly one [`OpenDataLayer`](crate::OpenDataLayer).

use crate::data_layer::DataLayer;
use crate::error::PluginError;
use crate::event::Event;

/// An external consumer registered with the façade.
///
/// Hooks take `&self` because a plugin may be re-entered while one of its
/// hooks is still on the stack (for example when `after_event` pushes a
/// synthetic event); stateful plugins keep their state behind `Cell` or
/// `RefCell`.
///
/// Error asymmetry, by contract: `before_event` and `initialize` failures
/// propagate to the caller; `after_event` and `destroy` failures are logged
/// and discarded so every registered plugin is always attempted.
pub trait Plugin {
    /// Stable name used in logs and error reports.
    fn name(&self) -> &str;

    /// Called once at registration with the underlying [`DataLayer`]
    /// (not the façade), so the plugin can push synthetic events or
    /// read/write context directly.
    fn initialize(&self, _data_layer: &DataLayer) -> Result<(), PluginError> {
        Ok(())
    }

    /// Inspect, transform, or cancel an event before storage and delivery.
    ///
    /// `Ok(Some(event))` continues with the (possibly replaced) event;
    /// `Ok(None)` cancels it: no later plugin hook, middleware, storage,
    /// or delivery runs for that event.
    fn before_event(&self, event: Event) -> Result<Option<Event>, PluginError> {
        Ok(Some(event))
    }

    /// Observe an event that survived the pipeline and was emitted.
    /// Never called for cancelled events.
    fn after_event(&self, _event: &Event) -> Result<(), PluginError> {
        Ok(())
    }

    /// Teardown, called once by [`OpenDataLayer::destroy`](crate::OpenDataLayer::destroy).
    fn destroy(&self) -> Result<(), PluginError> {
        Ok(())
    }
}
