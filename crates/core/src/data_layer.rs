// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The data layer: context + bus + pipeline composed
//!
//! `push()` synthesizes an event record, freezes a context snapshot into
//! it, runs it through the middleware pipeline, and, if no stage
//! cancelled, appends it to the in-memory log and emits it on the bus.
//! Everything runs to completion synchronously before `push()` returns.

use crate::bus::{EventBus, HandlerResult, Subscription, SubscriptionId};
use crate::clock::{format_timestamp, Clock, SystemClock};
use crate::context::ContextManager;
use crate::error::OdlError;
use crate::event::{ContextMap, Dimension, Event, Source, SPEC_VERSION};
use crate::id::{IdGen, UuidIdGen};
use crate::pipeline::{Flow, Pipeline, StageResult};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

struct Inner {
    context: RefCell<ContextManager>,
    bus: EventBus,
    pipeline: Pipeline,
    events: RefCell<Vec<Event>>,
    source: Option<Source>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGen>,
}

/// Cheap-clone handle over one event pipeline instance.
///
/// Clones share the same context store, event log, pipeline, and bus, so
/// plugins and subscribers can hold a handle and push re-entrantly from
/// inside a dispatch. The whole structure is single-threaded; handles do
/// not cross threads.
#[derive(Clone)]
pub struct DataLayer {
    inner: Rc<Inner>,
}

impl DataLayer {
    pub fn new() -> Self {
        Self::with_parts(Box::new(SystemClock), Box::new(UuidIdGen), None)
    }

    /// Stamp every synthesized event with `source`.
    pub fn with_source(source: Source) -> Self {
        Self::with_parts(Box::new(SystemClock), Box::new(UuidIdGen), Some(source))
    }

    /// Full construction seam: inject clock and id generation for tests.
    pub fn with_parts(clock: Box<dyn Clock>, ids: Box<dyn IdGen>, source: Option<Source>) -> Self {
        Self {
            inner: Rc::new(Inner {
                context: RefCell::new(ContextManager::new()),
                bus: EventBus::new(),
                pipeline: Pipeline::new(),
                events: RefCell::new(Vec::new()),
                source,
                clock,
                ids,
            }),
        }
    }

    /// Synthesize an event, run it through the pipeline, store and emit it
    /// if it survives.
    ///
    /// The context snapshot is taken at this exact moment; later mutation
    /// of the live context never changes the record. Returns the
    /// synthesized (possibly middleware-mutated) event **even when a stage
    /// cancelled it**: cancellation is silent, observable only through
    /// [`events`](Self::events) and subscriptions. A `before_event` or
    /// middleware error propagates.
    pub fn push(
        &self,
        name: &str,
        data: Option<Value>,
        custom_dimensions: Option<BTreeMap<String, Dimension>>,
    ) -> Result<Event, OdlError> {
        let context = {
            let snapshot = self.inner.context.borrow().snapshot();
            (!snapshot.is_empty()).then_some(snapshot)
        };

        let mut event = Event {
            event: name.to_string(),
            id: self.inner.ids.next(),
            timestamp: format_timestamp(self.inner.clock.now()),
            spec_version: SPEC_VERSION.to_string(),
            context,
            data: data.filter(|d| !d.is_null()),
            custom_dimensions: custom_dimensions.filter(|d| !d.is_empty()),
            source: self.inner.source.clone(),
        };

        let inner = Rc::clone(&self.inner);
        let flow = self.inner.pipeline.execute(&mut event, move |event| {
            inner.events.borrow_mut().push(event.clone());
            inner.bus.emit(event);
        })?;

        tracing::debug!(
            event = %event.event,
            id = %event.id,
            delivered = matches!(flow, Flow::Continue),
            "push"
        );
        Ok(event)
    }

    /// The append-only event log, in insertion order.
    pub fn events(&self) -> Vec<Event> {
        self.inner.events.borrow().clone()
    }

    pub fn last_event(&self) -> Option<Event> {
        self.inner.events.borrow().last().cloned()
    }

    pub fn event_count(&self) -> usize {
        self.inner.events.borrow().len()
    }

    /// Wholesale-replace the context value under `key`.
    pub fn set_context(&self, key: impl Into<String>, value: Value) {
        self.inner.context.borrow_mut().set(key, value);
    }

    /// Deep-merge `partial` into the context value under `key`; see
    /// [`ContextManager::update`].
    pub fn update_context(&self, key: &str, partial: Value) {
        self.inner.context.borrow_mut().update(key, partial);
    }

    pub fn remove_context(&self, key: &str) -> Option<Value> {
        self.inner.context.borrow_mut().remove(key)
    }

    /// Read the live context store. The borrow is held for the duration of
    /// the closure; do not call back into context mutators from inside it.
    pub fn context<R>(&self, f: impl FnOnce(&ContextMap) -> R) -> R {
        f(self.inner.context.borrow().get())
    }

    /// Mutate the live context store in place, bypassing merge semantics.
    pub fn context_mut<R>(&self, f: impl FnOnce(&mut ContextMap) -> R) -> R {
        f(self.inner.context.borrow_mut().get_mut())
    }

    /// Deep clone of the current context.
    pub fn snapshot_context(&self) -> ContextMap {
        self.inner.context.borrow().snapshot()
    }

    /// Append a middleware stage. Lower-level escape hatch, below plugin
    /// registration; plugin `before_event` hooks always run first.
    pub fn use_middleware(&self, stage: impl Fn(&mut Event) -> StageResult + 'static) {
        self.inner.pipeline.add(stage);
    }

    /// Subscribe to emitted events; see [`EventBus::on`].
    pub fn on(
        &self,
        pattern: &str,
        handler: impl Fn(&Event) -> HandlerResult + 'static,
    ) -> Subscription {
        self.inner.bus.on(pattern, handler)
    }

    /// Remove one subscription under exactly this pattern; see
    /// [`EventBus::off`].
    pub fn off(&self, pattern: &str, id: SubscriptionId) {
        self.inner.bus.off(pattern, id);
    }

    pub fn bus(&self) -> &EventBus {
        &self.inner.bus
    }

    /// Clear the event log and context store. Registered middleware and
    /// subscriptions persist.
    pub fn reset(&self) {
        self.inner.events.borrow_mut().clear();
        self.inner.context.borrow_mut().reset();
        tracing::debug!("data layer reset");
    }
}

impl Default for DataLayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "data_layer_tests.rs"]
mod tests;
