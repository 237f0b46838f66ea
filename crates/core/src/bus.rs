// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronous wildcard pub-sub over event records

use crate::error::PluginError;
use crate::event::Event;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Result returned by a subscriber; an `Err` is logged and discarded.
pub type HandlerResult = Result<(), PluginError>;

type Handler = Rc<dyn Fn(&Event) -> HandlerResult>;

/// Subscription pattern.
///
/// Three forms: `"*"` matches any name, `"<ns>.*"` matches names whose
/// literal prefix is `"<ns>."` (a prefix match, not a substring match:
/// `"eco.*"` does not match `"ecommerce.purchase"`), anything else is an
/// exact literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    Any,
    /// Stored with the trailing dot, e.g. `"ecommerce."`.
    Prefix(String),
    Exact(String),
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        if raw == "*" {
            Pattern::Any
        } else if let Some(ns) = raw.strip_suffix(".*") {
            Pattern::Prefix(format!("{ns}."))
        } else {
            Pattern::Exact(raw.to_string())
        }
    }

    pub fn matches(&self, event_name: &str) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Prefix(prefix) => event_name.starts_with(prefix.as_str()),
            Pattern::Exact(exact) => event_name == exact,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Any => write!(f, "*"),
            Pattern::Prefix(prefix) => write!(f, "{prefix}*"),
            Pattern::Exact(exact) => write!(f, "{exact}"),
        }
    }
}

/// Identifies one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Entry {
    id: SubscriptionId,
    pattern: Pattern,
    handler: Handler,
}

#[derive(Default)]
struct BusInner {
    entries: Vec<Entry>,
    next_id: u64,
}

/// Routes event records to matching subscribers, synchronously and in
/// subscription order.
///
/// `emit` snapshots the handler set before iterating: a handler that
/// subscribes or unsubscribes during an emit only affects later emits.
/// Handles are cheap clones sharing one subscriber list.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `pattern`. The returned [`Subscription`] is
    /// an idempotent removal handle; dropping it does not unsubscribe.
    pub fn on(
        &self,
        pattern: &str,
        handler: impl Fn(&Event) -> HandlerResult + 'static,
    ) -> Subscription {
        let pattern = Pattern::parse(pattern);
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.entries.push(Entry {
            id,
            pattern: pattern.clone(),
            handler: Rc::new(handler),
        });
        Subscription {
            bus: Rc::downgrade(&self.inner),
            id,
            pattern,
        }
    }

    /// Remove the subscription registered under exactly this pattern with
    /// this id; no-op if absent or registered under a different pattern.
    pub fn off(&self, pattern: &str, id: SubscriptionId) {
        let pattern = Pattern::parse(pattern);
        self.inner
            .borrow_mut()
            .entries
            .retain(|e| !(e.id == id && e.pattern == pattern));
    }

    /// Synchronously invoke every matching handler in subscription order.
    ///
    /// A failing handler is logged and discarded without blocking the
    /// others or the caller. Zero matching handlers is a valid, silent
    /// outcome.
    pub fn emit(&self, event: &Event) {
        let matching: Vec<Handler> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.pattern.matches(&event.event))
            .map(|e| Rc::clone(&e.handler))
            .collect();

        tracing::trace!(event = %event.event, handlers = matching.len(), "emit");

        for handler in matching {
            if let Err(e) = handler(event) {
                tracing::warn!(event = %event.event, error = %e, "subscriber failed; continuing");
            }
        }
    }

    /// Count of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

/// Removal handle returned by [`EventBus::on`]. Safe to invoke more than
/// once: the second and later calls are no-ops.
#[derive(Clone)]
pub struct Subscription {
    bus: Weak<RefCell<BusInner>>,
    id: SubscriptionId,
    pattern: Pattern,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn unsubscribe(&self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().entries.retain(|e| e.id != self.id);
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
