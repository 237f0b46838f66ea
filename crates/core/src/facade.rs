// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The public façade: plugin lifecycle over one data layer
//!
//! Per-event flow: Created → before_event filtering (each plugin may
//! replace or cancel) → custom middleware → stored + emitted →
//! after_event fan-out (best effort). A cancelled event is dropped before
//! storage and no `after_event` hook ever sees it.

use crate::bus::{HandlerResult, Subscription};
use crate::data_layer::DataLayer;
use crate::error::OdlError;
use crate::event::{ContextMap, Dimension, Event, Source};
use crate::pipeline::Flow;
use crate::plugin::Plugin;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

type PluginList = Rc<RefCell<Vec<Rc<dyn Plugin>>>>;

/// Construction options for [`OpenDataLayer`].
#[derive(Default)]
pub struct Options {
    /// Plugins registered at construction, in order.
    pub plugins: Vec<Rc<dyn Plugin>>,
    /// Initial context, applied key-by-key via `set_context`.
    pub context: ContextMap,
    /// Source metadata stamped into every event.
    pub source: Option<Source>,
}

/// Façade composing one [`DataLayer`] with plugin lifecycle orchestration.
///
/// All plugins' `before_event` hooks run, in registration order, as a
/// single middleware installed first in the pipeline. `after_event` hooks
/// are not middleware: they are wired once as a `"*"` subscription, so they
/// fire only for events that were actually stored and emitted.
pub struct OpenDataLayer {
    data_layer: DataLayer,
    plugins: PluginList,
}

impl OpenDataLayer {
    pub fn new(options: Options) -> Result<Self, OdlError> {
        let data_layer = match options.source {
            Some(source) => DataLayer::with_source(source),
            None => DataLayer::new(),
        };
        Self::with_data_layer(data_layer, options.plugins, options.context)
    }

    /// Construct over an injected data layer (test seam for fake clocks
    /// and id generators). The data layer must be freshly built: the
    /// before-hook middleware is installed here and must be first in the
    /// pipeline.
    pub fn with_data_layer(
        data_layer: DataLayer,
        plugins: Vec<Rc<dyn Plugin>>,
        context: ContextMap,
    ) -> Result<Self, OdlError> {
        let registry: PluginList = Rc::default();

        let hooks = Rc::clone(&registry);
        data_layer.use_middleware(move |event| {
            let plugins: Vec<Rc<dyn Plugin>> = hooks.borrow().clone();
            for plugin in plugins {
                match plugin.before_event(event.clone()) {
                    Ok(Some(replacement)) => *event = replacement,
                    Ok(None) => {
                        tracing::debug!(
                            plugin = plugin.name(),
                            event = %event.event,
                            "before_event cancelled event"
                        );
                        return Ok(Flow::Cancel);
                    }
                    Err(source) => {
                        return Err(OdlError::BeforeEvent {
                            plugin: plugin.name().to_string(),
                            source,
                        })
                    }
                }
            }
            Ok(Flow::Continue)
        });

        let hooks = Rc::clone(&registry);
        data_layer.on("*", move |event| {
            let plugins: Vec<Rc<dyn Plugin>> = hooks.borrow().clone();
            for plugin in plugins {
                if let Err(e) = plugin.after_event(event) {
                    tracing::warn!(
                        plugin = plugin.name(),
                        event = %event.event,
                        error = %e,
                        "after_event failed; continuing"
                    );
                }
            }
            Ok(())
        });

        for (key, value) in context {
            data_layer.set_context(key, value);
        }

        let odl = Self {
            data_layer,
            plugins: registry,
        };
        for plugin in plugins {
            odl.register(plugin)?;
        }
        Ok(odl)
    }

    /// Append `plugin` and immediately invoke its `initialize` hook with
    /// the underlying data layer.
    ///
    /// An `initialize` error propagates, but the plugin stays registered:
    /// its event hooks will still run.
    pub fn register(&self, plugin: Rc<dyn Plugin>) -> Result<(), OdlError> {
        self.plugins.borrow_mut().push(Rc::clone(&plugin));
        tracing::debug!(plugin = plugin.name(), "plugin registered");
        plugin
            .initialize(&self.data_layer)
            .map_err(|source| OdlError::Initialize {
                plugin: plugin.name().to_string(),
                source,
            })
    }

    /// The sole public event-creation entry point; pass-through to
    /// [`DataLayer::push`].
    pub fn track(
        &self,
        name: &str,
        data: Option<Value>,
        custom_dimensions: Option<BTreeMap<String, Dimension>>,
    ) -> Result<Event, OdlError> {
        self.data_layer.push(name, data, custom_dimensions)
    }

    /// Tear down every plugin in registration order (failures logged and
    /// discarded), clear the plugin list, and reset the data layer.
    ///
    /// Idempotent: a second call finds an empty plugin list and invokes no
    /// `destroy` hook twice.
    pub fn destroy(&self) {
        let drained = std::mem::take(&mut *self.plugins.borrow_mut());
        for plugin in &drained {
            if let Err(e) = plugin.destroy() {
                tracing::warn!(plugin = plugin.name(), error = %e, "destroy failed; continuing");
            }
        }
        self.data_layer.reset();
    }

    /// The underlying data layer, the same handle plugins receive.
    pub fn data_layer(&self) -> &DataLayer {
        &self.data_layer
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.borrow().len()
    }

    /// Subscribe to delivered events; see [`EventBus::on`](crate::EventBus::on).
    pub fn on(
        &self,
        pattern: &str,
        handler: impl Fn(&Event) -> HandlerResult + 'static,
    ) -> Subscription {
        self.data_layer.on(pattern, handler)
    }

    pub fn set_context(&self, key: impl Into<String>, value: Value) {
        self.data_layer.set_context(key, value);
    }

    pub fn update_context(&self, key: &str, partial: Value) {
        self.data_layer.update_context(key, partial);
    }
}

#[cfg(test)]
#[path = "facade_tests.rs"]
mod tests;
