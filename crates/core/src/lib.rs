// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! odl-core: in-process structured event pipeline
//!
//! This crate provides:
//! - Ambient context storage with deep-merge updates and snapshot isolation
//! - A synchronous, wildcard-pattern event bus
//! - A cancellable middleware pipeline over mutable event records
//! - The `DataLayer` that composes the three, and the `OpenDataLayer`
//!   façade that orchestrates plugin lifecycles on top of it
//!
//! Everything here is single-threaded and synchronous. Vendor adapters,
//! validators, and other consumers integrate through the [`Plugin`]
//! contract and never through this crate's internals.

pub mod bus;
pub mod clock;
pub mod context;
pub mod data_layer;
pub mod error;
pub mod event;
pub mod facade;
pub mod id;
pub mod pipeline;
pub mod plugin;

pub use bus::{EventBus, HandlerResult, Pattern, Subscription, SubscriptionId};
pub use clock::{format_timestamp, Clock, FakeClock, SystemClock};
pub use context::{deep_merge, ContextManager};
pub use data_layer::DataLayer;
pub use error::{OdlError, PluginError};
pub use event::{ContextMap, Dimension, Event, Source, SPEC_VERSION};
pub use facade::{OpenDataLayer, Options};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use pipeline::{Flow, Pipeline, StageResult};
pub use plugin::Plugin;
