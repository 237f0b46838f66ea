// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Built-in plugins for the odl event pipeline
//!
//! Every plugin here is an ordinary consumer of the `odl-core` plugin
//! contract; none of them reach into the core's internals. Vendor
//! analytics adapters follow the same shapes.

pub mod consent;
pub mod debug;
pub mod enrich;

pub use consent::ConsentFilterPlugin;
pub use debug::DebugPlugin;
pub use enrich::EnrichPlugin;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod recorder;
#[cfg(any(test, feature = "test-support"))]
pub use recorder::{BeforeVerdict, PluginCall, RecorderPlugin};
