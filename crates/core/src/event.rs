// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The canonical event record

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Version stamped into every record as `specVersion`.
pub const SPEC_VERSION: &str = "1.0.0";

/// Ambient context: a domain-keyed JSON object (`user`, `page`, `consent`, ...).
pub type ContextMap = serde_json::Map<String, Value>;

/// A structured record of a tracked action.
///
/// Records are synthesized by [`DataLayer::push`](crate::DataLayer::push):
/// a fresh UUIDv4 id, an ISO-8601 wall-clock timestamp, the fixed
/// [`SPEC_VERSION`], and a context snapshot frozen at creation time.
/// Optional fields serialize only when present: an omitted field is absent
/// from the JSON, never `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Dot-namespaced event name, e.g. `"ecommerce.purchase"`.
    pub event: String,
    /// UUIDv4, unique per creation.
    pub id: String,
    /// ISO-8601 wall-clock timestamp.
    pub timestamp: String,
    /// Always [`SPEC_VERSION`].
    pub spec_version: String,
    /// Deep-cloned context snapshot, immutable once attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextMap>,
    /// Arbitrary caller payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Flat map of string/number/boolean dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_dimensions: Option<BTreeMap<String, Dimension>>,
    /// Emitting application, when configured at construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

/// A custom dimension value: string, number, or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl From<bool> for Dimension {
    fn from(v: bool) -> Self {
        Dimension::Bool(v)
    }
}

impl From<i64> for Dimension {
    fn from(v: i64) -> Self {
        Dimension::Number(v.into())
    }
}

impl From<u64> for Dimension {
    fn from(v: u64) -> Self {
        Dimension::Number(v.into())
    }
}

impl From<i32> for Dimension {
    fn from(v: i32) -> Self {
        Dimension::Number(v.into())
    }
}

impl From<&str> for Dimension {
    fn from(v: &str) -> Self {
        Dimension::String(v.to_string())
    }
}

impl From<String> for Dimension {
    fn from(v: String) -> Self {
        Dimension::String(v)
    }
}

/// Identity of the emitting application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub version: String,
}

impl Source {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
