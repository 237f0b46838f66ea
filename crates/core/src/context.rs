// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ambient context storage
//!
//! One mutable, domain-keyed mapping per data layer. `snapshot()` is the
//! only isolation boundary: it deep-clones the whole store, and that clone
//! is what separates an event's frozen `context` field from the live,
//! continuously-mutated state.

use crate::event::ContextMap;
use serde_json::Value;

/// Owns the ambient key→value state attached to events at creation time.
#[derive(Debug, Clone, Default)]
pub struct ContextManager {
    store: ContextMap,
}

impl ContextManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wholesale-replace the value under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.store.insert(key.into(), value);
    }

    /// The live internal mapping. Mutations through [`get_mut`](Self::get_mut)
    /// mutate the store directly; there is no access control beyond this API.
    pub fn get(&self) -> &ContextMap {
        &self.store
    }

    pub fn get_mut(&mut self) -> &mut ContextMap {
        &mut self.store
    }

    /// Merge `partial` into the value under `key`.
    ///
    /// When the existing value and `partial` are both JSON objects, nested
    /// objects merge recursively; arrays and primitives are replaced
    /// wholesale at the point of difference. Any other combination
    /// (existing is a primitive, an array, null, or missing) replaces the
    /// existing value entirely.
    pub fn update(&mut self, key: &str, partial: Value) {
        match self.store.get_mut(key) {
            Some(existing) => deep_merge(existing, partial),
            None => {
                self.store.insert(key.to_string(), partial);
            }
        }
    }

    /// Delete `key`; no-op if absent.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.store.remove(key)
    }

    /// Clear all keys.
    pub fn reset(&mut self) {
        self.store.clear();
    }

    /// Deep clone of the whole store. Neither side can affect the other
    /// afterward, at any depth.
    pub fn snapshot(&self) -> ContextMap {
        self.store.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Recursively merge `incoming` into `target`.
///
/// Object-into-object merges key by key; everything else replaces the
/// target slot wholesale. Also used by consumers that transform event
/// payloads.
pub fn deep_merge(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(target_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                deep_merge(target_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
