//! Shared helpers for the behavioral specs.

use odl_core::{ContextMap, DataLayer, FakeClock, OpenDataLayer, Plugin, SequentialIdGen};
use std::rc::Rc;

/// Deterministic data layer: controllable clock, sequential ids.
pub fn deterministic_layer() -> DataLayer {
    DataLayer::with_parts(
        Box::new(FakeClock::new()),
        Box::new(SequentialIdGen::new("evt")),
        None,
    )
}

/// Façade over a deterministic data layer.
pub fn facade_with(plugins: Vec<Rc<dyn Plugin>>) -> OpenDataLayer {
    OpenDataLayer::with_data_layer(deterministic_layer(), plugins, ContextMap::new()).unwrap()
}
