//! Plugin lifecycle orchestration, end to end, driven by the recorder
//! plugin from odl-plugins.

use crate::prelude::facade_with;
use odl_plugins::{BeforeVerdict, PluginCall, RecorderPlugin};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn recorder_sees_initialize_before_after_destroy_in_order() {
    let recorder = RecorderPlugin::new("rec");
    let odl = facade_with(vec![Rc::new(recorder.clone())]);

    odl.track("page.view", None, None).unwrap();
    odl.destroy();

    assert_eq!(
        recorder.calls(),
        vec![
            PluginCall::Initialize,
            PluginCall::BeforeEvent {
                event: "page.view".to_string()
            },
            PluginCall::AfterEvent {
                event: "page.view".to_string()
            },
            PluginCall::Destroy,
        ]
    );
}

#[test]
fn cancelling_plugin_shields_later_plugins_and_subscribers() {
    let canceller = RecorderPlugin::new("canceller").with_verdict(BeforeVerdict::Cancel);
    let bystander = RecorderPlugin::new("bystander");
    let odl = facade_with(vec![
        Rc::new(canceller.clone()),
        Rc::new(bystander.clone()),
    ]);

    let subscriber_hits = Rc::new(RefCell::new(0));
    let count = Rc::clone(&subscriber_hits);
    odl.on("*", move |_| {
        *count.borrow_mut() += 1;
        Ok(())
    });

    odl.track("dropped", None, None).unwrap();

    // The bystander's before hook never ran and nobody saw the event.
    assert!(!bystander
        .calls()
        .iter()
        .any(|c| matches!(c, PluginCall::BeforeEvent { .. })));
    assert!(!canceller
        .calls()
        .iter()
        .any(|c| matches!(c, PluginCall::AfterEvent { .. })));
    assert_eq!(*subscriber_hits.borrow(), 0);
    assert_eq!(odl.data_layer().event_count(), 0);
}

#[test]
fn failing_before_hook_is_loud() {
    let failing = RecorderPlugin::new("failing").with_verdict(BeforeVerdict::Fail);
    let odl = facade_with(vec![Rc::new(failing)]);

    let err = odl.track("t", None, None).unwrap_err();

    assert!(err.to_string().contains("failing"));
    assert_eq!(odl.data_layer().event_count(), 0);
}

#[test]
fn destroy_twice_tears_down_each_plugin_once() {
    let recorder = RecorderPlugin::new("rec");
    let odl = facade_with(vec![Rc::new(recorder.clone())]);

    odl.destroy();
    odl.destroy();

    assert_eq!(recorder.destroy_count(), 1);
    assert_eq!(odl.plugin_count(), 0);
}

#[test]
fn destroy_resets_the_data_layer() {
    let recorder = RecorderPlugin::new("rec");
    let odl = facade_with(vec![Rc::new(recorder.clone())]);

    odl.set_context("user", serde_json::json!({"id": "42"}));
    odl.track("t", None, None).unwrap();
    odl.destroy();

    assert_eq!(odl.data_layer().event_count(), 0);
    assert!(odl.data_layer().snapshot_context().is_empty());
}

#[test]
fn plugins_registered_after_construction_join_the_chain() {
    let first = RecorderPlugin::new("first");
    let odl = facade_with(vec![Rc::new(first.clone())]);

    odl.track("early", None, None).unwrap();

    let second = RecorderPlugin::new("second");
    odl.register(Rc::new(second.clone())).unwrap();
    odl.track("late", None, None).unwrap();

    // The late plugin saw only the late event.
    assert_eq!(
        second
            .calls()
            .iter()
            .filter(|c| matches!(c, PluginCall::BeforeEvent { .. }))
            .count(),
        1
    );
    assert_eq!(
        first
            .calls()
            .iter()
            .filter(|c| matches!(c, PluginCall::BeforeEvent { .. }))
            .count(),
        2
    );
}
