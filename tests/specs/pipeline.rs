//! Middleware ordering and cancellation, end to end.

use crate::prelude::{deterministic_layer, facade_with};
use odl_core::Flow;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn middleware_and_terminal_run_in_order() {
    let layer = deterministic_layer();
    let order = Rc::new(RefCell::new(Vec::new()));

    for i in 1..=3 {
        let order = Rc::clone(&order);
        layer.use_middleware(move |_| {
            order.borrow_mut().push(i);
            Ok(Flow::Continue)
        });
    }
    let terminal_order = Rc::clone(&order);
    layer.on("*", move |_| {
        terminal_order.borrow_mut().push(4);
        Ok(())
    });

    layer.push("t", None, None).unwrap();

    assert_eq!(*order.borrow(), vec![1, 2, 3, 4]);
}

#[test]
fn cancelling_middleware_leaves_the_log_unchanged() {
    let layer = deterministic_layer();
    let after_ran = Rc::new(RefCell::new(false));

    layer.use_middleware(|_| Ok(Flow::Cancel));
    let flag = Rc::clone(&after_ran);
    layer.use_middleware(move |_| {
        *flag.borrow_mut() = true;
        Ok(Flow::Continue)
    });

    let before = layer.event_count();
    let returned = layer.push("dropped", None, None).unwrap();

    // push still hands back the synthesized record; only the log and
    // subscriptions reveal the cancellation.
    assert_eq!(returned.event, "dropped");
    assert_eq!(layer.event_count(), before);
    assert!(!*after_ran.borrow());
}

#[test]
fn middleware_rewrites_flow_into_the_stored_record() {
    let odl = facade_with(vec![]);

    odl.data_layer().use_middleware(|event| {
        if event.event == "legacy.name" {
            event.event = "modern.name".to_string();
        }
        Ok(Flow::Continue)
    });

    odl.track("legacy.name", None, None).unwrap();

    assert_eq!(odl.data_layer().last_event().unwrap().event, "modern.name");
}

#[test]
fn middleware_can_merge_data_for_matching_events() {
    let odl = facade_with(vec![]);

    odl.data_layer().use_middleware(|event| {
        if event.event.starts_with("ecommerce.") {
            let mut data = event.data.take().unwrap_or(json!({}));
            odl_core::deep_merge(&mut data, json!({"currency": "EUR"}));
            event.data = Some(data);
        }
        Ok(Flow::Continue)
    });

    let purchase = odl
        .track("ecommerce.purchase", Some(json!({"total": 10})), None)
        .unwrap();
    let view = odl.track("page.view", None, None).unwrap();

    assert_eq!(purchase.data, Some(json!({"total": 10, "currency": "EUR"})));
    assert!(view.data.is_none());
}
