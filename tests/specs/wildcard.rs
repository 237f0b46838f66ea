//! Subscription pattern language, end to end.

use crate::prelude::facade_with;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn three_pattern_forms_route_one_purchase() {
    let odl = facade_with(vec![]);
    let log = Rc::new(RefCell::new(Vec::new()));

    for pattern in ["*", "ecommerce.*", "ecommerce.purchase"] {
        let log = Rc::clone(&log);
        odl.on(pattern, move |event| {
            log.borrow_mut().push(format!("{pattern}:{}", event.event));
            Ok(())
        });
    }

    odl.track("ecommerce.purchase", None, None).unwrap();

    // All three fire exactly once, in subscription order.
    assert_eq!(
        *log.borrow(),
        vec![
            "*:ecommerce.purchase",
            "ecommerce.*:ecommerce.purchase",
            "ecommerce.purchase:ecommerce.purchase",
        ]
    );

    log.borrow_mut().clear();
    odl.track("page.view", None, None).unwrap();

    // Only the global wildcard matches a different namespace.
    assert_eq!(*log.borrow(), vec!["*:page.view"]);
}

#[test]
fn namespace_wildcard_is_a_prefix_match_not_a_substring_match() {
    let odl = facade_with(vec![]);
    let hits = Rc::new(RefCell::new(0));

    let count = Rc::clone(&hits);
    odl.on("eco.*", move |_| {
        *count.borrow_mut() += 1;
        Ok(())
    });

    odl.track("ecommerce.purchase", None, None).unwrap();
    assert_eq!(*hits.borrow(), 0);

    odl.track("eco.friendly", None, None).unwrap();
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn unsubscribe_handle_is_idempotent_end_to_end() {
    let odl = facade_with(vec![]);
    let hits = Rc::new(RefCell::new(0));

    let count = Rc::clone(&hits);
    let sub = odl.on("*", move |_| {
        *count.borrow_mut() += 1;
        Ok(())
    });

    odl.track("one", None, None).unwrap();
    sub.unsubscribe();
    sub.unsubscribe();
    odl.track("two", None, None).unwrap();

    assert_eq!(*hits.borrow(), 1);
}
