use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ReportedError;

fn recording_listener() -> (
    Arc<Mutex<Vec<ReportedError>>>,
    impl Fn(ReportedError) + Send + Sync,
) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |err| sink.lock().expect("sink").push(err))
}

#[test]
fn report_without_listener_is_silently_dropped() {
    let store = ErrorStore::<ReportedError>::new();
    store.report(ReportedError::message("nobody listens"));
    assert!(!store.has_listener());
}

#[test]
fn first_subscriber_wins() {
    let store = ErrorStore::new();
    let (first, first_listener) = recording_listener();
    let second_calls = Arc::new(AtomicUsize::new(0));
    let second_counter = Arc::clone(&second_calls);

    assert!(store.subscribe(first_listener));
    assert!(!store.subscribe(move |_| {
        second_counter.fetch_add(1, Ordering::SeqCst);
    }));

    store.report(ReportedError::Unauthenticated);

    assert_eq!(
        *first.lock().expect("first"),
        vec![ReportedError::Unauthenticated]
    );
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn every_report_reaches_the_listener_in_call_order() {
    let store = ErrorStore::new();
    let (seen, listener) = recording_listener();
    store.subscribe(listener);

    store.report(ReportedError::message("first"));
    store.report(ReportedError::message("second"));

    assert_eq!(
        *seen.lock().expect("seen"),
        vec![
            ReportedError::message("first"),
            ReportedError::message("second")
        ]
    );
}

#[test]
fn clear_allows_a_new_subscriber() {
    let store = ErrorStore::new();
    let (old, old_listener) = recording_listener();
    let (new, new_listener) = recording_listener();

    store.subscribe(old_listener);
    assert!(store.clear());
    assert!(!store.clear());
    assert!(store.subscribe(new_listener));

    store.report(ReportedError::message("after reload"));
    assert!(old.lock().expect("old").is_empty());
    assert_eq!(new.lock().expect("new").len(), 1);
}

#[test]
fn listener_may_report_reentrantly() {
    let store = Arc::new(ErrorStore::new());
    let depth = Arc::new(AtomicUsize::new(0));

    let inner_store = Arc::clone(&store);
    let inner_depth = Arc::clone(&depth);
    store.subscribe(move |err: ReportedError| {
        if inner_depth.fetch_add(1, Ordering::SeqCst) == 0 {
            inner_store.report(ReportedError::message(format!("while handling {err}")));
        }
    });

    store.report(ReportedError::message("outer"));
    assert_eq!(depth.load(Ordering::SeqCst), 2);
}
