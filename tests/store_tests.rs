// Host-side tests for the signal store.
// The store is plain Rust, so no browser is needed.

use ambient_motion::core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Debug, Default, PartialEq)]
struct Counter {
    a: i32,
    b: i32,
    label: String,
}

#[derive(Default)]
struct CounterPatch {
    a: Option<i32>,
    b: Option<i32>,
    label: Option<String>,
}

impl Mergeable for Counter {
    type Patch = CounterPatch;

    fn merge(&mut self, patch: CounterPatch) {
        if let Some(v) = patch.a {
            self.a = v;
        }
        if let Some(v) = patch.b {
            self.b = v;
        }
        if let Some(v) = patch.label {
            self.label = v;
        }
    }
}

#[test]
fn set_state_merges_partials_in_order() {
    let store = SignalStore::new(Counter::default());
    let mut expected = Counter::default();
    for i in 0..50 {
        let patch = if i % 3 == 0 {
            expected.a = i;
            CounterPatch {
                a: Some(i),
                ..Default::default()
            }
        } else if i % 3 == 1 {
            expected.b = i * 2;
            CounterPatch {
                b: Some(i * 2),
                ..Default::default()
            }
        } else {
            expected.label = format!("step {i}");
            CounterPatch {
                label: Some(format!("step {i}")),
                ..Default::default()
            }
        };
        store.set_state(patch);
        assert_eq!(store.get_state(), expected, "diverged after write {i}");
    }
}

#[test]
fn subscribers_are_notified_synchronously_with_the_new_state() {
    let store = SignalStore::new(Counter::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = seen.clone();
    let _sub = store.subscribe(move |s: &Counter| seen_cb.borrow_mut().push(s.a));

    store.set_state(CounterPatch {
        a: Some(1),
        ..Default::default()
    });
    assert_eq!(*seen.borrow(), vec![1]);
    store.set_state(CounterPatch {
        a: Some(2),
        ..Default::default()
    });
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn unsubscribe_stops_notifications() {
    let store = SignalStore::new(Counter::default());
    let calls = Rc::new(Cell::new(0));
    let calls_cb = calls.clone();
    let sub = store.subscribe(move |_s: &Counter| calls_cb.set(calls_cb.get() + 1));
    store.update(|s| s.a += 1);
    sub.unsubscribe();
    store.update(|s| s.a += 1);
    assert_eq!(calls.get(), 1);
    assert_eq!(store.subscriber_count(), 0);
    assert_eq!(store.get_state().a, 2);
}

#[test]
fn subscriber_added_during_notification_waits_for_next_write() {
    let store = SignalStore::new(Counter::default());
    let late_calls = Rc::new(Cell::new(0));
    let added = Rc::new(Cell::new(false));

    let store_cb = store.clone();
    let late_cb = late_calls.clone();
    let added_cb = added.clone();
    let _sub = store.subscribe(move |_s: &Counter| {
        if !added_cb.replace(true) {
            let late = late_cb.clone();
            let _inner = store_cb.subscribe(move |_s: &Counter| late.set(late.get() + 1));
        }
    });

    store.update(|s| s.a = 1);
    assert_eq!(late_calls.get(), 0);
    store.update(|s| s.a = 2);
    assert_eq!(late_calls.get(), 1);
}

#[test]
fn subscriber_removed_during_notification_still_sees_current_round() {
    let store = SignalStore::new(Counter::default());
    let victim_calls = Rc::new(Cell::new(0));
    let victim_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let slot_cb = victim_slot.clone();
    let _remover = store.subscribe(move |_s: &Counter| {
        if let Some(sub) = slot_cb.borrow_mut().take() {
            sub.unsubscribe();
        }
    });
    let victim_cb = victim_calls.clone();
    *victim_slot.borrow_mut() =
        Some(store.subscribe(move |_s: &Counter| victim_cb.set(victim_cb.get() + 1)));

    store.update(|s| s.a = 1);
    assert_eq!(victim_calls.get(), 1);
    store.update(|s| s.a = 2);
    assert_eq!(victim_calls.get(), 1);
}

#[test]
fn subscriber_may_read_the_store_while_notified() {
    let store = SignalStore::new(Counter::default());
    let observed = Rc::new(Cell::new(-1));
    let store_cb = store.clone();
    let observed_cb = observed.clone();
    let _sub = store.subscribe(move |_s: &Counter| observed_cb.set(store_cb.get_state().a));
    store.update(|s| s.a = 7);
    assert_eq!(observed.get(), 7);
}

#[test]
fn writes_after_close_are_silent_no_ops() {
    let store = SignalStore::new(Counter::default());
    let calls = Rc::new(Cell::new(0));
    let calls_cb = calls.clone();
    let _sub = store.subscribe(move |_s: &Counter| calls_cb.set(calls_cb.get() + 1));
    store.update(|s| s.a = 1);
    store.close();

    store.set_state(CounterPatch {
        a: Some(99),
        ..Default::default()
    });
    store.update(|s| s.b = 99);
    assert!(store.is_closed());
    assert_eq!(store.get_state().a, 1);
    assert_eq!(store.get_state().b, 0);
    assert_eq!(calls.get(), 1);
}

#[test]
fn synced_signal_flags_changes_only_on_notification() {
    let store = SignalStore::new(Counter::default());
    let synced = SyncedSignal::new(&store);
    assert!(!synced.take_changed());

    store.update(|s| s.a = 3);
    assert!(synced.take_changed());
    assert!(!synced.take_changed(), "flag must reset after being taken");
    assert_eq!(synced.snapshot().a, 3);

    synced.detach();
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn nested_write_never_delivers_stale_state_afterwards() {
    let store = SignalStore::new(Counter::default());

    let store_cb = store.clone();
    let _writer = store.subscribe(move |s: &Counter| {
        if s.a == 1 {
            store_cb.update(|s| s.a = 2);
        }
    });
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = seen.clone();
    let _reader = store.subscribe(move |s: &Counter| seen_cb.borrow_mut().push(s.a));

    store.update(|s| s.a = 1);
    assert_eq!(*seen.borrow(), vec![2]);
    assert_eq!(store.get_state().a, 2);

    store.update(|s| s.a = 5);
    assert_eq!(*seen.borrow(), vec![2, 5]);
}
