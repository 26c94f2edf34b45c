use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// State that accepts a partial update.
///
/// `Patch` is usually a struct of `Option` fields; `merge` copies every field
/// that is `Some` and leaves the rest untouched (a shallow merge).
pub trait Mergeable: Clone {
    type Patch;
    fn merge(&mut self, patch: Self::Patch);
}

type Callback<S> = Rc<dyn Fn(&S)>;
type SubscriberList<S> = SmallVec<[(u64, Callback<S>); 4]>;

struct Inner<S> {
    state: S,
    subscribers: SubscriberList<S>,
    next_id: u64,
    version: u64,
    closed: bool,
}

/// Observable value container living outside any UI framework.
///
/// One store per signal domain, owned by a single provider scope. The owning
/// engine writes with [`SignalStore::set_state`]; any number of readers may
/// subscribe or take snapshots. Cloning the handle shares the same store.
///
/// Notification iterates a copy of the subscriber list, so subscribers added
/// or removed from inside a callback only take effect on the next write.
/// A write made from inside a callback notifies everyone with the newer state
/// and ends the outer round, so no subscriber sees an older snapshot after a
/// newer one.
pub struct SignalStore<S> {
    inner: Rc<RefCell<Inner<S>>>,
}

impl<S> Clone for SignalStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Mergeable + 'static> SignalStore<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: initial,
                subscribers: SmallVec::new(),
                next_id: 0,
                version: 0,
                closed: false,
            })),
        }
    }

    /// Synchronous snapshot of the current state.
    pub fn get_state(&self) -> S {
        self.inner.borrow().state.clone()
    }

    /// Borrowing read for hot loops that only need a couple of fields.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.borrow().state)
    }

    /// Merge `patch` into the state and notify every subscriber before
    /// returning. Silently ignored once the store is closed.
    pub fn set_state(&self, patch: S::Patch) {
        self.update(|s| s.merge(patch));
    }

    /// Closure form of [`SignalStore::set_state`] with the same guarantees.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        let (version, snapshot, subscribers) = {
            let mut inner = self.inner.borrow_mut();
            if inner.closed {
                return;
            }
            f(&mut inner.state);
            inner.version += 1;
            let subscribers: SmallVec<[Callback<S>; 4]> =
                inner.subscribers.iter().map(|(_, cb)| cb.clone()).collect();
            (inner.version, inner.state.clone(), subscribers)
        };
        // borrow released: callbacks may read, write or (un)subscribe
        for cb in &subscribers {
            if self.inner.borrow().version != version {
                // a nested write already delivered newer state
                break;
            }
            cb(&snapshot);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&S) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            if !inner.closed {
                inner.subscribers.push((id, Rc::new(f)));
            }
            id
        };
        let weak: Weak<RefCell<Inner<S>>> = Rc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Tear the store down: drop all subscribers and ignore later writes.
    pub fn close(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.closed = true;
        inner.subscribers.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// Handle returned by [`SignalStore::subscribe`].
///
/// Dropping the handle keeps the callback registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

/// Synchronized external read of a store.
///
/// Keeps the latest snapshot and raises a change flag only when the store
/// notifies, so a layout consumer can re-render exactly when something
/// changed instead of every animation frame.
pub struct SyncedSignal<S> {
    latest: Rc<RefCell<S>>,
    changed: Rc<Cell<bool>>,
    subscription: Option<Subscription>,
}

impl<S: Mergeable + 'static> SyncedSignal<S> {
    pub fn new(store: &SignalStore<S>) -> Self {
        let latest = Rc::new(RefCell::new(store.get_state()));
        let changed = Rc::new(Cell::new(false));
        let latest_cb = latest.clone();
        let changed_cb = changed.clone();
        let subscription = store.subscribe(move |s: &S| {
            *latest_cb.borrow_mut() = s.clone();
            changed_cb.set(true);
        });
        Self {
            latest,
            changed,
            subscription: Some(subscription),
        }
    }

    pub fn snapshot(&self) -> S {
        self.latest.borrow().clone()
    }

    /// Returns whether a notification arrived since the last call.
    pub fn take_changed(&self) -> bool {
        self.changed.replace(false)
    }

    pub fn detach(mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.unsubscribe();
        }
    }
}
