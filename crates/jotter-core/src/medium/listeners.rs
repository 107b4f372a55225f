use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{ChangeHandler, StorageEvent};

/// Handlers registered by one execution context
#[derive(Default)]
pub(crate) struct ListenerSet {
    next_id: u64,
    entries: Vec<(u64, ChangeHandler)>,
    /// Ids unsubscribed while their handler was checked out for dispatch
    detached: Vec<u64>,
}

pub(crate) type SharedListeners = Rc<RefCell<ListenerSet>>;

impl ListenerSet {
    pub(crate) fn shared() -> SharedListeners {
        Rc::new(RefCell::new(ListenerSet::default()))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn remove(&mut self, id: u64) {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        if self.entries.len() == before {
            self.detached.push(id);
        }
    }
}

/// Register `handler` and hand back its unsubscribe token
pub(crate) fn subscribe(listeners: &SharedListeners, handler: ChangeHandler) -> Subscription {
    let mut set = listeners.borrow_mut();
    let id = set.next_id;
    set.next_id += 1;
    set.entries.push((id, handler));
    Subscription {
        id,
        listeners: Rc::downgrade(listeners),
    }
}

/// Deliver `event` to every handler in the set.
///
/// Handlers are checked out while they run, so a handler may subscribe or
/// unsubscribe on the same medium without a re-entrant borrow.
pub(crate) fn dispatch(listeners: &SharedListeners, event: &StorageEvent) {
    let mut running = std::mem::take(&mut listeners.borrow_mut().entries);
    for (_, handler) in running.iter_mut() {
        handler(event);
    }

    let mut set = listeners.borrow_mut();
    let detached = std::mem::take(&mut set.detached);
    running.retain(|(id, _)| !detached.contains(id));
    let added = std::mem::take(&mut set.entries);
    running.extend(added);
    set.entries = running;
}

/// Unsubscribe token returned by `StorageMedium::subscribe`.
///
/// Dropping the token removes the handler.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<ListenerSet>>,
}

impl Subscription {
    /// Remove the handler now
    pub fn unsubscribe(self) {}

    /// Whether the medium this token belongs to is still alive
    pub fn is_active(&self) -> bool {
        self.listeners.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if let Ok(mut set) = listeners.try_borrow_mut() {
                set.remove(self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn event() -> StorageEvent {
        StorageEvent {
            key: "notes".to_string(),
            new_value: Some("{}".to_string()),
        }
    }

    #[test]
    fn test_dispatch_and_drop() {
        let listeners = ListenerSet::shared();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let sub = subscribe(
            &listeners,
            Box::new(move |_: &StorageEvent| counter.set(counter.get() + 1)),
        );
        dispatch(&listeners, &event());
        assert_eq!(hits.get(), 1);

        drop(sub);
        dispatch(&listeners, &event());
        assert_eq!(hits.get(), 1);
        assert_eq!(listeners.borrow().len(), 0);
    }

    #[test]
    fn test_unsubscribe_during_dispatch() {
        let listeners = ListenerSet::shared();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let inner_slot = slot.clone();
        let counter = hits.clone();
        let sub = subscribe(
            &listeners,
            Box::new(move |_: &StorageEvent| {
                counter.set(counter.get() + 1);
                inner_slot.borrow_mut().take();
            }),
        );
        *slot.borrow_mut() = Some(sub);

        dispatch(&listeners, &event());
        dispatch(&listeners, &event());
        assert_eq!(hits.get(), 1);
        assert_eq!(listeners.borrow().len(), 0);
    }

    #[test]
    fn test_token_outlives_medium() {
        let listeners = ListenerSet::shared();
        let sub = subscribe(&listeners, Box::new(|_: &StorageEvent| {}));
        assert!(sub.is_active());
        drop(listeners);
        assert!(!sub.is_active());
    }
}
