use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::listeners::{self, ListenerSet, SharedListeners};
use super::{ChangeHandler, StorageEvent, StorageMedium, Subscription};
use crate::error::{JotterError, Result};

#[derive(Default)]
struct Shared {
    values: HashMap<String, String>,
    contexts: Vec<(u64, Weak<RefCell<ListenerSet>>)>,
    next_context: u64,
    fail_writes: bool,
}

/// In-process medium shared by several execution contexts.
///
/// `MemoryMedium` is the backing store; each context talks to it through
/// its own [`MemoryContext`] handle, which is what implements
/// [`StorageMedium`].
#[derive(Clone, Default)]
pub struct MemoryMedium {
    shared: Rc<RefCell<Shared>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a handle for a new execution context
    pub fn context(&self) -> MemoryContext {
        let listeners = ListenerSet::shared();
        let mut shared = self.shared.borrow_mut();
        let id = shared.next_context;
        shared.next_context += 1;
        shared.contexts.push((id, Rc::downgrade(&listeners)));
        MemoryContext {
            id,
            shared: self.shared.clone(),
            listeners,
        }
    }

    /// Current value of `key`, bypassing any context
    pub fn peek(&self, key: &str) -> Option<String> {
        self.shared.borrow().values.get(key).cloned()
    }

    /// Make every subsequent write fail, as a full or unavailable medium would
    pub fn set_fail_writes(&self, fail: bool) {
        self.shared.borrow_mut().fail_writes = fail;
    }
}

/// One execution context's view of a [`MemoryMedium`]
pub struct MemoryContext {
    id: u64,
    shared: Rc<RefCell<Shared>>,
    listeners: SharedListeners,
}

impl MemoryContext {
    /// Handlers currently registered by this context
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl StorageMedium for MemoryContext {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.shared.borrow().values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let others: Vec<SharedListeners> = {
            let mut shared = self.shared.borrow_mut();
            if shared.fail_writes {
                return Err(JotterError::io_operation(
                    "write",
                    key,
                    "storage medium unavailable",
                ));
            }
            shared.values.insert(key.to_string(), value.to_string());
            shared.contexts.retain(|(_, listeners)| listeners.strong_count() > 0);
            shared
                .contexts
                .iter()
                .filter(|(id, _)| *id != self.id)
                .filter_map(|(_, listeners)| listeners.upgrade())
                .collect()
        };

        tracing::trace!(key, bytes = value.len(), notified = others.len(), "memory write");

        let event = StorageEvent {
            key: key.to_string(),
            new_value: Some(value.to_string()),
        };
        for listeners in &others {
            listeners::dispatch(listeners, &event);
        }
        Ok(())
    }

    fn subscribe(&self, handler: ChangeHandler) -> Subscription {
        listeners::subscribe(&self.listeners, handler)
    }
}
