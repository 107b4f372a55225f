//! Debounced persistence
//!
//! Rapid edits are coalesced into one write: every `schedule` replaces the
//! pending payload and pushes the deadline out by the debounce window, but
//! never beyond `max_wait` after the first unwritten edit. Nothing here owns
//! a timer; the owner polls with the current time and writes whatever comes
//! back.

/// Debounce timing, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Quiet period after the last edit before writing
    pub debounce_ms: u64,
    /// Upper bound on how long an edit may stay unwritten
    pub max_wait_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            max_wait_ms: 2000,
        }
    }
}

impl DebounceConfig {
    /// Every write is due as soon as it is scheduled
    pub fn immediate() -> Self {
        Self {
            debounce_ms: 0,
            max_wait_ms: 0,
        }
    }
}

#[derive(Debug)]
struct Pending {
    payload: String,
    first_scheduled_at: i64,
    due_at: i64,
}

/// Holds at most one unwritten payload and decides when it is due
#[derive(Debug)]
pub struct DebouncedWriter {
    config: DebounceConfig,
    pending: Option<Pending>,
}

impl DebouncedWriter {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    pub fn config(&self) -> DebounceConfig {
        self.config
    }

    /// Queue `payload`, superseding whatever was pending
    pub fn schedule(&mut self, payload: String, now: i64) {
        let first_scheduled_at = self
            .pending
            .as_ref()
            .map_or(now, |pending| pending.first_scheduled_at);

        let debounced = now.saturating_add(to_millis(self.config.debounce_ms));
        let cap = first_scheduled_at.saturating_add(to_millis(self.config.max_wait_ms));
        let due_at = debounced.min(cap.max(now));

        if self.pending.is_some() {
            tracing::trace!(due_at, "superseding pending write");
        }

        self.pending = Some(Pending {
            payload,
            first_scheduled_at,
            due_at,
        });
    }

    /// Swap the pending payload, keeping its deadline. No-op when idle.
    pub fn replace_pending(&mut self, payload: String) -> bool {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.payload = payload;
                true
            }
            None => false,
        }
    }

    /// Take the pending payload if its deadline has passed
    pub fn poll(&mut self, now: i64) -> Option<String> {
        if self.pending.as_ref()?.due_at <= now {
            self.pending.take().map(|pending| pending.payload)
        } else {
            None
        }
    }

    /// Take the pending payload regardless of its deadline
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.payload)
    }

    /// Drop the pending payload without writing it
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending payload, if any
    pub fn due_at(&self) -> Option<i64> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }
}

fn to_millis(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}
