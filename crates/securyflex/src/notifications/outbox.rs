//! Durable event hand-off between store mutations and delivery.
//!
//! Stores record the events a mutation produced in the same transaction as
//! the mutation itself; the fan-out worker drains them afterwards. Delivery
//! failures therefore never roll back business state, and a committed
//! mutation never loses its events.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::LifecycleEvent;

/// A recorded event awaiting delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub volgnummer: u64,
    pub event: LifecycleEvent,
    pub geregistreerd_op: DateTime<Utc>,
}

pub trait EventOutbox: Send + Sync {
    fn append_batch(&self, events: Vec<LifecycleEvent>, nu: DateTime<Utc>);

    /// Remove and return up to `max` entries, oldest first.
    fn drain(&self, max: usize) -> Vec<OutboxEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local outbox backing the in-memory store adapters.
#[derive(Default)]
pub struct InMemoryOutbox {
    inner: Mutex<InnerOutbox>,
}

#[derive(Default)]
struct InnerOutbox {
    volgende: u64,
    entries: VecDeque<OutboxEntry>,
}

impl EventOutbox for InMemoryOutbox {
    fn append_batch(&self, events: Vec<LifecycleEvent>, nu: DateTime<Utc>) {
        let mut guard = self.inner.lock().expect("outbox mutex poisoned");
        for event in events {
            guard.volgende += 1;
            let volgnummer = guard.volgende;
            guard.entries.push_back(OutboxEntry {
                volgnummer,
                event,
                geregistreerd_op: nu,
            });
        }
    }

    fn drain(&self, max: usize) -> Vec<OutboxEntry> {
        let mut guard = self.inner.lock().expect("outbox mutex poisoned");
        let take = max.min(guard.entries.len());
        guard.entries.drain(..take).collect()
    }

    fn len(&self) -> usize {
        self.inner.lock().expect("outbox mutex poisoned").entries.len()
    }
}
