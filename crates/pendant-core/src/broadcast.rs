//! The Broadcast Bus: best-effort, per-observer fan-out of pose and
//! execution events, per `spec.md` §4.5.
//!
//! Grounded on `piper-driver::hooks::HookManager`'s callback-registry
//! shape, generalized from direct callback invocation to a bounded
//! `crossbeam-channel` queue per subscriber (`spec.md` §9's redesign note
//! on "broadcast by iterating a shared list of websockets").

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;
use pendant_types::event::Event;

/// Queue depth for a single subscriber before it is considered slow and
/// dropped. Order within a subscriber's own queue is preserved (`spec.md`
/// §4.5: "order within a single observer matches the order of emission").
const SUBSCRIBER_QUEUE_DEPTH: usize = 256;

struct Subscriber {
    id: u64,
    tx: Sender<Event>,
}

/// Fan-out of `Event`s to every currently-subscribed observer.
#[derive(Default)]
pub struct BroadcastBus {
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
}

impl BroadcastBus {
    pub fn new() -> Self {
        BroadcastBus::default()
    }

    /// Register a new observer and return its unsubscribe token plus the
    /// receiving end of its queue.
    pub fn subscribe(&self) -> (u64, Receiver<Event>) {
        let (tx, rx) = bounded(SUBSCRIBER_QUEUE_DEPTH);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.write().push(Subscriber { id, tx });
        (id, rx)
    }

    pub fn unsubscribe(&self, id: u64) {
        self.subscribers.write().retain(|s| s.id != id);
    }

    /// Deliver `event` to every subscriber. A subscriber whose queue is full
    /// (it is not draining fast enough) is dropped from the set entirely,
    /// rather than allowed to stall this call — `spec.md` §4.5: "a failing
    /// observer is skipped without aborting the broadcast."
    pub fn publish(&self, event: Event) {
        self.subscribers
            .write()
            .retain(|s| s.tx.try_send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}
