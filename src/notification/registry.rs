//! Per-key gate registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::observability::metrics;

/// A single-use release point shared by every waiter on one key.
#[derive(Debug)]
pub struct Gate {
    tx: broadcast::Sender<()>,
}

impl Gate {
    fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Register interest. The receiver only sees releases sent after this call.
    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Number of waiters currently parked on this gate.
    pub fn waiters(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Wake every subscribed waiter. Returns how many were released.
    fn release(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

/// One parked waiter. Dropping it, released or abandoned, forgets the
/// gate once nobody else is parked on it.
struct Parked<'a> {
    registry: &'a NotificationRegistry,
    key: &'a str,
    gate: Arc<Gate>,
    rx: Option<broadcast::Receiver<()>>,
}

impl<'a> Parked<'a> {
    fn new(
        registry: &'a NotificationRegistry,
        key: &'a str,
        gate: Arc<Gate>,
        rx: broadcast::Receiver<()>,
    ) -> Self {
        metrics::record_waiter_parked();
        Self {
            registry,
            key,
            gate,
            rx: Some(rx),
        }
    }

    async fn released(&mut self) {
        if let Some(rx) = self.rx.as_mut() {
            // Closed means the gate was dropped, which only happens after removal.
            let _ = rx.recv().await;
        }
    }
}

impl Drop for Parked<'_> {
    fn drop(&mut self) {
        drop(self.rx.take());
        self.registry.forget_if_idle(self.key, &self.gate);
        metrics::record_waiter_released();
    }
}

/// Process-wide mapping from key to the gate waiters are parked on.
#[derive(Debug, Default)]
pub struct NotificationRegistry {
    gates: Mutex<HashMap<String, Arc<Gate>>>,
}

impl NotificationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `trigger(key)` is called.
    ///
    /// There is no timeout; the future completes only on release (or is
    /// dropped with its request).
    pub async fn wait_for(&self, key: &str) {
        let (gate, rx) = {
            let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
            let gate = gates
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Gate::new()))
                .clone();
            let rx = gate.subscribe();
            (gate, rx)
        };

        let mut parked = Parked::new(self, key, gate, rx);
        tracing::debug!(key = %key, "Waiting for trigger");
        parked.released().await;
        tracing::debug!(key = %key, "Wait released");
    }

    /// Drop `key`'s gate if it is still `gate` and has no waiters left.
    fn forget_if_idle(&self, key: &str, gate: &Arc<Gate>) {
        let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        let idle = gates
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, gate) && current.waiters() == 0);
        if idle {
            gates.remove(key);
            tracing::debug!(key = %key, "Abandoned gate removed");
        }
    }

    /// Release every waiter on `key` and forget the gate.
    ///
    /// A no-op when nobody is waiting. Returns the number of waiters released.
    pub fn trigger(&self, key: &str) -> usize {
        let gate = {
            let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
            gates.remove(key)
        };

        let released = gate.map(|g| g.release()).unwrap_or(0);
        metrics::record_trigger(released);
        tracing::debug!(key = %key, released, "Trigger");
        released
    }

    /// Number of keys with at least one parked waiter.
    pub fn pending_keys(&self) -> usize {
        let gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        gates.len()
    }

    /// Number of waiters parked on `key`.
    pub fn waiters(&self, key: &str) -> usize {
        let gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        gates.get(key).map(|g| g.waiters()).unwrap_or(0)
    }
}
