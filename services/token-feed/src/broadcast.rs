//! Subscriber registry and fan-out broadcasting
//!
//! Tracks live subscribers as bounded outbound channels. Broadcasting
//! serializes a message once and `try_send`s it to every subscriber in
//! deterministic id order; a full or closed channel unregisters that
//! subscriber without affecting delivery to the others, so one stalled
//! consumer can never hold up the rest.
//!
//! Ordering: per-subscriber FIFO. Two messages broadcast in order are
//! received in order by every subscriber that receives both; nothing
//! is promised across subscribers.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use types::ids::SessionId;

use crate::messages::{PushMessage, PushPayload};

/// Opaque, comparable handle for one connected subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct RegistryInner {
    subscribers: BTreeMap<SubscriberId, mpsc::Sender<String>>,
    next_id: u64,
}

/// Registry of live subscribers with fan-out broadcasting.
///
/// Membership changes only on register/disconnect; the registry places
/// no limit on total subscriber count.
pub struct SubscriberRegistry {
    inner: Mutex<RegistryInner>,
    queue_capacity: usize,
}

impl SubscriberRegistry {
    /// Create a registry with the given per-subscriber queue capacity.
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                subscribers: BTreeMap::new(),
                next_id: 1,
            }),
            queue_capacity,
        }
    }

    /// Add a subscriber to the live set and greet it.
    ///
    /// The connection-established message, carrying a fresh session id,
    /// goes to this subscriber only. The returned receiver yields
    /// serialized frames ready to be written to the wire.
    pub fn register(&self) -> (SubscriberId, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.queue_capacity);

        let session_id = SessionId::new();
        let greeting = PushMessage::now(PushPayload::Connection {
            session_id,
            message: "connected to token feed".to_string(),
        });
        let frame = serde_json::to_string(&greeting);

        // Greeting goes out under the lock so no broadcast can be
        // queued ahead of the connection message
        let id = {
            let mut inner = self.inner.lock();
            let id = SubscriberId(inner.next_id);
            inner.next_id += 1;
            inner.subscribers.insert(id, tx.clone());
            match frame {
                // Freshly created channel: capacity is non-zero and empty
                Ok(frame) => {
                    let _ = tx.try_send(frame);
                }
                Err(error) => warn!(%error, "failed to serialize connection message"),
            }
            id
        };

        info!(subscriber_id = %id, %session_id, "subscriber registered");
        (id, rx)
    }

    /// Idempotent removal; unknown handles are a no-op.
    pub fn unregister(&self, id: SubscriberId) {
        let removed = self.inner.lock().subscribers.remove(&id).is_some();
        if removed {
            info!(subscriber_id = %id, "subscriber unregistered");
        }
    }

    /// Deliver a payload to every live subscriber independently.
    ///
    /// Returns the number of subscribers the frame was queued for.
    /// Subscribers whose queue is full or closed are unregistered; the
    /// caller never sees their failure.
    pub fn broadcast(&self, payload: PushPayload) -> usize {
        let label = payload.type_label();
        let message = PushMessage::now(payload);
        let frame = match serde_json::to_string(&message) {
            Ok(frame) => frame,
            Err(error) => {
                warn!(%error, message_type = label, "failed to serialize broadcast");
                return 0;
            }
        };

        let mut inner = self.inner.lock();
        let mut delivered = 0usize;
        let mut dropped: Vec<SubscriberId> = Vec::new();

        for (id, tx) in &inner.subscribers {
            match tx.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(subscriber_id = %id, "subscriber queue full, disconnecting");
                    dropped.push(*id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!(subscriber_id = %id, "subscriber channel closed, removing");
                    dropped.push(*id);
                }
            }
        }

        for id in dropped {
            inner.subscribers.remove(&id);
        }

        delivered
    }

    /// Forcibly disconnect every subscriber.
    ///
    /// Dropping the senders closes each receiver. Safe to call more
    /// than once, and before any subscriber ever registered.
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock();
        let count = inner.subscribers.len();
        inner.subscribers.clear();
        if count > 0 {
            info!(disconnected = count, "subscriber registry shut down");
        }
    }

    /// Number of currently live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}
