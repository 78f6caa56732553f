//! Event emitters for trigger-style checks.
//!
//! An `EventEmitter` broadcasts named events to every live `Subscription`.
//! Subscriptions unregister themselves when dropped, so the number of
//! listeners is always the number of `Subscription`s still alive. Checks
//! that wait for an event rely on this to release their listener on every
//! exit path.

use std::fmt;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::Value;

/// Buffered events per listener before slow listeners start lagging.
const CHANNEL_CAPACITY: usize = 64;

/// A named event with its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub name: String,
    pub args: Vec<Value>,
}

struct EmitterInner {
    label: String,
    sender: broadcast::Sender<Event>,
}

/// Broadcast source of named events.
#[derive(Clone)]
pub struct EventEmitter {
    inner: Arc<EmitterInner>,
}

impl EventEmitter {
    /// Create an emitter; `label` is used only for display.
    pub fn new(label: impl Into<String>) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        EventEmitter {
            inner: Arc::new(EmitterInner {
                label: label.into(),
                sender,
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Emit an event. Returns the number of listeners it was delivered to.
    pub fn emit(&self, name: impl Into<String>, args: Vec<Value>) -> usize {
        let event = Event {
            name: name.into(),
            args,
        };
        // No listeners is not an error: the event is simply unobserved.
        self.inner.sender.send(event).unwrap_or(0)
    }

    /// Register a listener.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.inner.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<emitter {}>", self.inner.label)
    }
}

/// A live listener on an `EventEmitter`. Dropping it unsubscribes.
pub struct Subscription {
    receiver: broadcast::Receiver<Event>,
}

impl Subscription {
    /// Wait for the next event named `name`, skipping any other events.
    ///
    /// Returns `None` once every emitter handle has been dropped.
    pub async fn next_named(&mut self, name: &str) -> Option<Event> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.name == name => return Some(event),
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
