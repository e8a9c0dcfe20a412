use super::event::Event;
use super::Listener;
use crossbeam::deque::{Injector, Steal, Worker};
use std::sync::Arc;

/// A listener that records every event it receives.
///
/// Clones share the same queue: register one clone with an `Engine` and read the recorded events
/// back through a consumer built from another.
///
#[derive(Clone, Debug, Default)]
pub struct EventChannel {
    bus: Arc<Injector<Event>>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bus.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bus.len()
    }

    pub fn send<E>(&self, event: E)
    where
        E: Into<Event>,
    {
        self.bus.push(event.into())
    }

    pub fn consumer(&self) -> EventConsumer {
        EventConsumer {
            bus: self.bus.clone(),
            buffer: Worker::new_fifo(),
        }
    }
}

impl Listener for EventChannel {
    fn on_event(&mut self, event: &Event) {
        self.send(event.clone())
    }
}

/// Reads events back out of an `EventChannel`, in the order they were sent.
///
pub struct EventConsumer {
    bus: Arc<Injector<Event>>,
    buffer: Worker<Event>,
}

impl EventConsumer {
    /// Move a batch of events from the channel into our local buffer. False if there was nothing
    /// left to move.
    fn refill(&self) -> bool {
        loop {
            match self.bus.steal_batch(&self.buffer) {
                Steal::Success(_) => return true,
                Steal::Empty => return false,
                Steal::Retry => continue,
            }
        }
    }

    pub fn next_event(&self) -> Option<Event> {
        match self.buffer.pop() {
            Some(event) => Some(event),
            None if self.refill() => self.buffer.pop(),
            None => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.bus.is_empty()
    }

    /// Every event sent so far that this consumer hasn't read yet.
    pub fn drain(&self) -> Vec<Event> {
        std::iter::from_fn(|| self.next_event()).collect()
    }
}

impl Iterator for EventConsumer {
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

impl std::fmt::Debug for EventConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventConsumer")
            .field("buffered", &self.buffer.len())
            .finish()
    }
}
