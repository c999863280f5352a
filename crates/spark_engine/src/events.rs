//! Broadcast event bus
//!
//! Events are the fan-out counterpart to the message queue: where a message
//! is consumed by the one registered dispatch callback, an event is offered
//! to every registered handler in registration order until one consumes it.
//! Handlers return `true` to consume an event and stop it from being
//! forwarded further.
//!
//! Like everything else in the engine this is single-threaded and
//! frame-driven: `send` only queues, `dispatch` delivers.

/// Receives events from an [`EventBus`].
///
/// Return `true` to consume the event and stop forwarding.
pub trait EventHandler<E> {
    /// Handle one event
    fn on_event(&mut self, event: &E) -> bool;
}

/// Queued broadcast dispatcher over the game's event type `E`
pub struct EventBus<E> {
    queue: Vec<E>,
    handlers: Vec<Box<dyn EventHandler<E>>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    /// Create an empty bus with no handlers
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Register a handler; handlers are offered events in registration order
    pub fn register(&mut self, handler: Box<dyn EventHandler<E>>) {
        self.handlers.push(handler);
    }

    /// Queue an event for delivery on the next [`EventBus::dispatch`]
    pub fn send(&mut self, event: E) {
        self.queue.push(event);
    }

    /// Deliver every queued event.
    ///
    /// Events sent by handlers during delivery are delivered in the same
    /// call, after the current batch.
    pub fn dispatch(&mut self) {
        while !self.queue.is_empty() {
            let batch = std::mem::take(&mut self.queue);
            for event in &batch {
                for handler in &mut self.handlers {
                    if handler.on_event(event) {
                        break;
                    }
                }
            }
        }
    }

    /// Number of events waiting for delivery
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drop all queued events without delivering them
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        seen: Rc<RefCell<Vec<u32>>>,
        consume: bool,
    }

    impl EventHandler<u32> for Recorder {
        fn on_event(&mut self, event: &u32) -> bool {
            self.seen.borrow_mut().push(*event);
            self.consume
        }
    }

    #[test]
    fn test_all_handlers_see_unconsumed_events() {
        let mut bus = EventBus::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        bus.register(Box::new(Recorder {
            seen: Rc::clone(&first),
            consume: false,
        }));
        bus.register(Box::new(Recorder {
            seen: Rc::clone(&second),
            consume: false,
        }));

        bus.send(1);
        bus.send(2);
        bus.dispatch();

        assert_eq!(*first.borrow(), vec![1, 2]);
        assert_eq!(*second.borrow(), vec![1, 2]);
        assert_eq!(bus.pending(), 0);
    }

    #[test]
    fn test_consumed_events_stop_forwarding() {
        let mut bus = EventBus::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        bus.register(Box::new(Recorder {
            seen: Rc::clone(&first),
            consume: true,
        }));
        bus.register(Box::new(Recorder {
            seen: Rc::clone(&second),
            consume: false,
        }));

        bus.send(9);
        bus.dispatch();

        assert_eq!(*first.borrow(), vec![9]);
        assert!(second.borrow().is_empty());
    }

    #[test]
    fn test_clear_drops_pending_events() {
        let mut bus: EventBus<u32> = EventBus::new();
        bus.send(1);
        bus.clear();
        assert_eq!(bus.pending(), 0);
    }
}
