//! Deferred message queue and dispatcher
//!
//! Messages model "this should happen, but not right now": structural edits
//! (spawn, destroy) that entities request mid-traversal and that the game
//! applies between passes. A message is a plain value of the game's message
//! enum, queued FIFO; the dispatcher hands each one to a single callback
//! registered at construction, together with mutable access to the entity
//! manager so the callback can apply the edit.
//!
//! Unlike the event bus there is no fan-out: one callback, fixed for the
//! manager's lifetime.

use std::collections::VecDeque;

use crate::entity::EntityManager;

/// FIFO queue of pending messages.
///
/// Producers push by value; the queue owns a message until it is dispatched
/// or discarded.
pub struct MessageQueue<M> {
    pending: VecDeque<M>,
}

impl<M> Default for MessageQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> MessageQueue<M> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Append a message; ownership transfers to the queue
    pub fn queue(&mut self, message: M) {
        self.pending.push_back(message);
    }

    /// Number of pending messages
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no messages are pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discard every pending message without dispatching it
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn pop(&mut self) -> Option<M> {
        self.pending.pop_front()
    }

    /// Move every message from `other` into this queue, preserving order
    pub fn append(&mut self, other: &mut Self) {
        self.pending.append(&mut other.pending);
    }
}

/// Callback invoked once per dispatched message
pub type DispatchFn<M> = dyn FnMut(&M, &mut EntityManager<M>, &mut MessageQueue<M>);

/// Owns the pending queue and the single dispatch callback.
///
/// The callback is fixed at construction for the manager's lifetime; there
/// is no way to swap or add subscribers afterwards.
pub struct MessageManager<M> {
    queue: MessageQueue<M>,
    dispatch: Box<DispatchFn<M>>,
}

impl<M> MessageManager<M> {
    /// Create a manager with its dispatch callback.
    ///
    /// The callback receives the message, the entity manager (for applying
    /// structural edits), and the pending queue (anything it queues waits
    /// for the next [`MessageManager::update`]).
    pub fn new(
        dispatch: impl FnMut(&M, &mut EntityManager<M>, &mut MessageQueue<M>) + 'static,
    ) -> Self {
        Self {
            queue: MessageQueue::new(),
            dispatch: Box::new(dispatch),
        }
    }

    /// Append a message to the pending queue
    pub fn queue(&mut self, message: M) {
        self.queue.queue(message);
    }

    /// Exclusive access to the pending queue, for wiring into an
    /// [`crate::entity::UpdateContext`]
    pub fn queue_mut(&mut self) -> &mut MessageQueue<M> {
        &mut self.queue
    }

    /// Number of pending messages
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch pending messages in FIFO order.
    ///
    /// Only the messages pending when the call begins are dispatched; a
    /// message queued by the callback during the drain stays for the next
    /// call, which guarantees the drain terminates.
    pub fn update(&mut self, world: &mut EntityManager<M>) {
        let batch = self.queue.len();
        for _ in 0..batch {
            let Some(message) = self.queue.pop() else {
                break;
            };
            (self.dispatch)(&message, world, &mut self.queue);
        }
    }

    /// Discard any undelivered messages without dispatching them.
    ///
    /// Delivery is never guaranteed across shutdown; this is the explicit
    /// drop point.
    pub fn terminate(&mut self) {
        let discarded = self.queue.len();
        if discarded > 0 {
            log::debug!("MessageManager::terminate discarding {discarded} undelivered message(s)");
        }
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_is_fifo() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut manager: MessageManager<u32> = MessageManager::new(move |msg, _world, _queue| {
            sink.borrow_mut().push(*msg);
        });
        let mut world = EntityManager::new();

        manager.queue(1);
        manager.queue(2);
        manager.queue(3);
        manager.update(&mut world);

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        assert_eq!(manager.pending(), 0);
    }

    #[test]
    fn test_messages_queued_during_dispatch_wait_for_next_update() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut manager: MessageManager<u32> = MessageManager::new(move |msg, _world, queue| {
            sink.borrow_mut().push(*msg);
            if *msg < 10 {
                queue.queue(msg + 10);
            }
        });
        let mut world = EntityManager::new();

        manager.queue(1);
        manager.update(&mut world);
        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(manager.pending(), 1);

        manager.update(&mut world);
        assert_eq!(*seen.borrow(), vec![1, 11]);
        assert_eq!(manager.pending(), 0);
    }

    #[test]
    fn test_terminate_discards_without_dispatch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut manager: MessageManager<u32> = MessageManager::new(move |msg, _world, _queue| {
            sink.borrow_mut().push(*msg);
        });

        manager.queue(7);
        manager.queue(8);
        manager.terminate();
        assert_eq!(manager.pending(), 0);

        let mut world = EntityManager::new();
        manager.update(&mut world);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_queue_append_preserves_order() {
        let mut a: MessageQueue<u32> = MessageQueue::new();
        let mut b: MessageQueue<u32> = MessageQueue::new();
        a.queue(1);
        b.queue(2);
        b.queue(3);
        a.append(&mut b);
        assert_eq!(a.len(), 3);
        assert!(b.is_empty());
    }
}
