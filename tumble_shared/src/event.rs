//! Observer registry and setup latch.
//!
//! - `Observers<T>`: typed listener list, synchronous fan-out in
//!   registration order.
//! - `SetupLatch<T>`: one-time completion signal with replay for late
//!   subscribers.
//!
//! Both are single-threaded. Listeners are held as `Rc` so a notification
//! can snapshot the list and release any outer borrow before calling out.

use std::{collections::VecDeque, fmt, rc::Rc};

/// Shared listener callback.
pub type Listener<T> = Rc<dyn Fn(&T)>;

/// Typed listener list.
pub struct Observers<T> {
    listeners: Vec<Listener<T>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. Listeners are never removed.
    pub fn subscribe(&mut self, listener: impl Fn(&T) + 'static) {
        self.listeners.push(Rc::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Clones the current listener list.
    ///
    /// Used by shared (`RefCell`) owners to drop their borrow before
    /// notifying, so listeners may call back into the owner.
    pub fn snapshot(&self) -> Vec<Listener<T>> {
        self.listeners.clone()
    }

    /// Calls every listener with `event`, in registration order.
    pub fn notify(&self, event: &T) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

/// Pending one-shot setup callback.
pub type SetupCallback<T> = Box<dyn FnOnce(&T)>;

/// One-time setup signal.
///
/// Callbacks registered before completion are queued and drained in FIFO
/// order on `complete`. Callbacks registered after completion run
/// immediately with the stored payload.
pub struct SetupLatch<T> {
    payload: Option<T>,
    pending: VecDeque<SetupCallback<T>>,
}

impl<T> Default for SetupLatch<T> {
    fn default() -> Self {
        Self {
            payload: None,
            pending: VecDeque::new(),
        }
    }
}

impl<T> SetupLatch<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.payload.is_some()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Runs `callback` now if setup already completed, otherwise queues it.
    pub fn subscribe(&mut self, callback: impl FnOnce(&T) + 'static) {
        match &self.payload {
            Some(payload) => callback(payload),
            None => self.pending.push_back(Box::new(callback)),
        }
    }

    /// Stores `payload` and drains every queued callback in order.
    ///
    /// A repeated completion replaces the stored payload; the queue is
    /// already empty by then.
    pub fn complete(&mut self, payload: T) {
        let payload: &T = self.payload.insert(payload);
        while let Some(callback) = self.pending.pop_front() {
            callback(payload);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn observers_fan_out_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut obs = Observers::<u32>::new();
        for tag in ["a", "b", "c"] {
            let log = log.clone();
            obs.subscribe(move |v| log.borrow_mut().push(format!("{tag}{v}")));
        }
        obs.notify(&7);
        assert_eq!(*log.borrow(), vec!["a7", "b7", "c7"]);
    }

    #[test]
    fn latch_queues_until_complete() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut latch = SetupLatch::<&'static str>::new();
        for n in 0..3 {
            let log = log.clone();
            latch.subscribe(move |p| log.borrow_mut().push(format!("{n}:{p}")));
        }
        assert!(log.borrow().is_empty());
        assert_eq!(latch.pending_len(), 3);

        latch.complete("rings");
        assert_eq!(*log.borrow(), vec!["0:rings", "1:rings", "2:rings"]);
        assert_eq!(latch.pending_len(), 0);
    }

    #[test]
    fn late_subscriber_gets_exactly_one_replay() {
        let hits = Rc::new(RefCell::new(0));
        let mut latch = SetupLatch::<u8>::new();
        latch.complete(1);

        let h = hits.clone();
        latch.subscribe(move |_| *h.borrow_mut() += 1);
        assert_eq!(*hits.borrow(), 1);

        latch.complete(2);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(latch.payload(), Some(&2));
    }
}
