use std::cell::RefCell;
use std::rc::{Rc, Weak};
use uuid::Uuid;

type Listener<T> = Rc<RefCell<Box<dyn FnMut(&T)>>>;
type ListenerList<T> = Rc<RefCell<Vec<(Uuid, Listener<T>)>>>;

/// Single-threaded event source. Listeners are called in subscription order.
pub struct Emitter<T> {
    listeners: ListenerList<T>,
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = Uuid::new_v4();
        let boxed: Box<dyn FnMut(&T)> = Box::new(listener);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(boxed))));

        let weak: Weak<RefCell<Vec<(Uuid, Listener<T>)>>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            // Emitter may already be gone; nothing to detach then.
            if let Some(listeners) = weak.upgrade() {
                listeners.borrow_mut().retain(|(lid, _)| *lid != id);
            }
        })
    }

    /// Deliver `event` to every listener registered at the time of the call.
    /// Listeners may subscribe or unsubscribe from inside a callback.
    pub fn fire(&self, event: &T) {
        let snapshot: Vec<(Uuid, Listener<T>)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();

        for (id, listener) in snapshot {
            let still_registered = self.listeners.borrow().iter().any(|(lid, _)| *lid == id);
            if !still_registered {
                continue;
            }
            // Busy means this listener fired the event itself; skip the nested call.
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut **callback)(event);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by every subscription. Releasing it (explicitly through
/// [`Subscription::dispose`] or by dropping it) detaches the listener.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn dispose(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispose_detaches_only_that_listener() {
        let emitter: Emitter<u32> = Emitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = {
            let seen = Rc::clone(&seen);
            emitter.subscribe(move |v| seen.borrow_mut().push(("a", *v)))
        };
        let _b = {
            let seen = Rc::clone(&seen);
            emitter.subscribe(move |v| seen.borrow_mut().push(("b", *v)))
        };

        emitter.fire(&1);
        a.dispose();
        emitter.fire(&2);

        assert_eq!(*seen.borrow(), vec![("a", 1), ("b", 1), ("b", 2)]);
        assert_eq!(emitter.listener_count(), 1);
    }

    #[test]
    fn subscription_outliving_emitter_is_harmless() {
        let emitter: Emitter<()> = Emitter::new();
        let sub = emitter.subscribe(|_| {});
        drop(emitter);
        sub.dispose();
    }
}
