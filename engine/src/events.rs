//! Observer registration for notifications leaving the locomotion core.
//!
//! Subscribers get an [`ObserverId`] back and hand it in again to
//! unsubscribe; every subscribe has exactly one matching unsubscribe.

use glam::Vec3;

/// Handle returned by [`ObserverRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered set of boxed observers.
pub struct ObserverRegistry<T: ?Sized> {
    next_id: u64,
    entries: Vec<(ObserverId, Box<T>)>,
}

impl<T: ?Sized> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for ObserverRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.entries.len())
            .finish()
    }
}

impl<T: ?Sized> ObserverRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<T>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Remove an observer, handing it back. `None` if the id is unknown or
    /// was already removed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> Option<Box<T>> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Observers in subscription order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|(_, observer)| observer.as_mut())
    }
}

/// Dash lifecycle notification, consumed by audio cues and the like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashEvent {
    /// A dash began moving along `direction` (unit, horizontal) at `speed`.
    Started { direction: Vec3, speed: f32 },
    /// The dash duration ran out and normal speed limiting resumed.
    Finished,
}

pub trait DashObserver {
    fn on_dash_event(&mut self, event: &DashEvent);
}

impl<F> DashObserver for F
where
    F: FnMut(&DashEvent),
{
    fn on_dash_event(&mut self, event: &DashEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_and_notify_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry: ObserverRegistry<dyn DashObserver> = ObserverRegistry::new();

        for tag in 0..3 {
            let seen = Rc::clone(&seen);
            registry.subscribe(Box::new(move |_: &DashEvent| seen.borrow_mut().push(tag)));
        }

        for observer in registry.iter_mut() {
            observer.on_dash_event(&DashEvent::Finished);
        }
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe_is_symmetric() {
        let mut registry: ObserverRegistry<dyn DashObserver> = ObserverRegistry::new();
        let first = registry.subscribe(Box::new(|_: &DashEvent| {}));
        let second = registry.subscribe(Box::new(|_: &DashEvent| {}));
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);

        assert!(registry.unsubscribe(first).is_some());
        assert!(registry.unsubscribe(first).is_none());
        assert_eq!(registry.len(), 1);

        assert!(registry.unsubscribe(second).is_some());
        assert!(registry.is_empty());
    }
}
