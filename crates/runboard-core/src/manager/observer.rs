use std::fmt;
use std::sync::Arc;

use crate::models::RankedDataset;

use super::ErrorState;

/// State transitions broadcast by `RunnerDataManager`.
#[derive(Debug, Clone)]
pub enum DataEvent {
    /// A network fetch has started.
    Loading,
    /// A fresh dataset arrived. Never sent for cache hits.
    Loaded(Arc<RankedDataset>),
    /// The fetch failed; the previous dataset is still in place.
    Failed(ErrorState),
}

/// Handle returned by `subscribe`, used to unsubscribe again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn Fn(&DataEvent) + Send + Sync>;

/// Callback registry owned by a single manager.
#[derive(Default)]
pub(crate) struct Observers {
    callbacks: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl Observers {
    pub(crate) fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&DataEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Call every subscriber in registration order.
    pub(crate) fn notify(&self, event: &DataEvent) {
        for (_, callback) in &self.callbacks {
            callback(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_reaches_every_subscriber() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut observers = Observers::default();

        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            observers.subscribe(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        observers.notify(&DataEvent::Loading);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut observers = Observers::default();

        let counter = Arc::clone(&hits);
        let id = observers.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let other = observers.subscribe(|_| {});
        assert_ne!(id, other);

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        assert_eq!(observers.len(), 1);

        observers.notify(&DataEvent::Loading);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
