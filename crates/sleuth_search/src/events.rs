//! # Search Event Bus
//!
//! Synchronous fan-out of inventory and search notifications.
//!
//! ```text
//! ┌─────────────┐  publish   ┌──────────┐   drain   ┌──────────────┐
//! │  Inventory  │──────────> │ EventBus │ ────────> │ UI / audio / │
//! │  Router     │            │          │ ────────> │ quest logic  │
//! └─────────────┘            └──────────┘           └──────────────┘
//! ```
//!
//! Events are queued in the same call that commits the mutation, so a
//! subscriber draining after the call returns sees them in commit order.
//! Each subscriber gets its own unbounded crossbeam channel, so every
//! committed mutation reaches every live subscriber. A subscriber that is
//! dropped is pruned on the next publish. Lossy consumers can opt into a
//! bounded queue with [`EventBus::subscribe_with_capacity`].

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use std::sync::Arc;

use crate::area::AreaId;
use crate::catalog::ItemCatalogEntry;

/// Inventory change notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InventoryEvent {
    /// An item was stored.
    ItemAdded(Arc<ItemCatalogEntry>),
    /// An item was taken out.
    ItemRemoved(Arc<ItemCatalogEntry>),
    /// Contents changed in any way. Always follows the specific events of
    /// the same mutation.
    Changed,
}

/// Search lifecycle notifications, for presentation and audio.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent {
    /// Guards passed and a roll is about to happen.
    Started {
        /// The area being searched.
        area: AreaId,
    },
    /// The search found an item.
    Succeeded {
        /// The area searched.
        area: AreaId,
        /// What was found.
        item: Arc<ItemCatalogEntry>,
    },
    /// The search found nothing.
    Failed {
        /// The area searched.
        area: AreaId,
    },
    /// A one-shot area was removed from the scene.
    AreaRemoved {
        /// The area removed.
        area: AreaId,
    },
}

/// Broadcast bus: every subscriber receives every event.
#[derive(Debug)]
pub struct EventBus<E> {
    subscribers: Vec<Sender<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<E: Clone> EventBus<E> {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber that never misses an event.
    pub fn subscribe(&mut self) -> EventReceiver<E> {
        let (sender, receiver) = unbounded();
        self.subscribers.push(sender);
        EventReceiver { receiver }
    }

    /// Adds a subscriber with a bounded queue. Events published while the
    /// queue is full are dropped for this subscriber only.
    pub fn subscribe_with_capacity(&mut self, capacity: usize) -> EventReceiver<E> {
        let (sender, receiver) = bounded(capacity.max(1));
        self.subscribers.push(sender);
        EventReceiver { receiver }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Delivers an event to every subscriber.
    ///
    /// Returns how many subscribers accepted it. Only a bounded
    /// subscription can refuse an event.
    pub fn publish(&mut self, event: &E) -> usize {
        let mut delivered = 0;
        self.subscribers.retain(|sender| match sender.try_send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!("event subscriber queue full, event dropped");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
        delivered
    }
}

/// Receiving end of a subscription.
#[derive(Debug)]
pub struct EventReceiver<E> {
    receiver: Receiver<E>,
}

impl<E> EventReceiver<E> {
    /// Takes every pending event, oldest first.
    pub fn drain(&self) -> Vec<E> {
        self.receiver.try_iter().collect()
    }

    /// Takes one pending event.
    pub fn try_recv(&self) -> Option<E> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_gets_every_event() {
        let mut bus = EventBus::new();
        let ui = bus.subscribe();
        let audio = bus.subscribe();

        assert_eq!(bus.publish(&InventoryEvent::Changed), 2);
        assert_eq!(ui.drain(), vec![InventoryEvent::Changed]);
        assert_eq!(audio.try_recv(), Some(InventoryEvent::Changed));
        assert!(!audio.has_events());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut bus: EventBus<SearchEvent> = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        assert_eq!(bus.publish(&SearchEvent::Started { area: 1 }), 1);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.pending_count(), 1);
    }

    #[test]
    fn test_lazy_subscriber_keeps_every_event() {
        let mut bus = EventBus::new();
        let quest = bus.subscribe();

        for area in 0..1_000 {
            assert_eq!(bus.publish(&SearchEvent::Failed { area }), 1);
        }
        let events = quest.drain();
        assert_eq!(events.len(), 1_000);
        assert_eq!(events.last(), Some(&SearchEvent::Failed { area: 999 }));
    }

    #[test]
    fn test_full_queue_drops_without_unsubscribing() {
        let mut bus = EventBus::new();
        let slow = bus.subscribe_with_capacity(1);

        assert_eq!(bus.publish(&SearchEvent::Failed { area: 1 }), 1);
        assert_eq!(bus.publish(&SearchEvent::Failed { area: 2 }), 0);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(slow.drain(), vec![SearchEvent::Failed { area: 1 }]);
    }
}
