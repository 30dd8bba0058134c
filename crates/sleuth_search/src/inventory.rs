//! # Inventory System
//!
//! Ordered storage for found items with a capacity and a duplicate policy.
//! The inventory lives for the whole process and is carried across scene
//! transitions by whoever owns it.
//!
//! ## Invariants
//!
//! - `len() <= capacity` whenever the capacity is bounded
//! - with duplicates disallowed, no two slots hold the same item id
//! - failed mutations change nothing and publish nothing

use std::sync::Arc;

use crate::catalog::{ItemCatalogEntry, ItemId, ItemType, Rarity};
use crate::config::InventoryConfig;
use crate::events::{EventBus, EventReceiver, InventoryEvent};
use crate::limit::Limit;

/// Counts per rarity, for summaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InventoryStats {
    /// Items held.
    pub total: usize,
    /// Capacity.
    pub capacity: Limit,
    /// Common items held.
    pub common: usize,
    /// Uncommon items held.
    pub uncommon: usize,
    /// Rare items held.
    pub rare: usize,
}

impl std::fmt::Display for InventoryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Inventory ({}/{})", self.total, self.capacity)?;
        writeln!(f, "Common: {}", self.common)?;
        writeln!(f, "Uncommon: {}", self.uncommon)?;
        write!(f, "Rare: {}", self.rare)
    }
}

/// Held items plus the policy that guards them.
#[derive(Debug, Default)]
pub struct Inventory {
    items: Vec<Arc<ItemCatalogEntry>>,
    capacity: Limit,
    allow_duplicates: bool,
    events: EventBus<InventoryEvent>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new(capacity: Limit, allow_duplicates: bool) -> Self {
        Self {
            items: Vec::new(),
            capacity,
            allow_duplicates,
            events: EventBus::new(),
        }
    }

    /// Creates an empty inventory from config.
    #[must_use]
    pub fn from_config(config: &InventoryConfig) -> Self {
        Self::new(config.capacity, config.allow_duplicates)
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&mut self) -> EventReceiver<InventoryEvent> {
        self.events.subscribe()
    }

    /// Capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> Limit {
        self.capacity
    }

    /// Whether duplicates are allowed.
    #[inline]
    #[must_use]
    pub const fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Number of held items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the inventory is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks if the inventory is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.is_reached(saturating_u32(self.items.len()))
    }

    /// Free slots, or `None` when unlimited.
    #[must_use]
    pub fn free_space(&self) -> Option<u32> {
        self.capacity.remaining(saturating_u32(self.items.len()))
    }

    /// Held items, oldest first.
    #[must_use]
    pub fn items(&self) -> &[Arc<ItemCatalogEntry>] {
        &self.items
    }

    /// Stores an item.
    ///
    /// Returns `false` and leaves the inventory untouched when it is full
    /// or when the item is already held and duplicates are disallowed.
    pub fn add(&mut self, item: Arc<ItemCatalogEntry>) -> bool {
        if self.is_full() {
            tracing::debug!(len = self.items.len(), capacity = %self.capacity, "inventory full");
            return false;
        }

        if !self.allow_duplicates && self.contains(item.id) {
            tracing::debug!(item = item.id, "duplicate item rejected");
            return false;
        }

        self.items.push(Arc::clone(&item));
        tracing::debug!(
            item = item.id,
            name = %item.display_name,
            len = self.items.len(),
            capacity = %self.capacity,
            "item added"
        );

        self.events.publish(&InventoryEvent::ItemAdded(item));
        self.events.publish(&InventoryEvent::Changed);
        true
    }

    /// Removes the first occurrence of an item.
    ///
    /// Returns `false` if the item is not held.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let Some(index) = self.items.iter().position(|held| held.id == id) else {
            tracing::debug!(item = id, "item not in inventory");
            return false;
        };

        let removed = self.items.remove(index);
        tracing::debug!(item = id, name = %removed.display_name, "item removed");

        self.events.publish(&InventoryEvent::ItemRemoved(removed));
        self.events.publish(&InventoryEvent::Changed);
        true
    }

    /// Removes every item of a type and returns how many went.
    pub fn remove_all_by_type(&mut self, item_type: ItemType) -> usize {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|held| held.item_type == item_type);
        self.items = kept;

        if !removed.is_empty() {
            tracing::debug!(count = removed.len(), ?item_type, "items removed by type");
            for item in &removed {
                self.events.publish(&InventoryEvent::ItemRemoved(Arc::clone(item)));
            }
            self.events.publish(&InventoryEvent::Changed);
        }

        removed.len()
    }

    /// Empties the inventory and returns how many items were held.
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        tracing::debug!(count, "inventory cleared");
        self.events.publish(&InventoryEvent::Changed);
        count
    }

    /// Checks if an item is held.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|held| held.id == id)
    }

    /// Checks if any item of a type is held.
    #[must_use]
    pub fn contains_type(&self, item_type: ItemType) -> bool {
        self.items.iter().any(|held| held.item_type == item_type)
    }

    /// Copies of an item held.
    #[must_use]
    pub fn count_of(&self, id: ItemId) -> usize {
        self.items.iter().filter(|held| held.id == id).count()
    }

    /// Items of a type held.
    #[must_use]
    pub fn count_by_type(&self, item_type: ItemType) -> usize {
        self.items.iter().filter(|held| held.item_type == item_type).count()
    }

    /// Items of a rarity held.
    #[must_use]
    pub fn count_by_rarity(&self, rarity: Rarity) -> usize {
        self.items.iter().filter(|held| held.rarity == rarity).count()
    }

    /// Held items of a type.
    #[must_use]
    pub fn items_by_type(&self, item_type: ItemType) -> Vec<Arc<ItemCatalogEntry>> {
        self.filtered(|held| held.item_type == item_type)
    }

    /// Held items of a rarity.
    #[must_use]
    pub fn items_by_rarity(&self, rarity: Rarity) -> Vec<Arc<ItemCatalogEntry>> {
        self.filtered(|held| held.rarity == rarity)
    }

    /// Held quest items.
    #[must_use]
    pub fn quest_items(&self) -> Vec<Arc<ItemCatalogEntry>> {
        self.filtered(|held| held.is_quest_item)
    }

    /// First held item whose name matches, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<ItemCatalogEntry>> {
        let wanted = name.to_lowercase();
        self.items
            .iter()
            .find(|held| held.display_name.to_lowercase() == wanted)
    }

    /// Held items whose name contains `text`, ignoring case.
    #[must_use]
    pub fn search_by_name(&self, text: &str) -> Vec<Arc<ItemCatalogEntry>> {
        let needle = text.to_lowercase();
        self.filtered(|held| held.display_name.to_lowercase().contains(&needle))
    }

    /// Summary counts.
    #[must_use]
    pub fn stats(&self) -> InventoryStats {
        InventoryStats {
            total: self.items.len(),
            capacity: self.capacity,
            common: self.count_by_rarity(Rarity::Common),
            uncommon: self.count_by_rarity(Rarity::Uncommon),
            rare: self.count_by_rarity(Rarity::Rare),
        }
    }

    fn filtered(&self, keep: impl Fn(&ItemCatalogEntry) -> bool) -> Vec<Arc<ItemCatalogEntry>> {
        self.items
            .iter()
            .filter(|held| keep(held))
            .cloned()
            .collect()
    }
}

fn saturating_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: ItemId, name: &str, item_type: ItemType, rarity: Rarity) -> Arc<ItemCatalogEntry> {
        Arc::new(ItemCatalogEntry::new(id, name, item_type, rarity))
    }

    fn flashlight() -> Arc<ItemCatalogEntry> {
        entry(6, "Flashlight", ItemType::Tool, Rarity::Common)
    }

    fn master_key() -> Arc<ItemCatalogEntry> {
        entry(2, "Master Key", ItemType::Key, Rarity::Rare)
    }

    #[test]
    fn test_add_respects_capacity() {
        let mut inv = Inventory::new(Limit::AtMost(2), true);
        assert!(inv.add(flashlight()));
        assert!(inv.add(flashlight()));
        assert!(inv.is_full());
        assert!(!inv.add(master_key()));
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.free_space(), Some(0));
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let mut inv = Inventory::new(Limit::AtMost(0), true);
        assert!(!inv.add(flashlight()));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_duplicates_rejected_when_disallowed() {
        let mut inv = Inventory::new(Limit::Unlimited, false);
        let added = [flashlight(), flashlight(), master_key(), flashlight(), master_key()]
            .into_iter()
            .filter(|item| inv.add(Arc::clone(item)))
            .count();
        assert_eq!(added, 2);
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.count_of(6), 1);
        assert_eq!(inv.free_space(), None);
    }

    #[test]
    fn test_failed_add_publishes_nothing() {
        let mut inv = Inventory::new(Limit::AtMost(1), false);
        let rx = inv.subscribe();
        assert!(inv.add(flashlight()));
        assert_eq!(rx.drain().len(), 2);

        assert!(!inv.add(master_key()));
        assert!(!rx.has_events());
    }

    #[test]
    fn test_notifications_follow_commit() {
        let mut inv = Inventory::new(Limit::Unlimited, true);
        let rx = inv.subscribe();
        let key = master_key();

        inv.add(Arc::clone(&key));
        assert_eq!(inv.len(), 1);
        assert_eq!(
            rx.drain(),
            vec![InventoryEvent::ItemAdded(Arc::clone(&key)), InventoryEvent::Changed]
        );

        assert!(inv.remove(key.id));
        assert_eq!(
            rx.drain(),
            vec![InventoryEvent::ItemRemoved(key), InventoryEvent::Changed]
        );
    }

    #[test]
    fn test_lazy_subscriber_sees_every_add() {
        let mut inv = Inventory::new(Limit::Unlimited, true);
        let rx = inv.subscribe();
        for _ in 0..200 {
            assert!(inv.add(flashlight()));
        }

        let events = rx.drain();
        let added = events
            .iter()
            .filter(|event| matches!(event, InventoryEvent::ItemAdded(_)))
            .count();
        assert_eq!(added, 200);
        assert_eq!(events.len(), 400);
        assert_eq!(inv.len(), 200);
    }

    #[test]
    fn test_remove_missing_item() {
        let mut inv = Inventory::new(Limit::Unlimited, true);
        let rx = inv.subscribe();
        assert!(!inv.remove(99));
        assert!(!rx.has_events());
    }

    #[test]
    fn test_remove_takes_first_occurrence() {
        let mut inv = Inventory::new(Limit::Unlimited, true);
        inv.add(flashlight());
        inv.add(master_key());
        inv.add(flashlight());
        assert!(inv.remove(6));
        let ids: Vec<_> = inv.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, [2, 6]);
    }

    #[test]
    fn test_remove_all_by_type() {
        let mut inv = Inventory::new(Limit::Unlimited, true);
        inv.add(flashlight());
        inv.add(master_key());
        inv.add(entry(7, "Portable Radio", ItemType::Tool, Rarity::Uncommon));
        let rx = inv.subscribe();

        assert_eq!(inv.remove_all_by_type(ItemType::Tool), 2);
        assert_eq!(inv.len(), 1);
        assert!(!inv.contains_type(ItemType::Tool));
        let events = rx.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events.last(), Some(&InventoryEvent::Changed));

        assert_eq!(inv.remove_all_by_type(ItemType::Evidence), 0);
        assert!(!rx.has_events());
    }

    #[test]
    fn test_queries() {
        let mut inv = Inventory::new(Limit::AtMost(50), true);
        inv.add(flashlight());
        inv.add(master_key());
        inv.add(Arc::new(
            ItemCatalogEntry::new(5, "Critical Evidence", ItemType::Document, Rarity::Rare)
                .for_quest("case_01"),
        ));

        assert!(inv.contains(2));
        assert_eq!(inv.count_by_type(ItemType::Key), 1);
        assert_eq!(inv.count_by_rarity(Rarity::Rare), 2);
        assert_eq!(inv.items_by_rarity(Rarity::Rare).len(), 2);
        assert_eq!(inv.items_by_type(ItemType::Tool)[0].id, 6);
        assert_eq!(inv.quest_items().len(), 1);
        assert_eq!(inv.find_by_name("master KEY").map(|i| i.id), Some(2));
        assert!(inv.find_by_name("Master").is_none());
        assert_eq!(inv.search_by_name("e").len(), 2);
        assert_eq!(inv.free_space(), Some(47));
    }

    #[test]
    fn test_stats_summary() {
        let mut inv = Inventory::new(Limit::Unlimited, true);
        inv.add(flashlight());
        inv.add(master_key());
        let stats = inv.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.common, 1);
        assert_eq!(stats.rare, 1);
        assert_eq!(
            stats.to_string(),
            "Inventory (2/∞)\nCommon: 1\nUncommon: 0\nRare: 1"
        );
    }

    #[test]
    fn test_clear_reports_count() {
        let mut inv = Inventory::new(Limit::Unlimited, true);
        inv.add(flashlight());
        inv.add(flashlight());
        let rx = inv.subscribe();
        assert_eq!(inv.clear(), 2);
        assert!(inv.is_empty());
        assert_eq!(rx.drain(), vec![InventoryEvent::Changed]);
    }
}
