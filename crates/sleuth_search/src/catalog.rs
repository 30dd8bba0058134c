//! # Item Catalog
//!
//! Authoring-time item definitions. Entries are immutable once loaded and
//! shared by `Arc` between search areas and inventories; identity is the
//! [`ItemId`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{SearchError, SearchResult};

/// Unique identifier for an item definition.
pub type ItemId = u32;

/// Broad category of a findable item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Physical evidence.
    Evidence,
    /// Papers, reports, files.
    Document,
    /// Usable tools.
    Tool,
    /// Keys.
    Key,
    /// Anything else.
    Misc,
}

/// Rarity tier of an item.
///
/// Drives both the selection weight (see
/// [`RarityWeights`](crate::config::RarityWeights)) and the display colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Common items (white).
    Common,
    /// Uncommon items (green).
    Uncommon,
    /// Rare items (purple).
    Rare,
}

impl Rarity {
    /// Every tier, lowest first.
    pub const ALL: [Self; 3] = [Self::Common, Self::Uncommon, Self::Rare];

    /// Display colour for found-item messages.
    #[inline]
    #[must_use]
    pub const fn color(self) -> RarityColor {
        match self {
            Self::Common => RarityColor::WHITE,
            Self::Uncommon => RarityColor::new(0.2, 0.8, 0.2),
            Self::Rare => RarityColor::new(0.5, 0.3, 1.0),
        }
    }

    /// Human-readable tier name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
        }
    }
}

/// Linear RGB colour handed to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RarityColor {
    /// Red channel in `[0, 1]`.
    pub r: f32,
    /// Green channel in `[0, 1]`.
    pub g: f32,
    /// Blue channel in `[0, 1]`.
    pub b: f32,
}

impl RarityColor {
    /// Neutral white, used for plain messages and common items.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a colour from its channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A single findable item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCatalogEntry {
    /// Unique identifier.
    pub id: ItemId,
    /// Name shown to the player.
    pub display_name: String,
    /// Flavour text.
    #[serde(default)]
    pub description: String,
    /// Category.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Rarity tier.
    #[serde(default = "default_rarity")]
    pub rarity: Rarity,
    /// Whether the item advances a quest.
    #[serde(default)]
    pub is_quest_item: bool,
    /// Quest this item belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quest_id: Option<String>,
}

const fn default_rarity() -> Rarity {
    Rarity::Common
}

impl ItemCatalogEntry {
    /// Creates a non-quest entry.
    #[must_use]
    pub fn new(
        id: ItemId,
        display_name: impl Into<String>,
        item_type: ItemType,
        rarity: Rarity,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            description: String::new(),
            item_type,
            rarity,
            is_quest_item: false,
            quest_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the entry as a quest item.
    #[must_use]
    pub fn for_quest(mut self, quest_id: impl Into<String>) -> Self {
        self.is_quest_item = true;
        self.quest_id = Some(quest_id.into());
        self
    }
}

/// The set of all authored items, indexed by id.
///
/// Keeps authoring order for listings.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<Arc<ItemCatalogEntry>>,
    by_id: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of entries.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::DuplicateItem` if two entries share an id.
    pub fn from_entries(entries: impl IntoIterator<Item = ItemCatalogEntry>) -> SearchResult<Self> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    /// Adds an entry and returns the shared handle.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::DuplicateItem` if the id is taken.
    pub fn insert(&mut self, entry: ItemCatalogEntry) -> SearchResult<Arc<ItemCatalogEntry>> {
        if self.by_id.contains_key(&entry.id) {
            return Err(SearchError::DuplicateItem(entry.id));
        }
        let shared = Arc::new(entry);
        self.by_id.insert(shared.id, self.entries.len());
        self.entries.push(Arc::clone(&shared));
        Ok(shared)
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Arc<ItemCatalogEntry>> {
        self.by_id.get(&id).map(|&index| &self.entries[index])
    }

    /// Iterates entries in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ItemCatalogEntry>> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_fixed() {
        assert_eq!(Rarity::Common.color(), RarityColor::WHITE);
        assert_eq!(Rarity::Uncommon.color(), RarityColor::new(0.2, 0.8, 0.2));
        assert_eq!(Rarity::Rare.color(), RarityColor::new(0.5, 0.3, 1.0));
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let mut catalog = Catalog::new();
        catalog
            .insert(ItemCatalogEntry::new(1, "Flashlight", ItemType::Tool, Rarity::Common))
            .unwrap();
        let err = catalog
            .insert(ItemCatalogEntry::new(1, "Radio", ItemType::Tool, Rarity::Uncommon))
            .unwrap_err();
        assert!(matches!(err, SearchError::DuplicateItem(1)));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_catalog_shares_entries() {
        let catalog = Catalog::from_entries([
            ItemCatalogEntry::new(1, "Office Key", ItemType::Key, Rarity::Common),
            ItemCatalogEntry::new(2, "Master Key", ItemType::Key, Rarity::Rare),
        ])
        .unwrap();

        let a = catalog.get(2).unwrap();
        let b = catalog.get(2).unwrap();
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(a.display_name, "Master Key");
        assert!(catalog.get(3).is_none());
        let names: Vec<_> = catalog.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, ["Office Key", "Master Key"]);
    }

    #[test]
    fn test_entry_parses_from_toml() {
        let entry: ItemCatalogEntry = toml::from_str(
            r#"
            id = 8
            display_name = "Fingerprint"
            type = "evidence"
            rarity = "rare"
            "#,
        )
        .unwrap();
        assert_eq!(entry.item_type, ItemType::Evidence);
        assert_eq!(entry.rarity, Rarity::Rare);
        assert!(!entry.is_quest_item);
        assert!(entry.description.is_empty());
    }

    #[test]
    fn test_quest_builder() {
        let entry = ItemCatalogEntry::new(5, "Critical Evidence", ItemType::Document, Rarity::Rare)
            .with_description("Crucial for the case.")
            .for_quest("case_01");
        assert!(entry.is_quest_item);
        assert_eq!(entry.quest_id.as_deref(), Some("case_01"));
    }
}
