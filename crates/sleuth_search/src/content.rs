//! # Content Loading
//!
//! Item catalog and search-area layout authored in TOML.
//!
//! ```toml
//! [[items]]
//! id = 1
//! display_name = "Office Key"
//! type = "key"
//! rarity = "common"
//!
//! [[areas]]
//! id = 10
//! name = "file_cabinet"
//! base_chance = 50.0
//! items = [1]
//! max_searches = 1
//! ```
//!
//! An area that names an unknown item keeps loading: the reference is
//! skipped with a warning, exactly like an empty slot in the authoring
//! tool. An area left with no valid items still loads and simply never
//! yields anything.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::area::{AreaId, SearchArea, DEFAULT_PROMPT};
use crate::catalog::{Catalog, ItemCatalogEntry, ItemId};
use crate::error::{SearchError, SearchResult};
use crate::limit::Limit;

/// Authoring form of a search area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaSpec {
    /// Unique area id.
    pub id: AreaId,
    /// Scene object name.
    pub name: String,
    /// Base chance in percent.
    pub base_chance: f64,
    /// Candidate item ids, in order.
    #[serde(default)]
    pub items: Vec<ItemId>,
    /// Cooldown between searches.
    #[serde(default)]
    pub cooldown_seconds: f64,
    /// Search limit (`-1` = unlimited).
    #[serde(default)]
    pub max_searches: Limit,
    /// Interaction prompt.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Overrides removal after a resolved search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removes_after_search: Option<bool>,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_owned()
}

impl AreaSpec {
    /// Checks authored numbers.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidConfig` if the base chance is outside
    /// `[0, 100]` or the cooldown is negative.
    pub fn validate(&self) -> SearchResult<()> {
        if !(0.0..=100.0).contains(&self.base_chance) {
            return Err(SearchError::InvalidConfig(format!(
                "area {} base_chance must be in [0, 100], got {}",
                self.id, self.base_chance
            )));
        }
        if self.cooldown_seconds.is_nan() || self.cooldown_seconds < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "area {} cooldown_seconds must be >= 0, got {}",
                self.id, self.cooldown_seconds
            )));
        }
        Ok(())
    }

    /// Builds a runtime area, resolving item ids against the catalog.
    #[must_use]
    pub fn build(&self, catalog: &Catalog) -> SearchArea {
        let candidates = self
            .items
            .iter()
            .filter_map(|&id| {
                let found = catalog.get(id).cloned();
                if found.is_none() {
                    tracing::warn!(area = self.id, item = id, "area references unknown item, skipped");
                }
                found
            })
            .collect();

        let area = SearchArea::new(self.id, self.name.clone(), self.base_chance)
            .with_candidates(candidates)
            .with_cooldown(self.cooldown_seconds)
            .with_max_searches(self.max_searches)
            .with_prompt(self.prompt.clone());

        match self.removes_after_search {
            Some(removes) => area.with_removal(removes),
            None => area,
        }
    }
}

/// On-disk shape of a content file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContentFile {
    /// Item definitions.
    #[serde(default)]
    pub items: Vec<ItemCatalogEntry>,
    /// Search areas.
    #[serde(default)]
    pub areas: Vec<AreaSpec>,
}

/// Loaded content: a catalog plus ready-to-use areas.
#[derive(Clone, Debug, Default)]
pub struct ContentPack {
    /// All items.
    pub catalog: Catalog,
    /// All areas, in authoring order.
    pub areas: Vec<SearchArea>,
}

impl ContentPack {
    /// Builds a pack from its on-disk form.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::DuplicateItem` or `SearchError::DuplicateArea`
    /// when ids collide, and `SearchError::InvalidConfig` for an area with
    /// out-of-range numbers.
    pub fn from_file(file: ContentFile) -> SearchResult<Self> {
        let catalog = Catalog::from_entries(file.items)?;

        let mut seen = HashSet::new();
        let mut areas = Vec::with_capacity(file.areas.len());
        for spec in &file.areas {
            if !seen.insert(spec.id) {
                return Err(SearchError::DuplicateArea(spec.id));
            }
            spec.validate()?;
            areas.push(spec.build(&catalog));
        }

        tracing::info!(items = catalog.len(), areas = areas.len(), "content loaded");
        Ok(Self { catalog, areas })
    }

    /// Parses a pack from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Parse` for malformed TOML, otherwise see
    /// [`ContentPack::from_file`].
    pub fn from_toml_str(text: &str) -> SearchResult<Self> {
        let file: ContentFile = toml::from_str(text)?;
        Self::from_file(file)
    }

    /// Loads a pack from disk.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Io` if the file cannot be read, otherwise see
    /// [`ContentPack::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SearchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemType, Rarity};

    const SAMPLE: &str = r#"
        [[items]]
        id = 1
        display_name = "Office Key"
        type = "key"
        rarity = "common"

        [[items]]
        id = 2
        display_name = "Master Key"
        type = "key"
        rarity = "rare"
        is_quest_item = true
        quest_id = "case_01"

        [[areas]]
        id = 10
        name = "file_cabinet"
        base_chance = 50.0
        items = [1, 2, 99]
        max_searches = 1

        [[areas]]
        id = 11
        name = "desk"
        base_chance = 40.0
        cooldown_seconds = 2.5
        prompt = "Press E to search the desk"
    "#;

    #[test]
    fn test_sample_loads() {
        let pack = ContentPack::from_toml_str(SAMPLE).unwrap();
        assert_eq!(pack.catalog.len(), 2);
        assert_eq!(pack.areas.len(), 2);

        let cabinet = &pack.areas[0];
        assert_eq!(cabinet.candidates().len(), 2, "unknown item 99 skipped");
        assert_eq!(cabinet.max_searches(), Limit::AtMost(1));
        assert!(cabinet.removes_after_search());
        assert_eq!(cabinet.interaction_prompt(), DEFAULT_PROMPT);

        let desk = &pack.areas[1];
        assert!(desk.candidates().is_empty());
        assert_eq!(desk.max_searches(), Limit::Unlimited);
        assert!((desk.cooldown_seconds() - 2.5).abs() < f64::EPSILON);
        assert_eq!(desk.interaction_prompt(), "Press E to search the desk");

        let master = pack.catalog.get(2).unwrap();
        assert_eq!(master.item_type, ItemType::Key);
        assert_eq!(master.rarity, Rarity::Rare);
        assert!(master.is_quest_item);
    }

    #[test]
    fn test_duplicate_area_rejected() {
        let text = r#"
            [[areas]]
            id = 1
            name = "a"
            base_chance = 10.0

            [[areas]]
            id = 1
            name = "b"
            base_chance = 20.0
        "#;
        assert!(matches!(
            ContentPack::from_toml_str(text),
            Err(SearchError::DuplicateArea(1))
        ));
    }

    #[test]
    fn test_out_of_range_base_chance_rejected() {
        for chance in ["150.0", "-3.0", "nan"] {
            let text = format!(
                "[[areas]]\nid = 7\nname = \"safe\"\nbase_chance = {chance}\n"
            );
            assert!(
                matches!(ContentPack::from_toml_str(&text), Err(SearchError::InvalidConfig(_))),
                "base_chance {chance} accepted"
            );
        }
    }

    #[test]
    fn test_negative_cooldown_rejected() {
        let text = "[[areas]]\nid = 7\nname = \"safe\"\nbase_chance = 10.0\ncooldown_seconds = -1.0\n";
        assert!(matches!(
            ContentPack::from_toml_str(text),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        assert!(matches!(
            ContentPack::from_toml_str("[[areas]\nid = "),
            Err(SearchError::Parse(_))
        ));
    }
}
