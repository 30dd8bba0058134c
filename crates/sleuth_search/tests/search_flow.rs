//! Integration test for the shipped search data and the search-to-inventory flow.

use sleuth_search::{
    ContentPack, Inventory, InventoryEvent, ItemType, Limit, Rarity, ScriptedDraw, SearchConfig,
    SearchEvent, SearchFailure, SearchResolver, SearchService,
};
use std::path::PathBuf;

fn data_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(relative)
}

fn shipped() -> (SearchConfig, ContentPack) {
    let config = SearchConfig::load(data_path("config/search.toml")).unwrap();
    let content = ContentPack::load(data_path("content/police_office.toml")).unwrap();
    (config, content)
}

#[test]
fn test_shipped_data_loads() {
    let (config, content) = shipped();
    assert_eq!(config, SearchConfig {
        seed: config.seed,
        ..SearchConfig::default()
    });

    assert_eq!(content.catalog.len(), 8);
    let bases: Vec<f64> = content.areas.iter().map(|a| a.base_chance_percent()).collect();
    assert_eq!(bases, vec![50.0, 40.0, 45.0, 35.0, 30.0]);
    for area in &content.areas {
        let pool = area.candidates().len();
        assert!((3..=4).contains(&pool), "{} has {pool} items", area.name());
    }

    let quest: Vec<_> = content.catalog.iter().filter(|item| item.is_quest_item).collect();
    assert_eq!(quest.len(), 1);
    assert_eq!(quest[0].quest_id.as_deref(), Some("case_01"));
}

#[test]
fn test_found_items_land_in_inventory() {
    let (config, mut content) = shipped();
    let mut service = SearchService::with_draw(
        SearchResolver::from_config(&config),
        ScriptedDraw::new().with_rolls([0.0, 0.0, 99.0]).with_picks([0, 29]),
    );
    let mut inventory = Inventory::from_config(&config.inventory);
    let inventory_events = inventory.subscribe();
    let search_events = service.subscribe();

    let cabinet = &mut content.areas[0];
    cabinet.set_player_in_range(true);

    // Pool is Common(10) + Uncommon(7) + Rare(4) = 21; slot 0 is the report.
    let first = service.search(cabinet, 0.0);
    let report = first.item.clone().unwrap();
    assert_eq!(report.display_name, "Police Report");
    assert!(inventory.add(report));

    // 29 % 21 = 8 -> still the report.
    let second = service.search(cabinet, 1.0);
    assert_eq!(second.item.as_ref().unwrap().id, 3);
    assert_eq!(second.chance, Some(42.5));
    assert!(inventory.add(second.item.unwrap()));

    let third = service.search(cabinet, 2.0);
    assert!(matches!(third.failure, Some(SearchFailure::NothingFound { .. })));

    assert_eq!(inventory.count_of(3), 2);
    assert_eq!(inventory.count_by_type(ItemType::Document), 2);
    assert_eq!(inventory.count_by_rarity(Rarity::Common), 2);
    assert_eq!(
        inventory_events.drain().iter().filter(|e| **e == InventoryEvent::Changed).count(),
        2
    );

    let outcomes: Vec<_> = search_events
        .drain()
        .into_iter()
        .filter(|e| !matches!(e, SearchEvent::Started { .. }))
        .collect();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[2], SearchEvent::Failed { area: 101 });
    assert_eq!(service.ledger().count(101), 3);
}

#[test]
fn test_one_shot_locker() {
    let (config, mut content) = shipped();
    let mut service = SearchService::from_config(&config);

    let locker = content.areas.iter_mut().find(|a| a.name() == "locker").unwrap();
    assert_eq!(locker.max_searches(), Limit::AtMost(1));
    assert!(locker.removes_after_search());
    locker.set_player_in_range(true);

    let _ = service.search(locker, 0.0);
    assert!(locker.is_exhausted());

    let again = service.search(locker, 60.0);
    assert_eq!(again.message, "This area has already been investigated");
    assert_eq!(service.ledger().count(locker.id()), 1);
}

#[test]
fn test_bookshelf_cooldown_message() {
    let (config, mut content) = shipped();
    let mut service = SearchService::from_config(&config);

    let shelf = content.areas.iter_mut().find(|a| a.name() == "bookshelf").unwrap();
    shelf.set_player_in_range(true);
    let _ = service.search(shelf, 10.0);

    let early = service.search(shelf, 11.5);
    assert_eq!(early.message, "Wait 3.5 seconds before investigating again");
    assert_eq!(service.ledger().count(shelf.id()), 1);
    assert!(service.search(shelf, 15.0).failure.map_or(true, |f| f.was_resolved()));
}

#[test]
fn test_small_inventory_rejects_overflow() {
    let (_, content) = shipped();
    let mut inventory = Inventory::new(Limit::AtMost(2), false);

    let key = content.catalog.get(1).unwrap().clone();
    let radio = content.catalog.get(7).unwrap().clone();
    let torch = content.catalog.get(6).unwrap().clone();

    assert!(inventory.add(key.clone()));
    assert!(!inventory.add(key), "duplicate rejected");
    assert!(inventory.add(radio));
    assert!(inventory.is_full());
    assert!(!inventory.add(torch));
    assert_eq!(inventory.len(), 2);
    assert_eq!(inventory.stats().to_string(), "Inventory (2/2)\nCommon: 1\nUncommon: 1\nRare: 0");
}
