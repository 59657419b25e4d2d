//! Integration tests for the in-memory reference store.

use mudengine_store::{
    BUILDER_ROOM_ID, MemoryStore, STAFF_ZONE_ID, Store, StoreError, WorldSeed,
};
use mudengine_types::{ExitDraft, ExitId, Keywords, RoomDraft, RoomId, ZoneDraft, ZoneId};

// =========================================================================
// Helpers
// =========================================================================

async fn store_with_zone() -> (MemoryStore, ZoneId) {
    let store = MemoryStore::new();
    let zone = store.create_zone(ZoneDraft::new("Town")).await.unwrap();
    (store, zone.id)
}

fn kw(words: &[&str]) -> Keywords {
    Keywords::new(words.iter().copied()).unwrap()
}

// =========================================================================
// Rooms
// =========================================================================

#[tokio::test]
async fn test_create_room_assigns_id_and_timestamps() {
    let (store, zone) = store_with_zone().await;

    let room = store.create_room(RoomDraft::new(zone, "Hall")).await.unwrap();

    assert!(!room.id.as_str().is_empty());
    assert_eq!(room.created_at, room.updated_at);
    assert!(room.created_at.timestamp() > 0);
    assert_eq!(store.room(&room.id).await.unwrap(), room);
}

#[tokio::test]
async fn test_create_room_unknown_zone_is_constraint_error() {
    let store = MemoryStore::new();
    let result = store.create_room(RoomDraft::new("nowhere".into(), "Hall")).await;
    assert!(matches!(result, Err(StoreError::Constraint(_))));
}

#[tokio::test]
async fn test_create_room_duplicate_pinned_id_is_constraint_error() {
    let (store, zone) = store_with_zone().await;
    let draft = RoomDraft::new(zone, "Hall").with_id(RoomId::from("hall"));
    store.create_room(draft.clone()).await.unwrap();

    assert!(matches!(
        store.create_room(draft).await,
        Err(StoreError::Constraint(_))
    ));
}

#[tokio::test]
async fn test_all_rooms_ordered_by_title() {
    let (store, zone) = store_with_zone().await;
    for title in ["Cellar", "Attic", "Bedroom"] {
        store.create_room(RoomDraft::new(zone.clone(), title)).await.unwrap();
    }

    let titles: Vec<String> = store
        .all_rooms()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.title)
        .collect();

    assert_eq!(titles, ["Attic", "Bedroom", "Cellar"]);
}

#[tokio::test]
async fn test_update_room_keeps_created_at_and_bumps_updated_at() {
    let (store, zone) = store_with_zone().await;
    let mut room = store.create_room(RoomDraft::new(zone, "Hall")).await.unwrap();
    let created_at = room.created_at;

    room.title = "Great Hall".into();
    let updated = store.update_room(&room).await.unwrap();

    assert_eq!(updated.title, "Great Hall");
    assert_eq!(updated.created_at, created_at);
    assert!(updated.updated_at >= created_at);
}

#[tokio::test]
async fn test_update_room_missing_returns_not_found() {
    let (store, zone) = store_with_zone().await;
    let room = store.create_room(RoomDraft::new(zone, "Hall")).await.unwrap();
    store.delete_room(&room.id).await.unwrap();

    let err = store.update_room(&room).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_room_cascades_exits_both_directions() {
    let (store, zone) = store_with_zone().await;
    let a = store.create_room(RoomDraft::new(zone.clone(), "A")).await.unwrap();
    let b = store.create_room(RoomDraft::new(zone, "B")).await.unwrap();
    store
        .create_exit(ExitDraft::new(a.id.clone(), b.id.clone(), kw(&["north"])))
        .await
        .unwrap();
    store
        .create_exit(ExitDraft::new(b.id.clone(), a.id.clone(), kw(&["south"])))
        .await
        .unwrap();

    store.delete_room(&b.id).await.unwrap();

    assert!(store.exits_from(&a.id).await.unwrap().is_empty());
    assert!(store.room(&b.id).await.unwrap_err().is_not_found());
    assert!(store.delete_room(&b.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_rooms_in_zone_filters_by_zone() {
    let (store, town) = store_with_zone().await;
    let forest = store.create_zone(ZoneDraft::new("Forest")).await.unwrap().id;
    store.create_room(RoomDraft::new(town.clone(), "Square")).await.unwrap();
    store.create_room(RoomDraft::new(forest.clone(), "Glade")).await.unwrap();
    store.create_room(RoomDraft::new(forest.clone(), "Clearing")).await.unwrap();

    assert_eq!(store.rooms_in_zone(&town).await.unwrap().len(), 1);
    let forest_titles: Vec<String> = store
        .rooms_in_zone(&forest)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(forest_titles, ["Clearing", "Glade"]);
}

// =========================================================================
// Exits
// =========================================================================

#[tokio::test]
async fn test_create_exit_dangling_endpoint_is_constraint_error() {
    let (store, zone) = store_with_zone().await;
    let a = store.create_room(RoomDraft::new(zone, "A")).await.unwrap();

    let result = store
        .create_exit(ExitDraft::new(a.id.clone(), "ghost".into(), kw(&["north"])))
        .await;

    assert!(matches!(result, Err(StoreError::Constraint(_))));
}

#[tokio::test]
async fn test_exits_from_keeps_definition_order() {
    let (store, zone) = store_with_zone().await;
    let a = store.create_room(RoomDraft::new(zone.clone(), "A")).await.unwrap();
    let b = store.create_room(RoomDraft::new(zone, "B")).await.unwrap();
    for word in ["west", "east", "up"] {
        store
            .create_exit(ExitDraft::new(a.id.clone(), b.id.clone(), kw(&[word])))
            .await
            .unwrap();
    }

    let order: Vec<String> = store
        .exits_from(&a.id)
        .await
        .unwrap()
        .iter()
        .map(|e| e.keywords.primary().to_string())
        .collect();

    assert_eq!(order, ["west", "east", "up"]);
}

#[tokio::test]
async fn test_delete_exit_missing_returns_not_found() {
    let store = MemoryStore::new();
    let err = store.delete_exit(&ExitId::from("nope")).await.unwrap_err();
    assert!(err.is_not_found());
}

// =========================================================================
// Zones and seeds
// =========================================================================

#[tokio::test]
async fn test_all_zones_ordered_by_name() {
    let store = MemoryStore::new();
    store.create_zone(ZoneDraft::new("Wilds")).await.unwrap();
    store.create_zone(ZoneDraft::new("Docks")).await.unwrap();

    let names: Vec<String> = store
        .all_zones()
        .await
        .unwrap()
        .into_iter()
        .map(|z| z.name)
        .collect();

    assert_eq!(names, ["Docks", "Wilds"]);
}

#[tokio::test]
async fn test_from_seed_starter_has_builder_room() {
    let store = MemoryStore::from_seed(WorldSeed::starter()).await.unwrap();

    let room = store.room(&RoomId::from(BUILDER_ROOM_ID)).await.unwrap();
    assert_eq!(room.title, "The Builder Break Room");
    assert_eq!(room.zone_id.as_str(), STAFF_ZONE_ID);
    assert_eq!(store.all_zones().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_from_seed_json_links_rooms() {
    let seed = WorldSeed::from_json(
        r#"{
            "zones": [{"id": "town", "name": "Town"}],
            "rooms": [
                {"id": "square", "zone_id": "town", "title": "Town Square"},
                {"id": "gate", "zone_id": "town", "title": "North Gate"}
            ],
            "exits": [{"from": "square", "to": "gate", "keywords": ["north", "n"]}]
        }"#,
    )
    .unwrap();

    let store = MemoryStore::from_seed(seed).await.unwrap();
    let exits = store.exits_from(&RoomId::from("square")).await.unwrap();

    assert_eq!(exits.len(), 1);
    assert_eq!(exits[0].to.as_str(), "gate");
    assert!(exits[0].open);
}
