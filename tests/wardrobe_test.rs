//! End-to-end tests for the wardrobe store and its persistence contract

use styleai::types::{Category, ClothingItem};
use styleai::wardrobe::WardrobeStore;
use tempfile::tempdir;

fn item(category: Category, description: &str) -> ClothingItem {
    ClothingItem::new(
        "data:image/jpeg;base64,QUJD".to_string(),
        category,
        description.to_string(),
    )
}

#[test]
fn full_session_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wardrobe.json");

    // Session 1: build up a small wardrobe
    let mut store = WardrobeStore::load(&path);
    assert!(store.is_empty());

    let tee = item(Category::Tops, "white tee");
    let jeans = item(Category::Pants, "blue jeans");
    let sneakers = item(Category::Footwear, "white sneakers");
    let jeans_id = jeans.id.clone();

    store.add(tee).unwrap();
    store.add(jeans).unwrap();
    store.add(sneakers).unwrap();
    store.toggle_clean(&jeans_id).unwrap();

    // Session 2: everything survives the restart
    let store = WardrobeStore::load(&path);
    assert_eq!(store.len(), 3);
    assert_eq!(store.count_dirty(), 1);
    assert!(!store.find(&jeans_id).unwrap().is_clean);

    let clean: Vec<&str> = store
        .view_by_cleanliness(true)
        .iter()
        .map(|i| i.description.as_str())
        .collect();
    assert_eq!(clean, vec!["white sneakers", "white tee"]);
}

#[test]
fn malformed_snapshot_never_raises() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wardrobe.json");

    for garbage in ["", "null", "12", "{\"a\":1}", "[{\"id\": 1}]", "\u{0}\u{1}binary"] {
        std::fs::write(&path, garbage).unwrap();
        let store = WardrobeStore::load(&path);
        assert!(store.is_empty(), "snapshot {:?} should load as empty", garbage);
    }
}

#[test]
fn stored_layout_matches_contract() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wardrobe.json");

    let mut store = WardrobeStore::load(&path);
    store.add(item(Category::Hoodies, "grey zip hoodie")).unwrap();

    // One key, a JSON array of records with camelCase fields, category as a
    // display string, booleans as booleans, timestamps as numbers
    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["category"], "Hoodies");
    assert_eq!(record["isClean"], true);
    assert!(record["createdAt"].is_number());
    assert!(record["id"].is_string());
    assert!(record["image"].as_str().unwrap().starts_with("data:image/"));
}

#[test]
fn laundry_cycle_scenario() {
    let dir = tempdir().unwrap();
    let mut store = WardrobeStore::load(dir.path().join("wardrobe.json"));

    let a = item(Category::Tops, "A");
    let b = item(Category::Tops, "B");
    let (a_id, b_id) = (a.id.clone(), b.id.clone());
    store.add(a).unwrap();
    store.add(b).unwrap();

    store.toggle_clean(&b_id).unwrap();
    assert_eq!(store.count_dirty(), 1);

    store.toggle_clean(&a_id).unwrap();
    assert_eq!(store.count_dirty(), 2);
    assert!(store.view_by_cleanliness(true).is_empty());

    // Wash everything
    store.toggle_clean(&a_id).unwrap();
    store.toggle_clean(&b_id).unwrap();
    assert_eq!(store.count_dirty(), 0);
    assert_eq!(store.view_by_cleanliness(true).len(), 2);
}

#[test]
fn grouping_is_a_permutation_of_the_view() {
    let dir = tempdir().unwrap();
    let mut store = WardrobeStore::load(dir.path().join("wardrobe.json"));

    for (cat, desc) in [
        (Category::Tops, "tee"),
        (Category::Footwear, "boots"),
        (Category::Tops, "shirt"),
        (Category::Accessories, "belt"),
        (Category::Footwear, "sandals"),
    ] {
        store.add(item(cat, desc)).unwrap();
    }

    let view = store.view_by_cleanliness(true);
    let groups = WardrobeStore::group_by_category(&view);

    let mut flattened: Vec<&str> = groups
        .iter()
        .flat_map(|(_, members)| members.iter().map(|i| i.id.as_str()))
        .collect();
    flattened.sort();
    let mut expected: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
    expected.sort();
    assert_eq!(flattened, expected);

    for (category, members) in &groups {
        // Within a category, relative order matches the input view
        let in_view: Vec<&str> = view
            .iter()
            .filter(|i| i.category == *category)
            .map(|i| i.id.as_str())
            .collect();
        let in_group: Vec<&str> = members.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(in_group, in_view);
    }
}
