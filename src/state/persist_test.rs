use super::*;

#[test]
fn memory_storage_returns_last_write() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.load("k"), None);
    storage.save("k", "1");
    storage.save("k", "2");
    assert_eq!(storage.load("k").as_deref(), Some("2"));
}

#[test]
fn load_json_treats_garbage_as_absent() {
    let storage = MemoryStorage::with_entry("k", "{not json");
    assert_eq!(load_json::<serde_json::Value>(&storage, "k"), None);
}

#[test]
fn save_then_load_json() {
    let storage = MemoryStorage::new();
    save_json(&storage, "k", &vec![1, 2, 3]);
    assert_eq!(storage.load("k").as_deref(), Some("[1,2,3]"));
    assert_eq!(load_json::<Vec<i32>>(&storage, "k"), Some(vec![1, 2, 3]));
}
