use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_insert_and_get() {
    let mut table = HandleTable::new();
    let a = table.insert("a");
    let b = table.insert("b");

    assert_ne!(a, b);
    assert_eq!(table.get(a), Some(&"a"));
    assert_eq!(table.get(b), Some(&"b"));
    assert_eq!(table.len(), 2);
}

#[test]
fn test_get_mut() {
    let mut table = HandleTable::new();
    let h = table.insert(1);
    *table.get_mut(h).unwrap() += 41;
    assert_eq!(table.get(h), Some(&42));
}

#[test]
fn test_remove_invalidates_copies() {
    let mut table = HandleTable::new();
    let h = table.insert(String::from("x"));
    let copy = h;

    assert_eq!(table.remove(h), Some(String::from("x")));
    assert_eq!(table.get(copy), None);
    assert_eq!(table.remove(copy), None);
    assert!(table.is_empty());
}

#[test]
fn test_reused_slot_rejects_stale_handle() {
    let mut table = HandleTable::new();
    let old = table.insert(1);
    table.remove(old);
    let new = table.insert(2);

    assert_eq!(new.index(), old.index());
    assert_ne!(new.generation(), old.generation());
    assert_eq!(table.get(old), None);
    assert_eq!(table.get(new), Some(&2));
}

#[test]
fn test_default_handle_never_resolves() {
    let mut table = HandleTable::new();
    table.insert(7);
    assert!(!table.contains(Handle::default()));
    assert_eq!(table.remove(Handle::default()), None);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_unknown_index() {
    let table: HandleTable<i32> = HandleTable::new();
    assert_eq!(table.get(Handle::new(99, 1)), None);
}

#[test]
fn test_independent_entries() {
    let mut table = HandleTable::new();
    let a = table.insert(vec![1, 2]);
    let b = table.insert(vec![1, 2]);
    table.remove(a);
    assert_eq!(table.get(b), Some(&vec![1, 2]));
}
