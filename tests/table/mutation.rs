//! Insert, update, delete semantics

use crate::common::*;
use brickhouse::filter::{all, has};
use brickhouse::{Error, MemoryTable, Record, StripFields, Table, Value};

#[test]
fn test_insert_twice_replaces_without_merging() {
    let table = table(false);
    table.insert(&rec("a").with("x", 1).with("y", 2)).unwrap();
    table.insert(&rec("a").with("y", 3)).unwrap();

    let got = table.read_by_id("a").unwrap();
    assert!(got.missing("x"));
    assert_eq!(got.get("y"), Some(&Value::from(3)));
    assert_eq!(table.count(&all()), 1);
}

#[test]
fn test_update_absent_id_creates_nothing() {
    let table = table(false);
    assert_eq!(table.update_by_id(&rec("ghost").with("x", 1)).unwrap(), 0);
    assert!(table.read_by_id("ghost").is_none());
    assert_eq!(table.len(), 0);
}

#[test]
fn test_update_present_id() {
    let table = table(false);
    table.insert(&rec("a").with("x", 1)).unwrap();
    assert_eq!(table.update_by_id(&rec("a").with("x", 2)).unwrap(), 1);
    assert_eq!(
        table.read_by_id("a").unwrap().get("x"),
        Some(&Value::from(2))
    );
}

#[test]
fn test_delete_present_then_absent() {
    let table = table(false);
    table.insert(&rec("a")).unwrap();
    assert_eq!(table.delete_by_id("a"), 1);
    assert!(table.read_by_id("a").is_none());
    assert_eq!(table.delete_by_id("a"), 0);
    assert_eq!(table.delete_by_id("never-existed"), 0);
}

#[test]
fn test_batch_insert_in_order() {
    let table = table(false);
    let batch = vec![rec("a").with("v", 1), rec("a").with("v", 2), rec("b")];
    table.batch_insert(&batch).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.read_by_id("a").unwrap().get("v"), Some(&Value::from(2)));
}

#[test]
fn test_batch_insert_partial_failure_keeps_prefix() {
    let table = table(false);
    let batch = vec![rec("a"), Record::new().with("dis", "no id"), rec("b")];
    assert!(matches!(table.batch_insert(&batch), Err(Error::MissingId)));
    assert!(table.contains("a"));
    assert!(!table.contains("b"));
}

#[test]
fn test_strip_fields_applied_on_insert_and_update() {
    init_tracing();
    let table = MemoryTable::builder()
        .normalizer(StripFields::new(["mod"]))
        .build()
        .unwrap();
    table.insert(&rec("a").with("mod", "t0").with("x", 1)).unwrap();
    assert!(table.read_by_id("a").unwrap().missing("mod"));

    table.update_by_id(&rec("a").with("mod", "t1").with("x", 2)).unwrap();
    let got = table.read_by_id("a").unwrap();
    assert!(got.missing("mod"));
    assert_eq!(got.get("x"), Some(&Value::from(2)));
}

#[test]
fn test_delete_all_removes_only_matches() {
    let table = table(false);
    building(&table);
    let before_floors = ids(&table.read_all(&has("floor")));

    assert_eq!(table.delete_all(&has("equip")), 3);
    assert_eq!(table.count(&has("equip")), 0);
    assert_eq!(ids(&table.read_all(&has("floor"))), before_floors);
    assert!(table.contains("site"));
}

#[test]
fn test_close_keeps_table_usable() {
    let table = table(false);
    table.insert(&rec("a")).unwrap();
    table.close();
    table.close();
    assert!(table.read_by_id("a").is_some());
}
