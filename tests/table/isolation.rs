//! Copy isolation and id invariants

use crate::common::*;
use brickhouse::filter::all;
use brickhouse::{Error, Reference, Table, Value};

#[test]
fn test_mutating_read_copy_does_not_touch_store() {
    let table = table(false);
    table.insert(&rec("a").with("dis", "Alpha").with("n", 1)).unwrap();

    let mut copy = table.read_by_id("a").unwrap();
    copy.set("dis", "Changed");
    copy.set("extra", Value::Marker);
    copy.remove("n");

    let fresh = table.read_by_id("a").unwrap();
    assert_eq!(fresh, rec("a").with("dis", "Alpha").with("n", 1));
}

#[test]
fn test_copies_are_independent_of_each_other() {
    let table = table(false);
    table.insert(&rec("a").with("dis", "Alpha")).unwrap();

    let mut first = table.read_by_id("a").unwrap();
    let second = table.read_by_id("a").unwrap();
    first.set("dis", "One");
    assert_eq!(second.dis(), Some("Alpha"));
}

#[test]
fn test_scan_copies_are_isolated() {
    let table = table(false);
    table.insert(&rec("a").with("dis", "Alpha")).unwrap();
    for mut r in table.read_all(&all()) {
        r.set("dis", "Scribbled");
    }
    assert_eq!(table.read_by_id("a").unwrap().dis(), Some("Alpha"));
}

#[test]
fn test_enriched_copy_does_not_leak_label_into_store() {
    let table = table(true);
    table.insert(&rec("A").with("dis", "Alpha")).unwrap();
    table.insert(&rec("B").with("owner", Value::reference("A"))).unwrap();

    let enriched = table.read_by_id("B").unwrap();
    assert_eq!(label(&enriched, "owner"), Some("Alpha"));
    assert_eq!(label(&table.read_by_id_with("B", false).unwrap(), "owner"), None);
}

#[test]
fn test_stored_key_matches_id() {
    let table = table(false);
    building(&table);
    for r in table.read_all(&all()) {
        let id = r.id().unwrap().id().to_string();
        assert_eq!(table.read_by_id(&id).unwrap().id().unwrap().id(), id);
    }
}

#[test]
fn test_missing_id_leaves_table_unchanged() {
    let table = table(false);
    table.insert(&rec("a").with("n", 1)).unwrap();

    let no_id = brickhouse::Record::new().with("n", 2);
    assert!(matches!(table.insert(&no_id), Err(Error::MissingId)));
    assert!(matches!(table.update_by_id(&no_id), Err(Error::MissingId)));

    let str_id = brickhouse::Record::new().with("id", "a").with("n", 3);
    assert!(matches!(table.insert(&str_id), Err(Error::MissingId)));
    assert!(matches!(table.update_by_id(&str_id), Err(Error::MissingId)));

    assert_eq!(table.len(), 1);
    assert_eq!(table.read_by_id("a").unwrap(), rec("a").with("n", 1));
}

#[test]
fn test_id_label_is_not_identity() {
    let table = table(false);
    table
        .insert(&brickhouse::Record::with_id(Reference::with_dis("a", "Label")))
        .unwrap();
    assert!(table.read_by_id("a").is_some());
    assert!(table.read_by_ref(&Reference::with_dis("a", "Other")).is_some());
}
