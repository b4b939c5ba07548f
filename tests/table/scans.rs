//! Predicate scans: read, read_all, count, cancellation, include

use crate::common::*;
use brickhouse::filter::{all, eq, gt, has, id_in, missing, not};
use brickhouse::{Record, Resolver, ScanCancelled, Table, Value};

fn three() -> brickhouse::MemoryTable {
    let table = table(false);
    table.insert(&rec("first").with("n", 1)).unwrap();
    table.insert(&rec("second").with("n", 2).with("hit", Value::Marker)).unwrap();
    table.insert(&rec("third").with("n", 3).with("hit", Value::Marker)).unwrap();
    table
}

#[test]
fn test_read_all_returns_exactly_matches() {
    let table = three();
    let matches = table.read_all(&has("hit"));
    assert_eq!(ids(&matches), vec!["second", "third"]);
}

#[test]
fn test_count_matches() {
    let table = three();
    assert_eq!(table.count(&has("hit")), 2);
    assert_eq!(table.count(&all()), 3);
    assert_eq!(table.count(&has("nothing")), 0);
}

#[test]
fn test_read_returns_one_match() {
    let table = three();
    let one = table.read(&has("hit")).unwrap();
    let id = one.id().unwrap().id().to_string();
    assert!(id == "second" || id == "third");
    assert!(table.read(&gt("n", 10)).is_none());
}

#[test]
fn test_cancel_after_first_match() {
    let table = three();
    let mut delivered: Vec<Record> = Vec::new();
    table.read_all_into(&has("hit"), &mut |r| {
        delivered.push(r);
        Err(ScanCancelled)
    });
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0].has("hit"));
}

#[test]
fn test_cancel_after_n_matches() {
    let table = table(false);
    for i in 0..50 {
        table.insert(&rec(&format!("r{}", i)).with("n", i)).unwrap();
    }
    let mut delivered = 0;
    table.read_all_into(&all(), &mut |_| {
        delivered += 1;
        if delivered == 10 {
            return Err(ScanCancelled);
        }
        Ok(())
    });
    assert_eq!(delivered, 10);
    // the table is untouched by the cancelled scan
    assert_eq!(table.count(&all()), 50);
}

#[test]
fn test_closure_filters() {
    let table = three();
    let odd = |r: &Record, _: &dyn Resolver| {
        r.get("n")
            .and_then(Value::as_f64)
            .is_some_and(|n| n % 2.0 == 1.0)
    };
    assert_eq!(ids(&table.read_all(&odd)), vec!["first", "third"]);
}

#[test]
fn test_path_filters_resolve_through_table() {
    let table = table(false);
    building(&table);
    assert_eq!(
        ids(&table.read_all(&has("equip").and(eq("floorRef->dis", "Floor 2")))),
        vec!["ahu2"]
    );
    assert_eq!(table.count(&eq("floorRef->siteRef->dis", "HQ")), 2);
    assert_eq!(ids(&table.read_all(&has("equip").and(missing("floorRef")))), vec!["meter"]);
    assert_eq!(table.count(&not(has("siteRef"))), 1);
    assert_eq!(ids(&table.read_all(&id_in(["f1", "nope"]))), vec!["f1"]);
}

#[test]
fn test_resolver_sees_live_records() {
    let table = table(false);
    building(&table);
    assert_eq!(table.count(&eq("siteRef->dis", "HQ")), 5);

    table.update_by_id(&rec("site").with("dis", "Campus")).unwrap();
    assert_eq!(table.count(&eq("siteRef->dis", "HQ")), 0);
    assert_eq!(table.count(&eq("siteRef->dis", "Campus")), 5);
}

#[test]
fn test_include_without_storing() {
    let table = table(false);
    building(&table);
    let candidate = Record::new()
        .with("equip", Value::Marker)
        .with("floorRef", Value::reference("f1"));
    assert!(table.include(&candidate, &eq("floorRef->siteRef->dis", "HQ")));
    assert!(!table.include(&candidate, &eq("floorRef->dis", "Floor 2")));
    assert!(table.read_by_id("candidate").is_none());
}

#[test]
fn test_scan_on_empty_table() {
    let table = table(true);
    assert!(table.read_all(&all()).is_empty());
    assert!(table.read(&all()).is_none());
    assert_eq!(table.count(&all()), 0);
    assert_eq!(table.delete_all(&all()), 0);
}

#[test]
fn test_dyn_table() {
    let table: Box<dyn Table> = Box::new(three());
    assert_eq!(table.count(&has("hit")), 2);
    assert_eq!(table.delete_all(&has("hit")), 2);
    assert_eq!(table.read_all(&all()).len(), 1);
}
