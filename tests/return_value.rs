mod support;

use merge_items::{merge_items, Items, MergeOptions};
use serde_json::json;
use support::{many, one, records};

#[test]
fn returns_upserted_item_if_single_item_given() {
    let mut source = records(json!([
        {"id": 1, "name": "a"},
        {"id": 2, "name": "b"},
        {"id": 5, "name": "e"},
    ]));
    let opts = MergeOptions::default();

    // updating
    let report = merge_items(&mut source, one(json!({"id": 1, "name": "aaa"})), &opts).unwrap();
    assert_eq!(report.upserted, Items::One(0));
    assert_eq!(report.to_value(&source), json!({"id": 1, "name": "aaa"}));

    // inserting
    let report = merge_items(&mut source, one(json!({"id": 3, "name": "ccc"})), &opts).unwrap();
    assert_eq!(report.upserted, Items::One(3));
    assert_eq!(report.to_value(&source), json!({"id": 3, "name": "ccc"}));
}

#[test]
fn returns_array_of_upserted_items_if_array_of_items_given() {
    let mut source = records(json!([
        {"id": 1, "name": "a"},
        {"id": 2, "name": "b"},
        {"id": 5, "name": "e"},
    ]));

    let report = merge_items(
        &mut source,
        many(json!([
            {"id": 1, "name": "aaa"},
            {"id": 2, "name": "bbb"},
            {"id": 3, "name": "c"},
            {"id": 4, "name": "d"},
        ])),
        &MergeOptions::default(),
    )
    .unwrap();

    assert!(report.upserted.is_many());
    assert_eq!(
        report.to_value(&source),
        json!([
            {"id": 1, "name": "aaa"},
            {"id": 2, "name": "bbb"},
            {"id": 3, "name": "c"},
            {"id": 4, "name": "d"},
        ])
    );
}

#[test]
fn contains_inserted_and_updated_keys() {
    let mut source = records(json!([
        {"id": 1, "name": "a"},
        {"id": 2, "name": "b"},
        {"id": 5, "name": "e"},
    ]));

    let report = merge_items(
        &mut source,
        many(json!([
            {"id": 4, "name": "d"},
            {"id": 2, "name": "bbb"},
            {"id": 3, "name": "c"},
            {"id": 1, "name": "aaa"},
        ])),
        &MergeOptions::default(),
    )
    .unwrap();

    assert_eq!(report.inserted, vec![json!(4), json!(3)]);
    assert_eq!(report.updated, vec![json!(2), json!(1)]);
    assert_eq!(report.inserted_count(), 2);
    assert_eq!(report.updated_count(), 2);
    assert_eq!(report.upserted, Items::Many(vec![3, 1, 4, 0]));
}

#[test]
fn one_element_sequence_stays_a_sequence() {
    let mut source = Vec::new();
    let report = merge_items(&mut source, many(json!([{"id": 1}])), &MergeOptions::default())
        .unwrap();

    assert_eq!(report.upserted, Items::Many(vec![0]));
    assert_eq!(report.to_value(&source), json!([{"id": 1}]));
}

#[test]
fn handles_observe_after_hook_mutations() {
    let mut source = records(json!([{"id": 1}, {"id": 2}]));
    let opts = MergeOptions::default().after_upsert(|obj, _, is_new| {
        obj.insert("isNew".into(), json!(is_new));
        Ok(())
    });

    let report = merge_items(&mut source, many(json!([{"id": 2, "a": 1}, {"id": 9}])), &opts)
        .unwrap();

    let stored = report.records(&source).into_vec();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0]["isNew"], json!(false));
    assert_eq!(stored[1]["isNew"], json!(true));
    assert!(std::ptr::eq(stored[0], &source[1]));
}
