mod support;

use merge_items::{merge_items, merge_json, MergeError, MergeOptions};
use serde_json::{json, Value};
use support::{as_value, many, one, records};

fn json_error(source: Value, item_arg: Value) -> String {
    let mut source = source;
    merge_json(&mut source, &item_arg, &MergeOptions::default())
        .unwrap_err()
        .to_string()
}

#[test]
fn throws_if_source_is_not_an_array() {
    for (source, shown) in [
        (json!(1), "1"),
        (json!("abc"), "abc"),
        (json!(true), "true"),
        (json!(null), "null"),
        (json!({}), "[object Object]"),
    ] {
        assert_eq!(
            json_error(source, json!({"id": 1})),
            format!("source must be an array, {} given", shown)
        );
    }
}

#[test]
fn throws_if_item_arg_is_neither_object_nor_array() {
    for (item_arg, shown) in [
        (json!(1), "1"),
        (json!("abc"), "abc"),
        (json!(false), "false"),
        (json!(null), "null"),
    ] {
        assert_eq!(
            json_error(json!([]), item_arg),
            format!("itemArg must be either object or array, {} given", shown)
        );
    }

    // should not throw
    let mut source = json!([]);
    merge_json(&mut source, &json!([]), &MergeOptions::default()).unwrap();
    merge_json(&mut source, &json!({"id": 1}), &MergeOptions::default()).unwrap();
}

#[test]
fn throws_if_item_arg_is_an_object_without_primary_key() {
    assert_eq!(
        json_error(json!([]), json!({"x": 1})),
        r#"primary key "id" is missing in itemArg {"x":1}"#
    );
}

#[test]
fn throws_if_item_arg_is_an_array_containing_non_object() {
    for (item, shown) in [(json!(1), "1"), (json!("abc"), "abc"), (json!(null), "null"), (json!([1]), "1")] {
        assert_eq!(
            json_error(json!([]), json!([item])),
            format!("itemArg contains non-object: {}", shown)
        );
    }
}

#[test]
fn throws_if_item_arg_is_an_array_containing_object_without_primary_key() {
    assert_eq!(
        json_error(json!([]), json!([{"id": 1}, {"x": 1}])),
        r#"primary key "id" is missing in object {"x":1}"#
    );
}

#[test]
fn throws_if_item_arg_contains_objects_with_the_same_primary_key() {
    assert_eq!(
        json_error(json!([]), json!([{"id": 1, "a": 1}, {"id": 2, "a": 1}, {"id": 2, "a": 2}])),
        r#"primary key "id" in object {"id":2,"a":2} is not unique"#
    );
}

#[test]
fn uses_configured_primary_key_in_messages() {
    let mut source = Vec::new();
    let err = merge_items(&mut source, one(json!({"id": 1})), &MergeOptions::new("sku")).unwrap_err();
    assert_eq!(err.to_string(), r#"primary key "sku" is missing in itemArg {"id":1}"#);
}

#[test]
fn throws_if_options_are_invalid() {
    let err = MergeOptions::from_value(&json!("abc")).unwrap_err();
    assert!(matches!(err, MergeError::OptionsNotObject(_)));
    assert_eq!(err.to_string(), "options must be an object, abc given");

    let err = MergeOptions::from_value(&json!({"primaryKey": 5})).unwrap_err();
    assert!(matches!(err, MergeError::InvalidPrimaryKey(_)));
    assert_eq!(err.to_string(), "primaryKey must be a string, 5 given");
}

#[test]
fn validation_failure_leaves_source_untouched() {
    let mut source = records(json!([{"id": 1}]));
    let err = merge_items(
        &mut source,
        many(json!([{"id": 1, "a": 1}, {"id": 2}, {"id": 2}])),
        &MergeOptions::default(),
    )
    .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(as_value(&source), json!([{"id": 1}]));

    let mut doc = json!([{"id": 1}]);
    merge_json(&mut doc, &json!([{"id": 1, "a": 1}, {"x": 1}]), &MergeOptions::default())
        .unwrap_err();
    assert_eq!(doc, json!([{"id": 1}]));
}

#[test]
fn merge_json_writes_back_into_the_document() {
    let mut doc = json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]);

    let merged = merge_json(
        &mut doc,
        &json!({"id": 1, "name": "aaa"}),
        &MergeOptions::from_value(&json!({})).unwrap(),
    )
    .unwrap();

    assert_eq!(merged, json!({"id": 1, "name": "aaa"}));
    assert_eq!(doc, json!([{"id": 1, "name": "aaa"}, {"id": 2, "name": "b"}]));
}
