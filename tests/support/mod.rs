//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use merge_items::{Items, Record};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber once; `RUST_LOG=merge_items=trace` shows the merge.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

pub fn records(value: Value) -> Vec<Record> {
    match value {
        Value::Array(list) => list.into_iter().map(record).collect(),
        other => panic!("expected an array, got {other}"),
    }
}

pub fn one(value: Value) -> Items<Record> {
    Items::One(record(value))
}

pub fn many(value: Value) -> Items<Record> {
    Items::Many(records(value))
}

pub fn as_value(source: &[Record]) -> Value {
    Value::Array(source.iter().cloned().map(Value::Object).collect())
}
