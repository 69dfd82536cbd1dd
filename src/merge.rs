//! The merge itself: classify, map, merge, then run after hooks.

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::MergeError;
use crate::hooks;
use crate::index::{position, KeyIndex};
use crate::options::MergeOptions;
use crate::record::{strict_eq, Items, Record};

/// What a merge did to the source collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// Primary keys of records appended to the collection, in input order.
    pub inserted: Vec<Value>,
    /// Primary keys of pre-existing records that were extended, in input order.
    pub updated: Vec<Value>,
    /// Index into the collection of the record each input item ended up in.
    /// Same shape as the input: one handle for one item, a sequence otherwise.
    pub upserted: Items<usize>,
}

impl MergeReport {
    pub fn inserted_count(&self) -> usize {
        self.inserted.len()
    }

    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }

    /// Resolve the upserted handles against `source`.
    ///
    /// # Panics
    ///
    /// If `source` was shrunk after the merge so a handle no longer points at a record.
    pub fn records<'a>(&self, source: &'a [Record]) -> Items<&'a Record> {
        self.upserted.clone().map(|i| &source[i])
    }

    /// The upserted records as JSON: an object for a single item, an array otherwise.
    pub fn to_value(&self, source: &[Record]) -> Value {
        self.records(source)
            .map(|record| Value::Object(record.clone()))
            .into_value()
    }
}

/// Upsert `items` into `source` by primary key.
///
/// Records already in `source` whose key loosely equals an item's key are
/// extended field by field in place; other items are appended in input
/// order. Inputs are assumed valid: see [`crate::merge_items`] for the
/// checked entry point.
///
/// A failing hook aborts the call. Map hooks all run before anything is
/// written, so their failures leave `source` untouched; after hooks fail
/// with the merge already applied.
pub fn upsert_items(
    source: &mut Vec<Record>,
    items: Items<Record>,
    opts: &MergeOptions,
) -> Result<MergeReport, MergeError> {
    let primary_key = opts.primary_key.as_str();
    let index = KeyIndex::build(source, primary_key);
    let many = items.is_many();
    let originals: Vec<Record> = items.iter().cloned().collect();
    let mut pending = items.into_vec();

    if opts.has_map_hooks() {
        for item in pending.iter_mut() {
            let is_new = index.is_new(key_of(item, primary_key));
            trace!(key = %key_of(item, primary_key), is_new, "mapping item");
            *item = hooks::map_item(opts, std::mem::take(item), is_new)?;
        }
    }

    let existing_len = source.len();
    let mut inserted = Vec::new();
    let mut updated = Vec::new();
    let mut handles = Vec::with_capacity(pending.len());

    for item in pending {
        let key = key_of(&item, primary_key).clone();
        match position(source, primary_key, &key) {
            Some(i) => {
                trace!(key = %key, position = i, "updating record");
                source[i].extend(item);
                if i < existing_len {
                    updated.push(key);
                }
                handles.push(i);
            }
            None => {
                trace!(key = %key, position = source.len(), "inserting record");
                source.push(item);
                inserted.push(key);
                handles.push(source.len() - 1);
            }
        }
    }

    if opts.has_after_hooks() {
        for &i in &handles {
            let key = key_of(&source[i], primary_key).clone();
            let Some(data) = originals
                .iter()
                .find(|original| original.get(primary_key).is_some_and(|k| strict_eq(k, &key)))
            else {
                warn!(key = %key, "no input item for merged record, skipping after hooks");
                continue;
            };
            hooks::after_item(opts, &mut source[i], data, index.is_new(&key))?;
        }
    }

    debug!(
        primary_key,
        items = handles.len(),
        inserted = inserted.len(),
        updated = updated.len(),
        "merged items"
    );

    let upserted = if many {
        Items::Many(handles)
    } else {
        match handles.first() {
            Some(&i) => Items::One(i),
            None => Items::Many(handles),
        }
    };

    Ok(MergeReport {
        inserted,
        updated,
        upserted,
    })
}

fn key_of<'a>(record: &'a Record, primary_key: &str) -> &'a Value {
    record.get(primary_key).unwrap_or(&Value::Null)
}
