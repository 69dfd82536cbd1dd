//! Input checks run before a merge, and the checked entry points.

use serde_json::Value;

use crate::error::{ItemPosition, MergeError};
use crate::merge::{upsert_items, MergeReport};
use crate::options::MergeOptions;
use crate::record::{display_loose, strict_eq, to_json, Items, Record};

/// Check `opts` before merging.
pub fn validate_options(opts: &MergeOptions) -> Result<(), MergeError> {
    if opts.primary_key.is_empty() {
        return Err(MergeError::InvalidPrimaryKey(String::new()));
    }
    Ok(())
}

/// Check that every item carries the primary key and that keys are unique
/// within a sequence.
///
/// Uniqueness uses strict equality; when several items share a key the
/// error names the later item of the first duplicated pair.
pub fn validate_items(items: &Items<Record>, primary_key: &str) -> Result<(), MergeError> {
    match items {
        Items::One(item) => {
            if !item.contains_key(primary_key) {
                return Err(MergeError::MissingPrimaryKey {
                    primary_key: primary_key.to_string(),
                    item: to_json(item),
                    position: ItemPosition::Bare,
                });
            }
        }
        Items::Many(list) => {
            for (i, item) in list.iter().enumerate() {
                let Some(key) = item.get(primary_key) else {
                    return Err(MergeError::MissingPrimaryKey {
                        primary_key: primary_key.to_string(),
                        item: to_json(item),
                        position: ItemPosition::InSequence,
                    });
                };

                let duplicate = list
                    .iter()
                    .enumerate()
                    .find(|(j, other)| {
                        *j != i && other.get(primary_key).is_some_and(|k| strict_eq(k, key))
                    });
                if let Some((_, other)) = duplicate {
                    return Err(MergeError::DuplicatePrimaryKey {
                        primary_key: primary_key.to_string(),
                        item: to_json(other),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Convert a dynamic `itemArg` into items: an object or an array of objects.
pub fn items_from_value(item_arg: &Value) -> Result<Items<Record>, MergeError> {
    match item_arg {
        Value::Object(map) => Ok(Items::One(map.clone())),
        Value::Array(list) => list
            .iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map.clone()),
                other => Err(MergeError::NonObjectItem(display_loose(other))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Items::Many),
        other => Err(MergeError::InvalidItemArg(display_loose(other))),
    }
}

/// Convert a dynamic `source` into records: an array of objects.
pub fn records_from_value(source: &Value) -> Result<Vec<Record>, MergeError> {
    match source {
        Value::Array(list) => list
            .iter()
            .map(|record| match record {
                Value::Object(map) => Ok(map.clone()),
                other => Err(MergeError::SourceNonObject(display_loose(other))),
            })
            .collect(),
        other => Err(MergeError::SourceNotArray(display_loose(other))),
    }
}

/// Validate, then upsert `items` into `source`.
///
/// Validation failures are returned before `source` is touched.
///
/// ```ignore
/// use merge_items::{merge_items, Items, MergeOptions};
///
/// let report = merge_items(&mut source, Items::One(item), &MergeOptions::default())?;
/// let stored = report.records(&source);
/// ```
pub fn merge_items(
    source: &mut Vec<Record>,
    items: Items<Record>,
    opts: &MergeOptions,
) -> Result<MergeReport, MergeError> {
    validate_options(opts)?;
    validate_items(&items, &opts.primary_key)?;
    upsert_items(source, items, opts)
}

/// Merge for loosely typed callers working on JSON documents.
///
/// `source` must be an array of objects and `item_arg` an object or an
/// array of objects. On success the mutated collection is written back
/// into `source` and the upserted record(s) are returned: an object for
/// an object input, an array for an array input.
///
/// If a hook fails the partially merged collection is still written back.
pub fn merge_json(
    source: &mut Value,
    item_arg: &Value,
    opts: &MergeOptions,
) -> Result<Value, MergeError> {
    let mut records = records_from_value(source)?;
    validate_options(opts)?;
    let items = items_from_value(item_arg)?;

    match merge_items(&mut records, items, opts) {
        Err(err) if err.is_validation() => Err(err),
        result => {
            let merged = result.map(|report| report.to_value(&records));
            *source = Value::Array(records.into_iter().map(Value::Object).collect());
            merged
        }
    }
}
