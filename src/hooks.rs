//! Hook pipeline: the "map" phase before the merge and the "after" phase once it is done.
//!
//! Hooks compose in a fixed order. Before the merge an item flows through
//! `map_insert` (new items only), then `map_update` (existing items only),
//! then `map_upsert`, each receiving the previous hook's output. After the
//! merge the stored record is handed to `after_insert` or `after_update`
//! and then `after_upsert`.

use serde_json::Value;

use crate::error::{HookError, HookKind, MergeError};
use crate::options::MergeOptions;
use crate::record::Record;

fn hook_failed(hook: HookKind, key: &Value, source: HookError) -> MergeError {
    MergeError::Hook {
        hook,
        key: key.clone(),
        source,
    }
}

/// Run the map hooks over one item.
pub(crate) fn map_item(
    opts: &MergeOptions,
    mut item: Record,
    is_new: bool,
) -> Result<Record, MergeError> {
    let key = item.get(&opts.primary_key).cloned().unwrap_or(Value::Null);

    if is_new {
        if let Some(hook) = &opts.map_insert {
            item = hook(item).map_err(|e| hook_failed(HookKind::MapInsert, &key, e))?;
        }
    } else if let Some(hook) = &opts.map_update {
        item = hook(item).map_err(|e| hook_failed(HookKind::MapUpdate, &key, e))?;
    }

    if let Some(hook) = &opts.map_upsert {
        item = hook(item, is_new).map_err(|e| hook_failed(HookKind::MapUpsert, &key, e))?;
    }

    Ok(item)
}

/// Run the after hooks against a stored record. Return values are discarded;
/// hooks act by mutating `record`.
pub(crate) fn after_item(
    opts: &MergeOptions,
    record: &mut Record,
    data: &Record,
    is_new: bool,
) -> Result<(), MergeError> {
    let key = record.get(&opts.primary_key).cloned().unwrap_or(Value::Null);

    if is_new {
        if let Some(hook) = &opts.after_insert {
            hook(record, data).map_err(|e| hook_failed(HookKind::AfterInsert, &key, e))?;
        }
    } else if let Some(hook) = &opts.after_update {
        hook(record, data).map_err(|e| hook_failed(HookKind::AfterUpdate, &key, e))?;
    }

    if let Some(hook) = &opts.after_upsert {
        hook(record, data, is_new).map_err(|e| hook_failed(HookKind::AfterUpsert, &key, e))?;
    }

    Ok(())
}
