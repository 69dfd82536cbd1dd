//! KeyIndex - snapshot of the primary keys present before a merge.

use serde_json::Value;

use crate::record::{loose_eq, Record};

/// Primary-key values present in a collection at the moment it was indexed.
///
/// Taken once, before any hook runs, so records inserted during a merge
/// never change how sibling items are classified.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    keys: Vec<Value>,
}

impl KeyIndex {
    /// Index `source` on `primary_key`. Records without the field are skipped.
    pub fn build(source: &[Record], primary_key: &str) -> Self {
        let keys = source
            .iter()
            .filter_map(|record| record.get(primary_key).cloned())
            .collect();
        Self { keys }
    }

    /// True when no indexed key loosely equals `key`.
    pub fn is_new(&self, key: &Value) -> bool {
        !self.contains(key)
    }

    pub fn contains(&self, key: &Value) -> bool {
        self.keys.iter().any(|existing| loose_eq(existing, key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Position of the first record whose primary key loosely equals `key`.
pub(crate) fn position(source: &[Record], primary_key: &str, key: &Value) -> Option<usize> {
    source.iter().position(|record| {
        record
            .get(primary_key)
            .is_some_and(|existing| loose_eq(existing, key))
    })
}
