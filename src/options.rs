//! MergeOptions - primary key selection and the hook set.
//!
//! Options can be loaded from a JSON document (only `primaryKey` is
//! recognized there) and hooks are attached with builder methods:
//!
//! ```ignore
//! use merge_items::MergeOptions;
//!
//! let opts = MergeOptions::default()
//!     .with_primary_key("sku")
//!     .map_insert(|mut item| {
//!         item.insert("created".into(), true.into());
//!         Ok(item)
//!     })
//!     .after_update(|record, data| {
//!         record.insert("previous".into(), data.clone().into());
//!         Ok(())
//!     });
//! ```

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{HookError, MergeError};
use crate::record::{display_loose, Record};

/// Field matched on when no primary key is configured.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Transforms an item before it is merged.
pub type MapHook = Box<dyn Fn(Record) -> Result<Record, HookError>>;
/// Transforms an item before it is merged, told whether it is new.
pub type MapUpsertHook = Box<dyn Fn(Record, bool) -> Result<Record, HookError>>;
/// Observes a stored record after the merge: `(record, original input)`.
pub type AfterHook = Box<dyn Fn(&mut Record, &Record) -> Result<(), HookError>>;
/// Observes a stored record after the merge: `(record, original input, is_new)`.
pub type AfterUpsertHook = Box<dyn Fn(&mut Record, &Record, bool) -> Result<(), HookError>>;

fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}

/// Configuration for a merge.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOptions {
    #[serde(default = "default_primary_key")]
    pub primary_key: String,

    #[serde(skip)]
    pub(crate) map_insert: Option<MapHook>,
    #[serde(skip)]
    pub(crate) map_update: Option<MapHook>,
    #[serde(skip)]
    pub(crate) map_upsert: Option<MapUpsertHook>,
    #[serde(skip)]
    pub(crate) after_insert: Option<AfterHook>,
    #[serde(skip)]
    pub(crate) after_update: Option<AfterHook>,
    #[serde(skip)]
    pub(crate) after_upsert: Option<AfterUpsertHook>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_KEY)
    }
}

impl MergeOptions {
    pub fn new(primary_key: impl Into<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            map_insert: None,
            map_update: None,
            map_upsert: None,
            after_insert: None,
            after_update: None,
            after_upsert: None,
        }
    }

    /// Load options from a dynamic document.
    ///
    /// `opts` must be an object. A missing `primaryKey` falls back to `"id"`;
    /// any other non-string or empty value is rejected.
    pub fn from_value(opts: &Value) -> Result<Self, MergeError> {
        let map = match opts {
            Value::Object(map) => map,
            other => return Err(MergeError::OptionsNotObject(display_loose(other))),
        };

        match map.get("primaryKey") {
            None => Ok(Self::default()),
            Some(Value::String(key)) if !key.is_empty() => Ok(Self::new(key.as_str())),
            Some(other) => Err(MergeError::InvalidPrimaryKey(display_loose(other))),
        }
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    /// Replace items that are new before they are inserted.
    pub fn map_insert<F>(mut self, hook: F) -> Self
    where
        F: Fn(Record) -> Result<Record, HookError> + 'static,
    {
        self.map_insert = Some(Box::new(hook));
        self
    }

    /// Replace items that match an existing record before they are merged into it.
    pub fn map_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(Record) -> Result<Record, HookError> + 'static,
    {
        self.map_update = Some(Box::new(hook));
        self
    }

    /// Replace every item before it is merged. Runs after `map_insert`/`map_update`.
    pub fn map_upsert<F>(mut self, hook: F) -> Self
    where
        F: Fn(Record, bool) -> Result<Record, HookError> + 'static,
    {
        self.map_upsert = Some(Box::new(hook));
        self
    }

    pub fn after_insert<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Record, &Record) -> Result<(), HookError> + 'static,
    {
        self.after_insert = Some(Box::new(hook));
        self
    }

    pub fn after_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Record, &Record) -> Result<(), HookError> + 'static,
    {
        self.after_update = Some(Box::new(hook));
        self
    }

    pub fn after_upsert<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Record, &Record, bool) -> Result<(), HookError> + 'static,
    {
        self.after_upsert = Some(Box::new(hook));
        self
    }

    pub(crate) fn has_map_hooks(&self) -> bool {
        self.map_insert.is_some() || self.map_update.is_some() || self.map_upsert.is_some()
    }

    pub(crate) fn has_after_hooks(&self) -> bool {
        self.after_insert.is_some() || self.after_update.is_some() || self.after_upsert.is_some()
    }
}

impl fmt::Debug for MergeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeOptions")
            .field("primary_key", &self.primary_key)
            .field("map_insert", &self.map_insert.is_some())
            .field("map_update", &self.map_update.is_some())
            .field("map_upsert", &self.map_upsert.is_some())
            .field("after_insert", &self.after_insert.is_some())
            .field("after_update", &self.after_update.is_some())
            .field("after_upsert", &self.after_upsert.is_some())
            .finish()
    }
}
