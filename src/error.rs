use std::fmt;

use serde_json::Value;

/// Error a caller-supplied hook returns to abort a merge.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which hook failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    MapInsert,
    MapUpdate,
    MapUpsert,
    AfterInsert,
    AfterUpdate,
    AfterUpsert,
}

impl HookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::MapInsert => "mapInsert",
            HookKind::MapUpdate => "mapUpdate",
            HookKind::MapUpsert => "mapUpsert",
            HookKind::AfterInsert => "afterInsert",
            HookKind::AfterUpdate => "afterUpdate",
            HookKind::AfterUpsert => "afterUpsert",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an offending item sat in `itemArg`; only changes the error wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPosition {
    /// `itemArg` was the item itself.
    Bare,
    /// The item was one element of a sequence.
    InSequence,
}

impl fmt::Display for ItemPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemPosition::Bare => f.write_str("itemArg"),
            ItemPosition::InSequence => f.write_str("object"),
        }
    }
}

/// Errors raised by a merge.
///
/// Everything except [`MergeError::Hook`] is a validation failure and is
/// raised before the source collection is touched.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("source must be an array, {0} given")]
    SourceNotArray(String),

    #[error("source contains non-object: {0}")]
    SourceNonObject(String),

    #[error("itemArg must be either object or array, {0} given")]
    InvalidItemArg(String),

    #[error("itemArg contains non-object: {0}")]
    NonObjectItem(String),

    #[error("primary key \"{primary_key}\" is missing in {position} {item}")]
    MissingPrimaryKey {
        primary_key: String,
        item: String,
        position: ItemPosition,
    },

    #[error("primary key \"{primary_key}\" in object {item} is not unique")]
    DuplicatePrimaryKey { primary_key: String, item: String },

    #[error("options must be an object, {0} given")]
    OptionsNotObject(String),

    #[error("primaryKey must be a string, {0} given")]
    InvalidPrimaryKey(String),

    #[error("{hook} hook failed for primary key {key}: {source}")]
    Hook {
        hook: HookKind,
        key: Value,
        #[source]
        source: HookError,
    },
}

impl MergeError {
    /// True for errors raised before any mutation happened.
    pub fn is_validation(&self) -> bool {
        !matches!(self, MergeError::Hook { .. })
    }
}
