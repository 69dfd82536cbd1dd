//! Upsert records into an ordered in-memory collection by primary key.
//!
//! Items whose key loosely matches an existing record extend that record
//! in place; the rest are appended in input order. Optional hooks map
//! items before the merge and observe stored records after it.
//!
//! ## Example
//!
//! ```ignore
//! use merge_items::{merge_items, Items, MergeOptions};
//!
//! let opts = MergeOptions::default().after_update(|record, data| {
//!     record.insert("touched".into(), true.into());
//!     Ok(())
//! });
//!
//! let report = merge_items(&mut source, Items::Many(batch), &opts)?;
//! for record in report.records(&source).iter() {
//!     println!("{:?}", record);
//! }
//! ```

mod error;
mod hooks;
mod index;
mod merge;
mod options;
mod record;
mod validation;

#[cfg(feature = "emitter")]
pub mod emitter;

pub use error::{HookError, HookKind, ItemPosition, MergeError};
pub use index::KeyIndex;
pub use merge::{upsert_items, MergeReport};
pub use options::{
    AfterHook, AfterUpsertHook, MapHook, MapUpsertHook, MergeOptions, DEFAULT_PRIMARY_KEY,
};
pub use record::{loose_eq, strict_eq, Items, Record};
pub use validation::{
    items_from_value, merge_items, merge_json, records_from_value, validate_items,
    validate_options,
};
