use event_emitter_rs::EventEmitter;

use crate::index::position;
use crate::merge::MergeReport;
use crate::record::{to_json, Record};

/// Event fired once per record appended by a merge.
pub const INSERTED: &str = "inserted";
/// Event fired once per pre-existing record extended by a merge.
pub const UPDATED: &str = "updated";
/// Event fired once per input item, inserted or updated.
pub const UPSERTED: &str = "upserted";

/// Publishes change notifications for completed merges.
///
/// Payloads are the stored records serialized as JSON. Delivery happens on
/// the emitter's threads, so listeners never run inside the merge.
///
/// # Example
///
/// ```ignore
/// use merge_items::emitter::{MergeEmitter, INSERTED};
///
/// let mut emitter = MergeEmitter::new();
///
/// emitter.on(INSERTED, |record| {
///     println!("inserted: {}", record);
/// });
///
/// let report = merge_items(&mut source, items, &opts)?;
/// emitter.enqueue_report(&source, &report, &opts.primary_key);
/// emitter.emit_queued();
/// ```
pub struct MergeEmitter {
    event_emitter: EventEmitter,
    events_to_emit: Vec<(&'static str, String)>,
}

impl Default for MergeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeEmitter {
    pub fn new() -> Self {
        Self {
            event_emitter: EventEmitter::new(),
            events_to_emit: Vec::new(),
        }
    }

    /// Register a listener for one of [`INSERTED`], [`UPDATED`] or [`UPSERTED`].
    pub fn on<F>(&mut self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.event_emitter.on(event, listener);
    }

    /// Queue the notifications for a finished merge.
    pub fn enqueue_report(&mut self, source: &[Record], report: &MergeReport, primary_key: &str) {
        for (event, keys) in [(INSERTED, &report.inserted), (UPDATED, &report.updated)] {
            for key in keys {
                if let Some(i) = position(source, primary_key, key) {
                    self.events_to_emit.push((event, to_json(&source[i])));
                }
            }
        }

        for &i in report.upserted.iter() {
            if let Some(record) = source.get(i) {
                self.events_to_emit.push((UPSERTED, to_json(record)));
            }
        }
    }

    /// Emit all queued notifications.
    pub fn emit_queued(&mut self) {
        let events: Vec<_> = self.events_to_emit.drain(..).collect();
        for (event, payload) in events {
            self.event_emitter.emit(event, payload);
        }
    }

    pub fn queued_len(&self) -> usize {
        self.events_to_emit.len()
    }
}
