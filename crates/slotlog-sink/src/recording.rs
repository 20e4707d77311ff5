//! crates/slotlog-sink/src/recording.rs
//! Sink that keeps every delivered line in arrival order.

use std::sync::{Mutex, MutexGuard, PoisonError};

use slotlog::{LineSink, LogLine, SlotTable};

/// One delivered emission.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LineRecord {
    /// Slot the emission targeted.
    pub slot: usize,
    /// Text delivered for the emission.
    pub text: String,
}

impl LineRecord {
    /// Creates a record for `slot` carrying `text`.
    pub fn new(slot: usize, text: impl Into<String>) -> Self {
        Self {
            slot,
            text: text.into(),
        }
    }
}

/// Sink that appends each delivered line to an in-memory log.
///
/// Useful in tests and for post-mortem dumps: nothing is overwritten, so the
/// full emission history stays available until it is drained.
#[derive(Debug, Default)]
pub struct RecordingSink {
    slots: SlotTable,
    records: Mutex<Vec<LineRecord>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record delivered so far.
    #[must_use]
    pub fn records(&self) -> Vec<LineRecord> {
        self.lock().clone()
    }

    /// Removes and returns every record delivered so far.
    pub fn drain(&self) -> Vec<LineRecord> {
        self.lock().drain(..).collect()
    }

    /// Returns the texts delivered to `line`, oldest first.
    #[must_use]
    pub fn lines_for(&self, line: LogLine) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|record| record.slot == line.slot())
            .map(|record| record.text.clone())
            .collect()
    }

    /// Returns the number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether no records are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LineRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LineSink for RecordingSink {
    fn slots(&self) -> &SlotTable {
        &self.slots
    }

    fn on_log(&self, slot: usize, text: String) {
        self.lock().push(LineRecord { slot, text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_keep_arrival_order() {
        let sink = RecordingSink::new();
        sink.on_log(5, "hello world".to_owned());
        sink.on_log(2, "other".to_owned());
        sink.on_log(5, "7".to_owned());

        assert_eq!(
            sink.records(),
            vec![
                LineRecord::new(5, "hello world"),
                LineRecord::new(2, "other"),
                LineRecord::new(5, "7"),
            ]
        );
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn lines_for_filters_by_slot() {
        let sink = RecordingSink::new();
        sink.on_log(1, "a".to_owned());
        sink.on_log(3, "b".to_owned());
        sink.on_log(1, "c".to_owned());

        assert_eq!(sink.lines_for(LogLine::new_const(1)), vec!["a", "c"]);
        assert!(sink.lines_for(LogLine::new_const(0)).is_empty());
    }

    #[test]
    fn drain_empties_the_log() {
        let sink = RecordingSink::new();
        sink.on_log(0, "first".to_owned());

        assert_eq!(sink.drain(), vec![LineRecord::new(0, "first")]);
        assert!(sink.is_empty());
        assert!(sink.drain().is_empty());
    }
}
