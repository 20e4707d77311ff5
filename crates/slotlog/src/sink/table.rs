use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{LogLine, MAX_SLOTS};

#[derive(Debug, Default)]
struct SlotBuffer {
    text: String,
    hit: bool,
}

/// Per-slot text buffers owned by a [`LineSink`](crate::LineSink).
///
/// A sink embeds exactly one table and hands it out through
/// [`LineSink::slots`](crate::LineSink::slots). The buffered text is not
/// reachable from outside this crate: streams append to it and the delivery
/// path drains it, while sink implementations only see the text once it
/// arrives in [`LineSink::on_log`](crate::LineSink::on_log). What the table
/// does expose publicly is housekeeping: re-initialisation, discarding text
/// retained by abandoned emissions, and the per-frame hit bookkeeping.
///
/// # Examples
///
/// ```
/// use slotlog::{LogLine, SlotTable};
///
/// let table = SlotTable::new();
/// let line = LogLine::new(2)?;
/// assert!(!table.has_pending(line));
///
/// // No slot was flushed since the table was created, so all of them are stale.
/// assert_eq!(table.clear_log_for_next_frame().len(), slotlog::MAX_SLOTS);
/// # Ok::<(), slotlog::LogError>(())
/// ```
#[derive(Debug)]
pub struct SlotTable {
    slots: [Mutex<SlotBuffer>; MAX_SLOTS],
}

impl SlotTable {
    /// Allocates [`MAX_SLOTS`] empty buffers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Mutex::default()),
        }
    }

    /// Re-initialises every buffer to empty and forgets which slots were hit.
    pub fn setup(&self) {
        for slot in &self.slots {
            *lock(slot) = SlotBuffer::default();
        }
    }

    /// Reports whether text is waiting in the slot's buffer.
    ///
    /// Buffers are empty between emissions unless an earlier emission on the
    /// same slot was abandoned mid-expression, in which case its partial text
    /// is retained until the next successful flush or an explicit
    /// [`discard`](Self::discard).
    #[must_use]
    pub fn has_pending(&self, line: LogLine) -> bool {
        !lock(&self.slots[line.slot()]).text.is_empty()
    }

    /// Drops any text retained in the slot's buffer without delivering it.
    pub fn discard(&self, line: LogLine) {
        lock(&self.slots[line.slot()]).text.clear();
    }

    /// Closes the current frame and returns the slots that were not flushed
    /// during it.
    ///
    /// Every successful flush marks its slot as hit. This call collects the
    /// slots whose flag is still clear, empties whatever partial text those
    /// slots retained, and then resets every flag so the next frame starts
    /// fresh. The sink's delivery callback is not invoked; deciding how a stale
    /// line is displayed is left to the sink.
    pub fn clear_log_for_next_frame(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let mut buffer = lock(slot);
                let stale = !buffer.hit;
                buffer.hit = false;
                if stale {
                    buffer.text.clear();
                    Some(index)
                } else {
                    None
                }
            })
            .collect()
    }

    pub(crate) fn append(&self, slot: usize, text: &str) {
        lock(&self.slots[slot]).text.push_str(text);
    }

    pub(crate) fn pending_len(&self, slot: usize) -> usize {
        lock(&self.slots[slot]).text.len()
    }

    /// Empties the slot's buffer for delivery and marks the slot hit.
    pub(crate) fn take_for_delivery(&self, slot: usize) -> String {
        let mut buffer = lock(&self.slots[slot]);
        buffer.hit = true;
        mem::take(&mut buffer.text)
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new()
    }
}

// Buffers are only ever locked for a single push or take, never across user
// code, so a poisoned lock still guards consistent text.
fn lock(slot: &Mutex<SlotBuffer>) -> MutexGuard<'_, SlotBuffer> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
