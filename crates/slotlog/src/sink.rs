mod table;

pub use table::SlotTable;

use crate::trace;

/// Receiver of completed line emissions.
///
/// Implementors embed a [`SlotTable`] and return it from
/// [`slots`](Self::slots); streams opened against the sink buffer their text
/// there. Each successfully completed streaming expression results in exactly
/// one [`on_log`](Self::on_log) call carrying the slot index and the full text
/// inserted since that slot's buffer was last emptied. The call happens
/// synchronously on the thread that released the stream, after the buffer has
/// already been emptied, so a sink is free to log from inside the callback.
///
/// The `Send + Sync` bound exists because a sink bound with
/// [`bind_sink`](crate::bind_sink) lives in a process-wide static. Emission is
/// still single-producer by contract: concurrent streams on one slot
/// interleave their text.
///
/// # Examples
///
/// ```
/// use std::sync::Mutex;
/// use slotlog::{LineSink, SlotTable};
///
/// #[derive(Default)]
/// struct LastLine {
///     slots: SlotTable,
///     last: Mutex<Option<(usize, String)>>,
/// }
///
/// impl LineSink for LastLine {
///     fn slots(&self) -> &SlotTable {
///         &self.slots
///     }
///
///     fn on_log(&self, slot: usize, text: String) {
///         *self.last.lock().unwrap() = Some((slot, text));
///     }
/// }
/// ```
pub trait LineSink: Send + Sync {
    /// Returns the slot table that streams write into.
    fn slots(&self) -> &SlotTable;

    /// Receives the text of one completed emission on `slot`.
    ///
    /// `slot` is always below [`MAX_SLOTS`](crate::MAX_SLOTS).
    fn on_log(&self, slot: usize, text: String);
}

/// Drains the slot's buffer and hands the text to the sink.
pub(crate) fn deliver(sink: &dyn LineSink, slot: usize) {
    let text = sink.slots().take_for_delivery(slot);
    trace::trace_flush(slot, text.len());
    sink.on_log(slot, text);
}
