//! crates/slotlog/src/binding.rs
//! Write-once, process-wide binding of the active sink.

use std::sync::OnceLock;

use crate::error::LogError;
use crate::sink::LineSink;
use crate::trace;

/// A cell that accepts exactly one sink.
pub(crate) struct SinkBinding {
    cell: OnceLock<&'static dyn LineSink>,
}

impl SinkBinding {
    pub(crate) const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub(crate) fn bind(&self, sink: &'static dyn LineSink) -> Result<(), LogError> {
        let accepted = self.cell.set(sink).is_ok();
        trace::trace_bind(accepted);
        if accepted {
            Ok(())
        } else {
            Err(LogError::AlreadyBound)
        }
    }

    pub(crate) fn get(&self) -> Option<&'static dyn LineSink> {
        self.cell.get().copied()
    }
}

static PROCESS_SINK: SinkBinding = SinkBinding::new();

/// Binds `sink` as the process-wide receiver of every [`LogLine`](crate::LogLine).
///
/// Binding normally happens once during startup, before any line is opened.
/// There is no way to unbind; the `'static` bound guarantees the sink outlives
/// every stream. Use [`leak_sink`] to promote an owned sink.
///
/// # Errors
///
/// Returns [`LogError::AlreadyBound`] if a sink is already bound. The first
/// sink stays active.
///
/// # Examples
///
/// ```
/// use slotlog::{LineSink, LogError, SlotTable, bind_sink, leak_sink};
///
/// #[derive(Default)]
/// struct Discard(SlotTable);
///
/// impl LineSink for Discard {
///     fn slots(&self) -> &SlotTable {
///         &self.0
///     }
///
///     fn on_log(&self, _slot: usize, _text: String) {}
/// }
///
/// bind_sink(leak_sink(Discard::default()))?;
/// assert_eq!(bind_sink(leak_sink(Discard::default())), Err(LogError::AlreadyBound));
/// # Ok::<(), LogError>(())
/// ```
pub fn bind_sink(sink: &'static dyn LineSink) -> Result<(), LogError> {
    PROCESS_SINK.bind(sink)
}

/// Returns the process-wide sink, if one has been bound.
#[must_use]
pub fn bound_sink() -> Option<&'static dyn LineSink> {
    PROCESS_SINK.get()
}

/// Reports whether a process-wide sink has been bound.
#[must_use]
pub fn is_bound() -> bool {
    bound_sink().is_some()
}

/// Moves `sink` to the heap and leaks it so it can be passed to [`bind_sink`].
///
/// The returned reference keeps the concrete type, so callers can keep
/// inspecting the sink after binding it.
pub fn leak_sink<S: LineSink + 'static>(sink: S) -> &'static S {
    Box::leak(Box::new(sink))
}
