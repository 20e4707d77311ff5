use std::fmt::{self, Display, Write as _};
use std::ops::Shl;
use std::thread;

use crate::error::LogError;
use crate::sink::{LineSink, deliver};
use crate::trace;

/// Scoped stream that collects one emission for a log line.
///
/// Streams are produced by [`LogLine::open`](crate::LogLine::open) and are
/// meant to live for a single expression. Values are inserted with `<<`,
/// [`try_insert`](Self::try_insert), or `write!`; each insertion is formatted
/// with its [`Display`] implementation and appended to the line's buffer in
/// the sink's [`SlotTable`](crate::SlotTable).
///
/// Dropping the stream releases it:
///
/// - after the expression completes the buffered text is delivered to
///   [`LineSink::on_log`] once and the buffer is emptied;
/// - when the thread started panicking after the stream was opened, or an
///   insertion failed to format, nothing is delivered and the partial text
///   stays in the buffer. The next completed emission on the same slot then
///   delivers the combined text unless the sink discards it first.
///
/// A stream from [`open`](crate::LogLine::open) cannot tell an `Err` leaving
/// the expression through `?` from a normal end of statement, so it delivers
/// whatever was inserted before the early return. Expressions with fallible
/// operands go through [`LogLine::emit`](crate::LogLine::emit) instead, which
/// only delivers once the closure building the line returns `Ok`.
///
/// # Examples
///
/// ```no_run
/// use slotlog::LogLine;
///
/// static POSITION: LogLine = LogLine::new_const(1);
///
/// # fn update(x: f64, y: f64) -> Result<(), slotlog::LogError> {
/// let _ = POSITION.open()? << "pos=(" << x << ", " << y << ")";
/// # Ok(())
/// # }
/// ```
#[must_use = "the line is delivered when the stream is dropped"]
pub struct LogStream<'a> {
    sink: &'a dyn LineSink,
    slot: usize,
    scratch: String,
    panicking_at_open: bool,
    suppressed: bool,
    uncommitted: bool,
}

impl<'a> LogStream<'a> {
    pub(crate) fn new(sink: &'a dyn LineSink, slot: usize) -> Self {
        Self::with_commit(sink, slot, false)
    }

    /// Opens a stream that stays silent on release until [`commit`](Self::commit).
    pub(crate) fn deferred(sink: &'a dyn LineSink, slot: usize) -> Self {
        Self::with_commit(sink, slot, true)
    }

    fn with_commit(sink: &'a dyn LineSink, slot: usize, uncommitted: bool) -> Self {
        Self {
            sink,
            slot,
            scratch: String::new(),
            panicking_at_open: thread::panicking(),
            suppressed: false,
            uncommitted,
        }
    }

    /// Arms delivery and releases the stream.
    pub(crate) fn commit(mut self) {
        self.uncommitted = false;
    }

    /// Returns the slot this stream writes into.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Appends `value` and returns the stream for further chaining.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::SerializationFault`] when the value's [`Display`]
    /// implementation reports an error. The stream is released without
    /// delivering anything; text inserted before the failing value is kept in
    /// the buffer.
    pub fn try_insert<T: Display>(mut self, value: T) -> Result<Self, LogError> {
        match self.append(format_args!("{value}")) {
            Ok(()) => Ok(self),
            Err(error) => {
                self.suppressed = true;
                Err(error)
            }
        }
    }

    fn append(&mut self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.scratch.clear();
        self.scratch
            .write_fmt(args)
            .map_err(|_| LogError::SerializationFault { slot: self.slot })?;
        self.sink.slots().append(self.slot, &self.scratch);
        Ok(())
    }

    fn should_suppress(&self) -> bool {
        self.suppressed || self.uncommitted || (thread::panicking() && !self.panicking_at_open)
    }
}

impl<T: Display> Shl<T> for LogStream<'_> {
    type Output = Self;

    /// Appends `value` to the line.
    ///
    /// A [`Display`] implementation that reports an error aborts the enclosing
    /// expression with a panic carrying [`LogError::SerializationFault`]; the
    /// unwinding suppresses the flush. When the thread is already unwinding the
    /// stream is marked suppressed instead, since a second panic would abort.
    fn shl(mut self, value: T) -> Self::Output {
        if let Err(error) = self.append(format_args!("{value}")) {
            if thread::panicking() {
                self.suppressed = true;
            } else {
                panic!("{error}");
            }
        }
        self
    }
}

impl fmt::Write for LogStream<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sink.slots().append(self.slot, s);
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.append(args).map_err(|_| {
            self.suppressed = true;
            fmt::Error
        })
    }
}

impl Drop for LogStream<'_> {
    fn drop(&mut self) {
        if self.should_suppress() {
            trace::trace_suppressed(self.slot, self.sink.slots().pending_len(self.slot));
            return;
        }
        deliver(self.sink, self.slot);
    }
}

impl fmt::Debug for LogStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStream")
            .field("slot", &self.slot)
            .field("suppressed", &self.suppressed)
            .field("uncommitted", &self.uncommitted)
            .finish_non_exhaustive()
    }
}
