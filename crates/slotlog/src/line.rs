use std::fmt;

use crate::binding::bound_sink;
use crate::error::LogError;
use crate::sink::LineSink;
use crate::stream::LogStream;

/// Number of addressable log lines.
pub const MAX_SLOTS: usize = 20;

/// Validated handle to one of the [`MAX_SLOTS`] log lines.
///
/// A line is cheap to copy and cannot be re-targeted once built; call sites
/// usually keep one in a `static` or a local constant and call
/// [`open`](Self::open) each time they want to emit.
///
/// # Examples
///
/// ```
/// use slotlog::{LogError, LogLine, MAX_SLOTS};
///
/// static FPS: LogLine = LogLine::new_const(0);
/// assert_eq!(FPS.slot(), 0);
///
/// let line = LogLine::new(3)?;
/// assert_eq!(line.slot(), 3);
///
/// assert!(matches!(
///     LogLine::new(MAX_SLOTS as i32),
///     Err(LogError::InvalidSlot { line: 20, max: 20 })
/// ));
/// # Ok::<(), LogError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct LogLine {
    slot: usize,
}

impl LogLine {
    /// Creates a handle for `line`, rejecting indices outside `[0, MAX_SLOTS)`.
    pub fn new(line: i32) -> Result<Self, LogError> {
        usize::try_from(line)
            .ok()
            .filter(|&slot| slot < MAX_SLOTS)
            .map(|slot| Self { slot })
            .ok_or_else(|| LogError::invalid_slot(line))
    }

    /// Creates a handle in a constant context.
    ///
    /// Out-of-range indices fail compilation when evaluated in a `const` or
    /// `static` initialiser, and panic otherwise.
    #[must_use]
    pub const fn new_const(line: usize) -> Self {
        assert!(
            line < MAX_SLOTS,
            "log line must be between zero and MAX_SLOTS"
        );
        Self { slot: line }
    }

    /// Returns the slot index this handle addresses.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.slot
    }

    /// Opens a stream on this line against the process-wide sink.
    ///
    /// Opening has no side effects; the sink sees nothing until the returned
    /// stream is released.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NoSinkBound`] when [`bind_sink`](crate::bind_sink)
    /// has not been called yet.
    pub fn open(self) -> Result<LogStream<'static>, LogError> {
        let sink = bound_sink().ok_or(LogError::NoSinkBound)?;
        Ok(self.open_on(sink))
    }

    /// Builds one emission in `build` and delivers it only if `build` succeeds.
    ///
    /// This is the failure-aware entry point for expressions whose operands
    /// can fail with `?`. The closure receives a fresh stream and returns it
    /// after inserting its values. `Ok` delivers the line once. `Err` (or a
    /// panic) leaves the partial text in the slot's buffer without calling the
    /// sink, and the error is returned to the caller. The closure must return
    /// the stream it was given; any other stream it drops stays silent.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NoSinkBound`] (converted into `E`) when no sink is
    /// bound, and otherwise whatever error `build` returns.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use slotlog::{LogError, LogLine};
    ///
    /// static TEMPERATURE: LogLine = LogLine::new_const(4);
    ///
    /// fn read_sensor() -> Result<f64, LogError> {
    ///     Ok(21.5)
    /// }
    ///
    /// TEMPERATURE.emit(|stream| -> Result<_, LogError> {
    ///     Ok(stream << "temp=" << read_sensor()?)
    /// })?;
    /// # Ok::<(), LogError>(())
    /// ```
    pub fn emit<E, F>(self, build: F) -> Result<(), E>
    where
        E: From<LogError>,
        F: FnOnce(LogStream<'static>) -> Result<LogStream<'static>, E>,
    {
        let sink = bound_sink().ok_or(LogError::NoSinkBound)?;
        self.emit_on(sink, build)
    }

    pub(crate) fn open_on<'a>(self, sink: &'a dyn LineSink) -> LogStream<'a> {
        LogStream::new(sink, self.slot)
    }

    pub(crate) fn emit_on<'a, E, F>(self, sink: &'a dyn LineSink, build: F) -> Result<(), E>
    where
        F: FnOnce(LogStream<'a>) -> Result<LogStream<'a>, E>,
    {
        build(LogStream::deferred(sink, self.slot)).map(LogStream::commit)
    }
}

impl TryFrom<i32> for LogLine {
    type Error = LogError;

    fn try_from(line: i32) -> Result<Self, Self::Error> {
        Self::new(line)
    }
}

impl TryFrom<usize> for LogLine {
    type Error = LogError;

    fn try_from(line: usize) -> Result<Self, Self::Error> {
        if line < MAX_SLOTS {
            Ok(Self { slot: line })
        } else {
            Err(LogError::InvalidSlot {
                line: i64::try_from(line).unwrap_or(i64::MAX),
                max: MAX_SLOTS,
            })
        }
    }
}

impl From<LogLine> for usize {
    fn from(line: LogLine) -> Self {
        line.slot
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.slot)
    }
}
