use thiserror::Error;

use crate::MAX_SLOTS;

/// Errors reported by line construction, stream opening, and sink binding.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LogError {
    /// A [`LogLine`](crate::LogLine) was requested for a slot outside `[0, MAX_SLOTS)`.
    #[error("log line {line} is out of range; lines must be between zero and the maximum ({max})")]
    InvalidSlot {
        /// The rejected line index.
        line: i64,
        /// The exclusive upper bound, always [`MAX_SLOTS`].
        max: usize,
    },
    /// A stream was opened before any sink was bound to the process.
    #[error("no line sink has been bound to this process")]
    NoSinkBound,
    /// A second sink was offered after one was already bound.
    #[error("a line sink is already bound; the process-wide sink may only be bound once")]
    AlreadyBound,
    /// A value inserted into a stream failed to format itself.
    #[error("value inserted into log line {slot} failed to format")]
    SerializationFault {
        /// The slot whose emission was abandoned.
        slot: usize,
    },
}

impl LogError {
    pub(crate) fn invalid_slot(line: impl Into<i64>) -> Self {
        Self::InvalidSlot {
            line: line.into(),
            max: MAX_SLOTS,
        }
    }
}
