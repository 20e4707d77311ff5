#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/slotlog/src/lib.rs
//!
//! # Overview
//!
//! `slotlog` lets application code address a fixed set of numbered log lines
//! and stream values into them. Each complete streaming expression becomes one
//! record delivered to a sink supplied by the application, which typically
//! shows the latest record for every line in a debug overlay.
//!
//! # Design
//!
//! - [`LogLine`] is a validated, copyable handle to one of [`MAX_SLOTS`]
//!   slots. Call sites keep one around and call [`LogLine::open`] to emit.
//! - [`LogStream`] is the short-lived value returned by `open`. Values are
//!   appended with `<<` (any [`Display`](std::fmt::Display) type) and the
//!   stream flushes when it is dropped at the end of the expression.
//! - [`LogLine::emit`] wraps an emission whose operands can fail with `?`:
//!   the line is delivered only when the building closure returns `Ok`.
//! - [`LineSink`] is implemented by the application. It embeds a
//!   [`SlotTable`] holding one text buffer per slot and receives
//!   [`LineSink::on_log`] once per completed emission.
//! - [`bind_sink`] installs the process-wide sink exactly once at startup.
//!
//! # Invariants
//!
//! - A successful release delivers exactly one `on_log(slot, text)` where
//!   `text` is everything inserted since the slot's buffer was last emptied,
//!   and leaves the buffer empty.
//! - A release that happens while the thread unwinds from a panic raised after
//!   the stream was opened delivers nothing and keeps the buffered text.
//!   The same holds for an `emit` closure that returns `Err`.
//! - Slot indices handed to sinks are always below [`MAX_SLOTS`].
//! - The process-wide binding is write-once.
//!
//! Emission is single-producer by contract. The buffers sit behind per-slot
//! locks so the binding can live in a `static`, but nothing orders text from
//! concurrent streams on the same slot.
//!
//! # Errors
//!
//! [`LogError`] covers out-of-range lines, opening before a sink is bound,
//! rebinding, and values whose formatting fails.
//!
//! # Examples
//!
//! ```
//! use std::sync::Mutex;
//! use slotlog::{LineSink, LogLine, SlotTable, bind_sink, leak_sink};
//!
//! #[derive(Default)]
//! struct Overlay {
//!     slots: SlotTable,
//!     rows: Mutex<Vec<(usize, String)>>,
//! }
//!
//! impl LineSink for Overlay {
//!     fn slots(&self) -> &SlotTable {
//!         &self.slots
//!     }
//!
//!     fn on_log(&self, slot: usize, text: String) {
//!         self.rows.lock().unwrap().push((slot, text));
//!     }
//! }
//!
//! let overlay = leak_sink(Overlay::default());
//! bind_sink(overlay)?;
//!
//! static SPEED: LogLine = LogLine::new_const(3);
//! let _ = SPEED.open()? << "x=" << 42;
//!
//! assert_eq!(*overlay.rows.lock().unwrap(), vec![(3, "x=42".to_owned())]);
//! # Ok::<(), slotlog::LogError>(())
//! ```

mod binding;
mod error;
mod line;
mod sink;
mod stream;
mod trace;

pub use binding::{bind_sink, bound_sink, is_bound, leak_sink};
pub use error::LogError;
pub use line::{LogLine, MAX_SLOTS};
pub use sink::{LineSink, SlotTable};
pub use stream::LogStream;
