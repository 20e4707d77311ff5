#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/slotlog-sink/src/lib.rs
//!
//! # Overview
//!
//! `slotlog-sink` provides ready-made [`LineSink`](slotlog::LineSink)
//! implementations for the `slotlog` facade. Applications bind one of them at
//! startup (or write their own) and every completed line emission ends up
//! here.
//!
//! # Design
//!
//! - [`OverlaySink`] keeps the most recent text per slot and renders the
//!   non-empty rows to any [`std::io::Write`] target, honouring an
//!   [`OverlayConfig`] (labels, width limit, [`LineMode`], stale-row
//!   clearing at frame boundaries).
//! - [`RecordingSink`] appends every emission to an in-memory history of
//!   [`LineRecord`] values that can be inspected or drained.
//! - `TracingSink` (feature `tracing`) forwards each emission as a `tracing`
//!   event so lines can share the application's log pipeline.
//!
//! # Errors
//!
//! Rendering surfaces [`std::io::Error`] values from the underlying writer
//! unchanged. Delivery itself cannot fail.
//!
//! # Examples
//!
//! ```
//! use slotlog::{LogLine, bind_sink, leak_sink};
//! use slotlog_sink::{OverlayConfig, OverlaySink};
//!
//! let overlay = leak_sink(OverlaySink::new(OverlayConfig::default()));
//! bind_sink(overlay)?;
//!
//! static FRAME: LogLine = LogLine::new_const(0);
//! let _ = FRAME.open()? << "frame=" << 1;
//! let _ = FRAME.open()? << "frame=" << 2;
//!
//! assert_eq!(overlay.render_to_string(), " 0: frame=2\n");
//! # Ok::<(), slotlog::LogError>(())
//! ```

mod line_mode;
mod overlay;
mod recording;
#[cfg(feature = "tracing")]
mod tracing_sink;

pub use line_mode::LineMode;
pub use overlay::{OverlayConfig, OverlaySink};
pub use recording::{LineRecord, RecordingSink};
#[cfg(feature = "tracing")]
pub use tracing_sink::{LINE_TARGET, TracingSink};
