//! crates/slotlog-sink/src/tracing_sink.rs
//! Forwarding of delivered lines into the tracing ecosystem.
//!
//! [`TracingSink`] turns every completed emission into an `INFO` event under
//! the [`LINE_TARGET`] target, carrying the slot number and text as fields.
//! Any installed subscriber (for example `tracing_subscriber::fmt` with an
//! `EnvFilter` of `slotlog::line=info`) then decides where the lines go.
//!
//! # Usage
//!
//! ```rust,ignore
//! use slotlog::{LogLine, bind_sink, leak_sink};
//! use slotlog_sink::TracingSink;
//!
//! tracing_subscriber::fmt().init();
//! bind_sink(leak_sink(TracingSink::new()))?;
//!
//! static STATE: LogLine = LogLine::new_const(0);
//! let _ = STATE.open()? << "state=" << "idle";
//! ```

use slotlog::{LineSink, SlotTable};

/// Target used for forwarded line events.
pub const LINE_TARGET: &str = "slotlog::line";

/// Sink that re-emits every delivered line as a tracing event.
#[derive(Debug, Default)]
pub struct TracingSink {
    slots: SlotTable,
}

impl TracingSink {
    /// Creates a forwarding sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineSink for TracingSink {
    fn slots(&self) -> &SlotTable {
        &self.slots
    }

    fn on_log(&self, slot: usize, text: String) {
        tracing::info!(target: LINE_TARGET, slot, text = %text, "log_line");
    }
}
