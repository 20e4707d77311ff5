//! crates/slotlog-sink/src/overlay.rs
//! Debug overlay that shows the latest text delivered to every slot.

mod config;
mod render;

pub use config::OverlayConfig;

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use slotlog::{LineSink, LogLine, MAX_SLOTS, SlotTable};

/// Sink backing a runtime debug overlay.
///
/// Each slot owns one row. A delivered line replaces the row for its slot, so
/// line N always shows the most recent emission at N. Call
/// [`end_frame`](Self::end_frame) once per frame to age rows and
/// [`render`](Self::render) to draw the non-empty rows in slot order.
///
/// # Examples
///
/// ```
/// use slotlog::LineSink;
/// use slotlog_sink::{OverlayConfig, OverlaySink};
///
/// let overlay = OverlaySink::new(OverlayConfig::default().with_labels(false));
/// overlay.on_log(1, "fps=60".to_owned());
/// overlay.on_log(0, "frame=12".to_owned());
///
/// assert_eq!(overlay.render_to_string(), "frame=12\nfps=60\n");
/// ```
#[derive(Debug)]
pub struct OverlaySink {
    slots: SlotTable,
    rows: Mutex<Vec<String>>,
    config: OverlayConfig,
}

impl OverlaySink {
    /// Creates an overlay with every row blank.
    #[must_use]
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            slots: SlotTable::new(),
            rows: Mutex::new(vec![String::new(); MAX_SLOTS]),
            config,
        }
    }

    /// Returns the rendering configuration.
    #[must_use]
    pub const fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Returns the current row for `line`.
    #[must_use]
    pub fn line(&self, line: LogLine) -> String {
        self.rows()[line.slot()].clone()
    }

    /// Returns a snapshot of all [`MAX_SLOTS`] rows, blank rows included.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows().clone()
    }

    /// Closes the current frame.
    ///
    /// Returns the slots that received no emission since the previous call.
    /// Partial text those slots retained from abandoned emissions is dropped,
    /// and when [`OverlayConfig::clear_stale_lines`] is set their rows are
    /// blanked as well.
    pub fn end_frame(&self) -> Vec<usize> {
        let stale = self.slots.clear_log_for_next_frame();
        if self.config.clear_stale_lines {
            let mut rows = self.rows();
            for &slot in &stale {
                rows[slot].clear();
            }
        }
        stale
    }

    /// Blanks every row and re-initialises the slot buffers.
    pub fn reset(&self) {
        self.slots.setup();
        self.rows().iter_mut().for_each(String::clear);
    }

    /// Writes every non-empty row to `writer` in slot order.
    pub fn render<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        let rows = self.lines();
        for (slot, text) in rows.iter().enumerate() {
            if !text.is_empty() {
                render::write_row(writer, &self.config, slot, text)?;
            }
        }
        Ok(())
    }

    /// Renders the overlay into a `String`.
    #[must_use]
    pub fn render_to_string(&self) -> String {
        let mut buffer = Vec::new();
        self.render(&mut buffer).expect("writing to a Vec<u8> cannot fail");
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn rows(&self) -> MutexGuard<'_, Vec<String>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for OverlaySink {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl LineSink for OverlaySink {
    fn slots(&self) -> &SlotTable {
        &self.slots
    }

    fn on_log(&self, slot: usize, text: String) {
        self.rows()[slot] = text;
    }
}
