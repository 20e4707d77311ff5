//! crates/slotlog-sink/src/overlay/config.rs
//! Rendering options for the debug overlay.

use crate::line_mode::LineMode;

/// Options controlling how an [`OverlaySink`](crate::OverlaySink) renders and ages its rows.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    /// Newline policy for rendered rows.
    pub line_mode: LineMode,
    /// Prefix each row with its slot number (`" 3: "`).
    pub label_slots: bool,
    /// Blank rows whose slot was not flushed during the frame that just ended.
    pub clear_stale_lines: bool,
    /// Truncate rendered rows to this many characters.
    pub max_width: Option<usize>,
}

impl OverlayConfig {
    /// Returns the configuration with `line_mode` replaced.
    pub fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Returns the configuration with slot labels enabled or disabled.
    pub fn with_labels(mut self, label_slots: bool) -> Self {
        self.label_slots = label_slots;
        self
    }

    /// Returns the configuration with stale-row clearing enabled or disabled.
    pub fn with_stale_clearing(mut self, clear_stale_lines: bool) -> Self {
        self.clear_stale_lines = clear_stale_lines;
        self
    }

    /// Returns the configuration with a row width limit.
    pub fn with_max_width(mut self, max_width: Option<usize>) -> Self {
        self.max_width = max_width;
        self
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            line_mode: LineMode::WithNewline,
            label_slots: true,
            clear_stale_lines: false,
            max_width: None,
        }
    }
}
