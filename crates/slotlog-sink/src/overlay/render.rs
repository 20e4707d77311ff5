use std::io::{self, Write};

use super::config::OverlayConfig;

/// Writes one overlay row, applying labels, width truncation, and the line mode.
///
/// Line breaks inside `text` are shown as spaces so a row never spills into
/// the next one.
pub(super) fn write_row<W: Write + ?Sized>(
    writer: &mut W,
    config: &OverlayConfig,
    slot: usize,
    text: &str,
) -> io::Result<()> {
    if config.label_slots {
        write!(writer, "{slot:>2}: ")?;
    }

    let limit = config.max_width.unwrap_or(usize::MAX);
    let visible: String = text
        .chars()
        .take(limit)
        .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
        .collect();
    writer.write_all(visible.as_bytes())?;

    if config.line_mode.append_newline() {
        writer.write_all(b"\n")?;
    }
    Ok(())
}
