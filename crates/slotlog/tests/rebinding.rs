//! Write-once behaviour of the process-wide binding.
//!
//! A single test lives here because the binding cannot be reset within a
//! process.

use std::sync::Mutex;

use slotlog::{LineSink, LogError, LogLine, SlotTable, bind_sink, bound_sink, leak_sink};

#[derive(Default)]
struct Tally {
    slots: SlotTable,
    lines: Mutex<Vec<String>>,
}

impl LineSink for Tally {
    fn slots(&self) -> &SlotTable {
        &self.slots
    }

    fn on_log(&self, _slot: usize, text: String) {
        self.lines.lock().expect("tally lock").push(text);
    }
}

#[test]
fn second_bind_fails_and_first_sink_stays_active() {
    let first = leak_sink(Tally::default());
    let second = leak_sink(Tally::default());

    bind_sink(first).expect("first bind succeeds");
    assert_eq!(bind_sink(second), Err(LogError::AlreadyBound));

    let active = bound_sink().expect("a sink is bound");
    assert!(std::ptr::eq(active.slots(), first.slots()));

    let line = LogLine::new(1).expect("valid line");
    let _ = line.open().expect("sink bound") << "to first";

    assert_eq!(*first.lines.lock().expect("tally lock"), vec!["to first"]);
    assert!(second.lines.lock().expect("tally lock").is_empty());
}
