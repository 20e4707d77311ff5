//! End-to-end emission through the process-wide sink.
//!
//! Every test shares one bound sink, so each test writes to its own slot and
//! only inspects the records for that slot.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, OnceLock};

use slotlog::{LineSink, LogError, LogLine, SlotTable, bind_sink, leak_sink};

#[derive(Default)]
struct Recorder {
    slots: SlotTable,
    records: Mutex<Vec<(usize, String)>>,
}

impl Recorder {
    fn for_slot(&self, slot: usize) -> Vec<String> {
        self.records
            .lock()
            .expect("recorder lock")
            .iter()
            .filter(|(recorded, _)| *recorded == slot)
            .map(|(_, text)| text.clone())
            .collect()
    }

    fn for_slots(&self, slots: &[usize]) -> Vec<(usize, String)> {
        self.records
            .lock()
            .expect("recorder lock")
            .iter()
            .filter(|(recorded, _)| slots.contains(recorded))
            .cloned()
            .collect()
    }
}

impl LineSink for Recorder {
    fn slots(&self) -> &SlotTable {
        &self.slots
    }

    fn on_log(&self, slot: usize, text: String) {
        assert!(slot < slotlog::MAX_SLOTS);
        self.records
            .lock()
            .expect("recorder lock")
            .push((slot, text));
    }
}

fn recorder() -> &'static Recorder {
    static RECORDER: OnceLock<&'static Recorder> = OnceLock::new();
    RECORDER.get_or_init(|| {
        let recorder = leak_sink(Recorder::default());
        bind_sink(recorder).expect("bound once per test binary");
        recorder
    })
}

fn line(index: i32) -> LogLine {
    LogLine::new(index).expect("valid line")
}

fn failing_step() -> i32 {
    panic!("simulated failure inside the streaming expression")
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum StepError {
    #[error("sensor offline")]
    Offline,
    #[error(transparent)]
    Log(#[from] LogError),
}

fn read_sensor(online: bool) -> Result<i32, StepError> {
    if online {
        Ok(1)
    } else {
        Err(StepError::Offline)
    }
}

struct Broken;

impl fmt::Display for Broken {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Err(fmt::Error)
    }
}

#[test]
fn label_and_integer_flush_as_one_record() {
    let sink = recorder();

    let _ = line(3).open().expect("sink bound") << "x=" << 42;

    assert_eq!(sink.for_slot(3), vec!["x=42"]);
    assert!(!sink.slots().has_pending(line(3)));
}

#[test]
fn out_of_range_line_is_rejected_without_callbacks() {
    let sink = recorder();

    let error = LogLine::new(20).expect_err("out of range");

    assert_eq!(error, LogError::InvalidSlot { line: 20, max: 20 });
    assert!(error.to_string().contains("(20)"));
    assert!(sink.for_slot(20).is_empty());
}

#[test]
fn failed_expression_is_folded_into_next_emission() {
    let sink = recorder();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = line(0).open().expect("sink bound") << "a" << failing_step();
    }));
    assert!(outcome.is_err());
    assert!(sink.for_slot(0).is_empty());

    let _ = line(0).open().expect("sink bound") << "b";

    assert_eq!(sink.for_slot(0), vec!["ab"]);
}

#[test]
fn error_propagated_from_emit_is_folded_into_next_emission() {
    let sink = recorder();

    let outcome = line(1).emit(|stream| -> Result<_, StepError> {
        Ok(stream << "a" << read_sensor(false)?)
    });
    assert_eq!(outcome, Err(StepError::Offline));
    assert!(sink.for_slot(1).is_empty());
    assert!(sink.slots().has_pending(line(1)));

    line(1)
        .emit(|stream| -> Result<_, StepError> { Ok(stream << "b") })
        .expect("emits");

    assert_eq!(sink.for_slot(1), vec!["ab"]);
}

#[test]
fn successful_emit_delivers_one_record() {
    let sink = recorder();

    line(2)
        .emit(|stream| -> Result<_, StepError> {
            Ok(stream << "reading=" << read_sensor(true)?)
        })
        .expect("emits");

    assert_eq!(sink.for_slot(2), vec!["reading=1"]);
    assert!(!sink.slots().has_pending(line(2)));
}

#[test]
fn consecutive_emissions_do_not_share_text() {
    let sink = recorder();

    let _ = line(5).open().expect("sink bound") << "hello " << "world";
    let _ = line(5).open().expect("sink bound") << 7;

    assert_eq!(sink.for_slot(5), vec!["hello world", "7"]);
}

#[test]
fn release_order_drives_callback_order() {
    let sink = recorder();

    let early = line(10).open().expect("sink bound") << "opened first";
    let late = line(11).open().expect("sink bound") << "opened second";
    let _ = line(12).open().expect("sink bound") << "released first";
    drop(late);
    drop(early);

    assert_eq!(
        sink.for_slots(&[10, 11, 12]),
        vec![
            (12, "released first".to_owned()),
            (11, "opened second".to_owned()),
            (10, "opened first".to_owned()),
        ]
    );
}

#[test]
fn try_insert_propagates_fault_with_question_mark() {
    fn emit(line: LogLine) -> Result<(), LogError> {
        let _ = line.open()?.try_insert("pending ")?.try_insert(Broken)?;
        Ok(())
    }

    let sink = recorder();

    assert_eq!(
        emit(line(14)),
        Err(LogError::SerializationFault { slot: 14 })
    );
    assert!(sink.for_slot(14).is_empty());
    assert!(sink.slots().has_pending(line(14)));

    sink.slots().discard(line(14));
    let _ = line(14).open().expect("sink bound") << "fresh";
    assert_eq!(sink.for_slot(14), vec!["fresh"]);
}

#[test]
fn each_completed_expression_flushes_exactly_once() {
    let sink = recorder();
    let values = [3_i64, -1, 0, 250, 99_999];

    for value in values {
        let _ = line(16).open().expect("sink bound") << "v=" << value << ';';
    }

    let expected: Vec<String> = values.iter().map(|value| format!("v={value};")).collect();
    assert_eq!(sink.for_slot(16), expected);
}
