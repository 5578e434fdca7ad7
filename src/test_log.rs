// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

//! Captures log records per thread.
//!
//! Tests run in parallel on separate threads while the logger is
//! process-wide. Records are therefore collected in a thread-local
//! buffer that only the current test can see.

use std::{cell::RefCell, sync::Once};

use log::{Level, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let entry = (record.level(), record.args().to_string());
        RECORDS.with(|records| records.borrow_mut().push(entry));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;

static INIT: Once = Once::new();

/// Install the logger and discard records of the current thread.
pub(crate) fn start_capture() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger installed");
        log::set_max_level(log::LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Take all records of the current thread with the given level.
pub(crate) fn take_records(level: Level) -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow_mut()
            .drain(..)
            .filter_map(|(record_level, msg)| (record_level == level).then_some(msg))
            .collect()
    })
}

/// Count records of the current thread per level without consuming them.
pub(crate) fn count_records(level: Level) -> usize {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(record_level, _)| *record_level == level)
            .count()
    })
}
