//! `log` backend for the simulator.
//!
//! Every record goes to stderr. Records at [`SCREEN_LEVEL`] or above are also
//! kept in a [`DebugLog`] that the log panel draws under the signs.

use std::sync::{Mutex, PoisonError};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use speed_signs_common::DebugLog;

/// Least severe level that reaches the on-screen panel.
pub const SCREEN_LEVEL: Level = Level::Info;

static SCREEN_LOG: Mutex<DebugLog> = Mutex::new(DebugLog::new());

static LOGGER: ScreenLogger = ScreenLogger;

struct ScreenLogger;

impl Log for ScreenLogger {
    fn enabled(
        &self,
        metadata: &Metadata<'_>,
    ) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(
        &self,
        record: &Record<'_>,
    ) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        if record.level() <= SCREEN_LEVEL {
            SCREEN_LOG
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_fmt(record.level(), *record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the logger. Fails if another logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Run `f` with the on-screen log. Must not log from inside `f`.
pub fn with_screen_log<R>(f: impl FnOnce(&DebugLog) -> R) -> R {
    let log = SCREEN_LOG.lock().unwrap_or_else(PoisonError::into_inner);
    f(&log)
}
