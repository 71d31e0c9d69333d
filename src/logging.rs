#![cfg(feature = "std")]

//! Stderr logger for the two binaries.
//!
//! Records go to stderr so that `sim` can print its JSON report on stdout
//! and the terminal game's board drawing is not interleaved with log lines.
//! The engine only emits `debug!` per shot and placement, so the default
//! `info` level shows one line per game start and finish.

use std::env;
use log::{self, LevelFilter, Metadata, Record};

/// Writes `LEVEL target - message`; the target tells engine records
/// (`battleship_bot::game`, `battleship_bot::ai::hunt`, ...) apart from the binaries'.
struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} {} - {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Level named by `BATTLESHIP_LOG`, or `default` when unset or unparsable.
pub fn level_from_env(default: LevelFilter) -> LevelFilter {
    env::var("BATTLESHIP_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(default)
}

/// Route `log` records to stderr at the level taken from `BATTLESHIP_LOG`.
/// Defaults to `info`. Calling it twice is harmless.
pub fn init_logging() {
    let level = level_from_env(LevelFilter::Info);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
