//! Console logging for vcbuild.
//!
//! Wires the `log` crate's macros to a stderr logger that prints
//! `HH:MM:SS.mmm LEVEL    message` lines, optionally colored with ANSI
//! 256-color escapes. Color is an explicit mode; `Auto` checks whether
//! stderr is a terminal instead of guessing from the parent process.

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::{IsTerminal, Write};

/// ANSI 256-color foreground for the timestamp column.
const TIMESTAMP_COLOR: u8 = 220;
/// ANSI 256-color foreground for the level column.
const LEVEL_COLOR: u8 = 219;

/// Console color behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Whether escape sequences should actually be emitted.
    pub fn colors_enabled(&self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stderr().is_terminal(),
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Auto
    }
}

/// Logger writing timestamped lines to stderr.
pub struct ConsoleLogger {
    colored: bool,
}

impl ConsoleLogger {
    pub fn new(mode: ColorMode) -> Self {
        ConsoleLogger {
            colored: mode.colors_enabled(),
        }
    }

    fn format_line(&self, record: &Record) -> String {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        if self.colored {
            format!(
                "\x1b[38;5;{}m{}\x1b[0m \x1b[38;5;{}m{:<8}\x1b[0m {}\n",
                TIMESTAMP_COLOR,
                timestamp,
                LEVEL_COLOR,
                record.level(),
                record.args()
            )
        } else {
            format!("{} {:<8} {}\n", timestamp, record.level(), record.args())
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = self.format_line(record);
            let _ = std::io::stderr().write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the console logger as the global backend for the `log` crate.
///
/// Subsequent calls keep the first logger in place.
pub fn init(mode: ColorMode) {
    if log::set_boxed_logger(Box::new(ConsoleLogger::new(mode)))
        .map(|()| log::set_max_level(LevelFilter::Debug))
        .is_err()
    {
        eprintln!("Logger already initialized");
    }
}
