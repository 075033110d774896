//! Diagnostic output for long-running commands.
//!
//! Progress, warnings and notes go to stderr so that stdout stays reserved for
//! reports (tables, JSON). A `Console` is passed explicitly to the components
//! that need it instead of being reached through a global.

use std::{
    fmt::Display,
    io::{self, Write},
    time::Duration,
};

use colored::Colorize;
use tracing::Level;

/// Environment variable that suppresses the elapsed time line.
pub const DISABLE_TIMING_ENV: &str = "LOCSCAN_DISABLE_TIMING";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Info,
    Warning,
    Note,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    verbose: bool,
    debug: bool,
}

impl Console {
    pub fn new(verbose: bool, debug: bool) -> Self {
        Self { verbose, debug }
    }

    /// Install a stderr `tracing` subscriber when `--debug` was given.
    ///
    /// Calling this more than once is harmless; later calls are ignored.
    pub fn init_tracing(&self) {
        if !self.debug {
            return;
        }
        let _ = tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(Level::DEBUG)
            .with_writer(io::stderr)
            .try_init();
    }

    pub fn info(&self, message: impl Display) {
        self.emit(Severity::Info, message, &mut io::stderr().lock());
    }

    pub fn warn(&self, message: impl Display) {
        self.emit(Severity::Warning, message, &mut io::stderr().lock());
    }

    /// Only printed with `--verbose`.
    pub fn note(&self, message: impl Display) {
        self.emit(Severity::Note, message, &mut io::stderr().lock());
    }

    pub fn elapsed(&self, label: &str, elapsed: Duration) {
        if std::env::var_os(DISABLE_TIMING_ENV).is_some() {
            return;
        }
        self.info(format!("{} in {:.2}s", label, elapsed.as_secs_f64()));
    }

    fn emit<W: Write>(&self, severity: Severity, message: impl Display, writer: &mut W) {
        let prefix = match severity {
            Severity::Info => "info:".bold().green(),
            Severity::Warning => "warning:".bold().yellow(),
            Severity::Note if self.verbose => "note:".bold().cyan(),
            Severity::Note => return,
        };
        let _ = writeln!(writer, "{} {}", prefix, message);
    }
}
