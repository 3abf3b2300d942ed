//! Leveled logging with a caller-supplied sink.
//!
//! The engine never prints directly. Every record goes through a
//! [`Logger`] owned by the tree context; the default sink forwards to
//! the `log` crate facade so embedders pick up whatever logger they
//! already installed. Tests swap in a capturing sink.

use std::fmt::Write as _;

/// Verbosity levels, ordered. `Verbose2` additionally enables table
/// entry dumps, which `Verbose1` suppresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    None,
    Error,
    Warning,
    Info,
    Verbose1,
    Verbose2,
    Verbose3,
    Verbose4,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::None => "None",
            LogLevel::Error => "Error",
            LogLevel::Warning => "Warning",
            LogLevel::Info => "Info",
            LogLevel::Verbose1 => "Verbose1",
            LogLevel::Verbose2 => "Verbose2",
            LogLevel::Verbose3 => "Verbose3",
            LogLevel::Verbose4 => "Verbose4",
        }
    }
}

/// Caller-supplied log record consumer.
pub trait LogSink {
    fn log(&mut self, level: LogLevel, message: &str);
}

/// Default sink: forwards to the `log` crate facade.
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn log(&mut self, level: LogLevel, message: &str) {
        match level {
            LogLevel::None => {}
            LogLevel::Error => log::error!("{message}"),
            LogLevel::Warning => log::warn!("{message}"),
            LogLevel::Info => log::info!("{message}"),
            LogLevel::Verbose1 | LogLevel::Verbose2 => log::debug!("{message}"),
            LogLevel::Verbose3 | LogLevel::Verbose4 => log::trace!("{message}"),
        }
    }
}

/// Leveled logger with formatting helpers for diagnostics and dumps.
pub struct Logger {
    pub verbosity: LogLevel,
    sink: Box<dyn LogSink>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::None, FacadeSink)
    }
}

impl Logger {
    pub fn new(verbosity: LogLevel, sink: impl LogSink + 'static) -> Self {
        Self {
            verbosity,
            sink: Box::new(sink),
        }
    }

    pub fn set_verbosity(&mut self, verbosity: LogLevel) {
        self.verbosity = verbosity;
    }

    /// Emits `message` if `level` is within the configured verbosity.
    pub fn printf(&mut self, level: LogLevel, message: &str) {
        if level == LogLevel::None || level > self.verbosity {
            return;
        }
        let line = format!("[{}]: {message}", level.as_str());
        self.sink.log(level, &line);
    }

    pub fn error(&mut self, message: &str) {
        self.printf(LogLevel::Error, message);
    }

    pub fn warning(&mut self, message: &str) {
        self.printf(LogLevel::Warning, message);
    }

    pub fn info(&mut self, message: &str) {
        self.printf(LogLevel::Info, message);
    }

    pub fn verbose1(&mut self, message: &str) {
        self.printf(LogLevel::Verbose1, message);
    }

    pub fn verbose2(&mut self, message: &str) {
        self.printf(LogLevel::Verbose2, message);
    }

    /// Indented dump line, two spaces per level.
    pub fn dump(&mut self, indent: u8, level: LogLevel, message: &str) {
        if level == LogLevel::None || level > self.verbosity {
            return;
        }
        let mut line = String::new();
        for _ in 0..indent {
            line.push_str("  ");
        }
        line.push_str(message);
        self.sink.log(level, &line);
    }

    /// `<Category>: <Location>: <Message>`
    pub fn format_msg(category: &str, location: &str, message: &str) -> String {
        let mut out = String::new();
        let _ = write!(out, "{category}: {location}: {message}");
        out
    }

    /// `<Category>: <Location>: Track <Track ID>: <Message>`
    pub fn format_track_msg(
        category: &str,
        location: &str,
        track_id: u32,
        message: &str,
    ) -> String {
        let mut out = String::new();
        let _ = write!(out, "{category}: {location}: Track {track_id}: {message}");
        out
    }
}

#[cfg(test)]
pub(crate) mod capture {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Test sink collecting every record.
    #[derive(Clone, Default)]
    pub struct CaptureSink {
        pub lines: Rc<RefCell<Vec<(LogLevel, String)>>>,
    }

    impl LogSink for CaptureSink {
        fn log(&mut self, level: LogLevel, message: &str) {
            self.lines.borrow_mut().push((level, message.to_owned()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::capture::CaptureSink;
    use super::*;

    #[test]
    fn verbosity_gates() {
        let sink = CaptureSink::default();
        let lines = sink.lines.clone();
        let mut logger = Logger::new(LogLevel::Warning, sink);
        logger.error("boom");
        logger.warning("eh");
        logger.info("fine");
        logger.verbose1("chatty");
        let got = lines.borrow();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].1, "[Error]: boom");
        assert_eq!(got[1].1, "[Warning]: eh");
    }

    #[test]
    fn track_format() {
        assert_eq!(
            Logger::format_track_msg("Specification", "Audio", 2, "missing atom"),
            "Specification: Audio: Track 2: missing atom"
        );
    }
}
