//! Structured, non-fatal parsing diagnostics.
//!
//! Structural mismatches in a parsed file never abort parsing: the
//! parser records a [`ParsingError`] and recovers at the next lawful
//! position. Records accumulate on the tree context and are mirrored to
//! its logger.

use crate::log::{LogLevel, Logger};

/// Diagnostic severity. Only I/O failures are fatal, and those are
/// reported as [`Mp4Error`](crate::Mp4Error), not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    fn log_level(self) -> LogLevel {
        match self {
            Severity::Error => LogLevel::Error,
            Severity::Warning => LogLevel::Warning,
            Severity::Info => LogLevel::Info,
        }
    }
}

/// Error category strings, mirroring the taxonomy in §7.
pub fn specification_error() -> String {
    "Specification".to_owned()
}

pub fn malformed_atom_error(atom: &str) -> String {
    format!("Malformed atom '{atom}'")
}

pub fn malformed_descriptor_error(tag: u8) -> String {
    format!("Malformed descriptor '{tag}'")
}

pub fn missing_atom_error(atom: &str) -> String {
    format!("Missing atom '{atom}'")
}

pub fn invalid_property_value_error(property: &str) -> String {
    format!("Invalid property '{property}' value")
}

pub fn metadata_mismatch_error() -> String {
    "Metadata mismatch".to_owned()
}

pub fn duration_error() -> String {
    "Duration error".to_owned()
}

/// One recovered structural problem.
#[derive(Debug, Clone)]
pub struct ParsingError {
    pub severity: Severity,
    /// E.g. `Specification` or `Malformed atom 'trak'`.
    pub category: String,
    /// `Container`, or the enclosing track's type name (`Video`,
    /// `Audio`, `Hint Track`, ...).
    pub location: String,
    /// Set when the offending atom descends from a `trak`.
    pub track_id: Option<u32>,
    pub message: String,
}

/// Collects parsing diagnostics and mirrors each to the logger.
#[derive(Default)]
pub struct ParsingErrors {
    records: Vec<ParsingError>,
}

impl ParsingErrors {
    pub fn add(&mut self, logger: &mut Logger, record: ParsingError) {
        let formatted = match record.track_id {
            Some(id) => Logger::format_track_msg(
                &record.category,
                &record.location,
                id,
                &record.message,
            ),
            None => Logger::format_msg(&record.category, &record.location, &record.message),
        };
        logger.printf(record.severity.log_level(), &formatted);
        self.records.push(record);
    }

    pub fn records(&self) -> &[ParsingError] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records matching a category prefix, e.g. `Malformed atom`.
    pub fn with_category(&self, prefix: &str) -> impl Iterator<Item = &ParsingError> {
        let prefix = prefix.to_owned();
        self.records
            .iter()
            .filter(move |r| r.category.starts_with(&prefix))
    }
}
