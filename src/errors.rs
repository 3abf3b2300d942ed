//! Various MP4-related errors.

use std::fmt;

/// MP4 atom tree read/write errors.
///
/// Structural problems inside a parsed file are *not* reported here,
/// they are collected as [`ParsingError`](crate::ParsingError) records
/// and parsing continues. `Mp4Error` is reserved for conditions that
/// abort the current operation: sink failures, exhausted input and
/// writer limits.
#[derive(Debug)]
pub enum Mp4Error {
    /// Converted `binrw::Error`.
    BinReadError(binrw::Error),
    /// Converted `Utf8Error`.
    Utf8Error(std::string::FromUtf8Error),
    /// IO error
    IOError(std::io::Error),
    /// Read fewer bytes than requested.
    ReadMismatch{got: u64, expected: u64},
    /// Seek mismatch.
    OffsetMismatch{got: u64, expected: u64},
    /// Property read would exceed the enclosing atom's end.
    AtomOverrun{name: &'static str, pos: u64, end: u64},
    /// Bitfield width outside 1..=64.
    InvalidBitWidth(u32),
    /// Atom size exceeds 32 bits but the atom is not in large-size mode.
    SizeOverflow{fourcc: String, size: u64},
    /// No such atom.
    NoSuchAtom(String),
    /// Out of bounds.
    BoundsError(u64, u64, u64),
    /// Attempt to set a read-only property.
    ReadOnlyProperty(&'static str),
    /// Value does not fit the property's declared width.
    ValueOutOfRange{name: &'static str, value: u64, bits: u32},
    /// Sink does not support truncation.
    TruncateUnsupported,
    /// Invalid FourCC, e.g. fewer or more than 4 bytes.
    InvalidFourCC,
}

impl std::error::Error for Mp4Error {}

impl fmt::Display for Mp4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4Error::BinReadError(err) => write!(f, "{err}"),
            Mp4Error::Utf8Error(err) => write!(f, "{err}"),
            Mp4Error::IOError(err) => write!(f, "IO error: {}", err),
            Mp4Error::ReadMismatch{got, expected} => write!(f, "Read {got} bytes, expected {expected} bytes."),
            Mp4Error::OffsetMismatch{got, expected} => write!(f, "Moved {got} bytes, expected to move {expected} bytes"),
            Mp4Error::AtomOverrun{name, pos, end} => write!(f, "Property '{name}' read overruns atom end ({pos} > {end})"),
            Mp4Error::InvalidBitWidth(bits) => write!(f, "Invalid bitfield width {bits}"),
            Mp4Error::SizeOverflow{fourcc, size} => write!(f, "Atom '{fourcc}' size {size} exceeds 32 bits without large-size mode"),
            Mp4Error::NoSuchAtom(name) => write!(f, "No such atom {name}."),
            Mp4Error::BoundsError(got, min, max) => write!(f, "Bounds error: position {got} outside {min}..{max}."),
            Mp4Error::ReadOnlyProperty(name) => write!(f, "Property '{name}' is read only"),
            Mp4Error::ValueOutOfRange{name, value, bits} => write!(f, "Value {value} does not fit property '{name}' ({bits} bits)"),
            Mp4Error::TruncateUnsupported => write!(f, "Sink does not support truncation"),
            Mp4Error::InvalidFourCC => write!(f, "Invalid FourCC"),
        }
    }
}

/// Converts std::io::Error to Mp4Error
impl From<std::io::Error> for Mp4Error {
    fn from(err: std::io::Error) -> Self {
        Mp4Error::IOError(err)
    }
}

/// Converts std::string::FromUtf8Error to Mp4Error
/// (`&str` requires `std::str::Utf8Error`)
impl From<std::string::FromUtf8Error> for Mp4Error {
    fn from(err: std::string::FromUtf8Error) -> Mp4Error {
        Mp4Error::Utf8Error(err)
    }
}

/// Converts Mp4Error to std::io::Error
impl From<Mp4Error> for std::io::Error {
    fn from(err: Mp4Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}

/// Converts binrw::Error to Mp4Error
impl From<binrw::Error> for Mp4Error {
    fn from(err: binrw::Error) -> Mp4Error {
        Mp4Error::BinReadError(err)
    }
}
