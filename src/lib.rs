//! Typed, path-addressable MP4 / ISO-BMFF atom tree: parse, validate,
//! edit and serialize the nested box structure behind MP4, QuickTime
//! and 3GPP files.
//!
//! The engine turns a byte sink (file, memory buffer or user
//! callbacks) into a navigable tree of atoms whose properties are
//! addressable by hierarchical path, and turns the tree back into a
//! byte stream that is bit-identical to a lawful original.
//!
//! ```rs
//! use mp4tree::{Mp4, Logger};
//! use std::path::Path;
//!
//! fn main() -> Result<(), mp4tree::Mp4Error> {
//!     let mp4 = Mp4::open(Path::new("VIDEO.MP4"), Logger::default())?;
//!
//!     if let Some(id) = mp4.find_property("moov.trak[0].tkhd.trackId") {
//!         println!("first track: {:?}", id.int_value());
//!     }
//!
//!     // structural problems are collected, never thrown
//!     for record in mp4.parsing_errors() {
//!         println!("{record:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod mp4;
pub mod fourcc;
pub mod atom;
pub(crate) mod atom_types;
pub mod consts;
pub mod diagnostics;
pub mod errors;
pub mod io;
pub mod log;
pub mod property;

pub mod tests;

pub use mp4::Mp4;
pub use fourcc::FourCC;
pub use atom::{Atom, AtomKind, ExpectedChild};
pub use consts::{
    mp4_datetime, mp4_time_zero, CLOSE_DO_NOT_COMPUTE_BITRATE, CREATE_64BIT_DATA,
    CREATE_64BIT_TIME,
};
pub use diagnostics::{ParsingError, Severity};
pub use errors::Mp4Error;
pub use io::{ByteSink, CallbackSink, Mp4Io, SinkCallbacks};
pub use log::{FacadeSink, LogLevel, LogSink, Logger};
pub use property::{Property, PropertyKind};
