//! Core MP4 tree context and methods.
//!
//! An [`Mp4`] owns a byte sink, the parsed (or generated) atom tree,
//! the logger and the diagnostics collected while parsing. Properties
//! and atoms are addressed by dotted paths.
//!
//! ```rs
//! use mp4tree::{Mp4, Logger};
//! use std::path::Path;
//!
//! fn main() -> Result<(), mp4tree::Mp4Error> {
//!     let mp4 = Mp4::open(Path::new("VIDEO.MP4"), Logger::default())?;
//!
//!     // Path-addressed lookups
//!     let track_id = mp4.find_property("moov.trak[0].tkhd.trackId");
//!     println!("{track_id:?}");
//!
//!     // Structural diagnostics collected while parsing
//!     for record in mp4.parsing_errors() {
//!         println!("{record:?}");
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::fs::{File, OpenOptions};
use std::io::Cursor;
use std::path::Path;

use crate::atom::{create_atom, ParseScope, TreeCtx};
use crate::consts::*;
use crate::diagnostics::ParsingErrors;
use crate::io::ByteSink;
use crate::log::Logger;
use crate::{Atom, Mp4Error, Mp4Io, Property};

/// MP4 atom tree bound to a byte sink.
pub struct Mp4 {
    io: Mp4Io,
    root: Atom,
    logger: Logger,
    errors: ParsingErrors,
    flags: u32,
    filename: String,
}

impl Mp4 {
    /// Parses an existing file, read-only.
    pub fn open(path: &Path, logger: Logger) -> Result<Self, Mp4Error> {
        let file = File::open(path)?;
        Self::read_from(file, &path.to_string_lossy(), logger)
    }

    /// Parses an existing file, keeping it writable for modification.
    pub fn open_rw(path: &Path, logger: Logger) -> Result<Self, Mp4Error> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Self::read_from(file, &path.to_string_lossy(), logger)
    }

    /// Parses a tree from any byte sink (file, memory buffer,
    /// callback record).
    pub fn read_from(
        sink: impl ByteSink + 'static,
        filename: &str,
        logger: Logger,
    ) -> Result<Self, Mp4Error> {
        let mut mp4 = Self {
            io: Mp4Io::new(sink),
            root: create_atom(None, &[]),
            logger,
            errors: ParsingErrors::default(),
            flags: 0,
            filename: filename.to_owned(),
        };

        let end = mp4.io.size().max(0) as u64;
        mp4.root.set_parse_bounds(0, end);
        mp4.io.set_pos(0)?;

        let mut ctx = TreeCtx {
            io: &mut mp4.io,
            logger: &mut mp4.logger,
            errors: &mut mp4.errors,
            filename: &mp4.filename,
        };
        let mut scope = ParseScope::default();
        mp4.root.read(&mut ctx, &mut scope)?;

        Ok(mp4)
    }

    /// Parses a tree held in memory.
    pub fn read_from_bytes(bytes: &[u8], logger: Logger) -> Result<Self, Mp4Error> {
        Self::read_from(Cursor::new(bytes.to_vec()), "<memory>", logger)
    }

    /// Generates a new skeleton tree: `ftyp` with default brands, a
    /// `moov` with its movie header, and an empty `mdat` (64-bit sized
    /// when [`CREATE_64BIT_DATA`] is set). Nothing is written until
    /// [`Mp4::write`] or [`Mp4::close`].
    pub fn create(
        sink: impl ByteSink + 'static,
        filename: &str,
        flags: u32,
        logger: Logger,
    ) -> Result<Self, Mp4Error> {
        let mut root = create_atom(None, &[]);
        root.generate(flags);

        let mut mdat = create_atom(Some(MDAT), &[root.fourcc()]);
        mdat.set_largesize_mode(flags & CREATE_64BIT_DATA != 0);
        root.add_child(mdat);

        Ok(Self {
            io: Mp4Io::new(sink),
            root,
            logger,
            errors: ParsingErrors::default(),
            flags,
            filename: filename.to_owned(),
        })
    }

    /// Creates a new file on disk.
    pub fn create_file(path: &Path, flags: u32, logger: Logger) -> Result<Self, Mp4Error> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Self::create(file, &path.to_string_lossy(), flags, logger)
    }

    /// Creates a tree backed by a fresh memory buffer.
    pub fn create_in_memory(flags: u32, logger: Logger) -> Result<Self, Mp4Error> {
        Self::create(Cursor::new(Vec::new()), "<memory>", flags, logger)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn root(&self) -> &Atom {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Atom {
        &mut self.root
    }

    /// Diagnostics collected while parsing.
    pub fn parsing_errors(&self) -> &[crate::ParsingError] {
        self.errors.records()
    }

    pub fn logger_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }

    /// Resolves a dotted atom path, e.g. `moov.trak[1].mdia`.
    pub fn find_atom(&self, path: &str) -> Option<&Atom> {
        self.root.find_atom(path)
    }

    pub fn find_atom_mut(&mut self, path: &str) -> Option<&mut Atom> {
        self.root.find_atom_mut(path)
    }

    /// Resolves a dotted property path, e.g.
    /// `moov.trak[0].tkhd.trackId`.
    pub fn find_property(&self, path: &str) -> Option<&Property> {
        self.root.find_property(path)
    }

    /// Serializes the whole tree back to the sink, computing sizes on
    /// the way out. Shrinking a sink without truncation support is
    /// refused.
    pub fn write(&mut self) -> Result<(), Mp4Error> {
        let old_size = self.io.size();
        self.io.set_pos(0)?;

        let mut ctx = TreeCtx {
            io: &mut self.io,
            logger: &mut self.logger,
            errors: &mut self.errors,
            filename: &self.filename,
        };
        self.root.write(&mut ctx)?;

        let end = self.io.pos()?;
        if (end as i64) < old_size {
            self.io.truncate(end as i64)?;
        }
        Ok(())
    }

    /// Re-serializes a single already-written atom in place, restoring
    /// the sink position.
    pub fn rewrite_atom(&mut self, path: &str) -> Result<(), Mp4Error> {
        let Some(atom) = self.root.find_atom_mut(path) else {
            return Err(Mp4Error::NoSuchAtom(path.to_owned()));
        };
        let mut ctx = TreeCtx {
            io: &mut self.io,
            logger: &mut self.logger,
            errors: &mut self.errors,
            filename: &self.filename,
        };
        atom.rewrite(&mut ctx)
    }

    /// Serializes and releases the sink. `close_flags` accepts
    /// [`CLOSE_DO_NOT_COMPUTE_BITRATE`]; bitrate recomputation itself
    /// belongs to the track layer above this crate, so the bit only
    /// gates work when such a layer drives the close.
    pub fn close(mut self, _close_flags: u32) -> Result<Box<dyn ByteSink>, Mp4Error> {
        self.write()?;
        Ok(self.io.into_inner())
    }

    /// Movie creation time as a UTC datetime. May be the MP4 epoch
    /// `1904-01-01 00:00:00` on files that never set it.
    pub fn creation_time(&self) -> Option<time::PrimitiveDateTime> {
        self.find_property("moov.mvhd.creationTime")
            .and_then(|p| p.int_value())
            .map(mp4_datetime)
    }

    /// Movie modification time as a UTC datetime.
    pub fn modification_time(&self) -> Option<time::PrimitiveDateTime> {
        self.find_property("moov.mvhd.modificationTime")
            .and_then(|p| p.int_value())
            .map(mp4_datetime)
    }

    /// Presentation duration (the longest track), divided out by the
    /// movie time scale.
    pub fn duration(&self) -> Option<time::Duration> {
        let duration = self
            .find_property("moov.mvhd.duration")
            .and_then(|p| p.int_value())?;
        let time_scale = self
            .find_property("moov.mvhd.timeScale")
            .and_then(|p| p.int_value())
            .filter(|ts| *ts > 0)?;
        Some(time::Duration::seconds_f64(
            duration as f64 / time_scale as f64,
        ))
    }

    /// Renders the tree to the logger, one atom per line group.
    pub fn dump(&mut self) {
        self.logger.verbose1(&format!(
            "\"{}\": Dumping meta-information...",
            self.filename
        ));
        self.root.dump(&mut self.logger, &self.filename, 0);
    }
}
