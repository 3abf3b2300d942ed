//! MP4 atom: a tagged node holding ordered properties and ordered
//! child atoms.
//!
//! Most atoms are fully described by their schema (property list plus
//! expected children) and run through the generic read/write paths.
//! The handful of types with conditional layouts carry an [`AtomKind`]
//! tag whose match arms supply the per-type behavior.

use crate::atom_types;
use crate::consts::*;
use crate::diagnostics::{
    invalid_property_value_error, malformed_atom_error, specification_error, ParsingError,
    ParsingErrors, Severity,
};
use crate::log::{LogLevel, Logger};
use crate::{FourCC, Mp4Error, Mp4Io, Property};

/// Declared child slot: name, cardinality constraints and the count
/// realized while parsing.
#[derive(Debug, Clone)]
pub struct ExpectedChild {
    pub name: FourCC,
    pub mandatory: bool,
    pub only_one: bool,
    pub count: u32,
}

/// Per-type behavior tag. `Standard` is the generic schema-driven
/// path; `Unknown` preserves the payload as opaque bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    Root,
    Standard,
    Unknown,
    /// Version-gated 32/64-bit time fields.
    Mvhd,
    Tkhd,
    Mdhd,
    /// Version-gated row widths.
    Elst,
    Cslg,
    /// Trailing entry count reconciled against realized children.
    EntryCount,
    /// Entry table present only when `sampleSize` is zero.
    Stsz,
    /// Row width taken from the `fieldSize` property.
    Stz2,
    /// 9-bit `chan_loc` tail gated on `num_dep_sub`.
    Dec3,
    /// QuickTime sound sample entry with version 1/2 tails.
    Sound,
    /// `location`/`name` strings absent for self-contained references.
    Url,
    Urn,
    /// Flag-gated optional fields.
    Tfhd,
    /// Flag-gated optional fields and per-sample row layout.
    Trun,
    /// String lengths taken from earlier length properties.
    Ohdr,
}

/// Shared mutable state for a parse or serialize pass.
pub(crate) struct TreeCtx<'a> {
    pub io: &'a mut Mp4Io,
    pub logger: &'a mut Logger,
    pub errors: &'a mut ParsingErrors,
    pub filename: &'a str,
}

/// Parse-scope context threaded down the recursion: the ancestor type
/// chain (for factory context dispatch) and the enclosing track's
/// identity (for diagnostic locations), discovered as `tkhd`/`hdlr`
/// are read.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParseScope {
    pub ancestors: Vec<FourCC>,
    pub track_id: Option<u32>,
    pub handler: Option<FourCC>,
}

impl TreeCtx<'_> {
    /// Records a non-fatal diagnostic, locating it via the current
    /// parse scope, and mirrors it to the logger.
    pub(crate) fn parsing_error(
        &mut self,
        scope: &ParseScope,
        severity: Severity,
        category: String,
        message: String,
    ) {
        let location = match scope.handler {
            Some(handler) => track_type_name(handler).to_owned(),
            None => "Container".to_owned(),
        };
        self.errors.add(
            self.logger,
            ParsingError {
                severity,
                category,
                location,
                track_id: scope.track_id,
                message,
            },
        );
    }
}

/// MP4 atom.
#[derive(Debug, Clone)]
pub struct Atom {
    typ: FourCC,
    kind: AtomKind,
    /// Only set when `typ == "uuid"`.
    extended_type: Option<[u8; 16]>,
    /// Absolute offset of the size field.
    start: u64,
    /// Exclusive end offset.
    end: u64,
    /// Payload length, excluding the header.
    size: u64,
    /// Stored with a 64-bit size.
    largesize_mode: bool,
    depth: u8,
    properties: Vec<Property>,
    children: Vec<Atom>,
    expected: Vec<ExpectedChild>,
}

impl Atom {
    pub(crate) fn new(typ: FourCC, kind: AtomKind) -> Self {
        Self {
            typ,
            kind,
            extended_type: None,
            start: 0,
            end: 0,
            size: 0,
            largesize_mode: false,
            depth: 0,
            properties: Vec::new(),
            children: Vec::new(),
            expected: Vec::new(),
        }
    }

    pub fn fourcc(&self) -> FourCC {
        self.typ
    }

    pub fn kind(&self) -> AtomKind {
        self.kind
    }

    pub fn is_root(&self) -> bool {
        self.typ.is_root()
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == AtomKind::Unknown
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Payload length, excluding the 8/16 byte header (and the 16-byte
    /// extended type of `uuid` atoms).
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn largesize_mode(&self) -> bool {
        self.largesize_mode
    }

    pub fn set_largesize_mode(&mut self, mode: bool) {
        self.largesize_mode = mode;
    }

    pub fn extended_type(&self) -> Option<&[u8; 16]> {
        self.extended_type.as_ref()
    }

    pub fn set_extended_type(&mut self, extended: [u8; 16]) {
        self.extended_type = Some(extended);
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Header length on disk: size+type, optional large size, optional
    /// extended type.
    pub fn header_len(&self) -> u64 {
        let mut hdr = 8;
        if self.largesize_mode {
            hdr += 8;
        }
        if self.extended_type.is_some() {
            hdr += 16;
        }
        hdr
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| p.name() == name)
    }

    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn children(&self) -> &[Atom] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Atom] {
        &mut self.children
    }

    /// Appends a child atom. Child order is serialization order.
    pub fn add_child(&mut self, mut child: Atom) {
        child.set_depth(self.depth + 1);
        self.children.push(child);
    }

    pub fn insert_child(&mut self, index: usize, mut child: Atom) {
        child.set_depth(self.depth + 1);
        self.children.insert(index, child);
    }

    pub fn remove_child(&mut self, index: usize) -> Atom {
        self.children.remove(index)
    }

    fn set_depth(&mut self, depth: u8) {
        self.depth = depth;
        for child in self.children.iter_mut() {
            child.set_depth(depth + 1);
        }
    }

    pub fn expected_children(&self) -> &[ExpectedChild] {
        &self.expected
    }

    /// Bounds assigned to the root before parsing: it spans the sink.
    pub(crate) fn set_parse_bounds(&mut self, start: u64, end: u64) {
        self.start = start;
        self.end = end;
        self.size = end - start;
    }

    /// Declares a permitted child type with cardinality constraints.
    pub fn expect_child(&mut self, name: FourCC, mandatory: bool, only_one: bool) {
        self.expected.push(ExpectedChild {
            name,
            mandatory,
            only_one,
            count: 0,
        });
    }

    /// Convenience: declares the leading 8-bit `version` and 24-bit
    /// `flags` properties shared by full atoms.
    pub fn add_version_and_flags(&mut self) {
        self.add_property(Property::int8("version"));
        self.add_property(Property::int24("flags"));
    }

    pub fn version(&self) -> u8 {
        match self.properties.first() {
            Some(p) if p.name() == "version" => p.int_value().unwrap_or(0) as u8,
            _ => 0,
        }
    }

    pub fn set_version(&mut self, version: u8) -> Result<(), Mp4Error> {
        match self.properties.first_mut() {
            Some(p) if p.name() == "version" => p.set_int(version as u64),
            _ => Ok(()),
        }
    }

    pub fn flags(&self) -> u32 {
        match self.properties.get(1) {
            Some(p) if p.name() == "flags" => p.int_value().unwrap_or(0) as u32,
            _ => 0,
        }
    }

    pub fn set_flags(&mut self, flags: u32) -> Result<(), Mp4Error> {
        match self.properties.get_mut(1) {
            Some(p) if p.name() == "flags" => p.set_int(flags as u64),
            _ => Ok(()),
        }
    }

    /// Integer value of a named property.
    pub fn int_value(&self, name: &str) -> Option<u64> {
        self.property(name).and_then(|p| p.int_value())
    }

    // ------------------------------------------------------------------
    // Generate
    // ------------------------------------------------------------------

    /// Emits a lawful minimal instance: property defaults, then every
    /// mandatory single-instance child, recursively. `flags` are the
    /// structural creation flags (64-bit time selects version 1 header
    /// atoms).
    pub fn generate(&mut self, flags: u32) {
        let mut ancestors = Vec::new();
        self.generate_inner(flags, &mut ancestors);
    }

    fn generate_inner(&mut self, flags: u32, ancestors: &mut Vec<FourCC>) {
        let version = match flags & CREATE_64BIT_TIME != 0 {
            true => 1,
            false => 0,
        };
        // conditional layouts settle before the defaults pass
        match self.kind {
            AtomKind::Mvhd => atom_types::mvhd::add_versioned(self, version),
            AtomKind::Tkhd => atom_types::tkhd::add_versioned(self, version),
            AtomKind::Mdhd => atom_types::mdhd::add_versioned(self, version),
            AtomKind::Elst => atom_types::elst::add_versioned(self, version),
            AtomKind::Cslg => atom_types::stts::cslg_add_versioned(self, version),
            _ => {}
        }
        if version == 1 {
            let _ = self.set_version(1);
        }

        for property in self.properties.iter_mut() {
            property.generate();
        }

        ancestors.push(self.typ);
        let mandatory: Vec<FourCC> = self
            .expected
            .iter()
            .filter(|e| e.mandatory && e.only_one)
            .map(|e| e.name)
            .collect();
        for name in mandatory {
            if self.children.iter().any(|c| c.typ == name) {
                continue;
            }
            let mut child = super::create_atom(Some(name), ancestors);
            child.generate_inner(flags, ancestors);
            self.add_child(child);
        }
        ancestors.pop();

        // per-type defaults after the generic pass
        match self.kind {
            AtomKind::Dec3 => atom_types::dec3::generate(self),
            AtomKind::Mvhd => atom_types::mvhd::generate(self),
            AtomKind::Tkhd => atom_types::tkhd::generate(self),
            AtomKind::Mdhd => atom_types::mdhd::generate(self),
            _ => {}
        }
        if self.typ == FTYP {
            atom_types::ftyp::generate(self);
        }
        if self.typ == VMHD {
            let _ = self.set_flags(1);
        }
        // generated data references are self-contained
        if matches!(self.kind, AtomKind::Url | AtomKind::Urn) {
            let _ = self.set_flags(1);
        }
        if self.typ == CHPL {
            let _ = self.set_version(1);
        }
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Reads one atom headed at the current position within `parent`.
    ///
    /// Returns `Ok(None)` when the atom had to be dropped; the sink is
    /// then positioned for the surrounding loop to continue.
    pub(crate) fn read_atom(
        ctx: &mut TreeCtx<'_>,
        scope: &mut ParseScope,
        parent_end: u64,
        parent_depth: u8,
        parent_is_root: bool,
    ) -> Result<Option<Atom>, Mp4Error> {
        let parent_typ = scope.ancestors.last().copied().unwrap_or(FourCC::ROOT);
        let pos = ctx.io.pos()?;

        ctx.logger
            .verbose1(&format!("\"{}\": pos = {:#x}", ctx.filename, pos));

        let mut total = ctx.io.read_u32()? as u64;
        let typ = FourCC::from_slice(&ctx.io.read_bytes(4)?);

        let mut hdr: u64 = 8;
        let largesize_mode = total == 1;
        if largesize_mode {
            total = ctx.io.read_u64()?;
            hdr += 8;
            ctx.logger.verbose1(&format!(
                "\"{}\": atom '{}' uses a 64-bit size",
                ctx.filename, typ
            ));
        }

        let mut extended_type = None;
        if typ == UUID {
            let bytes = ctx.io.read_bytes(16)?;
            let mut ext = [0_u8; 16];
            ext.copy_from_slice(&bytes);
            extended_type = Some(ext);
            hdr += 16;
        }

        if total == 0 {
            // extends to the parent's end (the root's end is the file size)
            total = parent_end - pos;
        }

        if total < hdr {
            ctx.parsing_error(
                scope,
                Severity::Error,
                malformed_atom_error(&typ.reasonable_string()),
                format!(
                    "Invalid atom size, dataSize = {total} cannot be less than hdrSize = {hdr}"
                ),
            );
            ctx.io.set_pos(pos + hdr)?;
            return Ok(None);
        }
        let mut data_size = total - hdr;

        ctx.logger.verbose1(&format!(
            "\"{}\": type = \"{}\" data-size = {} ({:#x}) hdr {}",
            ctx.filename, typ, data_size, data_size, hdr
        ));

        let remaining = parent_end - pos;
        let mut overflow = false;
        let overflow_size = data_size;
        if hdr.saturating_add(data_size) > remaining {
            overflow = true;
            data_size = remaining.saturating_sub(hdr);
        }

        let parent_is_udta = parent_typ == UDTA;

        let mut atom = super::create_atom(Some(typ), &scope.ancestors);
        atom.start = pos;
        atom.end = pos + hdr + data_size;
        atom.size = data_size;
        atom.largesize_mode = largesize_mode;
        atom.extended_type = extended_type;
        atom.depth = parent_depth + 1;

        if atom.is_unknown() {
            if typ.is_root() {
                ctx.parsing_error(
                    scope,
                    Severity::Error,
                    specification_error(),
                    "Invalid empty atom type, probable file corruption or parsing error"
                        .to_owned(),
                );
            } else if !typ.is_reasonable() && !parent_is_udta {
                let message = match parent_typ.is_reasonable() {
                    false => "Parent atom and child atom types are both suspect, probable file corruption or parsing error".to_owned(),
                    true => format!(
                        "Non alphanumeric atom type in '{parent_typ}', probable file corruption or parsing error"
                    ),
                };
                ctx.parsing_error(
                    scope,
                    Severity::Error,
                    malformed_atom_error(&typ.reasonable_string()),
                    message,
                );
            } else {
                ctx.logger.verbose1(&format!(
                    "\"{}\": Info: atom type {} is unknown",
                    ctx.filename, typ
                ));
            }
            if data_size > 0 {
                atom.add_property(Property::bytes("data", crate::property::BytesLen::ToEnd));
            }
        }

        if overflow {
            let parent_name = match parent_is_root {
                true => "root".to_owned(),
                false => parent_typ.reasonable_string(),
            };
            ctx.parsing_error(
                scope,
                Severity::Error,
                malformed_atom_error(&atom.typ.reasonable_string()),
                format!(
                    "Invalid atom size, atom extends outside parent atom '{parent_name}'. Expected = {}, Actual = {}.",
                    parent_end - pos,
                    hdr + overflow_size
                ),
            );
            atom.skip(ctx)?;
            return Ok(Some(atom));
        }

        let end = atom.end;
        match atom.read(ctx, scope) {
            Ok(()) => Ok(Some(atom)),
            Err(_) => {
                // drop the atom, resume at its declared end
                ctx.io.set_pos(end)?;
                Ok(None)
            }
        }
    }

    /// Generic read: properties, then child atoms, then skip to end.
    /// Conditional layouts are settled by the kind arms.
    pub(crate) fn read(
        &mut self,
        ctx: &mut TreeCtx<'_>,
        scope: &mut ParseScope,
    ) -> Result<(), Mp4Error> {
        if !self.typ.is_root() && self.size > 1_000_000 {
            ctx.logger.verbose1(&format!(
                "\"{}\": {} atom size {} is suspect",
                ctx.filename, self.typ, self.size
            ));
        }

        match self.kind {
            AtomKind::Mvhd => {
                self.read_properties(ctx, scope, 0, Some(2))?;
                let version = self.version();
                atom_types::mvhd::add_versioned(self, version);
                self.read_properties(ctx, scope, 2, None)?;
            }
            AtomKind::Tkhd => {
                self.read_properties(ctx, scope, 0, Some(2))?;
                let version = self.version();
                atom_types::tkhd::add_versioned(self, version);
                self.read_properties(ctx, scope, 2, None)?;
            }
            AtomKind::Mdhd => {
                self.read_properties(ctx, scope, 0, Some(2))?;
                let version = self.version();
                atom_types::mdhd::add_versioned(self, version);
                self.read_properties(ctx, scope, 2, None)?;
            }
            AtomKind::Elst => {
                self.read_properties(ctx, scope, 0, Some(2))?;
                let version = self.version();
                atom_types::elst::add_versioned(self, version);
                self.read_properties(ctx, scope, 2, None)?;
            }
            AtomKind::Cslg => {
                self.read_properties(ctx, scope, 0, Some(2))?;
                let version = self.version();
                atom_types::stts::cslg_add_versioned(self, version);
                self.read_properties(ctx, scope, 2, None)?;
            }
            AtomKind::Dec3 => {
                self.read_properties(ctx, scope, 0, None)?;
                let count = self.int_value("num_dep_sub").unwrap_or(0);
                if count > 0 {
                    self.add_property(Property::bitfield("chan_loc", 9));
                    self.read_properties(ctx, scope, 9, None)?;
                }
            }
            AtomKind::Stsz => {
                self.read_properties(ctx, scope, 0, Some(4))?;
                if self.int_value("sampleSize") == Some(0) {
                    self.read_properties(ctx, scope, 4, None)?;
                }
            }
            AtomKind::Stz2 => {
                self.read_properties(ctx, scope, 0, Some(5))?;
                let field_size = self.int_value("fieldSize").unwrap_or(4) as u32;
                atom_types::stsz::stz2_set_field_size(self, field_size);
                self.read_properties(ctx, scope, 5, None)?;
            }
            AtomKind::Sound => {
                self.read_properties(ctx, scope, 0, Some(9))?;
                let sound_version = self.int_value("soundVersion").unwrap_or(0);
                atom_types::sound::add_versioned(self, sound_version);
                self.read_properties(ctx, scope, 9, None)?;
            }
            AtomKind::Url => {
                self.read_properties(ctx, scope, 0, Some(2))?;
                if self.flags() & 1 == 0 {
                    atom_types::dref::url_add_location(self);
                    self.read_properties(ctx, scope, 2, None)?;
                }
            }
            AtomKind::Urn => {
                self.read_properties(ctx, scope, 0, Some(2))?;
                if self.flags() & 1 == 0 {
                    atom_types::dref::urn_add_location(self);
                    self.read_properties(ctx, scope, 2, None)?;
                }
            }
            AtomKind::Tfhd => {
                self.read_properties(ctx, scope, 0, Some(3))?;
                let flags = self.flags();
                atom_types::frag::tfhd_add_flagged(self, flags);
                self.read_properties(ctx, scope, 3, None)?;
            }
            AtomKind::Trun => {
                self.read_properties(ctx, scope, 0, Some(3))?;
                let flags = self.flags();
                atom_types::frag::trun_add_flagged(self, flags);
                self.read_properties(ctx, scope, 3, None)?;
            }
            AtomKind::Ohdr => {
                self.read_properties(ctx, scope, 0, Some(8))?;
                atom_types::ohdr::add_tail(self);
                self.read_properties(ctx, scope, 8, None)?;
            }
            _ => {
                self.read_properties(ctx, scope, 0, None)?;
            }
        }

        if !self.expected.is_empty() {
            self.read_children(ctx, scope)?;
        }

        if self.kind == AtomKind::EntryCount {
            self.reconcile_entry_count(ctx, scope);
        }

        self.skip(ctx)
    }

    /// Reads `count` properties starting at `start` (all remaining if
    /// `None`). A property overrunning the atom end is recorded as a
    /// malformed-atom diagnostic; the cursor recovers to the end.
    pub(crate) fn read_properties(
        &mut self,
        ctx: &mut TreeCtx<'_>,
        scope: &ParseScope,
        start: usize,
        count: Option<usize>,
    ) -> Result<(), Mp4Error> {
        let stop = match count {
            Some(n) => (start + n).min(self.properties.len()),
            None => self.properties.len(),
        };
        for i in start..stop {
            let row_count = match self.properties[i].table_value() {
                Some(table) => match table.count {
                    crate::property::RowCount::Prop(idx) => {
                        self.properties.get(idx).and_then(|p| p.int_value())
                    }
                    crate::property::RowCount::Remaining => None,
                },
                None => None,
            };
            let prev = match i {
                0 => None,
                _ => self.properties[i - 1].int_value(),
            };
            let end = self.end;
            self.properties[i].read(ctx.io, end, row_count, prev)?;

            if ctx.io.pos()? > self.end {
                let name = self.properties[i].name();
                ctx.parsing_error(
                    scope,
                    Severity::Error,
                    malformed_atom_error(&self.typ.reasonable_string()),
                    format!("Invalid atom size, overrun at property '{name}'"),
                );
                ctx.io.set_pos(self.end)?;
                break;
            }

            let level = match self.properties[i].is_table() {
                true => LogLevel::Verbose2,
                false => LogLevel::Verbose1,
            };
            if ctx.logger.verbosity >= level {
                self.properties[i].dump(ctx.logger, 0, level);
            }
        }
        Ok(())
    }

    /// Reads child atoms until the declared end, recovering locally
    /// from malformed children.
    fn read_children(
        &mut self,
        ctx: &mut TreeCtx<'_>,
        scope: &mut ParseScope,
    ) -> Result<(), Mp4Error> {
        let this_is_udta = self.typ == UDTA;

        ctx.logger.verbose1(&format!(
            "\"{}\": of {}",
            ctx.filename,
            match self.typ.is_root() {
                true => "root".to_owned(),
                false => self.typ.to_string(),
            }
        ));

        scope.ancestors.push(self.typ);

        // a track discovers its own identity; it must not inherit the
        // previous sibling's, and must not leak its own to the parent
        let saved_identity = match self.typ == TRAK {
            true => {
                let saved = (scope.track_id, scope.handler);
                scope.track_id = None;
                scope.handler = None;
                Some(saved)
            }
            false => None,
        };

        let mut position = ctx.io.pos()?;
        while position < self.end {
            // need at least size and type
            if self.end - position < 8 {
                // a udta may end with exactly four zero bytes
                if this_is_udta && self.end - position == 4 {
                    let mbz = ctx.io.read_u32()?;
                    if mbz != 0 {
                        ctx.parsing_error(
                            scope,
                            Severity::Warning,
                            malformed_atom_error(&self.typ.reasonable_string()),
                            format!("In udta atom, end value is not zero {mbz:#x}"),
                        );
                    }
                    position = ctx.io.pos()?;
                    continue;
                }
                ctx.parsing_error(
                    scope,
                    Severity::Warning,
                    malformed_atom_error(&self.typ.reasonable_string()),
                    format!("Extra {} bytes at end of atom", self.end - position),
                );
                ctx.io.read_bytes((self.end - position) as usize)?;
                position = ctx.io.pos()?;
                continue;
            }

            let child =
                Self::read_atom(ctx, scope, self.end, self.depth, self.typ.is_root())?;

            let Some(child) = child else {
                position = ctx.io.pos()?;
                continue;
            };

            let info = self
                .expected
                .iter_mut()
                .find(|e| e.name == child.typ);

            match info {
                None if self.typ.is_root() => {
                    let message = format!(
                        "Unexpected root level atom '{}'",
                        child.typ.reasonable_string()
                    );
                    ctx.parsing_error(scope, Severity::Error, specification_error(), message);
                }
                None if !this_is_udta => {
                    let message = format!(
                        "Unexpected child atom '{}' in '{}'",
                        child.typ.reasonable_string(),
                        self.typ.reasonable_string()
                    );
                    ctx.parsing_error(scope, Severity::Info, specification_error(), message);
                }
                None => {}
                Some(info) => {
                    info.count += 1;
                    if info.only_one && info.count > 1 {
                        let message = format!(
                            "Multiple instances of atom '{}' found in parent atom '{}'",
                            child.typ, self.typ
                        );
                        ctx.parsing_error(scope, Severity::Error, specification_error(), message);
                    }
                }
            }

            // track identity for diagnostic locations
            if self.typ == TRAK && child.typ == TKHD {
                scope.track_id = child.int_value("trackId").map(|v| v as u32);
            }
            if self.typ == MDIA && child.typ == HDLR {
                scope.handler = child
                    .property("handlerType")
                    .and_then(|p| p.string_value())
                    .map(FourCC::from_str);
            }

            self.add_child_parsed(child);
            position = ctx.io.pos()?;
        }

        for info in self.expected.iter() {
            if info.mandatory && info.count == 0 {
                let parent = match self.typ.is_root() {
                    true => "root".to_owned(),
                    false => self.typ.to_string(),
                };
                let message = format!(
                    "Atom '{parent}' missing mandatory child atom '{}'",
                    info.name
                );
                ctx.parsing_error(scope, Severity::Error, specification_error(), message);
            }
        }

        if let Some((track_id, handler)) = saved_identity {
            scope.track_id = track_id;
            scope.handler = handler;
        }

        scope.ancestors.pop();

        ctx.logger
            .verbose1(&format!("\"{}\": finished {}", ctx.filename, self.typ));
        Ok(())
    }

    /// Child append during parse: keeps the depth already assigned by
    /// the header loop.
    fn add_child_parsed(&mut self, child: Atom) {
        self.children.push(child);
    }

    /// `dref`/`stsd` keep an `entryCount` that must agree with the
    /// realized child count; disagreement is repaired and reported.
    fn reconcile_entry_count(&mut self, ctx: &mut TreeCtx<'_>, scope: &ParseScope) {
        let realized = self.children.len() as u64;
        let declared = self.int_value("entryCount").unwrap_or(0);
        if realized != declared {
            let category =
                invalid_property_value_error(&format!("{}.entryCount", self.typ));
            let message = format!(
                "Inconsistency in number of entries. Expected = {realized} Actual = {declared}"
            );
            ctx.parsing_error(scope, Severity::Error, category, message);
            if let Some(count) = self.property_mut("entryCount") {
                let _ = count.set_int_internal(realized);
            }
        }
    }

    /// Advances the sink to the atom's end.
    pub(crate) fn skip(&self, ctx: &mut TreeCtx<'_>) -> Result<(), Mp4Error> {
        let pos = ctx.io.pos()?;
        if pos != self.end {
            ctx.logger.verbose1(&format!(
                "\"{}\": Skip: {} bytes",
                ctx.filename,
                self.end as i64 - pos as i64
            ));
        }
        ctx.io.set_pos(self.end)
    }

    // ------------------------------------------------------------------
    // Write
    // ------------------------------------------------------------------

    /// Serializes the atom at the current position: placeholder size,
    /// properties, children, then the size patched in place. The root
    /// writes its children only.
    pub(crate) fn write(&mut self, ctx: &mut TreeCtx<'_>) -> Result<(), Mp4Error> {
        if self.typ.is_root() {
            self.start = ctx.io.pos()?;
            for i in 0..self.children.len() {
                self.children[i].write(ctx)?;
            }
            self.end = ctx.io.pos()?;
            self.size = self.end - self.start;
            return Ok(());
        }

        self.begin_write(ctx)?;
        self.write_properties(ctx)?;
        for i in 0..self.children.len() {
            self.children[i].write(ctx)?;
        }
        self.finish_write(ctx)
    }

    /// Re-serializes an already-written atom in place, restoring the
    /// sink position afterwards.
    pub(crate) fn rewrite(&mut self, ctx: &mut TreeCtx<'_>) -> Result<(), Mp4Error> {
        if self.end == 0 {
            // not written yet
            return Ok(());
        }
        let saved = ctx.io.pos()?;
        ctx.io.set_pos(self.start)?;
        self.write(ctx)?;
        ctx.io.set_pos(saved)
    }

    fn begin_write(&mut self, ctx: &mut TreeCtx<'_>) -> Result<(), Mp4Error> {
        self.start = ctx.io.pos()?;
        match self.largesize_mode {
            true => ctx.io.write_u32(1)?,
            false => ctx.io.write_u32(0)?,
        }
        ctx.io.write_bytes(&self.typ.to_bytes())?;
        if self.largesize_mode {
            ctx.io.write_u64(0)?;
        }
        if let Some(extended) = self.extended_type {
            ctx.io.write_bytes(&extended)?;
        }
        Ok(())
    }

    fn write_properties(&mut self, ctx: &mut TreeCtx<'_>) -> Result<(), Mp4Error> {
        ctx.logger.verbose1(&format!(
            "Write: \"{}\": type {}",
            ctx.filename, self.typ
        ));
        for property in self.properties.iter() {
            property.write(ctx.io)?;
            let level = match property.is_table() {
                true => LogLevel::Verbose2,
                false => LogLevel::Verbose1,
            };
            if ctx.logger.verbosity >= level {
                property.dump(ctx.logger, 0, level);
            }
        }
        // bit-packed schemas may end mid-byte
        ctx.io.flush_write_bits()
    }

    fn finish_write(&mut self, ctx: &mut TreeCtx<'_>) -> Result<(), Mp4Error> {
        self.end = ctx.io.pos()?;
        let total = self.end - self.start;

        ctx.logger.verbose1(&format!(
            "end: type {} {} {} size {}",
            self.typ, self.start, self.end, total
        ));

        match self.largesize_mode {
            true => {
                ctx.io.set_pos(self.start + 8)?;
                ctx.io.write_u64(total)?;
            }
            false => {
                if total > u32::MAX as u64 {
                    return Err(Mp4Error::SizeOverflow {
                        fourcc: self.typ.to_string(),
                        size: total,
                    });
                }
                ctx.io.set_pos(self.start)?;
                ctx.io.write_u32(total as u32)?;
            }
        }
        ctx.io.set_pos(self.end)?;

        self.size = total - self.header_len();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Dump
    // ------------------------------------------------------------------

    /// Renders the atom and its subtree to the logger:
    /// `"filename": type xxxx (moov.trak.mdia)` followed by one
    /// indented line per property. Table entries require verbose 2.
    pub fn dump(&self, logger: &mut Logger, filename: &str, indent: u8) {
        self.dump_inner(logger, filename, indent, &mut Vec::new());
    }

    fn dump_inner(
        &self,
        logger: &mut Logger,
        filename: &str,
        indent: u8,
        ancestors: &mut Vec<FourCC>,
    ) {
        if !self.typ.is_root() {
            let mut path = String::new();
            for a in ancestors.iter().filter(|a| !a.is_root()) {
                path.push_str(&a.to_string());
                path.push('.');
            }
            path.push_str(&self.typ.to_string());
            logger.dump(
                indent,
                LogLevel::Verbose1,
                &format!("\"{filename}\": type {} ({path})", self.typ),
            );
        }

        match self.kind {
            AtomKind::Dec3 => atom_types::dec3::dump(self, logger, indent + 1),
            _ => {
                for property in self.properties.iter() {
                    if property.is_table() && logger.verbosity < LogLevel::Verbose2 {
                        logger.dump(
                            indent + 1,
                            LogLevel::Verbose1,
                            &format!("\"{filename}\": <table entries suppressed>"),
                        );
                        continue;
                    }
                    property.dump(logger, indent + 1, LogLevel::Verbose1);
                }
            }
        }

        ancestors.push(self.typ);
        for child in self.children.iter() {
            child.dump_inner(logger, filename, indent + 1, ancestors);
        }
        ancestors.pop();
    }
}
