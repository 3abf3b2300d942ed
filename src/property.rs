//! Typed leaf values held by atoms.
//!
//! A property is a named, typed slot: fixed-width big-endian integers,
//! MSB-first bitfields, fixed-point numbers, strings, byte buffers,
//! MPEG-4 systems descriptors, and tables of row schemas whose row
//! count is governed by another property in the same atom. Properties
//! serialize themselves through [`Mp4Io`] and render themselves for the
//! diagnostic dump.

use crate::log::{LogLevel, Logger};
use crate::{Mp4Error, Mp4Io};

/// String layout on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrFormat {
    /// Single length byte followed by that many bytes.
    Counted,
    /// Bytes up to and including a NUL terminator.
    NulTerminated,
    /// Exactly this many bytes, NUL padded on write.
    Fixed(u64),
    /// The remainder of the atom payload.
    ToEnd,
}

/// How string bytes map to characters. `Latin1` maps byte values 0-255
/// to the same code points both ways, so MacRoman payloads survive a
/// round trip untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrEncoding {
    Utf8,
    Latin1,
}

/// Byte-buffer length source.
#[derive(Debug, Clone, Copy)]
pub enum BytesLen {
    Fixed(u64),
    /// The remainder of the atom payload.
    ToEnd,
    /// The value of the immediately preceding property in the same
    /// property list (length-prefixed blobs, e.g. NAL units).
    FromPrevious,
}

/// Table row count source.
#[derive(Debug, Clone, Copy)]
pub enum RowCount {
    /// Index of the governing count property in the atom's list.
    Prop(usize),
    /// Remaining payload divided by the fixed row width.
    Remaining,
}

/// Table property: an ordered sequence of rows, each row a fixed
/// ordered list of sub-properties cloned from the row schema.
#[derive(Debug, Clone)]
pub struct Table {
    pub count: RowCount,
    pub row_schema: Vec<Property>,
    pub rows: Vec<Vec<Property>>,
}

#[derive(Debug, Clone)]
pub enum PropertyKind {
    /// Big-endian unsigned integer of 1, 2, 3, 4 or 8 bytes.
    Int { width: u8, value: u64 },
    /// Bit-packed unsigned integer of 1..=64 bits, MSB-first.
    Bitfield { bits: u32, value: u64 },
    /// Fixed-point number: 8.8 in 2 bytes or 16.16 in 4 bytes.
    Fixed { width: u8, raw: u32 },
    Str {
        format: StrFormat,
        encoding: StrEncoding,
        value: String,
    },
    Bytes { len: BytesLen, value: Vec<u8> },
    /// MPEG-4 systems descriptor: tag, BER-coded length, opaque body.
    /// The number of length bytes is preserved for bit-exact rewrite.
    Descriptor {
        tag: u8,
        len_width: u8,
        body: Vec<u8>,
    },
    Table(Table),
}

/// A named, typed slot within an atom. Read-only properties (reserved
/// fields, parser-maintained counts) refuse mutation through the
/// public setters; the parser itself may still reconcile them.
#[derive(Debug, Clone)]
pub struct Property {
    name: &'static str,
    read_only: bool,
    pub(crate) kind: PropertyKind,
}

impl Property {
    pub fn int8(name: &'static str) -> Self {
        Self::int(name, 1)
    }

    pub fn int16(name: &'static str) -> Self {
        Self::int(name, 2)
    }

    pub fn int24(name: &'static str) -> Self {
        Self::int(name, 3)
    }

    pub fn int32(name: &'static str) -> Self {
        Self::int(name, 4)
    }

    pub fn int64(name: &'static str) -> Self {
        Self::int(name, 8)
    }

    pub fn int(name: &'static str, width: u8) -> Self {
        assert!(matches!(width, 1 | 2 | 3 | 4 | 8), "invalid integer width");
        Self {
            name,
            read_only: false,
            kind: PropertyKind::Int { width, value: 0 },
        }
    }

    pub fn bitfield(name: &'static str, bits: u32) -> Self {
        assert!((1..=64).contains(&bits), "invalid bitfield width");
        Self {
            name,
            read_only: false,
            kind: PropertyKind::Bitfield { bits, value: 0 },
        }
    }

    /// 8.8 fixed point in two bytes.
    pub fn fixed16(name: &'static str) -> Self {
        Self {
            name,
            read_only: false,
            kind: PropertyKind::Fixed { width: 2, raw: 0 },
        }
    }

    /// 16.16 fixed point in four bytes.
    pub fn fixed32(name: &'static str) -> Self {
        Self {
            name,
            read_only: false,
            kind: PropertyKind::Fixed { width: 4, raw: 0 },
        }
    }

    pub fn string(name: &'static str, format: StrFormat, encoding: StrEncoding) -> Self {
        Self {
            name,
            read_only: false,
            kind: PropertyKind::Str {
                format,
                encoding,
                value: String::new(),
            },
        }
    }

    pub fn bytes(name: &'static str, len: BytesLen) -> Self {
        let value = match len {
            BytesLen::Fixed(n) => vec![0_u8; n as usize],
            _ => Vec::new(),
        };
        Self {
            name,
            read_only: false,
            kind: PropertyKind::Bytes { len, value },
        }
    }

    /// Read-only zeroed byte slot.
    pub fn reserved(name: &'static str, len: u64) -> Self {
        let mut p = Self::bytes(name, BytesLen::Fixed(len));
        p.read_only = true;
        p
    }

    /// Read-only bitfield (reserved bits).
    pub fn reserved_bits(name: &'static str, bits: u32) -> Self {
        let mut p = Self::bitfield(name, bits);
        p.read_only = true;
        p
    }

    pub fn descriptor(name: &'static str) -> Self {
        Self {
            name,
            read_only: false,
            kind: PropertyKind::Descriptor {
                tag: 0,
                len_width: 1,
                body: Vec::new(),
            },
        }
    }

    pub fn table(name: &'static str, count: RowCount, row_schema: Vec<Property>) -> Self {
        Self {
            name,
            read_only: false,
            kind: PropertyKind::Table(Table {
                count,
                row_schema,
                rows: Vec::new(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, PropertyKind::Table(_))
    }

    /// Integer-like value: integers, bitfields and the raw fixed-point
    /// representation.
    pub fn int_value(&self) -> Option<u64> {
        match &self.kind {
            PropertyKind::Int { value, .. } => Some(*value),
            PropertyKind::Bitfield { value, .. } => Some(*value),
            PropertyKind::Fixed { raw, .. } => Some(*raw as u64),
            _ => None,
        }
    }

    pub fn set_int(&mut self, value: u64) -> Result<(), Mp4Error> {
        if self.read_only {
            return Err(Mp4Error::ReadOnlyProperty(self.name));
        }
        self.set_int_internal(value)
    }

    /// Parser-side mutation, bypassing the read-only gate (count
    /// reconciliation while resolving inconsistent files).
    pub(crate) fn set_int_internal(&mut self, value: u64) -> Result<(), Mp4Error> {
        let bits = match &self.kind {
            PropertyKind::Int { width, .. } => *width as u32 * 8,
            PropertyKind::Bitfield { bits, .. } => *bits,
            PropertyKind::Fixed { width, .. } => *width as u32 * 8,
            _ => return Err(Mp4Error::ValueOutOfRange { name: self.name, value, bits: 0 }),
        };
        if bits < 64 && value >> bits != 0 {
            return Err(Mp4Error::ValueOutOfRange { name: self.name, value, bits });
        }
        match &mut self.kind {
            PropertyKind::Int { value: v, .. } => *v = value,
            PropertyKind::Bitfield { value: v, .. } => *v = value,
            PropertyKind::Fixed { raw, .. } => *raw = value as u32,
            _ => unreachable!(),
        }
        Ok(())
    }

    /// Fixed-point value as a float (8.8 or 16.16).
    pub fn float_value(&self) -> Option<f64> {
        match &self.kind {
            PropertyKind::Fixed { width: 2, raw } => Some(*raw as f64 / 256.0),
            PropertyKind::Fixed { width: _, raw } => Some(*raw as f64 / 65536.0),
            _ => None,
        }
    }

    pub fn string_value(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Str { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn set_string(&mut self, value: &str) -> Result<(), Mp4Error> {
        if self.read_only {
            return Err(Mp4Error::ReadOnlyProperty(self.name));
        }
        match &mut self.kind {
            PropertyKind::Str { value: v, .. } => {
                *v = value.to_owned();
                Ok(())
            }
            _ => Err(Mp4Error::ValueOutOfRange { name: self.name, value: 0, bits: 0 }),
        }
    }

    pub fn bytes_value(&self) -> Option<&[u8]> {
        match &self.kind {
            PropertyKind::Bytes { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn set_bytes(&mut self, bytes: &[u8]) -> Result<(), Mp4Error> {
        if self.read_only {
            return Err(Mp4Error::ReadOnlyProperty(self.name));
        }
        match &mut self.kind {
            PropertyKind::Bytes { value, len } => {
                if let BytesLen::Fixed(n) = len {
                    if bytes.len() as u64 != *n {
                        return Err(Mp4Error::ValueOutOfRange {
                            name: self.name,
                            value: bytes.len() as u64,
                            bits: *n as u32 * 8,
                        });
                    }
                }
                *value = bytes.to_vec();
                Ok(())
            }
            _ => Err(Mp4Error::ValueOutOfRange { name: self.name, value: 0, bits: 0 }),
        }
    }

    pub fn table_value(&self) -> Option<&Table> {
        match &self.kind {
            PropertyKind::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut Table> {
        match &mut self.kind {
            PropertyKind::Table(t) => Some(t),
            _ => None,
        }
    }

    /// On-disk width in bytes when it is fixed and byte-aligned.
    /// Used to derive row counts from remaining payload.
    pub(crate) fn fixed_width(&self) -> Option<u64> {
        match &self.kind {
            PropertyKind::Int { width, .. } => Some(*width as u64),
            PropertyKind::Fixed { width, .. } => Some(*width as u64),
            PropertyKind::Bitfield { bits, .. } if bits % 8 == 0 => Some(*bits as u64 / 8),
            PropertyKind::Str { format: StrFormat::Fixed(n), .. } => Some(*n),
            PropertyKind::Bytes { len: BytesLen::Fixed(n), .. } => Some(*n),
            _ => None,
        }
    }

    /// Emits a lawful default. Construction already zeroes scalar
    /// values; this resets variable state.
    pub fn generate(&mut self) {
        match &mut self.kind {
            PropertyKind::Bytes { len: BytesLen::Fixed(n), value } => {
                *value = vec![0_u8; *n as usize];
            }
            PropertyKind::Table(t) => t.rows.clear(),
            _ => {}
        }
    }

    /// Reads the property at the current position. `end` is the
    /// enclosing atom's end, bounding to-end lengths; `count` is the
    /// resolved row count for count-referenced tables; `prev` is the
    /// preceding property's integer value for length-prefixed buffers.
    pub(crate) fn read(
        &mut self,
        io: &mut Mp4Io,
        end: u64,
        count: Option<u64>,
        prev: Option<u64>,
    ) -> Result<(), Mp4Error> {
        match &mut self.kind {
            PropertyKind::Int { width, value } => {
                *value = match width {
                    1 => io.read_u8()? as u64,
                    2 => io.read_u16()? as u64,
                    3 => io.read_u24()? as u64,
                    4 => io.read_u32()? as u64,
                    _ => io.read_u64()?,
                };
            }
            PropertyKind::Bitfield { bits, value } => {
                *value = io.read_bits(*bits)?;
            }
            PropertyKind::Fixed { width, raw } => {
                *raw = match width {
                    2 => io.read_u16()? as u32,
                    _ => io.read_u32()?,
                };
            }
            PropertyKind::Str { format, encoding, value } => {
                let bytes = match format {
                    StrFormat::Counted => {
                        let n = io.read_u8()? as usize;
                        io.read_bytes(n)?
                    }
                    StrFormat::NulTerminated => {
                        let pos = io.pos()?;
                        io.read_until_nul(end.saturating_sub(pos))?
                    }
                    StrFormat::Fixed(n) => io.read_bytes(*n as usize)?,
                    StrFormat::ToEnd => {
                        let pos = io.pos()?;
                        io.read_bytes(end.saturating_sub(pos) as usize)?
                    }
                };
                *value = match encoding {
                    StrEncoding::Utf8 => String::from_utf8(bytes)?,
                    StrEncoding::Latin1 => bytes.iter().map(|b| *b as char).collect(),
                };
            }
            PropertyKind::Bytes { len, value } => {
                let n = match len {
                    BytesLen::Fixed(n) => *n,
                    BytesLen::ToEnd => end.saturating_sub(io.pos()?),
                    BytesLen::FromPrevious => {
                        prev.ok_or(Mp4Error::ValueOutOfRange {
                            name: self.name,
                            value: 0,
                            bits: 0,
                        })?
                    }
                };
                *value = io.read_bytes(n as usize)?;
            }
            PropertyKind::Descriptor { tag, len_width, body } => {
                *tag = io.read_u8()?;
                let mut length = 0_u64;
                let mut width = 0_u8;
                loop {
                    let b = io.read_u8()?;
                    width += 1;
                    length = (length << 7) | (b & 0x7F) as u64;
                    if b & 0x80 == 0 || width == 8 {
                        break;
                    }
                }
                *len_width = width;
                *body = io.read_bytes(length as usize)?;
            }
            PropertyKind::Table(table) => {
                let count = match table.count {
                    RowCount::Prop(_) => count.unwrap_or(0),
                    RowCount::Remaining => {
                        let row_width: u64 = table
                            .row_schema
                            .iter()
                            .map(|p| p.fixed_width().unwrap_or(0))
                            .sum();
                        match row_width {
                            0 => 0,
                            w => end.saturating_sub(io.pos()?) / w,
                        }
                    }
                };
                table.rows.clear();
                for _ in 0..count {
                    let mut row = table.row_schema.clone();
                    let mut prev_in_row: Option<u64> = None;
                    for prop in row.iter_mut() {
                        prop.read(io, end, None, prev_in_row)?;
                        prev_in_row = prop.int_value();
                    }
                    table.rows.push(row);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn write(&self, io: &mut Mp4Io) -> Result<(), Mp4Error> {
        match &self.kind {
            PropertyKind::Int { width, value } => match width {
                1 => io.write_u8(*value as u8)?,
                2 => io.write_u16(*value as u16)?,
                3 => io.write_u24(*value as u32)?,
                4 => io.write_u32(*value as u32)?,
                _ => io.write_u64(*value)?,
            },
            PropertyKind::Bitfield { bits, value } => io.write_bits(*value, *bits)?,
            PropertyKind::Fixed { width, raw } => match width {
                2 => io.write_u16(*raw as u16)?,
                _ => io.write_u32(*raw)?,
            },
            PropertyKind::Str { format, encoding, value } => {
                let mut bytes = match encoding {
                    StrEncoding::Utf8 => value.as_bytes().to_vec(),
                    StrEncoding::Latin1 => value.chars().map(|c| c as u8).collect(),
                };
                match format {
                    StrFormat::Counted => {
                        io.write_u8(bytes.len() as u8)?;
                        io.write_bytes(&bytes)?;
                    }
                    StrFormat::NulTerminated => {
                        io.write_bytes(&bytes)?;
                        io.write_u8(0)?;
                    }
                    StrFormat::Fixed(n) => {
                        bytes.resize(*n as usize, 0);
                        io.write_bytes(&bytes)?;
                    }
                    StrFormat::ToEnd => io.write_bytes(&bytes)?,
                }
            }
            PropertyKind::Bytes { value, .. } => io.write_bytes(value)?,
            PropertyKind::Descriptor { tag, len_width, body } => {
                io.write_u8(*tag)?;
                let mut groups = Vec::new();
                let mut length = body.len() as u64;
                loop {
                    groups.push((length & 0x7F) as u8);
                    length >>= 7;
                    if length == 0 {
                        break;
                    }
                }
                // keep the original length-encoding width
                while groups.len() < *len_width as usize {
                    groups.push(0);
                }
                for (i, g) in groups.iter().enumerate().rev() {
                    let cont = if i == 0 { 0 } else { 0x80 };
                    io.write_u8(*g | cont)?;
                }
                io.write_bytes(body)?;
            }
            PropertyKind::Table(table) => {
                for row in &table.rows {
                    for prop in row {
                        prop.write(io)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Renders `name = value` dump lines. Tables render one line per
    /// row and are suppressed below verbose level 2 by the caller.
    pub(crate) fn dump(&self, logger: &mut Logger, indent: u8, level: LogLevel) {
        match &self.kind {
            PropertyKind::Int { value, width } => {
                let hex_width = *width as usize * 2;
                logger.dump(
                    indent,
                    level,
                    &format!("{} = {} (0x{:0w$x})", self.name, value, value, w = hex_width),
                );
            }
            PropertyKind::Bitfield { bits, value } => {
                let hex_width = (*bits as usize).div_ceil(4);
                logger.dump(
                    indent,
                    level,
                    &format!(
                        "{} = {} (0x{:0w$x}) <{} bits>",
                        self.name, value, value, bits, w = hex_width
                    ),
                );
            }
            PropertyKind::Fixed { .. } => {
                let value = self.float_value().unwrap_or(0.0);
                logger.dump(indent, level, &format!("{} = {}", self.name, value));
            }
            PropertyKind::Str { value, .. } => {
                let display: String = value.trim_end_matches('\0').to_owned();
                logger.dump(indent, level, &format!("{} = \"{}\"", self.name, display));
            }
            PropertyKind::Bytes { value, .. } => {
                let mut hex = String::new();
                for b in value.iter().take(16) {
                    hex.push_str(&format!("{b:02x} "));
                }
                if value.len() > 16 {
                    hex.push_str("...");
                }
                logger.dump(
                    indent,
                    level,
                    &format!("{} = <{} bytes> {}", self.name, value.len(), hex.trim_end()),
                );
            }
            PropertyKind::Descriptor { tag, body, .. } => {
                logger.dump(
                    indent,
                    level,
                    &format!("{} = descriptor tag {} <{} bytes>", self.name, tag, body.len()),
                );
            }
            PropertyKind::Table(table) => {
                logger.dump(
                    indent,
                    level,
                    &format!("{} = <{} entries>", self.name, table.rows.len()),
                );
                for (i, row) in table.rows.iter().enumerate() {
                    logger.dump(indent + 1, level, &format!("[{i}]"));
                    for prop in row {
                        prop.dump(logger, indent + 2, level);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn memory_io() -> Mp4Io {
        Mp4Io::new(Cursor::new(Vec::new()))
    }

    #[test]
    fn int_round_trip() {
        let mut io = memory_io();
        let mut p = Property::int24("flags");
        p.set_int(0xABCDEF).unwrap();
        p.write(&mut io).unwrap();
        io.set_pos(0).unwrap();
        let mut q = Property::int24("flags");
        q.read(&mut io, 3, None, None).unwrap();
        assert_eq!(q.int_value(), Some(0xABCDEF));
    }

    #[test]
    fn read_only_refuses_public_set() {
        let mut p = Property::reserved("reserved", 4);
        assert!(matches!(
            p.set_bytes(&[1, 2, 3, 4]),
            Err(Mp4Error::ReadOnlyProperty("reserved"))
        ));
        // the parser-side path still works
        let mut count = Property::int32("entryCount");
        count.set_read_only(true);
        count.set_int_internal(3).unwrap();
        assert_eq!(count.int_value(), Some(3));
    }

    #[test]
    fn value_range_checked() {
        let mut p = Property::bitfield("acmod", 3);
        assert!(p.set_int(7).is_ok());
        assert!(matches!(
            p.set_int(8),
            Err(Mp4Error::ValueOutOfRange { name: "acmod", .. })
        ));
    }

    #[test]
    fn counted_string_round_trip() {
        let mut io = memory_io();
        let mut p = Property::string("title", StrFormat::Counted, StrEncoding::Utf8);
        p.set_string("chapter one").unwrap();
        p.write(&mut io).unwrap();
        io.set_pos(0).unwrap();
        let mut q = Property::string("title", StrFormat::Counted, StrEncoding::Utf8);
        q.read(&mut io, 64, None, None).unwrap();
        assert_eq!(q.string_value(), Some("chapter one"));
    }

    #[test]
    fn descriptor_preserves_length_width() {
        // length 5 encoded in two BER groups: 0x80 0x05
        let mut io = memory_io();
        io.write_bytes(&[0x03, 0x80, 0x05, 1, 2, 3, 4, 5]).unwrap();
        io.set_pos(0).unwrap();
        let mut p = Property::descriptor("esDescr");
        p.read(&mut io, 8, None, None).unwrap();

        let mut out = memory_io();
        p.write(&mut out).unwrap();
        out.set_pos(0).unwrap();
        assert_eq!(
            out.read_bytes(8).unwrap(),
            vec![0x03, 0x80, 0x05, 1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn table_rows_from_count() {
        let mut io = memory_io();
        io.write_bytes(&[0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4])
            .unwrap();
        io.set_pos(0).unwrap();
        let mut p = Property::table(
            "entries",
            RowCount::Prop(0),
            vec![Property::int32("sampleCount"), Property::int32("sampleDelta")],
        );
        p.read(&mut io, 16, Some(2), None).unwrap();
        let table = p.table_value().unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0].int_value(), Some(3));
        assert_eq!(table.rows[1][1].int_value(), Some(4));
    }

    #[test]
    fn bytes_from_previous() {
        let mut io = memory_io();
        io.write_bytes(&[0, 3, 0xAA, 0xBB, 0xCC]).unwrap();
        io.set_pos(0).unwrap();
        let mut row = vec![
            Property::int16("sequenceParameterSetLength"),
            Property::bytes("sequenceParameterSetNALUnit", BytesLen::FromPrevious),
        ];
        let mut prev = None;
        for prop in row.iter_mut() {
            prop.read(&mut io, 5, None, prev).unwrap();
            prev = prop.int_value();
        }
        assert_eq!(row[1].bytes_value(), Some(&[0xAA, 0xBB, 0xCC][..]));
    }
}
