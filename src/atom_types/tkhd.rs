//! Track header atom (`tkhd`).
//!
//! Location: `moov.trak.tkhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/track_header_atom>

use crate::consts::TKHD;
use crate::property::BytesLen;
use crate::{Atom, AtomKind, Property};

use super::UNITY_MATRIX;

pub(crate) fn tkhd() -> Atom {
    let mut a = Atom::new(TKHD, AtomKind::Tkhd);
    a.add_version_and_flags();
    a
}

/// Version 1 stores 64-bit creation/modification times and duration.
pub(crate) fn add_versioned(atom: &mut Atom, version: u8) {
    if atom.property("creationTime").is_some() {
        return;
    }
    let time_width = match version {
        1 => 8,
        _ => 4,
    };
    atom.add_property(Property::int("creationTime", time_width));
    atom.add_property(Property::int("modificationTime", time_width));
    atom.add_property(Property::int32("trackId"));
    atom.add_property(Property::reserved("reserved1", 4));
    atom.add_property(Property::int("duration", time_width));
    atom.add_property(Property::reserved("reserved2", 8));
    atom.add_property(Property::int16("layer"));
    atom.add_property(Property::int16("alternateGroup"));
    atom.add_property(Property::fixed16("volume"));
    atom.add_property(Property::reserved("reserved3", 2));
    atom.add_property(Property::bytes("matrix", BytesLen::Fixed(36)));
    atom.add_property(Property::fixed32("width"));
    atom.add_property(Property::fixed32("height"));
}

pub(crate) fn generate(atom: &mut Atom) {
    // track enabled
    let _ = atom.set_flags(1);
    if let Some(p) = atom.property_mut("matrix") {
        let _ = p.set_bytes(&UNITY_MATRIX);
    }
}
