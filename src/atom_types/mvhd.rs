//! Movie header atom (`mvhd`).
//!
//! Location: `moov.mvhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/movie_header_atom>

use crate::consts::MVHD;
use crate::{Atom, AtomKind, Property};

use super::UNITY_MATRIX;

pub(crate) fn mvhd() -> Atom {
    let mut a = Atom::new(MVHD, AtomKind::Mvhd);
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
    atom.add_property(Property::int32("timeScale"));
    atom.add_property(Property::int("duration", time_width));
    atom.add_property(Property::fixed32("rate"));
    atom.add_property(Property::fixed16("volume"));
    atom.add_property(Property::reserved("reserved", 10));
    atom.add_property(Property::bytes(
        "matrix",
        crate::property::BytesLen::Fixed(36),
    ));
    atom.add_property(Property::int32("previewTime"));
    atom.add_property(Property::int32("previewDuration"));
    atom.add_property(Property::int32("posterTime"));
    atom.add_property(Property::int32("selectionTime"));
    atom.add_property(Property::int32("selectionDuration"));
    atom.add_property(Property::int32("currentTime"));
    atom.add_property(Property::int32("nextTrackId"));
}

pub(crate) fn generate(atom: &mut Atom) {
    if let Some(p) = atom.property_mut("timeScale") {
        let _ = p.set_int(1000);
    }
    if let Some(p) = atom.property_mut("rate") {
        let _ = p.set_int(0x0001_0000);
    }
    if let Some(p) = atom.property_mut("volume") {
        let _ = p.set_int(0x0100);
    }
    if let Some(p) = atom.property_mut("matrix") {
        let _ = p.set_bytes(&UNITY_MATRIX);
    }
    if let Some(p) = atom.property_mut("nextTrackId") {
        let _ = p.set_int(1);
    }
}
