//! Media header atom (`mdhd`).
//!
//! Location: `moov.trak.mdia.mdhd`
//!
//! The language code is a packed ISO-639-2/T triplet: one pad bit and
//! three 5-bit letters.

use crate::consts::MDHD;
use crate::{Atom, AtomKind, Property};

pub(crate) fn mdhd() -> Atom {
    let mut a = Atom::new(MDHD, AtomKind::Mdhd);
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
    atom.add_property(Property::reserved_bits("pad", 1));
    atom.add_property(Property::bitfield("language", 15));
    atom.add_property(Property::int16("quality"));
}

pub(crate) fn generate(atom: &mut Atom) {
    if let Some(p) = atom.property_mut("timeScale") {
        let _ = p.set_int(1000);
    }
    // 'und'
    if let Some(p) = atom.property_mut("language") {
        let _ = p.set_int(0x55C4);
    }
}
