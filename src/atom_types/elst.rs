//! Edit list atom (`elst`).
//!
//! Location: `moov.trak.edts.elst`

use crate::consts::ELST;
use crate::property::RowCount;
use crate::{Atom, AtomKind, Property};

pub(crate) fn elst() -> Atom {
    let mut a = Atom::new(ELST, AtomKind::Elst);
    a.add_version_and_flags();
    a
}

/// Version 1 widens the duration and media time columns to 64 bits.
pub(crate) fn add_versioned(atom: &mut Atom, version: u8) {
    if atom.property("entryCount").is_some() {
        return;
    }
    let width = match version {
        1 => 8,
        _ => 4,
    };
    atom.add_property(Property::int32("entryCount"));
    atom.add_property(Property::table(
        "entries",
        RowCount::Prop(2),
        vec![
            Property::int("segmentDuration", width),
            Property::int("mediaTime", width),
            Property::int16("mediaRate"),
            Property::int16("mediaRateFraction"),
        ],
    ));
}
