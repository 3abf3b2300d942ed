//! Timing atoms: time-to-sample (`stts`), composition offset (`ctts`)
//! and composition-to-decode (`cslg`).
//!
//! Location: `moov.trak.mdia.minf.stbl.*`

use crate::consts::*;
use crate::property::RowCount;
use crate::{Atom, AtomKind, Property};

pub(crate) fn stts() -> Atom {
    let mut a = Atom::new(STTS, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::int32("entryCount"));
    a.add_property(Property::table(
        "entries",
        RowCount::Prop(2),
        vec![
            Property::int32("sampleCount"),
            Property::int32("sampleDelta"),
        ],
    ));
    a
}

pub(crate) fn ctts() -> Atom {
    let mut a = Atom::new(CTTS, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::int32("entryCount"));
    a.add_property(Property::table(
        "entries",
        RowCount::Prop(2),
        vec![
            Property::int32("sampleCount"),
            Property::int32("sampleOffset"),
        ],
    ));
    a
}

pub(crate) fn cslg() -> Atom {
    let mut a = Atom::new(CSLG, AtomKind::Cslg);
    a.add_version_and_flags();
    a
}

/// Version 1 widens the shift fields to 64 bits.
pub(crate) fn cslg_add_versioned(atom: &mut Atom, version: u8) {
    if atom.property("compositionToDTSShift").is_some() {
        return;
    }
    let width = match version {
        1 => 8,
        _ => 4,
    };
    atom.add_property(Property::int("compositionToDTSShift", width));
    atom.add_property(Property::int("leastDecodeToDisplayDelta", width));
    atom.add_property(Property::int("greatestDecodeToDisplayDelta", width));
    atom.add_property(Property::int("compositionStartTime", width));
    atom.add_property(Property::int("compositionEndTime", width));
}
