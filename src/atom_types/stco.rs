//! Chunk offset atoms (`stco` with 32-bit offsets, `co64` with
//! 64-bit).
//!
//! Location: `moov.trak.mdia.minf.stbl.*`

use crate::consts::{CO64, STCO};
use crate::property::RowCount;
use crate::{Atom, AtomKind, Property};

pub(crate) fn stco() -> Atom {
    let mut a = Atom::new(STCO, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::int32("entryCount"));
    a.add_property(Property::table(
        "entries",
        RowCount::Prop(2),
        vec![Property::int32("chunkOffset")],
    ));
    a
}

pub(crate) fn co64() -> Atom {
    let mut a = Atom::new(CO64, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::int32("entryCount"));
    a.add_property(Property::table(
        "entries",
        RowCount::Prop(2),
        vec![Property::int64("chunkOffset")],
    ));
    a
}
