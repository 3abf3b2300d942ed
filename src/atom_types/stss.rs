//! Sync sample (`stss`), degradation priority (`stdp`) and sample
//! dependency (`sdtp`) atoms.
//!
//! Location: `moov.trak.mdia.minf.stbl.*`
//!
//! `stdp` and `sdtp` have no count field of their own; their entry
//! counts follow from the payload. A conforming writer makes them
//! identical to the `stsz` sample count.

use crate::consts::*;
use crate::property::{BytesLen, RowCount};
use crate::{Atom, AtomKind, Property};

pub(crate) fn stss() -> Atom {
    let mut a = Atom::new(STSS, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::int32("entryCount"));
    a.add_property(Property::table(
        "entries",
        RowCount::Prop(2),
        vec![Property::int32("sampleNumber")],
    ));
    a
}

pub(crate) fn stdp() -> Atom {
    let mut a = Atom::new(STDP, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::table(
        "priorities",
        RowCount::Remaining,
        vec![Property::int16("priority")],
    ));
    a
}

pub(crate) fn sdtp() -> Atom {
    let mut a = Atom::new(SDTP, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::bytes("sampleDependencyFlags", BytesLen::ToEnd));
    a
}
