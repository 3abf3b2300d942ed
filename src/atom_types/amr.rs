//! AMR narrow/wide band sample entries (`samr`, `sawb`) and their
//! configuration atom (`damr`).
//!
//! Location: `moov.trak.mdia.minf.stbl.stsd.*`
//!
//! See 3GPP TS 26.234.

use crate::consts::*;
use crate::{Atom, AtomKind, FourCC, Property};

use super::sample_entry_header;

pub(crate) fn amr(typ: FourCC) -> Atom {
    let mut a = Atom::new(typ, AtomKind::Standard);
    sample_entry_header(&mut a);
    a.add_property(Property::reserved("reserved2", 16));
    a.add_property(Property::int16("timeScale"));
    a.add_property(Property::reserved("reserved3", 2));
    a.expect_child(DAMR, true, true);
    a
}

pub(crate) fn damr() -> Atom {
    let mut a = Atom::new(DAMR, AtomKind::Standard);
    a.add_property(Property::int32("vendor"));
    a.add_property(Property::int8("decoderVersion"));
    a.add_property(Property::int16("modeSet"));
    a.add_property(Property::int8("modeChangePeriod"));
    a.add_property(Property::int8("framesPerSample"));
    a
}
