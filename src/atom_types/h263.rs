//! H.263 sample entry (`s263`) and its configuration atom (`d263`).
//!
//! Location: `moov.trak.mdia.minf.stbl.stsd.*`
//!
//! See 3GPP TS 26.234.

use crate::consts::*;
use crate::{Atom, AtomKind, Property};

use super::video;

pub(crate) fn s263() -> Atom {
    let mut a = video::video(S263);
    a.expect_child(D263, true, true);
    a
}

pub(crate) fn d263() -> Atom {
    let mut a = Atom::new(D263, AtomKind::Standard);
    a.add_property(Property::int32("vendor"));
    a.add_property(Property::int8("decoderVersion"));
    a.add_property(Property::int8("h263Level"));
    a.add_property(Property::int8("h263Profile"));
    a
}
