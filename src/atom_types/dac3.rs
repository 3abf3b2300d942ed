//! AC-3 specific atom (`dac3`).
//!
//! Location: `moov.trak.mdia.minf.stbl.stsd.ac-3.dac3`
//!
//! See ETSI TS 102 366 Annex F.

use crate::consts::DAC3;
use crate::{Atom, AtomKind, Property};

pub(crate) fn dac3() -> Atom {
    let mut a = Atom::new(DAC3, AtomKind::Standard);
    a.add_property(Property::bitfield("fscod", 2));
    a.add_property(Property::bitfield("bsid", 5));
    a.add_property(Property::bitfield("bsmod", 3));
    a.add_property(Property::bitfield("acmod", 3));
    a.add_property(Property::bitfield("lfeon", 1));
    a.add_property(Property::bitfield("bit_rate_code", 5));
    a.add_property(Property::reserved_bits("reserved", 5));
    a
}
