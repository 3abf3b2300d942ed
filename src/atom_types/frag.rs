//! Movie fragment atoms: `moof`, `traf`, and the flag-gated `tfhd`
//! and `trun`.
//!
//! Location: `moof.traf.*`
//!
//! Both headers declare optional fields through their flags word; the
//! layout is settled after version and flags are read.

use crate::consts::*;
use crate::property::RowCount;
use crate::{Atom, AtomKind, FourCC, Property};

pub(crate) fn moof() -> Atom {
    let mut a = Atom::new(MOOF, AtomKind::Standard);
    a.expect_child(FourCC::new(*b"mfhd"), false, true);
    a.expect_child(TRAF, false, false);
    a
}

pub(crate) fn traf() -> Atom {
    let mut a = Atom::new(TRAF, AtomKind::Standard);
    a.expect_child(TFHD, true, true);
    a.expect_child(TRUN, false, false);
    a
}

pub(crate) fn tfhd() -> Atom {
    let mut a = Atom::new(TFHD, AtomKind::Tfhd);
    a.add_version_and_flags();
    a.add_property(Property::int32("trackId"));
    a
}

/// Track fragment header optionals, in flag order.
pub(crate) fn tfhd_add_flagged(atom: &mut Atom, flags: u32) {
    if atom.properties().len() > 3 {
        return;
    }
    if flags & 0x01 != 0 {
        atom.add_property(Property::int64("baseDataOffset"));
    }
    if flags & 0x02 != 0 {
        atom.add_property(Property::int32("sampleDescriptionIndex"));
    }
    if flags & 0x08 != 0 {
        atom.add_property(Property::int32("defaultSampleDuration"));
    }
    if flags & 0x10 != 0 {
        atom.add_property(Property::int32("defaultSampleSize"));
    }
    if flags & 0x20 != 0 {
        atom.add_property(Property::int32("defaultSampleFlags"));
    }
}

pub(crate) fn trun() -> Atom {
    let mut a = Atom::new(TRUN, AtomKind::Trun);
    a.add_version_and_flags();
    a.add_property(Property::int32("sampleCount"));
    a
}

/// Track run optionals and the per-sample row layout, in flag order.
pub(crate) fn trun_add_flagged(atom: &mut Atom, flags: u32) {
    if atom.properties().len() > 3 {
        return;
    }
    if flags & 0x01 != 0 {
        atom.add_property(Property::int32("dataOffset"));
    }
    if flags & 0x04 != 0 {
        atom.add_property(Property::int32("firstSampleFlags"));
    }
    let mut row = Vec::new();
    if flags & 0x100 != 0 {
        row.push(Property::int32("sampleDuration"));
    }
    if flags & 0x200 != 0 {
        row.push(Property::int32("sampleSize"));
    }
    if flags & 0x400 != 0 {
        row.push(Property::int32("sampleFlags"));
    }
    if flags & 0x800 != 0 {
        row.push(Property::int32("sampleCompositionTimeOffset"));
    }
    if !row.is_empty() {
        atom.add_property(Property::table("samples", RowCount::Prop(2), row));
    }
}
