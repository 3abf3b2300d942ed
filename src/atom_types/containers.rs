//! Pure container atoms and the opaque payload carriers.
//!
//! Containers declare expected children only; the generic read and
//! write paths do the rest.

use crate::consts::*;
use crate::property::{BytesLen, RowCount};
use crate::{Atom, AtomKind, FourCC, Property};

/// The file-level root atom: empty type, spans the whole sink.
pub(crate) fn root() -> Atom {
    let mut a = Atom::new(FourCC::ROOT, AtomKind::Root);
    a.expect_child(FTYP, true, true);
    a.expect_child(MOOV, true, true);
    a.expect_child(MDAT, false, false);
    a.expect_child(FREE, false, false);
    a.expect_child(SKIP, false, false);
    a.expect_child(UDTA, false, false);
    a.expect_child(MOOF, false, false);
    a
}

/// Location: `moov`
pub(crate) fn moov() -> Atom {
    let mut a = Atom::new(MOOV, AtomKind::Standard);
    a.expect_child(MVHD, true, true);
    a.expect_child(FourCC::new(*b"iods"), false, true);
    a.expect_child(TRAK, false, false);
    a.expect_child(UDTA, false, false);
    a.expect_child(META, false, true);
    a
}

/// Location: `moov.trak`
pub(crate) fn trak() -> Atom {
    let mut a = Atom::new(TRAK, AtomKind::Standard);
    a.expect_child(TKHD, true, true);
    a.expect_child(TREF, false, true);
    a.expect_child(EDTS, false, true);
    a.expect_child(MDIA, true, true);
    a.expect_child(UDTA, false, false);
    a.expect_child(META, false, true);
    a
}

/// Location: `moov.trak.tref`
pub(crate) fn tref() -> Atom {
    let mut a = Atom::new(TREF, AtomKind::Standard);
    for &typ in TREF_TYPES {
        a.expect_child(typ, false, false);
    }
    a
}

/// A track reference entry: the referenced track ids fill the payload.
pub(crate) fn tref_type(typ: FourCC) -> Atom {
    let mut a = Atom::new(typ, AtomKind::Standard);
    a.add_property(Property::table(
        "entries",
        RowCount::Remaining,
        vec![Property::int32("trackId")],
    ));
    a
}

/// Location: `moov.trak.edts`
pub(crate) fn edts() -> Atom {
    let mut a = Atom::new(EDTS, AtomKind::Standard);
    a.expect_child(ELST, true, true);
    a
}

/// Location: `moov.trak.mdia`
pub(crate) fn mdia() -> Atom {
    let mut a = Atom::new(MDIA, AtomKind::Standard);
    a.expect_child(MDHD, true, true);
    a.expect_child(HDLR, true, true);
    a.expect_child(MINF, true, true);
    a
}

/// Location: `moov.trak.mdia.minf`
pub(crate) fn minf() -> Atom {
    let mut a = Atom::new(MINF, AtomKind::Standard);
    a.expect_child(VMHD, false, true);
    a.expect_child(SMHD, false, true);
    a.expect_child(NMHD, false, true);
    a.expect_child(GMHD, false, true);
    a.expect_child(DINF, true, true);
    a.expect_child(STBL, true, true);
    a
}

/// Location: `moov.trak.mdia.minf.gmhd`
pub(crate) fn gmhd() -> Atom {
    let mut a = Atom::new(GMHD, AtomKind::Standard);
    a.expect_child(GMIN, true, true);
    a
}

/// Location: `moov.trak.mdia.minf.dinf`
pub(crate) fn dinf() -> Atom {
    let mut a = Atom::new(DINF, AtomKind::Standard);
    a.expect_child(DREF, true, true);
    a
}

/// Location: `moov.trak.mdia.minf.stbl`
pub(crate) fn stbl() -> Atom {
    let mut a = Atom::new(STBL, AtomKind::Standard);
    a.expect_child(STSD, true, true);
    a.expect_child(STTS, true, true);
    a.expect_child(CTTS, false, true);
    a.expect_child(CSLG, false, true);
    a.expect_child(STSZ, false, true);
    a.expect_child(STZ2, false, true);
    a.expect_child(STSC, true, true);
    a.expect_child(STCO, false, true);
    a.expect_child(CO64, false, true);
    a.expect_child(STSS, false, true);
    a.expect_child(STDP, false, true);
    a.expect_child(SDTP, false, true);
    a
}

/// `mdat` keeps its payload so the tree alone can re-serialize it.
pub(crate) fn mdat() -> Atom {
    let mut a = Atom::new(MDAT, AtomKind::Standard);
    a.add_property(Property::bytes("data", BytesLen::ToEnd));
    a
}

/// `free`/`skip` filler.
pub(crate) fn free(typ: FourCC) -> Atom {
    let mut a = Atom::new(typ, AtomKind::Standard);
    a.add_property(Property::bytes("data", BytesLen::ToEnd));
    a
}

/// Fallback for unrecognized types: the payload is preserved as one
/// opaque `data` property, added when the size is known.
pub(crate) fn standard(typ: FourCC) -> Atom {
    Atom::new(typ, AtomKind::Unknown)
}
