//! iTunes-style metadata atoms: `meta`, `ilst`, the per-key item
//! atoms, their `data` value atoms and the `----`/`mean`/`name`
//! freeform family.
//!
//! Location: `moov.udta.meta.ilst.*` (item semantics depend entirely
//! on parent context; the factory performs that dispatch).

use crate::consts::*;
use crate::property::{BytesLen, StrEncoding, StrFormat};
use crate::{Atom, AtomKind, FourCC, Property};

pub(crate) fn meta() -> Atom {
    let mut a = Atom::new(META, AtomKind::Standard);
    a.add_version_and_flags();
    a.expect_child(HDLR, true, true);
    a.expect_child(ILST, false, true);
    a
}

/// Known iTunes metadata item keys, declared so conforming files parse
/// without unexpected-child notes. Unknown keys still parse as items.
const ILST_ITEMS: &[FourCC] = &[
    FourCC::new(*b"\xA9nam"),
    FourCC::new(*b"\xA9ART"),
    FourCC::new(*b"\xA9alb"),
    FourCC::new(*b"\xA9cmt"),
    FourCC::new(*b"\xA9day"),
    FourCC::new(*b"\xA9gen"),
    FourCC::new(*b"\xA9grp"),
    FourCC::new(*b"\xA9lyr"),
    FourCC::new(*b"\xA9too"),
    FourCC::new(*b"\xA9wrt"),
    FourCC::new(*b"aART"),
    FourCC::new(*b"covr"),
    FourCC::new(*b"cpil"),
    FourCC::new(*b"disk"),
    FourCC::new(*b"gnre"),
    FourCC::new(*b"pgap"),
    FourCC::new(*b"tmpo"),
    FourCC::new(*b"trkn"),
];

pub(crate) fn ilst() -> Atom {
    let mut a = Atom::new(ILST, AtomKind::Standard);
    for &typ in ILST_ITEMS {
        a.expect_child(typ, false, false);
    }
    a.expect_child(FREE_FORM, false, false);
    a
}

/// A metadata item keyed by its four-char code; the value lives in
/// `data` children. The freeform key (`----`) additionally names
/// itself through `mean` and `name`.
pub(crate) fn item(typ: FourCC) -> Atom {
    let mut a = Atom::new(typ, AtomKind::Standard);
    if typ == FREE_FORM {
        a.expect_child(MEAN, true, true);
        a.expect_child(NAME, true, true);
    }
    a.expect_child(DATA, true, false);
    a
}

/// Metadata value atom.
pub(crate) fn data() -> Atom {
    let mut a = Atom::new(DATA, AtomKind::Standard);
    a.add_property(Property::int16("typeReserved"));
    a.add_property(Property::int8("typeSetIdentifier"));
    a.add_property(Property::int8("typeCode"));
    a.add_property(Property::int32("locale"));
    a.add_property(Property::bytes("metadata", BytesLen::ToEnd));
    a
}

/// Freeform key namespace, e.g. `com.apple.iTunes`.
pub(crate) fn mean() -> Atom {
    let mut a = Atom::new(MEAN, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::string(
        "value",
        StrFormat::ToEnd,
        StrEncoding::Latin1,
    ));
    a
}

/// Freeform key name.
pub(crate) fn name() -> Atom {
    let mut a = Atom::new(NAME, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::string(
        "value",
        StrFormat::ToEnd,
        StrEncoding::Latin1,
    ));
    a
}
