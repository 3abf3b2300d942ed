//! Data reference atom (`dref`) and its entries (`url `, `urn `,
//! `alis`).
//!
//! Location: `moov.trak.mdia.minf.dinf.dref`
//!
//! The `entryCount` is read-only at the schema level; when a parsed
//! file disagrees with the realized child count the parser repairs the
//! count and records a diagnostic.

use crate::consts::*;
use crate::property::{StrEncoding, StrFormat};
use crate::{Atom, AtomKind, FourCC, Property};

pub(crate) fn dref() -> Atom {
    let mut a = Atom::new(DREF, AtomKind::EntryCount);
    a.add_version_and_flags();
    let mut count = Property::int32("entryCount");
    count.set_read_only(true);
    a.add_property(count);
    a.expect_child(URL, false, false);
    a.expect_child(URN, false, false);
    a.expect_child(ALIS, false, false);
    a
}

/// `url ` (and the QuickTime `alis` alias). Flag bit 0 marks the media
/// data as self-contained, with no location string present.
pub(crate) fn url(typ: FourCC) -> Atom {
    let mut a = Atom::new(typ, AtomKind::Url);
    a.add_version_and_flags();
    a
}

pub(crate) fn url_add_location(atom: &mut Atom) {
    if atom.property("location").is_some() {
        return;
    }
    atom.add_property(Property::string(
        "location",
        StrFormat::NulTerminated,
        StrEncoding::Utf8,
    ));
}

pub(crate) fn urn() -> Atom {
    let mut a = Atom::new(URN, AtomKind::Urn);
    a.add_version_and_flags();
    a
}

pub(crate) fn urn_add_location(atom: &mut Atom) {
    if atom.property("name").is_some() {
        return;
    }
    atom.add_property(Property::string(
        "name",
        StrFormat::NulTerminated,
        StrEncoding::Utf8,
    ));
    atom.add_property(Property::string(
        "location",
        StrFormat::NulTerminated,
        StrEncoding::Utf8,
    ));
}
