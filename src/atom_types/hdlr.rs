//! Handler reference atom (`hdlr`).
//!
//! Location: `moov.trak.mdia.hdlr`, and inside `meta` as the iTMF
//! handler variant.
//!
//! The trailing component name appears both counted (QuickTime) and
//! NUL-terminated (ISO) in the wild; the raw remainder is kept so the
//! atom re-serializes byte exact either way.

use crate::consts::HDLR;
use crate::property::{StrEncoding, StrFormat};
use crate::{Atom, AtomKind, Property};

pub(crate) fn hdlr() -> Atom {
    let mut a = Atom::new(HDLR, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::reserved("reserved1", 4));
    a.add_property(Property::string(
        "handlerType",
        StrFormat::Fixed(4),
        StrEncoding::Latin1,
    ));
    a.add_property(Property::reserved("reserved2", 12));
    a.add_property(Property::string(
        "name",
        StrFormat::ToEnd,
        StrEncoding::Latin1,
    ));
    a
}

/// `meta.hdlr`: the iTunes metadata handler.
pub(crate) fn itmf_hdlr() -> Atom {
    let mut a = hdlr();
    if let Some(p) = a.property_mut("handlerType") {
        let _ = p.set_string("mdir");
    }
    if let Some(p) = a.property_mut("name") {
        let _ = p.set_string("\0");
    }
    a
}
