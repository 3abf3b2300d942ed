//! OMA DRM common headers atom (`ohdr`).
//!
//! Location: `moov.trak.mdia.minf.stbl.stsd.*.ohdr` (inside protected
//! sample entries)
//!
//! Three trailing strings are sized by the length fields before them;
//! their widths are settled once the fixed head has been read.

use crate::consts::OHDR;
use crate::property::{BytesLen, StrEncoding, StrFormat};
use crate::{Atom, AtomKind, Property};

pub(crate) fn ohdr() -> Atom {
    let mut a = Atom::new(OHDR, AtomKind::Ohdr);
    a.add_version_and_flags();
    a.add_property(Property::int8("encryptionMethod"));
    a.add_property(Property::int8("paddingScheme"));
    a.add_property(Property::int64("plaintextLength"));
    a.add_property(Property::int16("contentIDLength"));
    a.add_property(Property::int16("rightsIssuerURLLength"));
    a.add_property(Property::int16("textualHeadersLength"));
    a
}

pub(crate) fn add_tail(atom: &mut Atom) {
    if atom.property("contentID").is_some() {
        return;
    }
    let content_id_len = atom.int_value("contentIDLength").unwrap_or(0);
    let url_len = atom.int_value("rightsIssuerURLLength").unwrap_or(0);
    let headers_len = atom.int_value("textualHeadersLength").unwrap_or(0);
    atom.add_property(Property::string(
        "contentID",
        StrFormat::Fixed(content_id_len),
        StrEncoding::Latin1,
    ));
    atom.add_property(Property::string(
        "rightsIssuerURL",
        StrFormat::Fixed(url_len),
        StrEncoding::Latin1,
    ));
    atom.add_property(Property::bytes(
        "textualHeaders",
        BytesLen::Fixed(headers_len),
    ));
}
