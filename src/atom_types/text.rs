//! Text sample entries: QuickTime `text`, 3GPP timed text `tx3g` with
//! its font table `ftab`, and the hypertext `href` entry.
//!
//! Location: `moov.trak.mdia.minf.stbl.stsd.*`

use crate::consts::*;
use crate::property::{BytesLen, RowCount, StrEncoding, StrFormat};
use crate::{Atom, AtomKind, Property};

use super::sample_entry_header;

/// QuickTime text sample description.
pub(crate) fn text() -> Atom {
    let mut a = Atom::new(TEXT, AtomKind::Standard);
    sample_entry_header(&mut a);
    a.add_property(Property::int32("displayFlags"));
    a.add_property(Property::int32("textJustification"));
    a.add_property(Property::int16("bgColorRed"));
    a.add_property(Property::int16("bgColorGreen"));
    a.add_property(Property::int16("bgColorBlue"));
    a.add_property(Property::bytes("defaultTextBox", BytesLen::Fixed(8)));
    a.add_property(Property::reserved("reserved2", 8));
    a.add_property(Property::int16("fontNumber"));
    a.add_property(Property::int16("fontFace"));
    a.add_property(Property::reserved("reserved3", 1));
    a.add_property(Property::reserved("reserved4", 2));
    a.add_property(Property::int16("foreColorRed"));
    a.add_property(Property::int16("foreColorGreen"));
    a.add_property(Property::int16("foreColorBlue"));
    a.add_property(Property::string(
        "textName",
        StrFormat::Counted,
        StrEncoding::Latin1,
    ));
    a
}

/// 3GPP timed text sample description.
pub(crate) fn tx3g() -> Atom {
    let mut a = Atom::new(TX3G, AtomKind::Standard);
    sample_entry_header(&mut a);
    a.add_property(Property::int32("displayFlags"));
    a.add_property(Property::int8("horizontalJustification"));
    a.add_property(Property::int8("verticalJustification"));
    a.add_property(Property::bytes("bgColor", BytesLen::Fixed(4)));
    a.add_property(Property::bytes("defaultTextBox", BytesLen::Fixed(8)));
    a.add_property(Property::int16("startChar"));
    a.add_property(Property::int16("endChar"));
    a.add_property(Property::int16("fontID"));
    a.add_property(Property::int8("fontFace"));
    a.add_property(Property::int8("fontSize"));
    a.add_property(Property::bytes("fontColor", BytesLen::Fixed(4)));
    a.expect_child(FTAB, false, true);
    a
}

/// Font table.
pub(crate) fn ftab() -> Atom {
    let mut a = Atom::new(FTAB, AtomKind::Standard);
    a.add_property(Property::int16("entryCount"));
    a.add_property(Property::table(
        "fontEntries",
        RowCount::Prop(0),
        vec![
            Property::int16("fontID"),
            Property::string("fontName", StrFormat::Counted, StrEncoding::Latin1),
        ],
    ));
    a
}

/// Hypertext reference sample entry: the link payload is opaque.
pub(crate) fn href() -> Atom {
    let mut a = Atom::new(HREF, AtomKind::Standard);
    sample_entry_header(&mut a);
    a.add_property(Property::bytes("data", BytesLen::ToEnd));
    a
}
