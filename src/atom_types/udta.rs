//! User data atoms: the `udta` container, its counted-string element
//! leaves, the chapter list and the hint-track information family.
//!
//! Location: `moov.udta.*` and `moov.trak.udta.*`

use crate::consts::*;
use crate::property::{RowCount, StrEncoding, StrFormat};
use crate::{Atom, AtomKind, FourCC, Property};

/// `udta` tolerates unknown children and a trailing four-byte zero
/// terminator (QuickTime writes one).
pub(crate) fn udta() -> Atom {
    let mut a = Atom::new(UDTA, AtomKind::Standard);
    a.expect_child(CHPL, false, true);
    a.expect_child(HNTI, false, true);
    a.expect_child(HINF, false, true);
    a.expect_child(META, false, true);
    a
}

/// A QuickTime user-data element (`©nam`, `©cpy`, `WLOC`, ...): one
/// string filling the payload.
pub(crate) fn element(typ: FourCC) -> Atom {
    let mut a = Atom::new(typ, AtomKind::Standard);
    a.add_property(Property::string(
        "value",
        StrFormat::ToEnd,
        StrEncoding::Latin1,
    ));
    a
}

/// Chapter list (Nero style).
pub(crate) fn chpl() -> Atom {
    let mut a = Atom::new(CHPL, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::int32("chapterCount"));
    a.add_property(Property::table(
        "chapters",
        RowCount::Prop(2),
        vec![
            Property::int64("startTime"),
            Property::string("title", StrFormat::Counted, StrEncoding::Utf8),
        ],
    ));
    a
}

/// Hint track information container.
pub(crate) fn hnti() -> Atom {
    let mut a = Atom::new(HNTI, AtomKind::Standard);
    a.expect_child(RTP, false, true);
    a.expect_child(SDP, false, true);
    a
}

/// SDP text for a movie-level hint track.
pub(crate) fn sdp() -> Atom {
    let mut a = Atom::new(SDP, AtomKind::Standard);
    a.add_property(Property::string(
        "sdpText",
        StrFormat::ToEnd,
        StrEncoding::Latin1,
    ));
    a
}

/// `rtp ` under `hnti`: the track's SDP fragment tagged with its
/// description format.
pub(crate) fn rtp() -> Atom {
    let mut a = Atom::new(RTP, AtomKind::Standard);
    a.add_property(Property::string(
        "descriptionFormat",
        StrFormat::Fixed(4),
        StrEncoding::Latin1,
    ));
    a.add_property(Property::string(
        "sdpText",
        StrFormat::ToEnd,
        StrEncoding::Latin1,
    ));
    a
}

/// Hint statistics container; each child carries its counter payload.
pub(crate) fn hinf() -> Atom {
    let mut a = Atom::new(HINF, AtomKind::Standard);
    for &typ in HINF_CHILDREN {
        a.expect_child(typ, false, true);
    }
    a
}
