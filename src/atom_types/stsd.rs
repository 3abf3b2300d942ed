//! Sample description atom (`stsd`).
//!
//! Location: `moov.trak.mdia.minf.stbl.stsd`
//!
//! The entries are child atoms (sample entries); like `dref`, the
//! `entryCount` is reconciled against the realized child count.

use crate::consts::*;
use crate::{Atom, AtomKind, Property};

pub(crate) fn stsd() -> Atom {
    let mut a = Atom::new(STSD, AtomKind::EntryCount);
    a.add_version_and_flags();
    let mut count = Property::int32("entryCount");
    count.set_read_only(true);
    a.add_property(count);
    for typ in [
        MP4A, MP4V, MP4S, AVC1, ENCA, ENCV, AC_3, EC_3, SAMR, SAWB, S263, TEXT, TX3G, HREF,
        RTP,
    ] {
        a.expect_child(typ, false, false);
    }
    a
}
