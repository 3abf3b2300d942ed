//! Sample-to-chunk atom (`stsc`).
//!
//! Location: `moov.trak.mdia.minf.stbl.stsc`

use crate::consts::STSC;
use crate::property::RowCount;
use crate::{Atom, AtomKind, Property};

pub(crate) fn stsc() -> Atom {
    let mut a = Atom::new(STSC, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::int32("entryCount"));
    a.add_property(Property::table(
        "entries",
        RowCount::Prop(2),
        vec![
            Property::int32("firstChunk"),
            Property::int32("samplesPerChunk"),
            Property::int32("sampleDescriptionIndex"),
        ],
    ));
    a
}
