//! AVC decoder configuration atom (`avcC`).
//!
//! Location: `moov.trak.mdia.minf.stbl.stsd.avc1.avcC`
//!
//! The parameter set tables carry length-prefixed NAL units; each
//! row's blob length comes from the length column before it.

use crate::consts::AVCC;
use crate::property::{BytesLen, RowCount};
use crate::{Atom, AtomKind, Property};

pub(crate) fn avcc() -> Atom {
    let mut a = Atom::new(AVCC, AtomKind::Standard);
    a.add_property(Property::int8("configurationVersion"));
    a.add_property(Property::int8("AVCProfileIndication"));
    a.add_property(Property::int8("profile_compatibility"));
    a.add_property(Property::int8("AVCLevelIndication"));
    a.add_property(Property::reserved_bits("reserved", 6));
    a.add_property(Property::bitfield("lengthSizeMinusOne", 2));
    a.add_property(Property::reserved_bits("reserved2", 3));
    a.add_property(Property::bitfield("numOfSequenceParameterSets", 5));
    a.add_property(Property::table(
        "sequenceEntries",
        RowCount::Prop(7),
        vec![
            Property::int16("sequenceParameterSetLength"),
            Property::bytes("sequenceParameterSetNALUnit", BytesLen::FromPrevious),
        ],
    ));
    a.add_property(Property::int8("numOfPictureParameterSets"));
    a.add_property(Property::table(
        "pictureEntries",
        RowCount::Prop(9),
        vec![
            Property::int16("pictureParameterSetLength"),
            Property::bytes("pictureParameterSetNALUnit", BytesLen::FromPrevious),
        ],
    ));
    a
}
