//! Video sample entries and their extension atoms.
//!
//! Location: `moov.trak.mdia.minf.stbl.stsd.*`
//!
//! The QuickTime video description is shared by `avc1`, `mp4v`,
//! `encv`, `s263` and the passthrough codecs (DV, XDCAM, Motion JPEG,
//! AVID, raw).

use crate::consts::*;
use crate::property::{BytesLen, StrEncoding, StrFormat};
use crate::{Atom, AtomKind, FourCC, Property};

use super::sample_entry_header;

/// The shared video sample description.
pub(crate) fn video(typ: FourCC) -> Atom {
    let mut a = Atom::new(typ, AtomKind::Standard);
    sample_entry_header(&mut a);
    a.add_property(Property::int16("version"));
    a.add_property(Property::int16("revisionLevel"));
    a.add_property(Property::int32("vendor"));
    a.add_property(Property::int32("temporalQuality"));
    a.add_property(Property::int32("spatialQuality"));
    a.add_property(Property::int16("width"));
    a.add_property(Property::int16("height"));
    a.add_property(Property::fixed32("horizresolution"));
    a.add_property(Property::fixed32("vertresolution"));
    a.add_property(Property::int32("entryDataSize"));
    a.add_property(Property::int16("frameCount"));
    a.add_property(Property::string(
        "compressorName",
        StrFormat::Fixed(32),
        StrEncoding::Latin1,
    ));
    a.add_property(Property::int16("depth"));
    a.add_property(Property::int16("colorTableId"));
    a
}

/// AVC requires its `avcC` configuration; `colr` and `pasp` may
/// follow.
pub(crate) fn avc1() -> Atom {
    let mut a = video(AVC1);
    a.expect_child(AVCC, true, true);
    a.expect_child(COLR, false, true);
    a.expect_child(PASP, false, true);
    a
}

pub(crate) fn mp4v() -> Atom {
    let mut a = video(MP4V);
    a.expect_child(ESDS, true, true);
    a
}

pub(crate) fn encv() -> Atom {
    let mut a = video(ENCV);
    a.expect_child(ESDS, false, true);
    a.expect_child(AVCC, false, true);
    a
}

/// Sorenson SMI extension: opaque payload.
pub(crate) fn smi() -> Atom {
    let mut a = Atom::new(SMI, AtomKind::Standard);
    a.add_property(Property::bytes("data", BytesLen::ToEnd));
    a
}

/// Pixel aspect ratio.
pub(crate) fn pasp() -> Atom {
    let mut a = Atom::new(PASP, AtomKind::Standard);
    a.add_property(Property::int32("hSpacing"));
    a.add_property(Property::int32("vSpacing"));
    a
}

/// Color parameters.
pub(crate) fn colr() -> Atom {
    let mut a = Atom::new(COLR, AtomKind::Standard);
    a.add_property(Property::string(
        "colorParameterType",
        StrFormat::Fixed(4),
        StrEncoding::Latin1,
    ));
    a.add_property(Property::int16("primariesIndex"));
    a.add_property(Property::int16("transferFunctionIndex"));
    a.add_property(Property::int16("matrixIndex"));
    a
}
