//! Sound sample entries and the elementary stream descriptor atom.
//!
//! Location: `moov.trak.mdia.minf.stbl.stsd.*`
//!
//! The QuickTime sound description prefixes every codec: `mp4a`,
//! `enca`, `ac-3`, `ec-3` and the PCM passthrough types all share it.
//! `soundVersion` 1 and 2 append their fixed tails, settled after the
//! base properties are read.

use crate::consts::*;
use crate::{Atom, AtomKind, FourCC, Property};

use super::sample_entry_header;

/// The shared sound sample description.
pub(crate) fn sound(typ: FourCC) -> Atom {
    let mut a = Atom::new(typ, AtomKind::Sound);
    sample_entry_header(&mut a);
    a.add_property(Property::int16("soundVersion"));
    a.add_property(Property::reserved("reserved2", 6));
    a.add_property(Property::int16("channels"));
    a.add_property(Property::int16("sampleSize"));
    a.add_property(Property::int16("compressionId"));
    a.add_property(Property::int16("packetSize"));
    a.add_property(Property::fixed32("sampleRate"));
    a
}

/// QuickTime sound description versions 1 and 2 append fixed tails.
pub(crate) fn add_versioned(atom: &mut Atom, sound_version: u64) {
    if atom.property("samplesPerPacket").is_some()
        || atom.property("sizeOfStructOnly").is_some()
    {
        return;
    }
    match sound_version {
        1 => {
            atom.add_property(Property::int32("samplesPerPacket"));
            atom.add_property(Property::int32("bytesPerPacket"));
            atom.add_property(Property::int32("bytesPerFrame"));
            atom.add_property(Property::int32("bytesPerSample"));
        }
        2 => {
            atom.add_property(Property::int32("sizeOfStructOnly"));
            atom.add_property(Property::int64("audioSampleRate"));
            atom.add_property(Property::int32("numAudioChannels"));
            atom.add_property(Property::int32("always7F000000"));
            atom.add_property(Property::int32("constBitsPerChannel"));
            atom.add_property(Property::int32("formatSpecificFlags"));
            atom.add_property(Property::int32("constBytesPerAudioPacket"));
            atom.add_property(Property::int32("constLPCMFramesPerAudioPacket"));
        }
        _ => {}
    }
}

pub(crate) fn mp4a() -> Atom {
    let mut a = sound(MP4A);
    a.expect_child(ESDS, true, true);
    a
}

pub(crate) fn enca() -> Atom {
    let mut a = sound(ENCA);
    a.expect_child(ESDS, false, true);
    a
}

/// AC-3 requires its `dac3` configuration.
pub(crate) fn ac3() -> Atom {
    let mut a = sound(AC_3);
    a.expect_child(DAC3, true, true);
    a
}

/// E-AC-3 requires its `dec3` configuration.
pub(crate) fn ec3() -> Atom {
    let mut a = sound(EC_3);
    a.expect_child(DEC3, true, true);
    a
}

/// MPEG-4 systems stream sample entry.
pub(crate) fn mp4s() -> Atom {
    let mut a = Atom::new(MP4S, AtomKind::Standard);
    sample_entry_header(&mut a);
    a.expect_child(ESDS, true, true);
    a
}

/// Elementary stream descriptor atom, the carrier of the BER-coded
/// MPEG-4 systems descriptor.
pub(crate) fn esds() -> Atom {
    let mut a = Atom::new(ESDS, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::descriptor("esDescr"));
    a
}
