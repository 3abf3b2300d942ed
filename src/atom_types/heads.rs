//! Media information header atoms (`vmhd`, `smhd`, `nmhd`, `gmin`).
//!
//! Location: `moov.trak.mdia.minf.*`

use crate::consts::*;
use crate::{Atom, AtomKind, Property};

/// Video media information header. Flags are 1 in a lawful file.
pub(crate) fn vmhd() -> Atom {
    let mut a = Atom::new(VMHD, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::reserved("reserved", 8));
    a
}

/// Sound media information header.
pub(crate) fn smhd() -> Atom {
    let mut a = Atom::new(SMHD, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::reserved("reserved", 4));
    a
}

/// Null media information header.
pub(crate) fn nmhd() -> Atom {
    let mut a = Atom::new(NMHD, AtomKind::Standard);
    a.add_version_and_flags();
    a
}

/// Base media information atom (QuickTime).
pub(crate) fn gmin() -> Atom {
    let mut a = Atom::new(GMIN, AtomKind::Standard);
    a.add_version_and_flags();
    a.add_property(Property::int16("graphicsMode"));
    a.add_property(Property::int16("opColorRed"));
    a.add_property(Property::int16("opColorGreen"));
    a.add_property(Property::int16("opColorBlue"));
    a.add_property(Property::int16("balance"));
    a.add_property(Property::reserved("reserved", 2));
    a
}
