//! Sample size atoms (`stsz`, `stz2`).
//!
//! Location: `moov.trak.mdia.minf.stbl.*`
//!
//! `stsz` carries a per-sample table only when `sampleSize` is zero.
//! `stz2` packs its entries at the bit width given by `fieldSize`.

use crate::consts::{STSZ, STZ2};
use crate::property::RowCount;
use crate::{Atom, AtomKind, Property};

pub(crate) fn stsz() -> Atom {
    let mut a = Atom::new(STSZ, AtomKind::Stsz);
    a.add_version_and_flags();
    a.add_property(Property::int32("sampleSize"));
    a.add_property(Property::int32("sampleCount"));
    a.add_property(Property::table(
        "entries",
        RowCount::Prop(3),
        vec![Property::int32("entrySize")],
    ));
    a
}

pub(crate) fn stz2() -> Atom {
    let mut a = Atom::new(STZ2, AtomKind::Stz2);
    a.add_version_and_flags();
    a.add_property(Property::reserved("reserved", 3));
    a.add_property(Property::int8("fieldSize"));
    a.add_property(Property::int32("sampleCount"));
    a.add_property(Property::table(
        "entries",
        RowCount::Prop(4),
        vec![Property::bitfield("entrySize", 4)],
    ));
    a
}

/// Rebuilds the entry column at the bit width read from `fieldSize`
/// (4, 8 or 16).
pub(crate) fn stz2_set_field_size(atom: &mut Atom, bits: u32) {
    let bits = match bits {
        4 | 8 | 16 => bits,
        _ => 4,
    };
    if let Some(table) = atom.property_mut("entries").and_then(|p| p.table_mut()) {
        table.row_schema = vec![Property::bitfield("entrySize", bits)];
    }
}
