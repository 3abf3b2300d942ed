//! File type atom (`ftyp`).
//!
//! Location: `ftyp` (first top-level atom)

use crate::consts::FTYP;
use crate::property::{RowCount, StrEncoding, StrFormat};
use crate::{Atom, AtomKind, Property};

/// Major brand, minor version and compatible brands filling the
/// remainder of the payload.
pub(crate) fn ftyp() -> Atom {
    let mut a = Atom::new(FTYP, AtomKind::Standard);
    a.add_property(Property::string(
        "majorBrand",
        StrFormat::Fixed(4),
        StrEncoding::Latin1,
    ));
    a.add_property(Property::int32("minorVersion"));
    a.add_property(Property::table(
        "compatibleBrands",
        RowCount::Remaining,
        vec![Property::string(
            "brand",
            StrFormat::Fixed(4),
            StrEncoding::Latin1,
        )],
    ));
    a
}

/// Defaults for a newly created file.
pub(crate) fn generate(atom: &mut Atom) {
    if let Some(p) = atom.property_mut("majorBrand") {
        let _ = p.set_string("isom");
    }
    if let Some(p) = atom.property_mut("minorVersion") {
        let _ = p.set_int(0x200);
    }
    if let Some(table) = atom.property_mut("compatibleBrands").and_then(|p| p.table_mut()) {
        table.rows.clear();
        for brand in ["isom", "iso2", "avc1", "mp41"] {
            let mut row = table.row_schema.clone();
            let _ = row[0].set_string(brand);
            table.rows.push(row);
        }
    }
}
