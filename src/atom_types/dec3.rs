//! E-AC-3 specific atom (`dec3`).
//!
//! Location: `moov.trak.mdia.minf.stbl.stsd.ec-3.dec3`
//!
//! See ETSI TS 102 366 Annex F. A non-zero `num_dep_sub` gates a
//! trailing 9-bit `chan_loc` field; otherwise a single reserved bit
//! pads the layout to a byte boundary.

use crate::consts::DEC3;
use crate::log::{LogLevel, Logger};
use crate::{Atom, AtomKind, Property};

pub(crate) fn dec3() -> Atom {
    let mut a = Atom::new(DEC3, AtomKind::Dec3);
    a.add_property(Property::bitfield("data_rate", 13));
    a.add_property(Property::bitfield("num_ind_sub", 3));
    a.add_property(Property::bitfield("fscod", 2));
    a.add_property(Property::bitfield("bsid", 5));
    a.add_property(Property::bitfield("bsmod", 5));
    a.add_property(Property::bitfield("acmod", 3));
    a.add_property(Property::bitfield("lfeon", 1));
    a.add_property(Property::reserved_bits("reserved", 3));
    a.add_property(Property::bitfield("num_dep_sub", 4));
    a
}

/// A generated `dec3` has no dependent substreams; the final reserved
/// bit keeps the payload byte aligned.
pub(crate) fn generate(atom: &mut Atom) {
    if let Some(p) = atom.property_mut("num_dep_sub") {
        let _ = p.set_int(0);
    }
    if atom.property("chan_loc").is_none() && atom.properties().len() == 9 {
        atom.add_property(Property::reserved_bits("reserved2", 1));
    }
}

const FSCODS: [&str; 4] = ["48", "44.1", "32", "Reserved"];

const BSMODS: [&str; 8] = [
    "Main audio service: complete main (CM)",
    "Main audio service: music and effects (ME)",
    "Associated service: visually impaired (VI)",
    "Associated service: hearing impaired (HI)",
    "Associated service: dialogue (D)",
    "Associated service: commentary (C)",
    "Associated service: emergency (E)",
    "Associated service: voice over (VO) or Main audio service: karaoke",
];

const ACMODS: [&str; 8] = [
    "1 + 1 (Ch1, Ch2)",
    "1/0 (C)",
    "2/0 (L, R)",
    "3/0 (L, C, R)",
    "2/1 (L, R, S)",
    "3/1 (L, C, R, S)",
    "2/2 (L, R, SL, SR)",
    "3/2 (L, C, R, SL, SR)",
];

fn label(table: &[&'static str], value: u64) -> &'static str {
    match table.get(value as usize) {
        Some(s) => s,
        None => "Invalid value",
    }
}

/// Dump with the decoded enumeration labels alongside the raw values.
pub(crate) fn dump(atom: &Atom, logger: &mut Logger, indent: u8) {
    let level = LogLevel::Verbose2;
    if logger.verbosity < level {
        return;
    }
    if let Some(fscod) = atom.int_value("fscod") {
        logger.dump(
            indent,
            level,
            &format!("fscod = {fscod} ({fscod:#x}) <2 bits> [{} kHz]", label(&FSCODS, fscod)),
        );
    }
    if let Some(bsid) = atom.int_value("bsid") {
        logger.dump(indent, level, &format!("bsid = {bsid} ({bsid:#04x}) <5 bits>"));
    }
    if let Some(bsmod) = atom.int_value("bsmod") {
        logger.dump(
            indent,
            level,
            &format!("bsmod = {bsmod} ({bsmod:#04x}) <5 bits> [{}]", label(&BSMODS, bsmod)),
        );
    }
    if let Some(acmod) = atom.int_value("acmod") {
        logger.dump(
            indent,
            level,
            &format!("acmod = {acmod} ({acmod:#x}) <3 bits> [{}]", label(&ACMODS, acmod)),
        );
    }
    if let Some(lfeon) = atom.int_value("lfeon") {
        let state = match lfeon {
            0 => "DISABLED",
            _ => "ENABLED",
        };
        logger.dump(indent, level, &format!("lfeon = {lfeon} <1 bits> [{state}]"));
    }
    if let Some(rate) = atom.int_value("data_rate") {
        logger.dump(indent, level, &format!("<13 bits> [{rate} kbit/s]"));
    }
}
