//! Atom factory: maps (parent context, four-char type) to a concrete
//! atom schema.
//!
//! Dispatch is two-phased. Context first: inside `ilst` every child is
//! a metadata item, `data`/`mean`/`name` depend on their parent, `meta`
//! gets the iTMF `hdlr` variant and `udta` owns a closed set of
//! counted-string element types. Then plain type dispatch on the packed
//! fourcc. Anything unmatched becomes an opaque standard atom that
//! preserves its bytes.

use crate::atom_types::*;
use crate::consts::*;
use crate::{Atom, FourCC};

/// Creates the atom for `typ` read in the context of `ancestors`
/// (nearest parent last). `None` creates the root atom.
pub(crate) fn create_atom(typ: Option<FourCC>, ancestors: &[FourCC]) -> Atom {
    let Some(typ) = typ else {
        return containers::root();
    };

    // context-savvy construction
    if let Some(&parent) = ancestors.last() {
        if ancestors.contains(&ILST) {
            if parent == ILST {
                // ilst may not nest inside ilst
                if typ == ILST {
                    return containers::standard(typ);
                }
                return meta::item(typ);
            }
            if typ == DATA {
                return meta::data();
            }
            if parent == FREE_FORM {
                if typ == MEAN {
                    return meta::mean();
                }
                if typ == NAME {
                    return meta::name();
                }
            }
        } else if parent == META {
            if typ == HDLR {
                return hdlr::itmf_hdlr();
            }
        } else if parent == UDTA {
            if typ == HNTI {
                return udta::hnti();
            }
            if typ == HINF {
                return udta::hinf();
            }
            if UDTA_ELEMENTS.contains(&typ) {
                return udta::element(typ);
            }
        } else if parent == HNTI {
            if typ == RTP {
                return udta::rtp();
            }
        }
    }

    match typ {
        FTYP => ftyp::ftyp(),
        MOOV => containers::moov(),
        MVHD => mvhd::mvhd(),
        TRAK => containers::trak(),
        TKHD => tkhd::tkhd(),
        TREF => containers::tref(),
        EDTS => containers::edts(),
        ELST => elst::elst(),
        MDIA => containers::mdia(),
        MDHD => mdhd::mdhd(),
        HDLR => hdlr::hdlr(),
        MINF => containers::minf(),
        VMHD => heads::vmhd(),
        SMHD => heads::smhd(),
        NMHD => heads::nmhd(),
        GMHD => containers::gmhd(),
        GMIN => heads::gmin(),
        DINF => containers::dinf(),
        DREF => dref::dref(),
        URL | ALIS => dref::url(typ),
        URN => dref::urn(),
        STBL => containers::stbl(),
        STSD => stsd::stsd(),
        STTS => stts::stts(),
        CTTS => stts::ctts(),
        CSLG => stts::cslg(),
        STSC => stsc::stsc(),
        STSZ => stsz::stsz(),
        STZ2 => stsz::stz2(),
        STCO => stco::stco(),
        CO64 => stco::co64(),
        STSS => stss::stss(),
        STDP => stss::stdp(),
        SDTP => stss::sdtp(),
        MDAT => containers::mdat(),
        FREE | SKIP => containers::free(typ),
        UDTA => udta::udta(),
        META => meta::meta(),
        ILST => meta::ilst(),
        CHPL => udta::chpl(),
        SDP => udta::sdp(),
        MOOF => frag::moof(),
        TRAF => frag::traf(),
        TFHD => frag::tfhd(),
        TRUN => frag::trun(),
        OHDR => ohdr::ohdr(),
        AVC1 => video::avc1(),
        AVCC => avcc::avcc(),
        MP4A => sound::mp4a(),
        MP4V => video::mp4v(),
        MP4S => sound::mp4s(),
        ESDS => sound::esds(),
        ENCA => sound::enca(),
        ENCV => video::encv(),
        AC_3 => sound::ac3(),
        DAC3 => dac3::dac3(),
        EC_3 => sound::ec3(),
        DEC3 => dec3::dec3(),
        SAMR | SAWB => amr::amr(typ),
        DAMR => amr::damr(),
        S263 => h263::s263(),
        D263 => h263::d263(),
        TEXT => text::text(),
        TX3G => text::tx3g(),
        FTAB => text::ftab(),
        HREF => text::href(),
        SMI => video::smi(),
        PASP => video::pasp(),
        COLR => video::colr(),
        _ => {
            if VIDEO_PASSTHROUGH.contains(&typ) {
                return video::video(typ);
            }
            if SOUND_PASSTHROUGH.contains(&typ) {
                return sound::sound(typ);
            }
            if TREF_TYPES.contains(&typ) {
                return containers::tref_type(typ);
            }
            containers::standard(typ)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AtomKind;

    #[test]
    fn type_dispatch() {
        assert_eq!(create_atom(Some(DREF), &[]).kind(), AtomKind::EntryCount);
        assert_eq!(create_atom(Some(DEC3), &[]).kind(), AtomKind::Dec3);
        assert_eq!(
            create_atom(Some(FourCC::new(*b"zzzz")), &[]).kind(),
            AtomKind::Unknown
        );
    }

    #[test]
    fn context_dispatch() {
        // a data atom inside an ilst item is the metadata value atom
        let in_item = [FourCC::ROOT, MOOV, UDTA, META, ILST, FourCC::new(*b"\xA9nam")];
        let data = create_atom(Some(DATA), &in_item);
        assert!(data.property("typeCode").is_some());

        // ilst nested inside ilst is rejected
        let in_ilst = [FourCC::ROOT, MOOV, UDTA, META, ILST];
        assert_eq!(create_atom(Some(ILST), &in_ilst).kind(), AtomKind::Unknown);

        // udta elements only exist directly below udta
        let in_udta = [FourCC::ROOT, MOOV, UDTA];
        let nam = create_atom(Some(FourCC::new(*b"\xA9nam")), &in_udta);
        assert!(nam.property("value").is_some());
        let loose = create_atom(Some(FourCC::new(*b"\xA9nam")), &[FourCC::ROOT]);
        assert_eq!(loose.kind(), AtomKind::Unknown);
    }
}
