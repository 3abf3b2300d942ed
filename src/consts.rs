//! FourCC constants used by the factory and the per-type schemas,
//! plus the structural flag bits accepted when creating a tree.

use time::{self, PrimitiveDateTime, Month};

use crate::FourCC;

// Structural flags.

/// Permit 64-bit data-sized atoms such as `mdat`.
pub const CREATE_64BIT_DATA: u32 = 0x01;
/// Use 64-bit time fields in `mvhd`/`tkhd`/`mdhd` (version 1).
/// Incompatible with QuickTime players.
pub const CREATE_64BIT_TIME: u32 = 0x02;
/// Skip average/maximum bitrate recomputation on finalize.
pub const CLOSE_DO_NOT_COMPUTE_BITRATE: u32 = 0x01;

// Container and header atoms.

pub const FTYP: FourCC = FourCC::new(*b"ftyp");
pub const MOOV: FourCC = FourCC::new(*b"moov");
pub const MVHD: FourCC = FourCC::new(*b"mvhd");
pub const TRAK: FourCC = FourCC::new(*b"trak");
pub const TKHD: FourCC = FourCC::new(*b"tkhd");
pub const TREF: FourCC = FourCC::new(*b"tref");
pub const EDTS: FourCC = FourCC::new(*b"edts");
pub const ELST: FourCC = FourCC::new(*b"elst");
pub const MDIA: FourCC = FourCC::new(*b"mdia");
pub const MDHD: FourCC = FourCC::new(*b"mdhd");
pub const HDLR: FourCC = FourCC::new(*b"hdlr");
pub const MINF: FourCC = FourCC::new(*b"minf");
pub const VMHD: FourCC = FourCC::new(*b"vmhd");
pub const SMHD: FourCC = FourCC::new(*b"smhd");
pub const NMHD: FourCC = FourCC::new(*b"nmhd");
pub const GMHD: FourCC = FourCC::new(*b"gmhd");
pub const GMIN: FourCC = FourCC::new(*b"gmin");
pub const DINF: FourCC = FourCC::new(*b"dinf");
pub const DREF: FourCC = FourCC::new(*b"dref");
pub const URL: FourCC = FourCC::new(*b"url ");
pub const URN: FourCC = FourCC::new(*b"urn ");
pub const ALIS: FourCC = FourCC::new(*b"alis");
pub const STBL: FourCC = FourCC::new(*b"stbl");
pub const STSD: FourCC = FourCC::new(*b"stsd");
pub const STTS: FourCC = FourCC::new(*b"stts");
pub const STSC: FourCC = FourCC::new(*b"stsc");
pub const STSZ: FourCC = FourCC::new(*b"stsz");
pub const STZ2: FourCC = FourCC::new(*b"stz2");
pub const STCO: FourCC = FourCC::new(*b"stco");
pub const CO64: FourCC = FourCC::new(*b"co64");
pub const STSS: FourCC = FourCC::new(*b"stss");
pub const STDP: FourCC = FourCC::new(*b"stdp");
pub const SDTP: FourCC = FourCC::new(*b"sdtp");
pub const CTTS: FourCC = FourCC::new(*b"ctts");
pub const CSLG: FourCC = FourCC::new(*b"cslg");
pub const MDAT: FourCC = FourCC::new(*b"mdat");
pub const FREE: FourCC = FourCC::new(*b"free");
pub const SKIP: FourCC = FourCC::new(*b"skip");
pub const UDTA: FourCC = FourCC::new(*b"udta");
pub const META: FourCC = FourCC::new(*b"meta");
pub const ILST: FourCC = FourCC::new(*b"ilst");
pub const DATA: FourCC = FourCC::new(*b"data");
pub const MEAN: FourCC = FourCC::new(*b"mean");
pub const NAME: FourCC = FourCC::new(*b"name");
pub const FREE_FORM: FourCC = FourCC::new(*b"----");
pub const CHPL: FourCC = FourCC::new(*b"chpl");
pub const HNTI: FourCC = FourCC::new(*b"hnti");
pub const HINF: FourCC = FourCC::new(*b"hinf");
pub const SDP: FourCC = FourCC::new(*b"sdp ");
pub const RTP: FourCC = FourCC::new(*b"rtp ");
pub const MOOF: FourCC = FourCC::new(*b"moof");
pub const TRAF: FourCC = FourCC::new(*b"traf");
pub const TFHD: FourCC = FourCC::new(*b"tfhd");
pub const TRUN: FourCC = FourCC::new(*b"trun");
pub const OHDR: FourCC = FourCC::new(*b"ohdr");
pub const UUID: FourCC = FourCC::new(*b"uuid");

// Sample entries and their configuration atoms.

pub const AVC1: FourCC = FourCC::new(*b"avc1");
pub const AVCC: FourCC = FourCC::new(*b"avcC");
pub const MP4A: FourCC = FourCC::new(*b"mp4a");
pub const MP4V: FourCC = FourCC::new(*b"mp4v");
pub const MP4S: FourCC = FourCC::new(*b"mp4s");
pub const ESDS: FourCC = FourCC::new(*b"esds");
pub const ENCA: FourCC = FourCC::new(*b"enca");
pub const ENCV: FourCC = FourCC::new(*b"encv");
pub const AC_3: FourCC = FourCC::new(*b"ac-3");
pub const DAC3: FourCC = FourCC::new(*b"dac3");
pub const EC_3: FourCC = FourCC::new(*b"ec-3");
pub const DEC3: FourCC = FourCC::new(*b"dec3");
pub const SAMR: FourCC = FourCC::new(*b"samr");
pub const SAWB: FourCC = FourCC::new(*b"sawb");
pub const DAMR: FourCC = FourCC::new(*b"damr");
pub const S263: FourCC = FourCC::new(*b"s263");
pub const D263: FourCC = FourCC::new(*b"d263");
pub const H263: FourCC = FourCC::new(*b"h263");
pub const TEXT: FourCC = FourCC::new(*b"text");
pub const TX3G: FourCC = FourCC::new(*b"tx3g");
pub const FTAB: FourCC = FourCC::new(*b"ftab");
pub const HREF: FourCC = FourCC::new(*b"href");
pub const SVQ3: FourCC = FourCC::new(*b"SVQ3");
pub const SMI: FourCC = FourCC::new(*b"SMI ");
pub const PASP: FourCC = FourCC::new(*b"pasp");
pub const COLR: FourCC = FourCC::new(*b"colr");

/// Video passthrough sample entries that share the plain video schema:
/// DV, AVID, XDCAM MPEG-2, Motion JPEG and raw variants.
pub const VIDEO_PASSTHROUGH: &[FourCC] = &[
    FourCC::new(*b"SVQ3"),
    FourCC::new(*b"h263"),
    FourCC::new(*b"jpeg"),
    FourCC::new(*b"mjp2"),
    FourCC::new(*b"mjpa"),
    FourCC::new(*b"mjpb"),
    FourCC::new(*b"raw "),
    FourCC::new(*b"yuv2"),
    FourCC::new(*b"AVdh"),
    FourCC::new(*b"AVdn"),
    FourCC::new(*b"AVdv"),
    FourCC::new(*b"AVd1"),
    FourCC::new(*b"dv5n"),
    FourCC::new(*b"dv5p"),
    FourCC::new(*b"dvc "),
    FourCC::new(*b"dvcp"),
    FourCC::new(*b"dvpp"),
    FourCC::new(*b"dvhq"),
    FourCC::new(*b"dvhp"),
    FourCC::new(*b"dvl "),
    FourCC::new(*b"dvlp"),
    FourCC::new(*b"dvsd"),
    FourCC::new(*b"dvhd"),
    FourCC::new(*b"dv25"),
    FourCC::new(*b"dv50"),
    FourCC::new(*b"dvsl"),
    FourCC::new(*b"dvh1"),
    FourCC::new(*b"dvh2"),
    FourCC::new(*b"dvh3"),
    FourCC::new(*b"dvh4"),
    FourCC::new(*b"dvh5"),
    FourCC::new(*b"dvh6"),
    FourCC::new(*b"mx5n"),
    FourCC::new(*b"mx5p"),
    FourCC::new(*b"mx4n"),
    FourCC::new(*b"mx4p"),
    FourCC::new(*b"mx3n"),
    FourCC::new(*b"mx3p"),
    FourCC::new(*b"xd51"),
    FourCC::new(*b"xd54"),
    FourCC::new(*b"xd55"),
    FourCC::new(*b"xd59"),
    FourCC::new(*b"xd5a"),
    FourCC::new(*b"xd5b"),
    FourCC::new(*b"xd5c"),
    FourCC::new(*b"xd5d"),
    FourCC::new(*b"xd5e"),
    FourCC::new(*b"xd5f"),
    FourCC::new(*b"xdv1"),
    FourCC::new(*b"xdv2"),
    FourCC::new(*b"xdv3"),
    FourCC::new(*b"xdv4"),
    FourCC::new(*b"xdv5"),
    FourCC::new(*b"xdv6"),
    FourCC::new(*b"xdv7"),
    FourCC::new(*b"xdv8"),
    FourCC::new(*b"xdv9"),
    FourCC::new(*b"xdva"),
    FourCC::new(*b"xdvb"),
    FourCC::new(*b"xdvc"),
    FourCC::new(*b"xdvd"),
    FourCC::new(*b"xdve"),
    FourCC::new(*b"xdvf"),
    FourCC::new(*b"xdhd"),
    FourCC::new(*b"xdh2"),
];

/// Sound passthrough sample entries that share the plain sound schema:
/// PCM and legacy QuickTime codecs.
pub const SOUND_PASSTHROUGH: &[FourCC] = &[
    FourCC::new(*b"alaw"),
    FourCC::new(*b"ulaw"),
    FourCC::new(*b"alac"),
    FourCC::new(*b"fl32"),
    FourCC::new(*b"fl64"),
    FourCC::new(*b"ima4"),
    FourCC::new(*b"in24"),
    FourCC::new(*b"in32"),
    FourCC::new(*b"ipcm"),
    FourCC::new(*b"lpcm"),
    FourCC::new(*b"sowt"),
    FourCC::new(*b"twos"),
    FourCC::new(*b".mp3"),
];

/// Track reference atom types (children of `tref`).
pub const TREF_TYPES: &[FourCC] = &[
    FourCC::new(*b"chap"),
    FourCC::new(*b"dpnd"),
    FourCC::new(*b"hint"),
    FourCC::new(*b"ipir"),
    FourCC::new(*b"mpod"),
    FourCC::new(*b"sync"),
];

/// `udta` child atom types stored as single counted-string elements.
/// List gleaned from QTFF 2007-09-04.
pub const UDTA_ELEMENTS: &[FourCC] = &[
    FourCC::new(*b"\xA9arg"),
    FourCC::new(*b"\xA9ark"),
    FourCC::new(*b"\xA9cok"),
    FourCC::new(*b"\xA9com"),
    FourCC::new(*b"\xA9cpy"),
    FourCC::new(*b"\xA9day"),
    FourCC::new(*b"\xA9dir"),
    FourCC::new(*b"\xA9ed1"),
    FourCC::new(*b"\xA9ed2"),
    FourCC::new(*b"\xA9ed3"),
    FourCC::new(*b"\xA9ed4"),
    FourCC::new(*b"\xA9ed5"),
    FourCC::new(*b"\xA9ed6"),
    FourCC::new(*b"\xA9ed7"),
    FourCC::new(*b"\xA9ed8"),
    FourCC::new(*b"\xA9ed9"),
    FourCC::new(*b"\xA9fmt"),
    FourCC::new(*b"\xA9inf"),
    FourCC::new(*b"\xA9isr"),
    FourCC::new(*b"\xA9lab"),
    FourCC::new(*b"\xA9lal"),
    FourCC::new(*b"\xA9mak"),
    FourCC::new(*b"\xA9nak"),
    FourCC::new(*b"\xA9nam"),
    FourCC::new(*b"\xA9pdk"),
    FourCC::new(*b"\xA9phg"),
    FourCC::new(*b"\xA9prd"),
    FourCC::new(*b"\xA9prf"),
    FourCC::new(*b"\xA9prk"),
    FourCC::new(*b"\xA9prl"),
    FourCC::new(*b"\xA9req"),
    FourCC::new(*b"\xA9snk"),
    FourCC::new(*b"\xA9snm"),
    FourCC::new(*b"\xA9src"),
    FourCC::new(*b"\xA9swf"),
    FourCC::new(*b"\xA9swk"),
    FourCC::new(*b"\xA9swr"),
    FourCC::new(*b"\xA9wrt"),
    FourCC::new(*b"Allf"),
    FourCC::new(*b"name"),
    FourCC::new(*b"LOOP"),
    FourCC::new(*b"ptv "),
    FourCC::new(*b"SelO"),
    FourCC::new(*b"WLOC"),
];

/// Children of `hinf` (hint statistics); each holds its counter bytes.
pub const HINF_CHILDREN: &[FourCC] = &[
    FourCC::new(*b"trpy"),
    FourCC::new(*b"nump"),
    FourCC::new(*b"tpyl"),
    FourCC::new(*b"maxr"),
    FourCC::new(*b"dmed"),
    FourCC::new(*b"dimm"),
    FourCC::new(*b"drep"),
    FourCC::new(*b"tmin"),
    FourCC::new(*b"tmax"),
    FourCC::new(*b"pmax"),
    FourCC::new(*b"dmax"),
    FourCC::new(*b"payt"),
];

/// Error-location name for a track handler type, for diagnostics.
/// Unknown handlers fall back to plain "Track".
pub fn track_type_name(handler: FourCC) -> &'static str {
    match &handler.to_bytes() {
        b"vide" => "Video",
        b"soun" => "Audio",
        b"hint" => "Hint Track",
        b"tmcd" => "Timecode",
        b"text" => "Text",
        b"sbtl" => "Subtitles",
        b"clcp" => "Captions",
        _ => "Track",
    }
}

/// Time zero for MP4 containers. January 1, 1904.
pub fn mp4_time_zero() -> PrimitiveDateTime {
    time::Date::from_calendar_date(1904, Month::January, 1).unwrap()
        .with_hms_milli(0, 0, 0, 0).unwrap()
}

/// Datetime from an MP4 time field (seconds since 1904-01-01 UTC).
pub fn mp4_datetime(seconds: u64) -> PrimitiveDateTime {
    mp4_time_zero() + time::Duration::seconds(seconds as i64)
}
