#[cfg(test)]
mod tests {
    use crate::atom::create_atom;
    use crate::consts::*;
    use crate::log::Logger;
    use crate::{Mp4, Severity};
    use std::io::{Cursor, Read, Seek, SeekFrom};

    fn quiet() -> Logger {
        Logger::default()
    }

    /// Wraps a payload in an atom with a 32-bit size header.
    fn atom(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut bytes = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(typ);
        bytes.extend_from_slice(payload);
        bytes
    }

    fn parse(bytes: &[u8]) -> Mp4 {
        Mp4::read_from_bytes(bytes, quiet()).expect("parse failed")
    }

    fn close_to_bytes(mp4: Mp4) -> Vec<u8> {
        let mut sink = mp4.close(0).expect("close failed");
        sink.seek(SeekFrom::Start(0)).unwrap();
        let mut bytes = Vec::new();
        sink.read_to_end(&mut bytes).unwrap();
        bytes
    }

    /// Track header payload, version 0, with the given track id.
    fn tkhd_payload(track_id: u32) -> Vec<u8> {
        let mut p = Vec::new();
        p.extend_from_slice(&[0, 0, 0, 0]); // version + flags
        p.extend_from_slice(&[0; 4]); // creationTime
        p.extend_from_slice(&[0; 4]); // modificationTime
        p.extend_from_slice(&track_id.to_be_bytes());
        p.extend_from_slice(&[0; 4]); // reserved1
        p.extend_from_slice(&[0; 4]); // duration
        p.extend_from_slice(&[0; 8]); // reserved2
        p.extend_from_slice(&[0; 2]); // layer
        p.extend_from_slice(&[0; 2]); // alternateGroup
        p.extend_from_slice(&[0; 2]); // volume
        p.extend_from_slice(&[0; 2]); // reserved3
        p.extend_from_slice(&[0; 36]); // matrix
        p.extend_from_slice(&[0; 4]); // width
        p.extend_from_slice(&[0; 4]); // height
        p
    }

    #[test]
    fn s1_minimal_create() {
        let mp4 = Mp4::create_in_memory(0, quiet()).unwrap();
        let bytes = close_to_bytes(mp4);

        // ftyp, size 32: major brand, minor version, four brands
        assert_eq!(&bytes[0..8], &[0, 0, 0, 0x20, 0x66, 0x74, 0x79, 0x70]);
        assert_eq!(&bytes[8..12], b"isom");
        assert_eq!(&bytes[12..16], &[0, 0, 0x02, 0x00]);
        assert_eq!(&bytes[16..20], b"isom");

        // moov with its mvhd follows
        assert_eq!(&bytes[36..40], b"moov");
        assert_eq!(&bytes[44..48], b"mvhd");

        // terminating empty mdat
        let tail = &bytes[bytes.len() - 8..];
        assert_eq!(tail, &[0, 0, 0, 8, 0x6d, 0x64, 0x61, 0x74]);

        // a freshly created file re-parses without diagnostics
        let reparsed = parse(&bytes);
        assert!(reparsed.parsing_errors().is_empty(), "{:?}", reparsed.parsing_errors());
        assert_eq!(
            reparsed
                .find_property("moov.mvhd.timeScale")
                .and_then(|p| p.int_value()),
            Some(1000)
        );
    }

    #[test]
    fn s1_create_64bit_flags() {
        let mp4 = Mp4::create_in_memory(CREATE_64BIT_DATA | CREATE_64BIT_TIME, quiet()).unwrap();
        let bytes = close_to_bytes(mp4);

        // the mdat closes the file with a 16-byte large-size header
        let tail = &bytes[bytes.len() - 16..];
        assert_eq!(&tail[0..4], &[0, 0, 0, 1]);
        assert_eq!(&tail[4..8], b"mdat");
        assert_eq!(&tail[8..16], &16_u64.to_be_bytes());

        let reparsed = parse(&bytes);
        assert_eq!(reparsed.find_atom("moov.mvhd").map(|a| a.version()), Some(1));
        assert_eq!(
            reparsed.find_atom("mdat").map(|a| a.largesize_mode()),
            Some(true)
        );
    }

    #[test]
    fn s2_malformed_atom_size() {
        // size 4 is less than the 8-byte header
        let mp4 = parse(&[0, 0, 0, 4, 0x6d, 0x6f, 0x6f, 0x76]);

        let malformed: Vec<_> = mp4
            .parsing_errors()
            .iter()
            .filter(|e| e.category == "Malformed atom 'moov'")
            .collect();
        assert_eq!(malformed.len(), 1);
        assert!(mp4.root().children().is_empty());
    }

    #[test]
    fn s3_large_size_atom() {
        let mut bytes = vec![0, 0, 0, 1];
        bytes.extend_from_slice(b"mdat");
        bytes.extend_from_slice(&24_u64.to_be_bytes());
        bytes.extend_from_slice(&[0xAA; 8]);

        let mp4 = parse(&bytes);
        let mdat = mp4.find_atom("mdat").expect("no mdat");
        assert!(mdat.largesize_mode());
        assert_eq!(mdat.size(), 24 - 16);

        // re-serializes with the same 16-byte header
        let out = close_to_bytes(mp4);
        assert_eq!(out, bytes);
    }

    #[test]
    fn s4_dref_count_reconciliation() {
        // three self-contained 'url ' children but entryCount == 2
        let url = atom(b"url ", &[0, 0, 0, 1]);
        let mut payload = vec![0, 0, 0, 0, 0, 0, 0, 2];
        for _ in 0..3 {
            payload.extend_from_slice(&url);
        }
        let mp4 = parse(&atom(b"dref", &payload));

        assert_eq!(
            mp4.find_property("dref.entryCount").and_then(|p| p.int_value()),
            Some(3)
        );
        let reconciled: Vec<_> = mp4
            .parsing_errors()
            .iter()
            .filter(|e| e.category == "Invalid property 'dref.entryCount' value")
            .collect();
        assert_eq!(reconciled.len(), 1);
    }

    /// Bit-packs the fixed dec3 layout, optionally with a chan_loc
    /// tail.
    fn dec3_payload(num_dep_sub: u64, chan_loc: Option<u64>) -> Vec<u8> {
        let mut io = crate::Mp4Io::new(Cursor::new(Vec::new()));
        io.write_bits(448, 13).unwrap(); // data_rate
        io.write_bits(0, 3).unwrap(); // num_ind_sub
        io.write_bits(0, 2).unwrap(); // fscod
        io.write_bits(16, 5).unwrap(); // bsid
        io.write_bits(0, 5).unwrap(); // bsmod
        io.write_bits(7, 3).unwrap(); // acmod
        io.write_bits(1, 1).unwrap(); // lfeon
        io.write_bits(0, 3).unwrap(); // reserved
        io.write_bits(num_dep_sub, 4).unwrap();
        if let Some(loc) = chan_loc {
            io.write_bits(loc, 9).unwrap();
        }
        io.flush_write_bits().unwrap();
        io.set_pos(0).unwrap();
        let len = io.size() as usize;
        io.read_bytes(len).unwrap()
    }

    #[test]
    fn s5_dec3_conditional_tail() {
        // num_dep_sub == 0: no chan_loc property
        let mp4 = parse(&atom(b"dec3", &dec3_payload(0, None)));
        let dec3 = mp4.find_atom("dec3").expect("no dec3");
        assert_eq!(dec3.properties().len(), 9);
        assert!(dec3.property("chan_loc").is_none());
        assert_eq!(dec3.int_value("data_rate"), Some(448));
        assert_eq!(dec3.int_value("acmod"), Some(7));

        // num_dep_sub == 5: the 9-bit chan_loc is added and read
        let mp4 = parse(&atom(b"dec3", &dec3_payload(5, Some(0x155))));
        let dec3 = mp4.find_atom("dec3").expect("no dec3");
        assert_eq!(dec3.int_value("num_dep_sub"), Some(5));
        assert_eq!(dec3.int_value("chan_loc"), Some(0x155));
    }

    #[test]
    fn s6_navigation() {
        let trak1 = atom(b"trak", &atom(b"tkhd", &tkhd_payload(1)));
        let trak2 = atom(b"trak", &atom(b"tkhd", &tkhd_payload(2)));
        let mut moov_payload = trak1;
        moov_payload.extend_from_slice(&trak2);
        let mp4 = parse(&atom(b"moov", &moov_payload));

        assert_eq!(
            mp4.find_property("moov.trak[0].tkhd.trackId")
                .and_then(|p| p.int_value()),
            Some(1)
        );
        assert_eq!(
            mp4.find_property("moov.trak[1].tkhd.trackId")
                .and_then(|p| p.int_value()),
            Some(2)
        );
        assert!(mp4.find_atom("moov.trak[2].tkhd").is_none());
    }

    fn assert_bounds(atom: &crate::Atom) {
        if !atom.is_root() {
            assert_eq!(atom.start() + atom.header_len() + atom.size(), atom.end());
        }
        for child in atom.children() {
            // the headerless root starts where its first child starts
            if !atom.is_root() {
                assert!(atom.start() < child.start());
            }
            assert!(child.start() < child.end());
            assert!(child.end() <= atom.end());
            assert_bounds(child);
        }
    }

    #[test]
    fn parsed_offsets_are_consistent() {
        let mp4 = Mp4::create_in_memory(0, quiet()).unwrap();
        let bytes = close_to_bytes(mp4);
        let reparsed = parse(&bytes);
        assert_bounds(reparsed.root());
    }

    #[test]
    fn round_trip_created_file() {
        let mp4 = Mp4::create_in_memory(0, quiet()).unwrap();
        let first = close_to_bytes(mp4);

        let reparsed = parse(&first);
        let second = close_to_bytes(reparsed);
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_atom_bytes_preserved() {
        let bytes = atom(b"zzzz", &[1, 2, 3]);
        let mp4 = parse(&bytes);

        let unknown = mp4.find_atom("zzzz").expect("no zzzz");
        assert!(unknown.is_unknown());
        assert_eq!(
            unknown.property("data").and_then(|p| p.bytes_value()),
            Some(&[1, 2, 3][..])
        );

        assert_eq!(close_to_bytes(mp4), bytes);
    }

    #[test]
    fn udta_zero_terminator_tolerated() {
        let mut payload = atom(b"\xA9nam", b"title");
        payload.extend_from_slice(&[0, 0, 0, 0]);
        let mp4 = parse(&atom(b"udta", &payload));

        assert!(mp4
            .parsing_errors()
            .iter()
            .all(|e| e.severity != Severity::Warning));
        assert_eq!(
            mp4.find_property("udta.\u{A9}nam.value")
                .and_then(|p| p.string_value()),
            Some("title")
        );

        // any other short tail draws a warning but is consumed
        let mut payload = atom(b"\xA9nam", b"title");
        payload.extend_from_slice(&[0, 0, 0, 7]);
        let mp4 = parse(&atom(b"udta", &payload));
        assert!(mp4
            .parsing_errors()
            .iter()
            .any(|e| e.severity == Severity::Warning
                && e.message.contains("end value is not zero")));
    }

    #[test]
    fn duplicate_only_one_child() {
        let mvhd_payload = {
            // version 0 movie header, all zero
            let mut p = vec![0_u8; 100];
            p[15] = 1; // timeScale = 1 to keep it lawful-ish
            p
        };
        let mut moov_payload = atom(b"mvhd", &mvhd_payload);
        moov_payload.extend_from_slice(&atom(b"mvhd", &mvhd_payload));
        let mp4 = parse(&atom(b"moov", &moov_payload));

        assert!(mp4
            .parsing_errors()
            .iter()
            .any(|e| e.message.contains("Multiple instances of atom 'mvhd'")));
    }

    #[test]
    fn missing_mandatory_child() {
        // a trak without tkhd or mdia
        let mp4 = parse(&atom(b"moov", &atom(b"trak", &[])));
        assert!(mp4
            .parsing_errors()
            .iter()
            .any(|e| e.message.contains("missing mandatory child atom 'tkhd'")));
    }

    #[test]
    fn generate_is_idempotent() {
        let mut dec3 = create_atom(Some(DEC3), &[]);
        dec3.generate(0);
        let once = dec3.properties().len();
        dec3.generate(0);
        assert_eq!(dec3.properties().len(), once);

        let mut root = create_atom(None, &[]);
        root.generate(0);
        let children_once = root.children().len();
        root.generate(0);
        assert_eq!(root.children().len(), children_once);
    }

    #[test]
    fn table_rows_addressable_by_path() {
        // stts with two entries
        let mut payload = vec![0, 0, 0, 0, 0, 0, 0, 2];
        payload.extend_from_slice(&[0, 0, 0, 10, 0, 0, 0, 100]);
        payload.extend_from_slice(&[0, 0, 0, 20, 0, 0, 0, 200]);
        let mp4 = parse(&atom(b"stts", &payload));

        assert_eq!(
            mp4.find_property("stts.entries[1].sampleDelta")
                .and_then(|p| p.int_value()),
            Some(200)
        );
        assert!(mp4.find_property("stts.entries[2].sampleDelta").is_none());
    }

    #[test]
    fn edit_and_rewrite_in_place() {
        let created = Mp4::create_in_memory(0, quiet()).unwrap();
        let bytes = close_to_bytes(created);

        let mut mp4 = parse(&bytes);
        mp4.find_atom_mut("moov.mvhd")
            .and_then(|a| a.property_mut("timeScale"))
            .unwrap()
            .set_int(90_000)
            .unwrap();
        mp4.rewrite_atom("moov.mvhd").unwrap();

        let out = close_to_bytes(mp4);
        assert_eq!(out.len(), bytes.len());
        let reparsed = parse(&out);
        assert_eq!(
            reparsed
                .find_property("moov.mvhd.timeScale")
                .and_then(|p| p.int_value()),
            Some(90_000)
        );
    }

    #[test]
    fn overflowing_child_is_clamped() {
        // child claims 100 bytes but the parent ends after 16
        let mut moov_payload = vec![0, 0, 0, 100];
        moov_payload.extend_from_slice(b"free");
        let mp4 = parse(&atom(b"moov", &moov_payload));

        assert!(mp4.parsing_errors().iter().any(|e| e
            .message
            .contains("extends outside parent atom")));
        let free = mp4.find_atom("moov.free").expect("free dropped");
        assert_eq!(free.size(), 0);
    }

    #[test]
    fn track_located_diagnostics() {
        // a trak whose mdia.hdlr declares a video handler, followed by
        // a malformed child inside the same trak
        let hdlr_payload = {
            let mut p = vec![0, 0, 0, 0]; // version + flags
            p.extend_from_slice(&[0; 4]); // reserved1
            p.extend_from_slice(b"vide");
            p.extend_from_slice(&[0; 12]); // reserved2
            p.push(0); // empty name
            p
        };
        let mut mdia_payload = atom(b"hdlr", &hdlr_payload);
        // malformed: size smaller than header
        mdia_payload.extend_from_slice(&[0, 0, 0, 4, 0x6d, 0x69, 0x6e, 0x66]);

        let mut trak_payload = atom(b"tkhd", &tkhd_payload(7));
        trak_payload.extend_from_slice(&atom(b"mdia", &mdia_payload));
        let mp4 = parse(&atom(b"moov", &atom(b"trak", &trak_payload)));

        let minf_error = mp4
            .parsing_errors()
            .iter()
            .find(|e| e.category == "Malformed atom 'minf'")
            .expect("no malformed minf diagnostic");
        assert_eq!(minf_error.location, "Video");
        assert_eq!(minf_error.track_id, Some(7));
    }
}
