//! RDS Decoder Tests
//!
//! Tests group classification and the PS, RadioText, clock and RT+
//! decoders through the public parser API.
//! Run with: cargo test --test rds_tests

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use fm_rds_firmware::rds::{
    ContentType, Group, GroupKind, GroupType, MusicSpeech, ProgramId, RdsParser, RdsSnapshot,
    SharedRdsParser, TextAb, Version,
};
use fm_rds_firmware::types::Frequency;

const PI: u16 = 0x54A8;

/// 0A group carrying PS segment `address` and AF codes in block C
fn ps_group_a(address: u16, chars: &[u8; 2], af: [u8; 2]) -> Group {
    Group::new(PI, address & 0x3, u16::from_be_bytes(af), u16::from_be_bytes(*chars))
}

/// 0A group carrying PS segment `address`, no AF data
fn ps_group(address: u16, chars: &[u8; 2]) -> Group {
    ps_group_a(address, chars, [0, 0])
}

/// Feed an 8-character name as segments in the given address order
fn send_ps(parser: &mut RdsParser, name: &[u8; 8], order: impl IntoIterator<Item = u16>) {
    for address in order {
        let offset = usize::from(address) * 2;
        let chars = [name[offset], name[offset + 1]];
        parser.update(&ps_group(address, &chars));
    }
}

/// 2A group with four characters at `address`
fn rt_group_a(address: u16, flag: bool, chars: &[u8; 4]) -> Group {
    Group::new(
        PI,
        0x2000 | (u16::from(flag) << 4) | (address & 0xF),
        u16::from_be_bytes([chars[0], chars[1]]),
        u16::from_be_bytes([chars[2], chars[3]]),
    )
}

/// 2B group with two characters at `address`
fn rt_group_b(address: u16, flag: bool, chars: &[u8; 2]) -> Group {
    Group::new(
        PI,
        0x2800 | (u16::from(flag) << 4) | (address & 0xF),
        PI,
        u16::from_be_bytes(*chars),
    )
}

/// Feed a full 2A message, terminated with CR when shorter than 64
fn send_rt(parser: &mut RdsParser, flag: bool, text: &str) {
    let mut bytes: Vec<u8> = text.bytes().collect();
    if bytes.len() < 64 {
        bytes.push(b'\r');
    }
    while bytes.len() % 4 != 0 {
        bytes.push(b' ');
    }
    for (address, chunk) in bytes.chunks(4).enumerate() {
        let chars = [chunk[0], chunk[1], chunk[2], chunk[3]];
        parser.update(&rt_group_a(address as u16, flag, &chars));
    }
}

/// 4A group with the given MJD and UTC time
fn ct_group(mjd: u32, hour: u8, minute: u8, offset: u8) -> Group {
    let b = 0x4000 | ((mjd >> 15) & 0x3) as u16;
    let c = (((mjd & 0x7FFF) << 1) as u16) | u16::from(hour >> 4);
    let d = (u16::from(hour & 0x0F) << 12) | (u16::from(minute & 0x3F) << 6) | u16::from(offset & 0x3F);
    Group::new(PI, b, c, d)
}

/// RT+ group with two (content type, start, length) tags
fn rt_plus_group(type_number: u8, running: bool, tag0: (u8, u8, u8), tag1: (u8, u8, u8)) -> Group {
    let (t0, s0, l0) = tag0;
    let (t1, s1, l1) = tag1;
    let c = (u16::from(t0 & 0x3F) << 10) | (u16::from(s0 & 0x3F) << 4) | u16::from((l0 >> 2) & 0x0F);
    let d = (u16::from(l0 & 0x03) << 14)
        | (u16::from(t1 & 0x3F) << 8)
        | (u16::from(s1 & 0x3F) << 2)
        | u16::from(l1 & 0x03);
    Group::new(PI, (u16::from(type_number) << 12) | (u16::from(running) << 4), c, d)
}

const NO_TAG: (u8, u8, u8) = (0, 0, 0);

// =============================================================================
// Group Framing Tests
// =============================================================================

#[test]
fn test_group_header_fields() {
    // Type 2, version B, TP set, PTY 10, group bits 0x15
    let group = Group::new(0xC201, 0x2D55, 0, 0);
    assert_eq!(group.program_id(), ProgramId(0xC201));
    assert_eq!(group.type_number(), 2);
    assert_eq!(group.version(), Version::B);
    assert!(group.traffic_program());
    assert_eq!(group.program_type().code(), 10);
    assert_eq!(group.group_bits(), 0x15);
}

#[test]
fn test_group_type_from_oda_code() {
    assert_eq!(GroupType::from_code(22), GroupType::new(11, Version::A));
    assert_eq!(GroupType::from_code(25), GroupType::new(12, Version::B));
    assert_eq!(GroupType::new(11, Version::A).to_string(), "11A");
}

#[test]
fn test_classify_fixed_assignments() {
    let rt_plus = GroupType::new(11, Version::A);
    let kind = |b: u16| GroupKind::classify(&Group::new(PI, b, 0, 0), rt_plus);

    assert_eq!(kind(0x0000), GroupKind::Basic(Version::A));
    assert_eq!(kind(0x0800), GroupKind::Basic(Version::B));
    assert_eq!(kind(0x2000), GroupKind::RadioText(Version::A));
    assert_eq!(kind(0x2800), GroupKind::RadioText(Version::B));
    assert_eq!(kind(0x3000), GroupKind::OdaAnnouncement);
    assert_eq!(kind(0x4000), GroupKind::ClockTime);
    assert_eq!(kind(0xB000), GroupKind::RadioTextPlus);
    assert_eq!(kind(0xB800), GroupKind::Unsupported(GroupType::new(11, Version::B)));
    assert_eq!(kind(0x4800), GroupKind::Unsupported(GroupType::new(4, Version::B)));
}

#[test]
fn test_program_id_hex() {
    assert_eq!(ProgramId(0x54A8).to_hex().as_str(), "54A8");
    assert_eq!(ProgramId(0x00F0).to_hex().as_str(), "00F0");
    assert_eq!(ProgramId(0xD3C2).country(), 0xD);
    assert_eq!(ProgramId(0xD3C2).coverage(), 0x3);
}

// =============================================================================
// Header Commit Tests
// =============================================================================

#[test]
fn test_header_fields_committed_on_every_group() {
    let mut parser = RdsParser::new();
    assert_eq!(parser.program_id(), None);

    // 5A is not decoded, but PI/PTY/TP still land
    let kind = parser.update(&Group::new(0x1234, 0x5000 | 0x0400 | (10 << 5), 0, 0));
    assert_eq!(kind, GroupKind::Unsupported(GroupType::new(5, Version::A)));
    assert_eq!(parser.program_id(), Some(ProgramId(0x1234)));
    assert_eq!(parser.program_type().code(), 10);
    assert_eq!(parser.program_type().name(), "Pop Music");
    assert!(parser.traffic_program());
    assert_eq!(parser.group_count(), 1);
}

#[test]
fn test_unsupported_group_is_noop() {
    let mut parser = RdsParser::new();
    send_ps(&mut parser, b"KEXA    ", [0, 1, 2, 3]);
    send_rt(&mut parser, false, "Hello");
    let before = parser.snapshot();

    for b in [0x1000, 0x5800, 0x7000, 0x9800, 0xF000, 0xE800] {
        parser.update(&Group::new(PI, b, 0xFFFF, 0xFFFF));
    }

    assert_eq!(parser.snapshot(), before);
}

// =============================================================================
// Program-Service Name Tests
// =============================================================================

#[test]
fn test_ps_in_order_commits_after_address_3() {
    let mut parser = RdsParser::new();
    let name = b"KEXA    ";

    for address in 0..3u16 {
        let offset = usize::from(address) * 2;
        parser.update(&ps_group(address, &[name[offset], name[offset + 1]]));
        assert!(parser.program_service().is_none(), "committed early at {address}");
    }

    parser.update(&ps_group(3, &[name[6], name[7]]));
    let ps = parser.program_service().expect("PS committed");
    assert_eq!(*ps, "KEXA    ");
    assert_eq!(ps.len(), 8);
}

#[test]
fn test_ps_out_of_order_matches_in_order() {
    let mut ordered = RdsParser::new();
    send_ps(&mut ordered, b"KEXA    ", [0, 1, 2, 3]);

    let mut shuffled = RdsParser::new();
    send_ps(&mut shuffled, b"KEXA    ", [3, 1, 0, 2]);

    assert_eq!(shuffled.program_service(), ordered.program_service());
    assert_eq!(*shuffled.program_service().expect("PS committed"), "KEXA    ");
}

#[test]
fn test_ps_repeated_segment_overwrites_own_slot() {
    let mut parser = RdsParser::new();
    parser.update(&ps_group(0, b"XX"));
    parser.update(&ps_group(0, b"RA"));
    parser.update(&ps_group(1, b"DI"));
    parser.update(&ps_group(2, b"O "));
    parser.update(&ps_group(3, b"1 "));
    assert_eq!(*parser.program_service().expect("PS committed"), "RADIO 1 ");
}

#[test]
fn test_ps_update_commits_on_next_address_3() {
    let mut parser = RdsParser::new();
    send_ps(&mut parser, b"KEXA    ", [0, 1, 2, 3]);

    // Dynamic PS: new text only becomes visible on address 3
    parser.update(&ps_group(0, b"NE"));
    parser.update(&ps_group(1, b"WS"));
    assert_eq!(*parser.program_service().expect("PS committed"), "KEXA    ");
    parser.update(&ps_group(2, b"  "));
    parser.update(&ps_group(3, b"  "));
    assert_eq!(*parser.program_service().expect("PS committed"), "NEWS    ");
}

#[test]
fn test_ps_version_b() {
    let mut parser = RdsParser::new();
    for (address, chars) in [b"BB", b"C ", b"R4", b"  "].iter().enumerate() {
        parser.update(&Group::new(PI, 0x0800 | address as u16, PI, u16::from_be_bytes(**chars)));
    }
    assert_eq!(*parser.program_service().expect("PS committed"), "BBC R4  ");
    // 0B block C repeats PI and is not AF data
    assert_eq!(parser.alt_frequencies().count(), 0);
}

#[test]
fn test_decoder_identification() {
    let mut parser = RdsParser::new();
    // DI bit rides in B bit 2; address 3 carries d0, address 0 carries d3
    let di_bits = [true, false, false, true];
    for address in 0..4u16 {
        let b = (u16::from(di_bits[usize::from(address)]) << 2) | address;
        parser.update(&Group::new(PI, b, 0, u16::from_be_bytes(*b"AB")));
    }

    let di = parser.decoder_id().expect("DI committed");
    assert_eq!(di.bits(), 0b1001);
    assert!(di.stereo());
    assert!(!di.artificial_head());
    assert!(!di.compressed());
    assert!(di.dynamic_pty());
}

#[test]
fn test_traffic_announcement_and_music_speech() {
    let mut parser = RdsParser::new();
    assert_eq!(parser.traffic_announcement(), None);
    assert_eq!(parser.music_speech(), None);

    parser.update(&Group::new(PI, 0x0010 | 0x0008, 0, 0));
    assert_eq!(parser.traffic_announcement(), Some(true));
    assert_eq!(parser.music_speech(), Some(MusicSpeech::Music));

    parser.update(&Group::new(PI, 0x0001, 0, 0));
    assert_eq!(parser.traffic_announcement(), Some(false));
    assert_eq!(parser.music_speech(), Some(MusicSpeech::Speech));
}

#[test]
fn test_alternative_frequencies() {
    let mut parser = RdsParser::new();
    // 0xE3 = "3 AFs follow" marker, 6 = 88.1 MHz
    parser.update(&ps_group_a(0, b"AB", [0xE3, 6]));
    // 14 = 88.9 MHz, 6 again is a duplicate
    parser.update(&ps_group_a(1, b"CD", [14, 6]));
    // 0xCD = filler
    parser.update(&ps_group_a(2, b"EF", [205, 0xCD]));

    let afs: Vec<Frequency> = parser.alt_frequencies().collect();
    assert_eq!(afs, vec![Frequency::from_khz(88_100).unwrap(), Frequency::from_khz(88_900).unwrap()]);
}

#[test]
fn test_alternative_frequency_list_is_bounded() {
    let mut parser = RdsParser::new();
    // Codes 1..=30 are 87.6 to 90.5 MHz, two per group
    for (i, code) in (1u8..=30).step_by(2).enumerate() {
        let address = (i % 4) as u16;
        parser.update(&ps_group_a(address, b"AB", [code, code + 1]));
    }

    let afs: Vec<Frequency> = parser.alt_frequencies().collect();
    let expected: Vec<Frequency> = (1u8..=25).map(|code| Frequency::from_af_code(code).unwrap()).collect();
    assert_eq!(afs.len(), 25);
    assert_eq!(afs, expected);
}

// =============================================================================
// RadioText Tests
// =============================================================================

#[test]
fn test_radio_text_carriage_return_terminates() {
    let mut parser = RdsParser::new();
    parser.update(&rt_group_a(0, false, b"Hell"));
    assert!(parser.radio_text(TextAb::A).is_none());

    parser.update(&rt_group_a(1, false, b"o\rXY"));
    let rt = parser.radio_text(TextAb::A).expect("RT committed");
    assert_eq!(*rt, "Hello");
    assert_eq!(rt.len(), 5);
}

#[test]
fn test_radio_text_full_length_without_terminator() {
    let mut parser = RdsParser::new();
    let text = "0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF";
    send_rt(&mut parser, false, text);
    let rt = parser.radio_text(TextAb::A).expect("RT committed");
    assert_eq!(rt.len(), 64);
    assert_eq!(*rt, text);
}

#[test]
fn test_radio_text_version_b() {
    let mut parser = RdsParser::new();
    parser.update(&rt_group_b(0, true, b"Hi"));
    parser.update(&rt_group_b(1, true, b" !"));
    assert!(parser.radio_text(TextAb::B).is_none());
    parser.update(&rt_group_b(2, true, b"\r "));
    assert_eq!(*parser.radio_text(TextAb::B).expect("RT committed"), "Hi !");
}

#[test]
fn test_radio_text_version_b_capacity() {
    let mut parser = RdsParser::new();
    for address in 0..16u16 {
        parser.update(&rt_group_b(address, false, b"ab"));
    }
    let rt = parser.radio_text(TextAb::A).expect("RT committed");
    assert_eq!(rt.len(), 32);
}

#[test]
fn test_radio_text_version_b_ignores_stale_2a_tail() {
    let mut parser = RdsParser::new();
    // Partial 2A message fills positions 32..60, never terminated
    for address in 8..15u16 {
        parser.update(&rt_group_a(address, false, b"ZZZZ"));
    }
    assert!(parser.radio_text(TextAb::A).is_none());

    // A full 2B message under the same flag stops at 32 characters
    for address in 0..16u16 {
        parser.update(&rt_group_b(address, false, b"ab"));
    }
    let text = parser.radio_text(TextAb::A).expect("2B committed");
    assert_eq!(text.len(), 32);
    assert_eq!(*text, "ab".repeat(16).as_str());
}

#[test]
fn test_radio_text_kept_per_flag() {
    let mut parser = RdsParser::new();
    send_rt(&mut parser, false, "Hello");
    send_rt(&mut parser, true, "World");

    assert_eq!(*parser.radio_text(TextAb::A).expect("RT A"), "Hello");
    assert_eq!(*parser.radio_text(TextAb::B).expect("RT B"), "World");
    assert_eq!(*parser.latest_radio_text().expect("latest"), "World");
}

#[test]
fn test_radio_text_flip_clears_scratch() {
    let mut parser = RdsParser::new();
    // Partial message under flag A, never completed
    parser.update(&rt_group_a(0, false, b"LONG"));
    parser.update(&rt_group_a(1, false, b"MESS"));
    parser.update(&rt_group_a(2, false, b"AGE!"));

    // New message under flag B loses segment 2 and ends at capacity
    parser.update(&rt_group_a(0, true, b"abcd"));
    parser.update(&rt_group_a(1, true, b"efgh"));
    parser.update(&rt_group_a(15, true, b"wxyz"));

    let rt = parser.radio_text(TextAb::B).expect("RT committed");
    assert_eq!(*rt, "abcdefgh");
}

// =============================================================================
// Clock Time Tests
// =============================================================================

#[test]
fn test_clock_time_decoded() {
    let mut parser = RdsParser::new();
    let kind = parser.update(&ct_group(58_873, 14, 35, 0x02));
    assert_eq!(kind, GroupKind::ClockTime);

    let ct = parser.clock_time().expect("CT valid");
    assert_eq!(ct.mjd(), 58_873);
    assert_eq!(ct.date().to_string(), "2020-01-25");
    assert_eq!(ct.hour(), 14);
    assert_eq!(ct.minute(), 35);
    assert_eq!(ct.offset().half_hours(), 2);
    assert_eq!(ct.to_string(), "2020-01-25 14:35 UTC (UTC+01:00)");
}

#[test]
fn test_clock_time_bad_hour_rejected() {
    let mut parser = RdsParser::new();
    parser.update(&ct_group(58_873, 25, 0, 0));
    assert!(parser.clock_time().is_none());
}

#[test]
fn test_clock_time_bad_sample_keeps_last_good() {
    let mut parser = RdsParser::new();
    parser.update(&ct_group(59_000, 23, 59, 0));
    parser.update(&ct_group(59_001, 25, 10, 0));
    parser.update(&ct_group(59_001, 10, 60, 0));

    let ct = parser.clock_time().expect("CT valid");
    assert_eq!(ct.mjd(), 59_000);
    assert_eq!(ct.hour(), 23);
    assert_eq!(ct.minute(), 59);
}

#[test]
fn test_clock_time_negative_offset() {
    let mut parser = RdsParser::new();
    // Sign bit set, 10 half hours
    parser.update(&ct_group(60_000, 3, 0, 0x20 | 10));
    let ct = parser.clock_time().expect("CT valid");
    assert_eq!(ct.offset().half_hours(), -10);
    assert_eq!(ct.offset().as_minutes(), -300);
    assert_eq!(ct.offset().to_string(), "UTC-05:00");
}

// =============================================================================
// RadioText-Plus Tests
// =============================================================================

#[test]
fn test_rt_plus_title_from_committed_text() {
    let mut parser = RdsParser::new();
    send_rt(&mut parser, false, "Hello World");

    let kind = parser.update(&rt_plus_group(11, true, (1, 0, 5), NO_TAG));
    assert_eq!(kind, GroupKind::RadioTextPlus);
    assert_eq!(*parser.title(), "Hello");
}

#[test]
fn test_rt_plus_title_and_artist() {
    let mut parser = RdsParser::new();
    send_rt(&mut parser, false, "Hello World");

    parser.update(&rt_plus_group(11, true, (1, 0, 5), (4, 6, 3)));
    assert_eq!(*parser.title(), "Hello");
    assert_eq!(*parser.artist(), "Wor");

    let tags = parser.rt_plus_tags();
    let title = tags[0].expect("tag 0");
    assert_eq!(title.content_type, ContentType::ITEM_TITLE);
    assert_eq!((title.start, title.length), (0, 5));
    assert_eq!(tags[1].expect("tag 1").content_type, ContentType::ITEM_ARTIST);
}

#[test]
fn test_rt_plus_out_of_bounds_rejected() {
    let mut parser = RdsParser::new();
    send_rt(&mut parser, false, "Hello World");
    parser.update(&rt_plus_group(11, true, (1, 0, 5), (4, 6, 3)));

    // 60 + 10 runs past the 64-character buffer
    parser.update(&rt_plus_group(11, true, (1, 60, 10), NO_TAG));
    assert_eq!(*parser.title(), "Hello");
    assert_eq!(*parser.artist(), "Wor");
    assert_eq!(parser.rt_plus_tags()[0].expect("tag 0").start, 0);
}

#[test]
fn test_rt_plus_not_running_ignored() {
    let mut parser = RdsParser::new();
    send_rt(&mut parser, false, "Hello World");
    parser.update(&rt_plus_group(11, false, (1, 0, 5), NO_TAG));
    assert!(parser.title().is_empty());
    assert_eq!(parser.rt_plus_tags(), &[None, None]);
}

#[test]
fn test_rt_plus_before_radio_text_is_empty() {
    let mut parser = RdsParser::new();
    parser.update(&rt_plus_group(11, true, (1, 0, 5), (4, 6, 3)));
    assert!(parser.title().is_empty());
    assert!(parser.artist().is_empty());
    assert!(parser.rt_plus_tags()[0].is_some());
}

#[test]
fn test_rt_plus_uses_committed_not_scratch() {
    let mut parser = RdsParser::new();
    send_rt(&mut parser, false, "Hello World");
    // Next message is still being received
    parser.update(&rt_group_a(0, true, b"Good"));

    parser.update(&rt_plus_group(11, true, (1, 0, 5), NO_TAG));
    assert_eq!(*parser.title(), "Hello");
}

#[test]
fn test_oda_announcement_moves_rt_plus() {
    let mut parser = RdsParser::new();
    send_rt(&mut parser, false, "Hello World");

    // 3A: application group 12A (code 24), AID 0x4BD7
    let kind = parser.update(&Group::new(PI, 0x3000 | 24, 0, 0x4BD7));
    assert_eq!(kind, GroupKind::OdaAnnouncement);
    assert_eq!(parser.rt_plus_group(), GroupType::new(12, Version::A));

    let old = parser.update(&rt_plus_group(11, true, (1, 0, 5), NO_TAG));
    assert_eq!(old, GroupKind::Unsupported(GroupType::new(11, Version::A)));
    assert!(parser.title().is_empty());

    let new = parser.update(&rt_plus_group(12, true, (1, 6, 5), NO_TAG));
    assert_eq!(new, GroupKind::RadioTextPlus);
    assert_eq!(*parser.title(), "World");
}

#[test]
fn test_oda_other_application_ignored() {
    let mut parser = RdsParser::new();
    parser.update(&Group::new(PI, 0x3000 | 24, 0, 0xCD46));
    // Code 0: application not carried in groups
    parser.update(&Group::new(PI, 0x3000, 0, 0x4BD7));
    assert_eq!(parser.rt_plus_group(), GroupType::new(11, Version::A));
}

// =============================================================================
// Reset Tests
// =============================================================================

fn fill(parser: &mut RdsParser) {
    send_ps(parser, b"KEXA    ", [0, 1, 2, 3]);
    parser.update(&ps_group_a(0, b"KE", [0xE3, 6]));
    send_rt(parser, false, "Hello World");
    send_rt(parser, true, "Second");
    parser.update(&ct_group(58_873, 14, 35, 2));
    parser.update(&Group::new(PI, 0x3000 | 24, 0, 0x4BD7));
    parser.update(&rt_plus_group(12, true, (1, 0, 5), (4, 0, 3)));
}

#[test]
fn test_reset_clears_committed_state() {
    let mut parser = RdsParser::new();
    fill(&mut parser);
    assert_ne!(parser.snapshot(), RdsSnapshot::default());

    parser.reset();

    assert_eq!(parser, RdsParser::new());
    assert_eq!(parser.snapshot(), RdsSnapshot::default());
    assert_eq!(parser.program_id(), None);
    assert!(parser.program_service().is_none());
    assert!(parser.decoder_id().is_none());
    assert!(parser.radio_text(TextAb::A).is_none());
    assert!(parser.radio_text(TextAb::B).is_none());
    assert!(parser.clock_time().is_none());
    assert!(parser.title().is_empty());
    assert!(parser.artist().is_empty());
    assert_eq!(parser.alt_frequencies().count(), 0);
    assert_eq!(parser.rt_plus_group(), GroupType::new(11, Version::A));
    assert_eq!(parser.group_count(), 0);
}

#[test]
fn test_reset_clears_ps_scratch() {
    let mut parser = RdsParser::new();
    send_ps(&mut parser, b"OLDNAME ", [0, 1, 2]);
    parser.reset();

    // Only the last segment of the new station arrives
    parser.update(&ps_group(3, b"XY"));
    assert!(parser.program_service().is_none());
}

#[test]
fn test_reset_clears_radio_text_scratch() {
    let mut parser = RdsParser::new();
    parser.update(&rt_group_a(0, false, b"Hell"));
    parser.reset();

    parser.update(&rt_group_a(1, false, b"o\r  "));
    let rt = parser.radio_text(TextAb::A).expect("RT committed");
    assert!(rt.is_empty());
}

// =============================================================================
// Snapshot Report Tests
// =============================================================================

#[test]
fn test_snapshot_report_empty() {
    let report = RdsParser::new().snapshot().to_string();
    assert!(report.starts_with("PI: Unknown"));
    assert!(report.contains("PS: Not available"));
    assert!(report.contains("Time: Not available"));
    assert!(!report.contains("RT-A"));
}

#[test]
fn test_snapshot_report_filled() {
    let mut parser = RdsParser::new();
    fill(&mut parser);
    let report = parser.snapshot().to_string();

    assert!(report.starts_with("PI: 54A8"));
    assert!(report.contains("PS: KEXA"));
    assert!(report.contains("RT-A: Hello World"));
    assert!(report.contains("RT-B: Second"));
    assert!(report.contains("Time: 2020-01-25 14:35 UTC (UTC+01:00)"));
    // RT+ resolves against the most recent text, "Second"
    assert!(report.contains("Title: Secon"));
    assert!(report.contains("Artist: Sec"));
}

// =============================================================================
// Shared Parser Tests
// =============================================================================

#[test]
fn test_shared_parser_matches_plain_parser() {
    let shared = SharedRdsParser::<NoopRawMutex>::new();
    let mut plain = RdsParser::new();
    for (address, chars) in (0..4u16).zip([b"KE", b"XA", b"  ", b"  "]) {
        let group = ps_group(address, chars);
        plain.update(&group);
        shared.apply(&group);
    }
    assert_eq!(shared.snapshot(), plain.snapshot());
    assert_eq!(shared.with(|p| p.program_service().cloned()).expect("PS committed"), "KEXA    ");

    shared.reset();
    assert_eq!(shared.snapshot(), RdsSnapshot::default());
}

#[test]
fn test_shared_parser_reports_group_kind() {
    let shared = SharedRdsParser::<NoopRawMutex>::default();
    let kind = shared.apply(&rt_group_a(0, false, b"Hi\r "));
    assert_eq!(kind, GroupKind::RadioText(Version::A));
    assert_eq!(shared.with(|p| p.group_count()), 1);
    let text = shared.snapshot().radio_text[0].clone().expect("RT committed");
    assert_eq!(text, "Hi");
}
