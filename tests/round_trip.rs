use std::io::Cursor;
use wsmask::frame::{FrameHead, FrameHeadAnomaly, MaskingKey, Opcode};
use wsmask::pipeline::{mask, unmask, MaskConfig};

mod common;

fn frame(payload: &[u8], config: &MaskConfig) -> Vec<u8> {
    let mut framed = Vec::new();
    mask(&mut Cursor::new(payload), &mut framed, config).unwrap();
    framed
}

fn unframe(framed: &[u8]) -> Vec<u8> {
    let mut payload = Vec::new();
    unmask(&mut Cursor::new(framed), &mut payload).unwrap();
    payload
}

#[test]
fn round_trip_across_length_tiers() {
    common::init_logger();
    let keys = [
        MaskingKey::DEFAULT,
        MaskingKey([0xAA, 0xBB, 0xCC, 0xDD]),
        MaskingKey([0, 0, 0, 1]),
        MaskingKey::random(),
    ];
    for (i, len) in [0usize, 1, 5, 125, 126, 127, 65535, 65536, 70001].iter().enumerate() {
        let payload = common::payload(*len, i as u64);
        for key in keys {
            let config = MaskConfig::default().with_key(key);
            let framed = frame(&payload, &config);
            let head = FrameHead::parse(&framed).unwrap();
            assert_eq!(head.payload_len, *len as u64);
            assert_eq!(head.mask, Some(key));
            assert_eq!(framed.len(), head.len_bytes() + len);
            assert_eq!(unframe(&framed), payload);
        }
    }
}

#[test]
fn header_tiers() {
    let cases = [(125usize, 6usize, 125u8), (126, 8, 126), (65535, 8, 126), (65536, 14, 127)];
    for (len, header_len, marker) in cases {
        let framed = frame(&vec![0u8; len], &MaskConfig::default());
        assert_eq!(framed.len(), header_len + len);
        assert_eq!(framed[1], 0x80 | marker);
    }
}

#[test]
fn masked_payload_differs_from_plain() {
    let payload = common::payload(64, 7);
    let framed = frame(&payload, &MaskConfig::default());
    let masked = &framed[6..];
    for (i, (m, p)) in masked.iter().zip(payload.iter()).enumerate() {
        assert_eq!(m ^ p, MaskingKey::DEFAULT.0[i % 4]);
    }
}

#[test]
fn empty_payload() {
    let framed = frame(&[], &MaskConfig::default());
    assert_eq!(framed, [0x82, 0x80, 0xDE, 0xAD, 0xBE, 0xEF]);
    assert!(unframe(&framed).is_empty());
}

#[test]
fn text_frame() {
    let framed = frame("héllo".as_bytes(), &MaskConfig::text());
    assert_eq!(framed[0], 0x81);
    let head = FrameHead::parse(&framed).unwrap();
    assert_eq!(head.opcode, Opcode::Text);
    assert!(head.anomalies().is_empty());
    assert_eq!(unframe(&framed), "héllo".as_bytes());
}

#[test]
fn permissive_unmask() {
    common::init_logger();
    // Not final, RSV1 set, close opcode, no mask bit.
    let framed = [0x48, 0x03, b'a', b'b', b'c'];
    let head = FrameHead::parse(&framed).unwrap();
    assert_eq!(
        head.anomalies(),
        vec![
            FrameHeadAnomaly::MalformedOpcodeOrFlags(0x48),
            FrameHeadAnomaly::UnmaskedFrameEncountered
        ]
    );
    assert_eq!(unframe(&framed), b"abc");
}
