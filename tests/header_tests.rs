//! tests/header_tests.rs
//! Byte-exact container layout

use lockstitch_engine::consts::{HEADER_LEN, TAG_LEN};
use lockstitch_engine::{
    encode_container, read_version, ContainerHeader, ContainerView, EngineError, FormatError,
};
use std::io::Cursor;

fn sample() -> ContainerHeader {
    ContainerHeader::new(300_000, [0x11; 16], [0x22; 16], 1024)
}

#[test]
fn header_bytes_match_known_layout() {
    let expected = concat!(
        "4c4b53",                           // "LKS"
        "01",                               // version
        "00",                               // reserved
        "000493e0",                         // 300_000 iterations
        "11111111111111111111111111111111", // salt
        "22222222222222222222222222222222", // nonce
        "0000000000000400",                 // head marker
    );
    let bytes = sample().to_bytes();
    assert_eq!(bytes.len(), HEADER_LEN);
    assert_eq!(hex::encode(bytes), expected);
    assert_eq!(ContainerHeader::decode(&hex::decode(expected).unwrap()).unwrap(), sample());
}

#[test]
fn container_is_header_payload_tag() {
    let tag = [0xEE; TAG_LEN];
    let bytes = encode_container(&sample(), [&b"\xde\xad"[..], &b"\xbe\xef"[..]], &tag);
    let hexed = hex::encode(&bytes);
    assert!(hexed[HEADER_LEN * 2..].starts_with("deadbeef"));
    assert!(hexed.ends_with(&"ee".repeat(TAG_LEN)));

    let view = ContainerView::parse(&bytes).unwrap();
    assert_eq!(view.payload, hex::decode("deadbeef").unwrap());
    assert_eq!(view.header.kdf_iterations, 300_000);
    assert_eq!(view.header.raw, &sample().to_bytes());
}

#[test]
fn decode_order_magic_then_version_then_length() {
    let cases: &[(&str, fn(&FormatError) -> bool, &str)] = &[
        ("4142430100", |e| matches!(e, FormatError::Malformed(_)), "bad magic"),
        ("4c4b5307", |e| *e == FormatError::UnsupportedVersion(7), "future version, 4 bytes"),
        ("4c4b5300ff", |e| *e == FormatError::UnsupportedVersion(0), "version 0"),
        ("4c4b530100", |e| *e == FormatError::Truncated, "valid prefix, short"),
        ("4c4b", |e| *e == FormatError::Truncated, "partial magic"),
    ];
    for (input, check, desc) in cases {
        let err = ContainerHeader::decode(&hex::decode(input).unwrap()).unwrap_err();
        assert!(check(&err), "{desc}: {err:?}");
    }
}

#[test]
fn iterations_above_cap_are_malformed() {
    let mut bytes = sample().to_bytes();
    bytes[5..9].copy_from_slice(&5_000_001u32.to_be_bytes());
    assert!(matches!(ContainerHeader::decode(&bytes), Err(FormatError::Malformed(_))));

    bytes[5..9].copy_from_slice(&5_000_000u32.to_be_bytes());
    assert_eq!(ContainerHeader::decode(&bytes).unwrap().kdf_iterations, 5_000_000);
}

#[test]
fn read_version_stops_after_prefix() {
    assert_eq!(read_version(Cursor::new(hex::decode("4c4b5301").unwrap())).unwrap(), 1);
    assert!(matches!(
        read_version(Cursor::new(b"LK")).unwrap_err(),
        EngineError::Format(FormatError::Truncated)
    ));
    assert!(matches!(
        read_version(Cursor::new(b"nope")).unwrap_err(),
        EngineError::Format(FormatError::Malformed(_))
    ));
}
