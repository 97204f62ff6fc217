//! tests/decrypt_tests.rs
//! Authentication failures: tampering, wrong password, truncation, versions

mod common;
use common::{password, patterned, TEST_ITERATIONS, TEST_PASSWORD};

use lockstitch_engine::consts::{HEADER_LEN, TAG_LEN};
use lockstitch_engine::{
    decrypt, decrypt_string, encrypt, encrypt_string, read_version, EncryptParams, EngineError,
    FormatError, HeadSplit,
};
use std::io::Cursor;

fn seal(plaintext: &[u8], head: HeadSplit) -> Vec<u8> {
    let params = EncryptParams::with_iterations(TEST_ITERATIONS).head(head);
    let mut out = Vec::new();
    encrypt(Cursor::new(plaintext), &mut out, password(TEST_PASSWORD), &params).unwrap();
    out
}

fn open(container: &[u8], pw: &str) -> Result<Vec<u8>, EngineError> {
    let mut out = Vec::new();
    decrypt(Cursor::new(container), &mut out, password(pw), 16)?;
    Ok(out)
}

#[test]
fn wrong_password_is_reported_as_such() {
    let sealed = seal(b"secret", HeadSplit::Whole);
    let err = open(&sealed, "not the password").unwrap_err();
    assert!(err.is_wrong_password_or_corrupt(), "{err}");
}

#[test]
fn every_flipped_bit_is_detected() {
    // Iteration bytes [5..9] are covered separately: arbitrary flips there can
    // ask PBKDF2 for millions of rounds.
    let data = patterned(40);
    for head in [HeadSplit::Whole, HeadSplit::resolve(8, 40)] {
        let sealed = seal(&data, head);
        for pos in (0..sealed.len()).filter(|p| !(5..9).contains(p)) {
            for bit in [0x01u8, 0x80] {
                let mut tampered = sealed.clone();
                tampered[pos] ^= bit;
                let err = open(&tampered, TEST_PASSWORD).unwrap_err();
                if pos < 5 {
                    assert!(matches!(err, EngineError::Format(_)), "pos {pos}: {err}");
                } else {
                    assert!(err.is_wrong_password_or_corrupt(), "pos {pos}: {err}");
                }
            }
        }
    }
}

#[test]
fn rewritten_iteration_count_is_detected() {
    let mut sealed = seal(b"secret", HeadSplit::Whole);
    sealed[8] ^= 0x01; // 5 -> 4 iterations
    assert!(open(&sealed, TEST_PASSWORD).unwrap_err().is_wrong_password_or_corrupt());
}

#[test]
fn tampered_plaintext_tail_is_detected() {
    let data = patterned(200);
    let sealed = seal(&data, HeadSplit::resolve(16, 200));
    let mut tampered = sealed.clone();
    tampered[HEADER_LEN + 150] ^= 0x55;
    assert!(open(&tampered, TEST_PASSWORD).unwrap_err().is_wrong_password_or_corrupt());
}

#[test]
fn flipping_head_marker_is_detected() {
    let data = patterned(200);
    let mut sealed = seal(&data, HeadSplit::Whole);
    sealed[HEADER_LEN - 1] = 16; // whole -> partial(16)
    assert!(open(&sealed, TEST_PASSWORD).unwrap_err().is_wrong_password_or_corrupt());
}

#[test]
fn future_version_is_rejected() {
    let mut sealed = seal(b"secret", HeadSplit::Whole);
    sealed[3] = 2;
    let err = open(&sealed, TEST_PASSWORD).unwrap_err();
    assert!(matches!(err, EngineError::Format(FormatError::UnsupportedVersion(2))));
    assert!(matches!(
        read_version(Cursor::new(&sealed)).unwrap_err(),
        EngineError::Format(FormatError::UnsupportedVersion(2))
    ));
}

#[test]
fn truncation() {
    let data = patterned(100);
    let sealed = seal(&data, HeadSplit::Whole);

    // Losing trailing bytes shifts the tag window: authentication fails.
    let err = open(&sealed[..sealed.len() - 1], TEST_PASSWORD).unwrap_err();
    assert!(err.is_wrong_password_or_corrupt(), "{err}");

    // Not even a tag's worth of bytes after the header.
    let err = open(&sealed[..HEADER_LEN + TAG_LEN - 1], TEST_PASSWORD).unwrap_err();
    assert!(matches!(err, EngineError::Format(FormatError::Truncated)), "{err}");

    // Inside the header.
    let err = open(&sealed[..20], TEST_PASSWORD).unwrap_err();
    assert!(matches!(err, EngineError::Format(FormatError::Truncated)), "{err}");

    let err = open(&[], TEST_PASSWORD).unwrap_err();
    assert!(matches!(err, EngineError::Format(FormatError::Truncated)), "{err}");
}

#[test]
fn not_a_container() {
    let err = open(b"PK\x03\x04 definitely a zip file, not ours", TEST_PASSWORD).unwrap_err();
    assert!(matches!(err, EngineError::Format(FormatError::Malformed(_))), "{err}");
}

#[test]
fn string_containers_share_the_same_checks() {
    let c = encrypt_string("hello world", password("pw123"), TEST_ITERATIONS).unwrap();
    assert!(decrypt_string(&c, password("pw124")).unwrap_err().is_wrong_password_or_corrupt());

    // Truncated base64 payload still decodes but fails the length or tag check.
    let short = &c[..c.len() - 8];
    assert!(decrypt_string(short, password("pw123")).is_err());
}
