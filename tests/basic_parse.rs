use qtatoms::cursor::AtomCursor;
use qtatoms::{FourCC, ParseError, read_atom_header};
use std::io::Cursor;

fn cursor(data: Vec<u8>) -> AtomCursor<Cursor<Vec<u8>>> {
    let len = data.len() as u64;
    AtomCursor::new(Cursor::new(data), len)
}

fn make_minimal_file() -> Vec<u8> {
    // [ftyp box]
    // size: 24 (0x18), type: "ftyp", payload: 16 bytes
    let mut v = Vec::new();
    v.extend_from_slice(&24u32.to_be_bytes());
    v.extend_from_slice(b"ftyp");
    v.extend_from_slice(b"qt  ");
    v.extend_from_slice(&0x200u32.to_be_bytes());
    v.extend_from_slice(b"qt  ");
    v
}

#[test]
fn read_single_ftyp_header() {
    let mut cur = cursor(make_minimal_file());

    let hdr = read_atom_header(&mut cur, 24).expect("read_atom_header failed");

    assert_eq!(hdr.start, 0);
    assert_eq!(hdr.declared_size, 24);
    assert_eq!(hdr.size, 24);
    assert_eq!(hdr.typ, FourCC(*b"ftyp"));
    assert_eq!(hdr.header_len, 8);
    assert_eq!(hdr.extended_size, None);
    assert_eq!(hdr.payload_start(), 8);
    assert_eq!(hdr.payload_len(), 16);
    assert_eq!(cur.position().unwrap(), 8);
}

#[test]
fn extended_size_is_capped_at_u32_max() {
    let mut v = Vec::new();
    v.extend_from_slice(&1u32.to_be_bytes());
    v.extend_from_slice(b"mdat");
    v.extend_from_slice(&0x1_0000_0010u64.to_be_bytes());
    let mut cur = cursor(v);

    let hdr = read_atom_header(&mut cur, u64::MAX).expect("header");
    assert_eq!(hdr.extended_size, Some(0x1_0000_0010));
    assert_eq!(hdr.size, u32::MAX as u64);
    assert_eq!(hdr.header_len, 16);
    assert_eq!(hdr.payload_len(), u32::MAX as u64 - 16);
}

#[test]
fn zero_size_takes_rest_of_range() {
    let mut v = vec![0, 0, 0, 0];
    v.extend_from_slice(b"mdat");
    v.extend_from_slice(&[0u8; 32]);
    let mut cur = cursor(v);

    // the enclosing range ends before the data does
    let hdr = read_atom_header(&mut cur, 20).expect("header");
    assert_eq!(hdr.size, 20);
    assert_eq!(hdr.end(), 20);
}

#[test]
fn rejects_size_smaller_than_header() {
    let mut v = 7u32.to_be_bytes().to_vec();
    v.extend_from_slice(b"free");
    let mut cur = cursor(v);

    let err = read_atom_header(&mut cur, 8).unwrap_err();
    assert!(matches!(err, ParseError::InvalidRange { size: 7, .. }));
}

#[test]
fn rejects_extended_size_smaller_than_its_header() {
    let mut v = 1u32.to_be_bytes().to_vec();
    v.extend_from_slice(b"mdat");
    v.extend_from_slice(&12u64.to_be_bytes());
    let mut cur = cursor(v);

    let err = read_atom_header(&mut cur, 16).unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidRange {
            size: 12,
            header_len: 16,
            ..
        }
    ));
}

#[test]
fn extended_header_needs_sixteen_bytes_of_range() {
    let mut v = 1u32.to_be_bytes().to_vec();
    v.extend_from_slice(b"mdat");
    v.extend_from_slice(&[0u8; 4]);
    let mut cur = cursor(v);

    let err = read_atom_header(&mut cur, 12).unwrap_err();
    assert!(matches!(
        err,
        ParseError::TruncatedInput {
            offset: 8,
            needed: 4
        }
    ));
}

#[test]
fn header_past_range_is_truncated() {
    let mut cur = cursor(make_minimal_file());
    cur.seek_absolute(20).unwrap();
    let err = read_atom_header(&mut cur, 24).unwrap_err();
    assert!(matches!(err, ParseError::TruncatedInput { offset: 20, .. }));
}
