use serde::{Serialize, Serializer};
use std::fmt;

/// Four-byte atom type tag, compared byte for byte.
///
/// Some QuickTime tags start with `0xA9` (the MacRoman copyright sign), so the
/// tag is kept as raw bytes rather than decoded text.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else {
            None
        }
    }

    pub fn as_str_lossy(&self) -> String {
        self.0
            .iter()
            .map(|&c| match c {
                0xA9 => '©',
                32..=126 => c as char,
                _ => '.',
            })
            .collect()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.as_str_lossy())
    }
}

/// Header of one atom as it sits in the byte stream.
#[derive(Debug, Clone)]
pub struct AtomHeader {
    pub typ: FourCC,
    /// The raw 32-bit size field: 0 = rest of range, 1 = extended size follows.
    pub declared_size: u32,
    pub extended_size: Option<u64>,
    /// Absolute offset of the size field.
    pub start: u64,
    /// 8, or 16 when an extended size is present.
    pub header_len: u64,
    /// Resolved size including the header, clamped to the enclosing range.
    pub size: u64,
}

impl AtomHeader {
    pub fn payload_start(&self) -> u64 {
        self.start + self.header_len
    }

    pub fn payload_len(&self) -> u64 {
        self.size - self.header_len
    }

    pub fn end(&self) -> u64 {
        self.start + self.size
    }
}
