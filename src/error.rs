use crate::atom::FourCC;

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated input: {needed} more bytes needed at offset {offset}")]
    TruncatedInput { offset: u64, needed: u64 },
    #[error("atom '{tag}' at offset {start} has size {size}, smaller than its {header_len}-byte header")]
    InvalidRange {
        tag: FourCC,
        start: u64,
        size: u64,
        header_len: u64,
    },
    #[error("atom '{tag}' at offset {start} nests {depth} levels deep")]
    TooDeep { tag: FourCC, start: u64, depth: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;
