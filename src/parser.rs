use crate::atom::{AtomHeader, FourCC};
use crate::catalog;
use crate::cursor::AtomCursor;
use crate::error::{ParseError, Result};
use crate::extract::{ExtractContext, ExtractorRegistry};
use crate::mdat::MediaDataRegistry;
use crate::track::TrackBuilder;
use std::fmt;
use std::io::{Read, Seek};
use tracing::warn;

pub const ATOM_HEADER_SIZE: u64 = 8;
pub const EXTENDED_HEADER_SIZE: u64 = 16;
/// Deepest container nesting the walker descends into.
pub const MAX_DEPTH: usize = 64;

/// Narration label for the enclosing container, empty at top level.
struct Within(Option<FourCC>);

impl fmt::Display for Within {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(tag) => write!(f, "{}", tag),
            None => Ok(()),
        }
    }
}

/// Read one atom header at the cursor and resolve its true size.
///
/// `range_end` is the end of the enclosing range: a declared size of 0 extends
/// to it, and any size reaching past it is clamped to it. An extended 64-bit
/// size is capped at `u32::MAX`.
pub fn read_atom_header<R: Read + Seek>(
    cur: &mut AtomCursor<R>,
    range_end: u64,
) -> Result<AtomHeader> {
    let start = cur.position()?;
    let available = range_end.saturating_sub(start);
    if available < ATOM_HEADER_SIZE {
        return Err(ParseError::TruncatedInput {
            offset: start,
            needed: ATOM_HEADER_SIZE - available,
        });
    }

    let declared_size = cur.read_u32()?;
    let typ = cur.read_fourcc()?;

    let (size, extended_size, header_len) = match declared_size {
        1 => {
            if available < EXTENDED_HEADER_SIZE {
                return Err(ParseError::TruncatedInput {
                    offset: start + ATOM_HEADER_SIZE,
                    needed: EXTENDED_HEADER_SIZE - available,
                });
            }
            let ext = cur.read_u64()?;
            (ext.min(u32::MAX as u64), Some(ext), EXTENDED_HEADER_SIZE)
        }
        0 => (available, None, ATOM_HEADER_SIZE),
        n => (n as u64, None, ATOM_HEADER_SIZE),
    };

    if size < header_len {
        return Err(ParseError::InvalidRange {
            tag: typ,
            start,
            size,
            header_len,
        });
    }

    let size = if size > available {
        warn!(
            atom = %typ,
            offset = start,
            size,
            available,
            "atom overruns its enclosing range; clamping"
        );
        available
    } else {
        size
    };

    Ok(AtomHeader {
        typ,
        declared_size,
        extended_size,
        start,
        header_len,
        size,
    })
}

/// Depth-first traversal over nested atoms.
///
/// Owns everything the traversal accumulates; the cursor is lent in for the
/// duration of each call.
pub struct Walker {
    extractors: ExtractorRegistry,
    tracks: TrackBuilder,
    media: MediaDataRegistry,
    verbose: bool,
}

impl Walker {
    pub fn new(extractors: ExtractorRegistry, verbose: bool) -> Self {
        Self {
            extractors,
            tracks: TrackBuilder::new(),
            media: MediaDataRegistry::new(),
            verbose,
        }
    }

    pub fn tracks(&self) -> &TrackBuilder {
        &self.tracks
    }

    pub fn media_data(&self) -> &MediaDataRegistry {
        &self.media
    }

    pub fn into_parts(self) -> (TrackBuilder, MediaDataRegistry) {
        (self.tracks, self.media)
    }

    /// Visit every atom in `[start, end)`. `parent` only labels narration.
    pub fn walk<R: Read + Seek>(
        &mut self,
        cur: &mut AtomCursor<R>,
        start: u64,
        end: u64,
        parent: Option<FourCC>,
    ) -> Result<()> {
        self.walk_at(cur, start, end, parent, 0)
    }

    fn walk_at<R: Read + Seek>(
        &mut self,
        cur: &mut AtomCursor<R>,
        start: u64,
        end: u64,
        parent: Option<FourCC>,
        depth: usize,
    ) -> Result<()> {
        cur.seek_absolute(start)?;
        loop {
            let pos = cur.position()?;
            if pos >= end {
                break;
            }
            if end - pos < ATOM_HEADER_SIZE {
                warn!(
                    offset = pos,
                    remaining = end - pos,
                    "trailing bytes too short for an atom header"
                );
                break;
            }

            let hdr = read_atom_header(cur, end)?;
            self.visit(cur, &hdr, parent, depth)?;

            // next sibling, wherever the visit left the cursor
            cur.seek_absolute(hdr.end())?;
        }
        Ok(())
    }

    fn visit<R: Read + Seek>(
        &mut self,
        cur: &mut AtomCursor<R>,
        hdr: &AtomHeader,
        parent: Option<FourCC>,
        depth: usize,
    ) -> Result<()> {
        let tag = hdr.typ;

        let Some(entry) = catalog::lookup(tag) else {
            narrate!(
                self.verbose,
                within = %Within(parent),
                "Skipping unknown atom 0x{} at {:X}, size {}",
                tag.to_hex(),
                hdr.start,
                hdr.size
            );
            return Ok(());
        };

        narrate!(
            self.verbose,
            within = %Within(parent),
            "Atom: {}, Size: {}, Position: {:X} ({}) [{}]",
            tag,
            hdr.declared_size,
            hdr.start,
            hdr.start,
            entry.description
        );
        if let Some(ext) = hdr.extended_size {
            narrate!(self.verbose, "Extended size: {}", ext);
        }

        if entry.is_container && depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                tag,
                start: hdr.start,
                depth: depth + 1,
            });
        }

        match &tag.0 {
            b"trak" => {
                self.tracks.open_track();
                self.walk_at(cur, hdr.payload_start(), hdr.end(), Some(tag), depth + 1)
            }
            b"mdat" => {
                self.media.record(hdr.payload_start(), hdr.payload_len());
                narrate!(
                    self.verbose,
                    "Media data atom (mdat) found at position {}, size: {}",
                    hdr.payload_start(),
                    hdr.payload_len()
                );
                Ok(())
            }
            _ if entry.is_container => {
                self.walk_at(cur, hdr.payload_start(), hdr.end(), Some(tag), depth + 1)
            }
            _ if self.extractors.contains(tag) => {
                if let Some(name) = self.extractors.name(tag) {
                    narrate!(self.verbose, "Running {} extractor", name);
                }
                let mut payload = cur.payload(hdr.payload_len())?;
                let mut r = payload.reader();
                let mut cx = ExtractContext {
                    tracks: &mut self.tracks,
                    verbose: self.verbose,
                };
                self.extractors
                    .extract(tag, &mut r, hdr, &mut cx)
                    .unwrap_or(Ok(()))
            }
            _ => {
                if entry.is_unused_space {
                    narrate!(self.verbose, "Unused space: {} bytes", hdr.payload_len());
                }
                Ok(())
            }
        }
    }
}
