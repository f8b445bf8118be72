use crate::{
    cursor::AtomCursor,
    error::Result,
    extract::{ExtractorRegistry, default_extractors},
    mdat::MediaDataRegion,
    parser::{ATOM_HEADER_SIZE, Walker},
    track::Track,
};
use serde::Serialize;
use std::{
    fs::File,
    io::{Read, Seek},
    path::Path,
};

pub const DEEP_SCAN_CHUNK_SIZE: u64 = 16;

/// Caller-supplied switches. Neither changes which atoms are visited.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Narrate progress through `tracing` debug events.
    pub verbose: bool,
    pub deep_scan: bool,
}

impl ScanOptions {
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_deep_scan(mut self, deep_scan: bool) -> Self {
        self.deep_scan = deep_scan;
        self
    }

    /// Scan granularity in bytes.
    pub fn chunk_size(&self) -> u64 {
        if self.deep_scan {
            DEEP_SCAN_CHUNK_SIZE
        } else {
            ATOM_HEADER_SIZE
        }
    }
}

/// Everything a traversal found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub tracks: Vec<Track>,
    pub media_data: Vec<MediaDataRegion>,
}

/// Runs one traversal over a byte source and keeps what it found, even when
/// the traversal fails part way.
///
/// ```no_run
/// use qtatoms::{ScanOptions, Scanner};
/// use std::fs::File;
///
/// let file = File::open("movie.mov")?;
/// let mut scanner = Scanner::new(file, ScanOptions::default())?;
/// if let Err(e) = scanner.scan() {
///     eprintln!("stopped early: {e}; {} tracks so far", scanner.tracks().len());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Scanner<R> {
    cursor: AtomCursor<R>,
    walker: Walker,
    options: ScanOptions,
}

impl<R: Read + Seek> Scanner<R> {
    /// Scanner over the whole of `source`, with the default extractors.
    pub fn new(source: R, options: ScanOptions) -> Result<Self> {
        Ok(Self::with_cursor(AtomCursor::from_stream(source)?, options))
    }

    /// Scanner over the first `len` bytes of `source`.
    pub fn with_len(source: R, len: u64, options: ScanOptions) -> Self {
        Self::with_cursor(AtomCursor::new(source, len), options)
    }

    fn with_cursor(cursor: AtomCursor<R>, options: ScanOptions) -> Self {
        Self {
            cursor,
            walker: Walker::new(default_extractors(), options.verbose),
            options,
        }
    }

    /// Replace the extractor set. Discards anything found so far.
    pub fn with_extractors(mut self, extractors: ExtractorRegistry) -> Self {
        self.walker = Walker::new(extractors, self.options.verbose);
        self
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Walk `[0, len)`.
    pub fn scan(&mut self) -> Result<()> {
        let len = self.cursor.len();
        narrate!(self.options.verbose, "File size: {} bytes", len);
        narrate!(
            self.options.verbose,
            "Scan chunk size: {} bytes",
            self.options.chunk_size()
        );
        self.walker.walk(&mut self.cursor, 0, len, None)
    }

    pub fn tracks(&self) -> &[Track] {
        self.walker.tracks().tracks()
    }

    pub fn media_data(&self) -> &[MediaDataRegion] {
        self.walker.media_data().regions()
    }

    pub fn into_report(self) -> ScanReport {
        let (tracks, media) = self.walker.into_parts();
        ScanReport {
            tracks: tracks.into_tracks(),
            media_data: media.into_regions(),
        }
    }
}

/// Scan the first `size` bytes of `r`, discarding partial results on error.
pub fn scan<R: Read + Seek>(r: R, size: u64, options: ScanOptions) -> Result<ScanReport> {
    let mut scanner = Scanner::with_len(r, size, options);
    scanner.scan()?;
    Ok(scanner.into_report())
}

/// Open `path`, learn its size from metadata and scan the whole file.
pub fn scan_file(path: impl AsRef<Path>, options: ScanOptions) -> anyhow::Result<ScanReport> {
    let f = File::open(&path)?;
    let file_len = f.metadata()?.len();
    Ok(scan(f, file_len, options)?)
}
