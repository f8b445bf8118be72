use crate::atom::{AtomHeader, FourCC};
use crate::cursor::PayloadReader;
use crate::error::Result;
use crate::track::{AudioInfo, TrackBuilder, TrackKind, VideoInfo};
use std::collections::HashMap;

/// State an extractor may touch while interpreting one payload.
pub struct ExtractContext<'a> {
    pub tracks: &'a mut TrackBuilder,
    /// Emit progress narration.
    pub verbose: bool,
}

/// Interprets the payload of one leaf atom type and updates the current track.
///
/// The reader is positioned at the first payload byte and cannot read past the
/// end of the atom; doing so fails with `TruncatedInput`.
pub trait FieldExtractor: Send + Sync {
    fn extract(
        &self,
        r: &mut PayloadReader<'_>,
        hdr: &AtomHeader,
        cx: &mut ExtractContext<'_>,
    ) -> Result<()>;
}

/// Extractors keyed by atom tag.
///
/// Immutable once built; use [`ExtractorRegistry::with_extractor`] to build it
/// fluently.
pub struct ExtractorRegistry {
    map: HashMap<FourCC, ExtractorEntry>,
}

struct ExtractorEntry {
    inner: Box<dyn FieldExtractor>,
    name: String,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Return a new registry with the given extractor added.
    ///
    /// `name` is human-readable and only used in narration.
    pub fn with_extractor(mut self, tag: FourCC, name: &str, ex: Box<dyn FieldExtractor>) -> Self {
        self.map.insert(
            tag,
            ExtractorEntry {
                inner: ex,
                name: name.to_string(),
            },
        );
        self
    }

    pub fn contains(&self, tag: FourCC) -> bool {
        self.map.contains_key(&tag)
    }

    pub fn name(&self, tag: FourCC) -> Option<&str> {
        self.map.get(&tag).map(|e| e.name.as_str())
    }

    /// Run the extractor registered for `tag`, if any.
    pub fn extract(
        &self,
        tag: FourCC,
        r: &mut PayloadReader<'_>,
        hdr: &AtomHeader,
        cx: &mut ExtractContext<'_>,
    ) -> Option<Result<()>> {
        self.map.get(&tag).map(|e| e.inner.extract(r, hdr, cx))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// hdlr: handler type decides audio vs video
pub struct HdlrExtractor;

impl FieldExtractor for HdlrExtractor {
    fn extract(
        &self,
        r: &mut PayloadReader<'_>,
        _hdr: &AtomHeader,
        cx: &mut ExtractContext<'_>,
    ) -> Result<()> {
        let Some(track) = cx.tracks.current_mut() else {
            return Ok(());
        };

        // version/flags (4) + pre_defined (4)
        r.skip(8)?;
        let handler = r.read_fourcc()?;
        let kind = match &handler.0 {
            b"vide" => TrackKind::Video,
            b"soun" => TrackKind::Audio,
            _ => TrackKind::Unknown,
        };
        track.set_kind(kind);
        narrate!(cx.verbose, "Handler type: {} (track {})", handler, track.ordinal + 1);
        Ok(())
    }
}

// tkhd: presentation width/height
pub struct TkhdExtractor;

/// creation/modification time, track id, reserved, duration
const TKHD_TIMES_V0: u64 = 20;
const TKHD_TIMES_V1: u64 = 32;
/// reserved[2], layer, alternate group, volume, reserved, matrix[9]
const TKHD_LAYOUT: u64 = 8 + 2 + 2 + 2 + 2 + 36;

impl FieldExtractor for TkhdExtractor {
    fn extract(
        &self,
        r: &mut PayloadReader<'_>,
        _hdr: &AtomHeader,
        cx: &mut ExtractContext<'_>,
    ) -> Result<()> {
        let Some(track) = cx.tracks.current_mut() else {
            return Ok(());
        };

        let version = r.read_u8()?;
        r.skip(3)?;
        r.skip(if version == 1 { TKHD_TIMES_V1 } else { TKHD_TIMES_V0 })?;
        r.skip(TKHD_LAYOUT)?;

        let width = r.read_fixed_16_16()?;
        let height = r.read_fixed_16_16()?;
        track.video = Some(VideoInfo { width, height });

        // a header with dimensions is presumptive video
        if track.kind == TrackKind::Unknown {
            track.kind = TrackKind::Video;
        }

        narrate!(cx.verbose, "Track dimensions: {}x{}", width, height);
        Ok(())
    }
}

// stsd: data format of the first entry, plus sound parameters for audio tracks
pub struct StsdExtractor;

impl FieldExtractor for StsdExtractor {
    fn extract(
        &self,
        r: &mut PayloadReader<'_>,
        _hdr: &AtomHeader,
        cx: &mut ExtractContext<'_>,
    ) -> Result<()> {
        let verbose = cx.verbose;
        let Some(track) = cx.tracks.current_mut() else {
            return Ok(());
        };

        narrate!(verbose, "Parsing stsd atom at position: {:X}", r.position());
        r.skip(4)?; // version + flags
        let entry_count = r.read_u32()?;
        narrate!(verbose, "Number of entries in stsd: {}", entry_count);
        if entry_count == 0 {
            return Ok(());
        }

        // Only the first entry is inspected.
        let _entry_size = r.read_u32()?;
        let format = r.read_fourcc()?;
        r.skip(6)?; // reserved
        let _data_reference_index = r.read_u16()?;
        track.codec = Some(format);
        narrate!(verbose, "Data format: {}", format);

        if track.kind == TrackKind::Audio {
            r.skip(8)?; // version, revision level, vendor
            let channel_count = r.read_u16()?;
            let sample_size = r.read_u16()?;
            r.skip(4)?; // compression id, packet size
            let sample_rate = r.read_u32()? >> 16;

            track.audio = Some(AudioInfo {
                sample_rate,
                channel_count,
                sample_size,
            });
            narrate!(
                verbose,
                "Audio info - Sample Rate: {}, Channels: {}, Sample Size: {}",
                sample_rate,
                channel_count,
                sample_size
            );
        }
        Ok(())
    }
}

/// Registry with the hdlr, tkhd and stsd extractors.
pub fn default_extractors() -> ExtractorRegistry {
    ExtractorRegistry::new()
        .with_extractor(FourCC(*b"hdlr"), "hdlr", Box::new(HdlrExtractor))
        .with_extractor(FourCC(*b"tkhd"), "tkhd", Box::new(TkhdExtractor))
        .with_extractor(FourCC(*b"stsd"), "stsd", Box::new(StsdExtractor))
}
