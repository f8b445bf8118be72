use crate::atom::FourCC;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    #[default]
    Unknown,
    Audio,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoInfo {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioInfo {
    /// Integer part of the 16.16 sample-rate field.
    pub sample_rate: u32,
    pub channel_count: u16,
    pub sample_size: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// Zero-based discovery order.
    pub ordinal: usize,
    pub kind: TrackKind,
    /// Data format of the first sample description entry (e.g. `avc1`, `mp4a`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<FourCC>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioInfo>,
}

impl Track {
    fn new(ordinal: usize) -> Self {
        Self {
            ordinal,
            kind: TrackKind::Unknown,
            codec: None,
            video: None,
            audio: None,
        }
    }

    /// Classify the track. `Unknown` never overwrites a known kind.
    pub fn set_kind(&mut self, kind: TrackKind) {
        if kind != TrackKind::Unknown {
            self.kind = kind;
        }
    }
}

/// Ordered track list plus the notion of the "current" (last opened) track.
#[derive(Debug, Default)]
pub struct TrackBuilder {
    tracks: Vec<Track>,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new track; it becomes the current one.
    pub fn open_track(&mut self) -> &mut Track {
        let ordinal = self.tracks.len();
        self.tracks.push(Track::new(ordinal));
        &mut self.tracks[ordinal]
    }

    pub fn current(&self) -> Option<&Track> {
        self.tracks.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut Track> {
        self.tracks.last_mut()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}
