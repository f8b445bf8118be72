use serde::Serialize;

/// Location of raw media samples; the bytes themselves are never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MediaDataRegion {
    /// First byte after the mdat header.
    pub start_offset: u64,
    pub length: u64,
}

/// Append-only list of mdat regions in file order.
#[derive(Debug, Default)]
pub struct MediaDataRegistry {
    regions: Vec<MediaDataRegion>,
}

impl MediaDataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, start_offset: u64, length: u64) {
        self.regions.push(MediaDataRegion {
            start_offset,
            length,
        });
    }

    pub fn regions(&self) -> &[MediaDataRegion] {
        &self.regions
    }

    pub fn into_regions(self) -> Vec<MediaDataRegion> {
        self.regions
    }
}
