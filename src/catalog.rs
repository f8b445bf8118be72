use crate::atom::FourCC;

/// One recognized atom type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub tag: FourCC,
    pub is_container: bool,
    pub is_unused_space: bool,
    pub description: &'static str,
}

const fn container(tag: &[u8; 4], description: &'static str) -> CatalogEntry {
    CatalogEntry {
        tag: FourCC(*tag),
        is_container: true,
        is_unused_space: false,
        description,
    }
}

const fn leaf(tag: &[u8; 4], description: &'static str) -> CatalogEntry {
    CatalogEntry {
        tag: FourCC(*tag),
        is_container: false,
        is_unused_space: false,
        description,
    }
}

const fn padding(tag: &[u8; 4], description: &'static str) -> CatalogEntry {
    CatalogEntry {
        tag: FourCC(*tag),
        is_container: false,
        is_unused_space: true,
        description,
    }
}

/// Every tag the walker recognizes. Containers are exactly the sixteen
/// structural atoms below; everything else is a leaf.
pub static KNOWN_ATOMS: &[CatalogEntry] = &[
    // structure
    container(b"moov", "Movie"),
    container(b"trak", "Track"),
    container(b"mdia", "Media"),
    container(b"minf", "Media Information"),
    container(b"stbl", "Sample Table"),
    container(b"edts", "Edits"),
    container(b"udta", "User Data"),
    container(b"meta", "Metadata"),
    container(b"ilst", "Metadata Item List"),
    container(b"dinf", "Data Information"),
    container(b"mvex", "Movie Extends"),
    container(b"moof", "Movie Fragment"),
    container(b"traf", "Track Fragment"),
    container(b"gmhd", "Generic Media Header"),
    container(b"rmra", "Reference Movie Record"),
    container(b"rmda", "Reference Movie Descriptor"),
    // structural leaves in QuickTime files that carry nothing we read
    leaf(b"clip", "Clipping"),
    leaf(b"matt", "Track Matte"),
    leaf(b"tref", "Track Reference"),
    leaf(b"cmov", "Compressed Movie"),
    // copyright-sign user data
    leaf(b"\xa9cpy", "User Data: Copyright"),
    leaf(b"\xa9day", "User Data: Date"),
    leaf(b"\xa9dir", "User Data: Director"),
    leaf(b"\xa9ed1", "User Data: Edit 1"),
    leaf(b"\xa9ed2", "User Data: Edit 2"),
    leaf(b"\xa9ed3", "User Data: Edit 3"),
    leaf(b"\xa9ed4", "User Data: Edit 4"),
    leaf(b"\xa9ed5", "User Data: Edit 5"),
    leaf(b"\xa9ed6", "User Data: Edit 6"),
    leaf(b"\xa9ed7", "User Data: Edit 7"),
    leaf(b"\xa9ed8", "User Data: Edit 8"),
    leaf(b"\xa9ed9", "User Data: Edit 9"),
    leaf(b"\xa9fmt", "User Data: Format"),
    leaf(b"\xa9inf", "User Data: Information"),
    leaf(b"\xa9prd", "User Data: Producer"),
    leaf(b"\xa9prf", "User Data: Performers"),
    leaf(b"\xa9req", "User Data: Requirements"),
    leaf(b"\xa9src", "User Data: Source"),
    leaf(b"\xa9wrt", "User Data: Writer"),
    leaf(b"\xa9nam", "User Data: Name"),
    leaf(b"\xa9cmt", "User Data: Comment"),
    leaf(b"\xa9wrn", "User Data: Warning"),
    leaf(b"\xa9hst", "User Data: Host Computer"),
    leaf(b"\xa9mak", "User Data: Make"),
    leaf(b"\xa9mod", "User Data: Model"),
    leaf(b"\xa9PRD", "User Data: Product"),
    leaf(b"\xa9swr", "User Data: Software"),
    leaf(b"\xa9aut", "User Data: Author"),
    leaf(b"\xa9ART", "User Data: Artist"),
    leaf(b"\xa9trk", "User Data: Track"),
    leaf(b"\xa9alb", "User Data: Album"),
    leaf(b"\xa9com", "User Data: Composer"),
    leaf(b"\xa9gen", "User Data: Genre"),
    leaf(b"\xa9ope", "User Data: Original Performer"),
    leaf(b"\xa9url", "User Data: URL"),
    leaf(b"\xa9enc", "User Data: Encoder"),
    // playback hints
    leaf(b"play", "Auto Play"),
    leaf(b"WLOC", "Window Location"),
    leaf(b"LOOP", "Looping"),
    leaf(b"SelO", "Play Selection Only"),
    leaf(b"AllF", "Play All Frames"),
    leaf(b"name", "Name"),
    leaf(b"MCPS", "Media Cleaner Pro"),
    leaf(b"@PRM", "Adobe Premiere Version"),
    leaf(b"@PRQ", "Adobe Premiere QuickTime Version"),
    // compressed movies and reference movies
    leaf(b"cmvd", "Compressed Movie Data"),
    leaf(b"dcom", "Data Compression"),
    leaf(b"rdrf", "Reference Movie Data Reference"),
    leaf(b"url ", "Data Reference URL"),
    leaf(b"alis", "Data Reference Alias"),
    leaf(b"rsrc", "Data Reference Resource"),
    leaf(b"rmqu", "Reference Movie Quality"),
    leaf(b"rmcs", "Reference Movie CPU Speed"),
    leaf(b"rmvc", "Reference Movie Version Check"),
    leaf(b"rmcd", "Reference Movie Component Check"),
    leaf(b"rmdr", "Reference Movie Data Rate"),
    leaf(b"rmla", "Reference Movie Language"),
    leaf(b"ptv ", "Print To Video"),
    // sample descriptions
    leaf(b"stsd", "Sample Description"),
    leaf(b"avc1", "AVC Sample Entry"),
    leaf(b"mp4v", "MPEG-4 Visual Sample Entry"),
    leaf(b"qtvr", "QuickTime VR Sample Entry"),
    leaf(b"mp4a", "MPEG-4 Audio Sample Entry"),
    leaf(b"raw ", "Uncompressed PCM Sample Entry"),
    leaf(b"alac", "Apple Lossless Sample Entry"),
    leaf(b"mp4s", "MPEG-4 Systems Sample Entry"),
    leaf(b"3ivx", "3ivx Sample Entry"),
    leaf(b"3iv1", "3ivx v1 Sample Entry"),
    leaf(b"3iv2", "3ivx v2 Sample Entry"),
    leaf(b"xvid", "Xvid Sample Entry"),
    leaf(b"divx", "DivX Sample Entry"),
    leaf(b"div1", "DivX v1 Sample Entry"),
    leaf(b"div2", "DivX v2 Sample Entry"),
    leaf(b"div3", "DivX v3 Sample Entry"),
    leaf(b"div4", "DivX v4 Sample Entry"),
    leaf(b"div5", "DivX v5 Sample Entry"),
    leaf(b"div6", "DivX v6 Sample Entry"),
    // sample table
    leaf(b"stts", "Time-to-Sample"),
    leaf(b"stss", "Sync Sample"),
    leaf(b"stsc", "Sample-to-Chunk"),
    leaf(b"stsz", "Sample Size"),
    leaf(b"stco", "Chunk Offset"),
    leaf(b"co64", "Chunk Offset 64-bit"),
    // media information
    leaf(b"dref", "Data Reference"),
    leaf(b"gmin", "Base Media Information"),
    leaf(b"smhd", "Sound Media Header"),
    leaf(b"vmhd", "Video Media Header"),
    leaf(b"hdlr", "Handler Reference"),
    leaf(b"mdhd", "Media Header"),
    // track level
    leaf(b"pnot", "Preview"),
    leaf(b"crgn", "Clipping Region"),
    leaf(b"load", "Track Load Settings"),
    leaf(b"tmcd", "Timecode"),
    leaf(b"chap", "Chapter List"),
    leaf(b"sync", "Synchronization"),
    leaf(b"scpt", "Transcript"),
    leaf(b"ssrc", "Non-primary Source"),
    leaf(b"elst", "Edit List"),
    leaf(b"kmat", "Compressed Matte"),
    leaf(b"ctab", "Color Table"),
    leaf(b"mvhd", "Movie Header"),
    leaf(b"tkhd", "Track Header"),
    // file level
    leaf(b"ftyp", "File Type"),
    leaf(b"mdat", "Media Data"),
    padding(b"free", "Free Space"),
    padding(b"skip", "Skip"),
    padding(b"wide", "Wide (64-bit expansion placeholder)"),
    leaf(b"nsav", "No Save"),
    // QTVR and hint tracks
    leaf(b"ctyp", "Controller Type"),
    leaf(b"pano", "Panorama Track"),
    leaf(b"hint", "Hint Track Reference"),
    leaf(b"hinf", "Hint Information"),
    leaf(b"hinv", "Hint Version"),
    leaf(b"hnti", "Hint Track Information"),
    leaf(b"imgt", "Image Track Reference"),
    // application specific
    leaf(b"FXTC", "Adobe After Effects"),
    leaf(b"PrmA", "Adobe Premiere"),
    leaf(b"code", "Code"),
    leaf(b"FIEL", "Field Handling"),
];

pub fn lookup(tag: FourCC) -> Option<&'static CatalogEntry> {
    KNOWN_ATOMS.iter().find(|e| e.tag == tag)
}

pub fn is_known(tag: FourCC) -> bool {
    lookup(tag).is_some()
}

pub fn is_container(tag: FourCC) -> bool {
    lookup(tag).is_some_and(|e| e.is_container)
}

pub fn is_unused_space(tag: FourCC) -> bool {
    lookup(tag).is_some_and(|e| e.is_unused_space)
}

pub fn description(tag: FourCC) -> &'static str {
    lookup(tag).map_or("Unknown", |e| e.description)
}
