/// Progress narration, only emitted when the verbose switch is on.
macro_rules! narrate {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::debug!($($arg)+);
        }
    };
}

pub mod api;
pub mod atom;
pub mod catalog;
pub mod cursor;
pub mod error;
pub mod extract;
pub mod mdat;
pub mod parser;
pub mod track;

pub use api::{ScanOptions, ScanReport, Scanner, scan, scan_file};
pub use atom::{AtomHeader, FourCC};
pub use error::{ParseError, Result};
pub use mdat::MediaDataRegion;
pub use parser::{Walker, read_atom_header};
pub use track::{AudioInfo, Track, TrackKind, VideoInfo};
