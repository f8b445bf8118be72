use clap::Parser;
use qtatoms::{MediaDataRegion, ScanOptions, ScanReport, Track, TrackKind, scan_file};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Summarize tracks and media data in a QuickTime/MP4 file")]
struct Args {
    /// QuickTime / MP4 file path
    path: PathBuf,

    /// Scan the file with finer granularity
    #[arg(long)]
    deep_scan: bool,

    /// Show additional data about every atom while scanning
    #[arg(long)]
    show_data: bool,

    /// Output as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.show_data);

    if !args.path.is_file() {
        anyhow::bail!("no such file: {}", args.path.display());
    }

    let options = ScanOptions::default()
        .with_verbose(args.show_data)
        .with_deep_scan(args.deep_scan);
    let report = scan_file(&args.path, options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_human(&report));
    }

    Ok(())
}

fn init_tracing(show_data: bool) {
    let default = if show_data { "qtatoms=debug" } else { "qtatoms=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ---- human-readable output -----------------------------------------

fn render_human(report: &ScanReport) -> String {
    let mut out = String::new();
    out.push_str(&render_tracks(&report.tracks));
    out.push_str(&render_media_data(&report.media_data));
    out
}

fn kind_label(kind: TrackKind) -> &'static str {
    match kind {
        TrackKind::Unknown => "Unknown",
        TrackKind::Audio => "Audio",
        TrackKind::Video => "Video",
    }
}

fn render_tracks(tracks: &[Track]) -> String {
    let mut out = String::from("\nTrack Summary:\n");
    if tracks.is_empty() {
        out.push_str("No tracks detected.\n");
        return out;
    }

    for t in tracks {
        let _ = writeln!(out, "Track {}:", t.ordinal + 1);
        let _ = writeln!(out, "Type: {}", kind_label(t.kind));
        if let Some(codec) = t.codec {
            let _ = writeln!(out, "Codec: {}", codec);
        }
        match (t.kind, t.audio, t.video) {
            (TrackKind::Audio, Some(a), _) => {
                let _ = writeln!(out, "Sample Rate: {} Hz", a.sample_rate);
                let _ = writeln!(out, "Channels: {}", a.channel_count);
                let _ = writeln!(out, "Sample Size: {} bits", a.sample_size);
            }
            (TrackKind::Video, _, Some(v)) => {
                let _ = writeln!(out, "Width: {} pixels", v.width);
                let _ = writeln!(out, "Height: {} pixels", v.height);
            }
            _ => {}
        }
        out.push('\n');
    }
    out
}

fn render_media_data(regions: &[MediaDataRegion]) -> String {
    let mut out = String::from("Media Data (mdat) Atoms:\n");
    if regions.is_empty() {
        out.push_str("No mdat atoms detected.\n");
        return out;
    }
    for (i, r) in regions.iter().enumerate() {
        let _ = writeln!(
            out,
            "mdat {}: Position: {:X} ({}), Size: {} bytes",
            i + 1,
            r.start_offset,
            r.start_offset,
            r.length
        );
    }
    out
}
