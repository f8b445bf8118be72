#![allow(dead_code)]

//! Builders for synthetic atom trees.

pub fn atom(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(8 + payload.len());
    v.extend_from_slice(&((8 + payload.len()) as u32).to_be_bytes());
    v.extend_from_slice(tag);
    v.extend_from_slice(payload);
    v
}

pub fn container(tag: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    atom(tag, &children.concat())
}

pub fn ftyp() -> Vec<u8> {
    // 24 bytes: major "qt  ", minor 0x200, one compatible brand
    let mut p = Vec::new();
    p.extend_from_slice(b"qt  ");
    p.extend_from_slice(&0x200u32.to_be_bytes());
    p.extend_from_slice(b"qt  ");
    atom(b"ftyp", &p)
}

pub fn hdlr(handler: &[u8; 4]) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&[0, 0, 0, 0]); // version + flags
    p.extend_from_slice(b"mhlr"); // component type / pre_defined
    p.extend_from_slice(handler);
    p.extend_from_slice(&[0u8; 12]); // reserved
    p.extend_from_slice(b"Handler\0");
    atom(b"hdlr", &p)
}

fn tkhd_tail(p: &mut Vec<u8>, width: u32, height: u32) {
    p.extend_from_slice(&[0u8; 8]); // reserved
    p.extend_from_slice(&0u16.to_be_bytes()); // layer
    p.extend_from_slice(&0u16.to_be_bytes()); // alternate group
    p.extend_from_slice(&0u16.to_be_bytes()); // volume
    p.extend_from_slice(&0u16.to_be_bytes()); // reserved
    for m in [0x0001_0000u32, 0, 0, 0, 0x0001_0000, 0, 0, 0, 0x4000_0000] {
        p.extend_from_slice(&m.to_be_bytes());
    }
    p.extend_from_slice(&width.to_be_bytes());
    p.extend_from_slice(&height.to_be_bytes());
}

/// Version 0 track header with 16.16 width/height fields.
pub fn tkhd_v0(width: u32, height: u32) -> Vec<u8> {
    let mut p = vec![0, 0, 0, 0x0f]; // version 0, flags
    p.extend_from_slice(&[0u8; 8]); // creation + modification
    p.extend_from_slice(&1u32.to_be_bytes()); // track id
    p.extend_from_slice(&[0u8; 4]); // reserved
    p.extend_from_slice(&600u32.to_be_bytes()); // duration
    tkhd_tail(&mut p, width, height);
    atom(b"tkhd", &p)
}

pub fn tkhd_v1(width: u32, height: u32) -> Vec<u8> {
    let mut p = vec![1, 0, 0, 0x0f];
    p.extend_from_slice(&[0u8; 16]); // creation + modification
    p.extend_from_slice(&2u32.to_be_bytes()); // track id
    p.extend_from_slice(&[0u8; 4]); // reserved
    p.extend_from_slice(&600u64.to_be_bytes()); // duration
    tkhd_tail(&mut p, width, height);
    atom(b"tkhd", &p)
}

/// Sample description with one sound entry. `rate` is the raw 16.16 field.
pub fn stsd_audio(format: &[u8; 4], channels: u16, sample_size: u16, rate: u32) -> Vec<u8> {
    let mut e = Vec::new();
    e.extend_from_slice(&36u32.to_be_bytes()); // entry size
    e.extend_from_slice(format);
    e.extend_from_slice(&[0u8; 6]); // reserved
    e.extend_from_slice(&1u16.to_be_bytes()); // data reference index
    e.extend_from_slice(&0u16.to_be_bytes()); // version
    e.extend_from_slice(&0u16.to_be_bytes()); // revision
    e.extend_from_slice(b"appl"); // vendor
    e.extend_from_slice(&channels.to_be_bytes());
    e.extend_from_slice(&sample_size.to_be_bytes());
    e.extend_from_slice(&0u16.to_be_bytes()); // compression id
    e.extend_from_slice(&0u16.to_be_bytes()); // packet size
    e.extend_from_slice(&rate.to_be_bytes());

    let mut p = vec![0, 0, 0, 0];
    p.extend_from_slice(&1u32.to_be_bytes());
    p.extend_from_slice(&e);
    atom(b"stsd", &p)
}

/// Sample description with one visual entry.
pub fn stsd_video(format: &[u8; 4]) -> Vec<u8> {
    let mut e = Vec::new();
    e.extend_from_slice(&86u32.to_be_bytes());
    e.extend_from_slice(format);
    e.extend_from_slice(&[0u8; 6]);
    e.extend_from_slice(&1u16.to_be_bytes());
    e.extend_from_slice(&[0u8; 70]);

    let mut p = vec![0, 0, 0, 0];
    p.extend_from_slice(&1u32.to_be_bytes());
    p.extend_from_slice(&e);
    atom(b"stsd", &p)
}

pub fn stsd_empty() -> Vec<u8> {
    atom(b"stsd", &[0, 0, 0, 0, 0, 0, 0, 0])
}

/// trak > [tkhd] mdia > hdlr minf > stbl > stsd
pub fn trak(tkhd: Option<Vec<u8>>, handler: &[u8; 4], stsd: Vec<u8>) -> Vec<u8> {
    let stbl = container(b"stbl", &[stsd]);
    let minf = container(b"minf", &[stbl]);
    let mdia = container(b"mdia", &[hdlr(handler), minf]);
    let mut kids = Vec::new();
    if let Some(t) = tkhd {
        kids.push(t);
    }
    kids.push(mdia);
    container(b"trak", &kids)
}

pub fn video_trak(width: u32, height: u32) -> Vec<u8> {
    trak(Some(tkhd_v0(width << 16, height << 16)), b"vide", stsd_video(b"avc1"))
}

pub fn audio_trak(rate: u32) -> Vec<u8> {
    trak(Some(tkhd_v0(0, 0)), b"soun", stsd_audio(b"mp4a", 2, 16, rate))
}
