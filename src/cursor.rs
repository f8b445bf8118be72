use crate::atom::FourCC;
use crate::error::{ParseError, Result};
use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};

/// Sequential big-endian reader over a seekable source of known length.
pub struct AtomCursor<R> {
    inner: R,
    len: u64,
}

impl<R: Read + Seek> AtomCursor<R> {
    pub fn new(inner: R, len: u64) -> Self {
        Self { inner, len }
    }

    /// Learn the length of `inner` by seeking to its end, then rewind.
    pub fn from_stream(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, len })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn position(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    pub fn seek_absolute(&mut self, offset: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn require(&mut self, needed: u64) -> Result<u64> {
        let offset = self.position()?;
        if self.len.saturating_sub(offset) < needed {
            return Err(ParseError::TruncatedInput { offset, needed });
        }
        Ok(offset)
    }

    pub fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let offset = self.require(n as u64)?;
        let mut buf = vec![0u8; n];
        self.inner.read_exact(&mut buf).map_err(|e| eof(e, offset, n as u64))?;
        Ok(buf)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let offset = self.require(N as u64)?;
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf).map_err(|e| eof(e, offset, N as u64))?;
        Ok(buf)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(&self.read_array::<4>()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(BigEndian::read_u64(&self.read_array::<8>()?))
    }

    pub fn read_fourcc(&mut self) -> Result<FourCC> {
        Ok(FourCC(self.read_array::<4>()?))
    }

    pub fn skip(&mut self, n: u64) -> Result<()> {
        let offset = self.require(n)?;
        self.seek_absolute(offset + n)
    }

    /// Bounded reader over the next `len` bytes; reads past them fail as truncated.
    pub fn payload(&mut self, len: u64) -> Result<Payload<'_, R>> {
        let base = self.position()?;
        Ok(Payload {
            inner: (&mut self.inner).take(len),
            base,
        })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// The byte window of one leaf atom's payload.
pub struct Payload<'a, R> {
    inner: io::Take<&'a mut R>,
    base: u64,
}

impl<R: Read> Payload<'_, R> {
    pub fn reader(&mut self) -> PayloadReader<'_> {
        PayloadReader::new(&mut self.inner, self.base)
    }
}

fn eof(e: io::Error, offset: u64, needed: u64) -> ParseError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        ParseError::TruncatedInput { offset, needed }
    } else {
        ParseError::Io(e)
    }
}

/// Field reader handed to extractors.
///
/// Tracks how far it has read so a short payload reports the absolute offset
/// where it ran out.
pub struct PayloadReader<'a> {
    inner: &'a mut dyn Read,
    base: u64,
    consumed: u64,
}

impl<'a> PayloadReader<'a> {
    pub fn new(inner: &'a mut dyn Read, base: u64) -> Self {
        Self {
            inner,
            base,
            consumed: 0,
        }
    }

    pub fn position(&self) -> u64 {
        self.base + self.consumed
    }

    fn finish<T>(&mut self, r: io::Result<T>, n: u64) -> Result<T> {
        match r {
            Ok(v) => {
                self.consumed += n;
                Ok(v)
            }
            Err(e) => Err(eof(e, self.position(), n)),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let r = self.inner.read_u8();
        self.finish(r, 1)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let r = self.inner.read_u16::<BigEndian>();
        self.finish(r, 2)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let r = self.inner.read_u32::<BigEndian>();
        self.finish(r, 4)
    }

    pub fn read_fourcc(&mut self) -> Result<FourCC> {
        let mut b = [0u8; 4];
        let r = self.inner.read_exact(&mut b);
        self.finish(r, 4)?;
        Ok(FourCC(b))
    }

    /// Integer part of a 16.16 fixed-point field.
    pub fn read_fixed_16_16(&mut self) -> Result<u16> {
        Ok((self.read_u32()? >> 16) as u16)
    }

    pub fn skip(&mut self, n: u64) -> Result<()> {
        let mut limited = (&mut *self.inner).take(n);
        let copied = io::copy(&mut limited, &mut io::sink())?;
        if copied < n {
            let offset = self.position() + copied;
            return Err(ParseError::TruncatedInput {
                offset,
                needed: n - copied,
            });
        }
        self.consumed += n;
        Ok(())
    }
}
