//! Output buffers the engine can write into.
//!
//! The engine only needs to reserve room, append single bytes and cut the
//! buffer back to a known length. [`ByteSink`] captures exactly that, so any
//! container can receive encoded or decoded output without an intermediate
//! allocation.

/// Growable-buffer capability used by the encode and decode drivers.
pub trait ByteSink {
    /// Current number of bytes held by the sink.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes room for at least `additional` more bytes.
    fn reserve(&mut self, additional: usize);

    /// Appends one byte.
    fn push_byte(&mut self, byte: u8);

    /// Appends a run of bytes.
    fn push_slice(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push_byte(byte);
        }
    }

    /// Cuts the sink back to exactly `len` bytes.
    fn finalize(&mut self, len: usize);
}

impl ByteSink for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional);
    }

    #[inline]
    fn push_byte(&mut self, byte: u8) {
        self.push(byte);
    }

    fn push_slice(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn finalize(&mut self, len: usize) {
        self.truncate(len);
    }
}

/// Text output. Every byte the engine writes (symbols, padding, line breaks)
/// is ASCII, so each byte is exactly one `char`.
impl ByteSink for String {
    fn len(&self) -> usize {
        String::len(self)
    }

    fn reserve(&mut self, additional: usize) {
        String::reserve(self, additional);
    }

    #[inline]
    fn push_byte(&mut self, byte: u8) {
        debug_assert!(byte.is_ascii());
        self.push(char::from(byte));
    }

    fn finalize(&mut self, len: usize) {
        self.truncate(len);
    }
}

/// Fixed-capacity sink over a caller-provided slice.
///
/// Writing past the end of the slice panics; callers size the slice with the
/// codec's size calculators first.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        SliceSink { buf, pos: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl ByteSink for SliceSink<'_> {
    fn len(&self) -> usize {
        self.pos
    }

    fn reserve(&mut self, additional: usize) {
        assert!(
            self.pos + additional <= self.buf.len(),
            "destination holds {} bytes but {} are required",
            self.buf.len(),
            self.pos + additional
        );
    }

    #[inline]
    fn push_byte(&mut self, byte: u8) {
        self.buf[self.pos] = byte;
        self.pos += 1;
    }

    fn push_slice(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    fn finalize(&mut self, len: usize) {
        self.pos = len.min(self.pos);
    }
}
