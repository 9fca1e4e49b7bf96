//! Byte sources the framer pulls from
//!
//! The framer never blocks: it asks the source whether a byte is ready
//! before reading one.

/// A polled serial byte source
pub trait ByteSource {
    /// Error type for read failures
    type Error;

    /// Returns true when `read_byte` can return without waiting
    fn is_data_available(&mut self) -> bool;

    /// Read one byte
    fn read_byte(&mut self) -> Result<u8, Self::Error>;
}

/// Read past the end of a [`ChunkSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Exhausted;

/// Byte source over a chunk already received from a UART
#[derive(Debug, Clone)]
pub struct ChunkSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ChunkSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

impl ByteSource for ChunkSource<'_> {
    type Error = Exhausted;

    fn is_data_available(&mut self) -> bool {
        self.pos < self.bytes.len()
    }

    fn read_byte(&mut self) -> Result<u8, Exhausted> {
        let byte = *self.bytes.get(self.pos).ok_or(Exhausted)?;
        self.pos += 1;
        Ok(byte)
    }
}
