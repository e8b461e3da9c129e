//! Bytecode stream buffer
//!
//! An owned growable byte buffer with an explicit read/write cursor. The
//! compiler needs more than append-only output: backpatching jump targets
//! requires absolute-offset overwrite, and run compression and loop
//! elimination require truncating speculatively emitted bytes. The VM uses
//! the same buffer read-only and repositions only via [`BytecodeStream::seek`].

use super::opcode::OPERAND_SIZE;

/// A random-access, appendable bytecode buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BytecodeStream {
    data: Vec<u8>,
    pos: usize,
}

impl BytecodeStream {
    /// Create an empty stream with the cursor at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing bytecode bytes, cursor at 0
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    /// Total length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the stream holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position
    pub fn tell(&self) -> usize {
        self.pos
    }

    /// Reposition the cursor to an absolute offset
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Reposition the cursor to the start
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Append bytes at the end, leaving the cursor past them
    pub fn append(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
        self.pos = self.data.len();
    }

    /// Overwrite previously written bytes at an absolute offset
    ///
    /// Does not move the cursor. The range must already exist; this is a
    /// backpatch primitive, not a resizing write.
    pub fn write_at(&mut self, offset: usize, bytes: &[u8]) {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Discard everything at and past `offset`, clamping the cursor to it
    pub fn truncate_to(&mut self, offset: usize) {
        self.data.truncate(offset);
        self.pos = self.pos.min(offset);
    }

    /// Read the byte at an absolute offset without moving the cursor
    pub fn byte_at(&self, offset: usize) -> u8 {
        self.data[offset]
    }

    /// Read one byte at the cursor, advancing past it
    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Read a 4-byte big-endian operand at the cursor, advancing past it
    pub fn read_operand(&mut self) -> Option<u32> {
        let bytes = self.data.get(self.pos..self.pos + OPERAND_SIZE)?;
        let value = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        self.pos += OPERAND_SIZE;
        Some(value)
    }

    /// Borrow the raw bytecode bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the stream, yielding the raw bytecode bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
