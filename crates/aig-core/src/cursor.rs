use crate::error::{CoreError, CoreResult};

/// Sequential reader over a byte slice, shared by the varint codec and the
/// AIGER decoder's header/driver/symbol-table parsing.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    off: usize,
}

impl<'a> Cursor<'a> {
    /// Builds a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, off: 0 }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.off
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.off)
    }

    /// Moves the cursor to an absolute offset.
    pub fn seek(&mut self, off: usize) {
        self.off = off.min(self.data.len());
    }

    /// Reads a single byte, advancing the cursor.
    pub fn read_u8(&mut self) -> CoreResult<u8> {
        let b = *self
            .data
            .get(self.off)
            .ok_or(CoreError::UnexpectedEof { needed: 1, at: self.off })?;
        self.off += 1;
        Ok(b)
    }

    /// Reads `n` raw bytes, advancing the cursor.
    pub fn read_bytes(&mut self, n: usize) -> CoreResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(CoreError::UnexpectedEof { needed: n, at: self.off });
        }
        let start = self.off;
        self.off += n;
        Ok(&self.data[start..self.off])
    }

    /// Reads bytes up to (not including) the next `b'\n'`, then consumes the
    /// newline itself. Used for the ASCII header line and driver tokens.
    pub fn read_line(&mut self) -> CoreResult<&'a [u8]> {
        let start = self.off;
        let rest = &self.data[start..];
        let nl = rest
            .iter()
            .position(|&b| b == b'\n')
            .ok_or(CoreError::UnexpectedEof { needed: 1, at: self.off })?;
        self.off = start + nl + 1;
        Ok(&self.data[start..start + nl])
    }

    /// Peeks at the next byte without advancing, if any remain.
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.off).copied()
    }
}
