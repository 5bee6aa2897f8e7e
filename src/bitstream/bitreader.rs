//! BitReader: reads packed bits, fixed-width words and length-prefixed records.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!
use std::io::{self, ErrorKind};

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

/// Reads a packed bitstream.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
}

impl<R: io::Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            bit_index: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> io::Result<bool> {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => {
                        self.buffer.clear();
                        self.cursor = 0;
                        return Err(e);
                    }
                }
            };
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            // Reset the cursor and bit index
            self.cursor = 0;
            self.bit_index = 0;
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// True when the source is exhausted at a byte boundary.
    pub fn at_end(&mut self) -> io::Result<bool> {
        if self.bit_index > 0 {
            return Ok(false);
        }
        Ok(!self.have_data()?)
    }

    /// Return Option<usize> of the next n bits (n <= 32), or None if the source ran dry
    /// before n bits could be read.
    pub fn bint(&mut self, mut n: usize) -> io::Result<Option<usize>> {
        /*
        Used for record lengths and symbol words. First finish any partial byte, then take
        whole bytes, then take the leading bits of one more byte.
        */
        let mut result = 0_usize;

        // Test if we have a partial byte of data. If we do, read from it.
        if self.bit_index > 0 {
            let needed = n.min(8 - self.bit_index);
            result = ((self.buffer[self.cursor] & BIT_MASK >> self.bit_index)
                >> (8 - self.bit_index - needed)) as usize;
            self.bit_index += needed;
            if self.bit_index == 8 {
                self.cursor += 1;
                self.bit_index = 0;
            }
            n -= needed;
            if n == 0 {
                return Ok(Some(result));
            }
        }
        // Byte aligned from here on. Get as many full bytes as we need.
        while n >= 8 {
            if !self.have_data()? {
                return Ok(None);
            }
            result = result << 8 | (self.buffer[self.cursor]) as usize;
            self.cursor += 1;
            n -= 8;
        }
        // If we still need a partial byte, get whatever bits we still need.
        if n > 0 {
            if !self.have_data()? {
                return Ok(None);
            }
            result = result << n | (self.buffer[self.cursor] >> (8 - n)) as usize;
            self.bit_index = n;
        }
        Ok(Some(result))
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bint(8)?.map(|byte| byte as u8))
    }

    /// Returns an Option<Vec<u8>> of n bytes, or None if the source ran dry first.
    pub fn bytes(&mut self, n: usize) -> io::Result<Option<Vec<u8>>> {
        let mut result: Vec<u8> = Vec::with_capacity(n.min(BUFFER_SIZE));
        for _ in 0..n {
            match self.byte()? {
                Some(byte) => result.push(byte),
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Reads one record written by BitWriter::add_record: a 32 bit byte count followed by
    /// that many bytes. Returns None at a clean end of stream. A record cut short is an
    /// UnexpectedEof error.
    pub fn record(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.at_end()? {
            return Ok(None);
        }
        let len = self
            .bint(32)?
            .ok_or_else(|| io::Error::new(ErrorKind::UnexpectedEof, "truncated record header"))?;
        let body = self.bytes(len)?.ok_or_else(|| {
            io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("record body shorter than {} bytes", len),
            )
        })?;
        Ok(Some(body))
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
