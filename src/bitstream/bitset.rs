//! A bit container whose length survives byte-oriented storage.
//!
//! Packed bits lose their exact length once they are written as whole bytes: the zero
//! padding of the last byte looks exactly like payload zeros. A `BitSet` therefore always
//! carries one extra 1 bit after its payload. Its reported length is the position of the
//! last set bit plus one, and the payload is everything before that sentinel.

use std::fmt::{self, Display, Formatter};

use super::bitpacker::BitPacker;

/// Sentinel-terminated bit container, packed most significant bit first.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BitSet {
    bytes: Vec<u8>,
    /// Reported length: last set bit + 1. Includes the sentinel.
    len: usize,
}

impl BitSet {
    /// Pack `payload` and append the sentinel bit.
    pub fn with_sentinel(payload: &[bool]) -> Self {
        let mut bp = BitPacker::new(payload.len() / 8 + 1);
        bp.out_bits(payload);
        bp.out_bit(true);
        let len = bp.bit_len();
        bp.flush();
        Self {
            bytes: bp.output,
            len,
        }
    }

    /// Rebuild a container from raw packed bytes. The length is recovered from the last
    /// set bit; trailing zero bytes are dropped.
    pub fn from_bytes(mut bytes: Vec<u8>) -> Self {
        let len = match bytes.iter().rposition(|&b| b != 0) {
            Some(i) => i * 8 + 8 - bytes[i].trailing_zeros() as usize,
            None => 0,
        };
        bytes.truncate((len + 7) / 8);
        Self { bytes, len }
    }

    /// Reported length in bits, sentinel included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no bit is set at all, which means there is no sentinel either.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of payload bits, or None if the container holds no sentinel.
    pub fn payload_len(&self) -> Option<usize> {
        self.len.checked_sub(1)
    }

    /// Bit at `index`. Anything past the reported length reads as 0.
    pub fn get(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.bytes[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// Iterate over the payload bits (the sentinel is not included).
    pub fn payload(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.payload_len().unwrap_or(0)).map(move |i| self.get(i))
    }

    /// Packed bytes, sentinel included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Display for BitSet {
    /// Payload as a string of 0s and 1s.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for bit in self.payload() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
