//! The bitstream module forms the I/O subsystem for the literal codec.
//!
//! Both persisted formats are sequences of bits that end up in byte-oriented storage. Bits
//! are always packed most significant bit first, and the last byte is padded with zeros.
//! Because padding zeros cannot be told apart from payload zeros, every bit container we
//! persist ends in a sentinel 1 bit (see [`bitset::BitSet`]).
//!
//! - bitpacker: packs individual bits and fixed-width words into bytes in memory.
//! - bitset: the sentinel-framed bit container shared by the tree and message formats.
//! - bitwriter: writes length-prefixed records and fixed-width words to any `Write` sink.
//! - bitreader: reads bits, words and records back from any `Read` source.
//!
pub mod bitpacker;
pub mod bitreader;
pub mod bitset;
pub mod bitwriter;
