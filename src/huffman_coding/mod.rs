//! The huffman module builds the code and implements both wire formats.
//!
//! The scheme is static: one frequency table gives one tree, the tree gives one code
//! table, and every message is coded against that table.
//!
//! - symbol: what can be coded, and how wide it is on the wire.
//! - freq_table: symbol counts in first-seen order.
//! - tree: the arena code tree and the Huffman construction.
//! - codes: code table derived from a tree.
//! - tree_codec: tree to (structural bits, symbols) and back.
//! - message_codec: symbols to a sentinel-framed message and back.
//!

pub mod codes;
pub mod freq_table;
pub mod message_codec;
pub mod symbol;
pub mod tree;
pub mod tree_codec;
