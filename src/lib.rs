//! Static Huffman coding for string literals.
//!
//! Builds an optimal prefix code from a table of symbol counts, encodes messages with it,
//! and stores both the code tree and the encoded messages in compact bit-level formats
//! that can be read back exactly, even though packed bytes do not remember how many
//! bits they really hold.
//!
//! Basic usage of the command line tool is as follows:
//!
//! `$> hufflit compress literals.txt -o out/`
//!
//! `$> hufflit expand out/`
//!
//! From code, the pieces compose like this:
//!
//! ```
//! use hufflit::compression::compress::Encoder;
//! use hufflit::compression::decompress::Decoder;
//! use hufflit::huffman_coding::freq_table::FrequencyTable;
//!
//! let table: FrequencyTable<char> = "abracadabra".chars().collect();
//! let encoder = Encoder::from_table(&table).unwrap();
//! let message = encoder.encode(&['c', 'a', 'b']).unwrap();
//!
//! let decoder = Decoder::new(encoder.tree().clone());
//! assert_eq!(decoder.decode(&message).unwrap(), vec!['c', 'a', 'b']);
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use error::{HuffmanError, Result};
