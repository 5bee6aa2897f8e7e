//! The compression module ties the codec to storage.
//!
//! Compression happens in the following steps:
//! - Count symbols to get a frequency table (see tools::freq_count).
//! - Build the Huffman tree and derive the code table.
//! - Encode each message, rejecting any message with a symbol outside the table.
//! - Store the tree (structure and symbols) and the encoded messages.
//!
//! Expansion reads the tree back, then decodes every stored message against it.
//!
//! Three files make up one stored set: the messages, the tree structure and the tree
//! symbols. The two tree files only make sense together.

use std::path::{Path, PathBuf};

pub mod compress;
pub mod decompress;

/// Default file name for the encoded messages.
pub const FILE_LITERALS: &str = "strings.ser";
/// Default file name for the tree structure.
pub const FILE_TREE: &str = "tree.ser";
/// Default file name for the tree symbols.
pub const FILE_CHARS: &str = "chars.ser";

/// Where one stored set lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoragePaths {
    pub messages: PathBuf,
    pub tree: PathBuf,
    pub symbols: PathBuf,
}

impl StoragePaths {
    /// The default file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            messages: dir.join(FILE_LITERALS),
            tree: dir.join(FILE_TREE),
            symbols: dir.join(FILE_CHARS),
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [&self.messages, &self.tree, &self.symbols]
    }
}
