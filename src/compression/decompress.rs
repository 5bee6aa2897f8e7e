use std::fs::File;
use std::io::{self, BufReader, Read};

use log::{error, info, trace};

use super::StoragePaths;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitset::BitSet;
use crate::error::{HuffmanError, Result};
use crate::huffman_coding::message_codec::{decode_message, EncodedMessage};
use crate::huffman_coding::symbol::Symbol;
use crate::huffman_coding::tree::CodeTree;
use crate::huffman_coding::tree_codec::{deserialize_tree, TreeRecord};
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::unquote;

/// Decodes messages against one tree. The tree is only read, so a Decoder can be shared
/// between threads.
#[derive(Clone, Debug)]
pub struct Decoder<S: Symbol> {
    tree: CodeTree<S>,
}

impl<S: Symbol> Decoder<S> {
    pub fn new(tree: CodeTree<S>) -> Self {
        Self { tree }
    }

    /// Rebuild the tree from a serialized record.
    pub fn from_record(record: &TreeRecord<S>) -> Result<Self> {
        Ok(Self::new(deserialize_tree(&record.structure, &record.symbols)?))
    }

    pub fn tree(&self) -> &CodeTree<S> {
        &self.tree
    }

    pub fn decode(&self, message: &EncodedMessage) -> Result<Vec<S>> {
        decode_message(&self.tree, message)
    }

    /// Decode every message. The first bad message fails the whole batch.
    pub fn decode_all(&self, messages: &[EncodedMessage]) -> Result<Vec<Vec<S>>> {
        messages.iter().map(|m| self.decode(m)).collect()
    }
}

/// A record cut short in the tree files is tree damage; anything else stays an I/O error.
fn tree_error(e: io::Error) -> HuffmanError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => HuffmanError::CorruptTree(e.to_string()),
        _ => HuffmanError::Io(e),
    }
}

/// A record cut short in the message file is stream damage.
fn stream_error(e: io::Error) -> HuffmanError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => HuffmanError::CorruptStream(e.to_string()),
        _ => HuffmanError::Io(e),
    }
}

/// Read the tree format back: one framed structure record, then the symbol words.
pub fn read_tree<S: Symbol, R1: Read, R2: Read>(structure: R1, symbols: R2) -> Result<TreeRecord<S>> {
    let mut br = BitReader::new(structure);
    let bytes = br
        .record()
        .map_err(tree_error)?
        .ok_or_else(|| HuffmanError::CorruptTree("structure stream is empty".to_string()))?;
    if br.record().map_err(tree_error)?.is_some() {
        return Err(HuffmanError::CorruptTree(
            "structure stream holds more than one record".to_string(),
        ));
    }
    let structure = BitSet::from_bytes(bytes);

    let mut br = BitReader::new(symbols);
    let mut words = Vec::new();
    while !br.at_end()? {
        let word = br.bint(S::BITS as usize)?.ok_or_else(|| {
            HuffmanError::CorruptTree(format!(
                "symbol stream ends inside symbol {}",
                words.len()
            ))
        })?;
        let symbol = S::from_word(word as u32).ok_or_else(|| {
            HuffmanError::CorruptTree(format!("{:#x} is not a valid symbol", word))
        })?;
        words.push(symbol);
    }
    trace!(
        "Read tree: {} structure bits, {} symbols.",
        structure.len(),
        words.len()
    );
    Ok(TreeRecord {
        structure,
        symbols: words,
    })
}

/// Read and rebuild a tree from its two streams.
pub fn load_tree<S: Symbol, R1: Read, R2: Read>(structure: R1, symbols: R2) -> Result<CodeTree<S>> {
    let record = read_tree(structure, symbols)?;
    deserialize_tree(&record.structure, &record.symbols)
}

/// Read framed message records until the stream is exhausted.
pub fn read_messages<R: Read>(source: R) -> Result<Vec<EncodedMessage>> {
    let mut br = BitReader::new(source);
    let mut messages = Vec::new();
    while let Some(bytes) = br.record().map_err(stream_error)? {
        messages.push(EncodedMessage::from_bytes(bytes));
        trace!("Read message {} at {}.", messages.len(), br.loc());
    }
    Ok(messages)
}

/// Open a stored set and return a decoder for it along with the stored messages.
pub fn load_files<S: Symbol>(paths: &StoragePaths) -> Result<(Decoder<S>, Vec<EncodedMessage>)> {
    let tree = load_tree(
        BufReader::new(File::open(&paths.tree)?),
        BufReader::new(File::open(&paths.symbols)?),
    )
    .map_err(|e| {
        error!(
            "Fatal error: {} / {} is not a valid stored tree.",
            paths.tree.display(),
            paths.symbols.display()
        );
        e
    })?;
    let messages = read_messages(BufReader::new(File::open(&paths.messages)?))?;
    info!(
        "Loaded a tree of {} symbols and {} messages.",
        tree.leaf_count(),
        messages.len()
    );
    Ok((Decoder::new(tree), messages))
}

/// Decode every literal stored in the directory named in opts.
pub fn expand(opts: &HuffOpts) -> Result<Vec<String>> {
    let (decoder, messages) = load_files::<char>(&opts.paths())?;
    let decoded = decoder.decode_all(&messages)?;
    Ok(decoded
        .into_iter()
        .map(|symbols| {
            let text: String = symbols.into_iter().collect();
            if opts.quoted {
                unquote(&text).to_string()
            } else {
                text
            }
        })
        .collect())
}
