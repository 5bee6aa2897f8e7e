//! Encoding and decoding of single messages.
//!
//! An encoded message is the codes of its symbols, back to back, followed by a sentinel 1
//! bit. Decoding walks the tree from the root one bit per edge and emits a symbol each time
//! it lands on a leaf. A message must end exactly at the root: ending part way down the
//! tree means the bits were cut short or framed wrongly.

use log::trace;

use super::codes::CodeTable;
use super::symbol::Symbol;
use super::tree::{CodeTree, NodeData};
use crate::bitstream::bitset::BitSet;
use crate::error::{HuffmanError, Result};

/// One encoded message, sentinel included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedMessage {
    bits: BitSet,
}

impl EncodedMessage {
    pub fn from_bitset(bits: BitSet) -> Self {
        Self { bits }
    }

    /// Rebuild a message from its packed bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_bitset(BitSet::from_bytes(bytes))
    }

    pub fn bits(&self) -> &BitSet {
        &self.bits
    }

    /// Number of code bits, not counting the sentinel.
    pub fn payload_len(&self) -> Option<usize> {
        self.bits.payload_len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }
}

/// Concatenate the codes for `symbols`. Fails on the first symbol without a code, before
/// any output is produced.
pub fn encode_bits<S: Symbol>(table: &CodeTable<S>, symbols: &[S]) -> Result<Vec<bool>> {
    let codes = symbols
        .iter()
        .enumerate()
        .map(|(position, symbol)| {
            table
                .get(symbol)
                .ok_or_else(|| HuffmanError::UnknownSymbol {
                    symbol: format!("{:?}", symbol),
                    position,
                })
        })
        .collect::<Result<Vec<&[bool]>>>()?;
    Ok(codes.concat())
}

/// Encode `symbols` and frame the result with a sentinel bit.
pub fn serialize_message<S: Symbol>(table: &CodeTable<S>, symbols: &[S]) -> Result<EncodedMessage> {
    let bits = encode_bits(table, symbols)?;
    trace!(
        "Encoded {} symbols into {} bits.",
        symbols.len(),
        bits.len()
    );
    Ok(EncodedMessage::from_bitset(BitSet::with_sentinel(&bits)))
}

/// Decode a message against the tree it was encoded with.
pub fn decode_message<S: Symbol>(tree: &CodeTree<S>, message: &EncodedMessage) -> Result<Vec<S>> {
    let bits = message.bits();
    let end = bits.payload_len().ok_or_else(|| {
        HuffmanError::CorruptStream("encoded message has no end marker".to_string())
    })?;
    let root = tree.root();
    let mut out = Vec::new();

    // A lone leaf has no edges; each of its symbols was coded as a single 0.
    if let NodeData::Leaf(symbol) = tree.data(root) {
        for cursor in 0..end {
            if bits.get(cursor) {
                return Err(HuffmanError::CorruptStream(format!(
                    "bit {} is set but the only code is 0",
                    cursor
                )));
            }
            out.push(*symbol);
        }
        return Ok(out);
    }

    let mut node = root;
    for cursor in 0..end {
        if let NodeData::Kids(left, right) = tree.data(node) {
            node = if bits.get(cursor) { *right } else { *left };
        }
        if let NodeData::Leaf(symbol) = tree.data(node) {
            out.push(*symbol);
            node = root;
        }
    }

    if node != root {
        return Err(HuffmanError::CorruptStream(format!(
            "message ends inside a code after {} bits",
            end
        )));
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::codes::generate_codes;
    use crate::huffman_coding::freq_table::FrequencyTable;
    use crate::huffman_coding::tree::build_tree;

    fn classic() -> (CodeTree<char>, CodeTable<char>) {
        let freqs = FrequencyTable::from_counts([
            ('a', 5),
            ('b', 9),
            ('c', 12),
            ('d', 13),
            ('e', 16),
            ('f', 45),
        ])
        .unwrap();
        let tree = build_tree(&freqs).unwrap();
        let table = generate_codes(&tree);
        (tree, table)
    }

    #[test]
    fn round_trip_test() {
        let (tree, table) = classic();
        let input: Vec<char> = "facedbeef".chars().collect();
        let message = serialize_message(&table, &input).unwrap();
        assert_eq!(decode_message(&tree, &message).unwrap(), input);

        // Through packed bytes, as it would come back from storage.
        let stored = EncodedMessage::from_bytes(message.as_bytes().to_vec());
        assert_eq!(decode_message(&tree, &stored).unwrap(), input);
    }

    #[test]
    fn trailing_zero_codes_test() {
        // 'f' is coded "0", so this message is all zeros before the sentinel.
        let (tree, table) = classic();
        let input = vec!['f'; 11];
        let message = serialize_message(&table, &input).unwrap();
        assert_eq!(message.payload_len(), Some(11));
        let stored = EncodedMessage::from_bytes(message.as_bytes().to_vec());
        assert_eq!(decode_message(&tree, &stored).unwrap(), input);
    }

    #[test]
    fn layout_test() {
        let (_, table) = classic();
        let message = serialize_message(&table, &['a', 'f']).unwrap();
        assert_eq!(message.bits().to_string(), "11000");
        assert_eq!(message.as_bytes(), &[0b1100_0100]);
    }

    #[test]
    fn single_symbol_test() {
        let freqs = FrequencyTable::from_counts([('x', 10)]).unwrap();
        let tree = build_tree(&freqs).unwrap();
        let table = generate_codes(&tree);
        let input = vec!['x'; 4];
        let message = serialize_message(&table, &input).unwrap();
        assert_eq!(message.bits().to_string(), "0000");
        assert_eq!(decode_message(&tree, &message).unwrap(), input);

        let bad = EncodedMessage::from_bitset(BitSet::with_sentinel(&[false, true]));
        assert!(matches!(
            decode_message(&tree, &bad),
            Err(HuffmanError::CorruptStream(_))
        ));
    }

    #[test]
    fn unknown_symbol_test() {
        let freqs = FrequencyTable::from_counts([('a', 1), ('b', 1)]).unwrap();
        let table = generate_codes(&build_tree(&freqs).unwrap());
        match serialize_message(&table, &['a', 'c']) {
            Err(HuffmanError::UnknownSymbol { symbol, position }) => {
                assert_eq!(symbol, "'c'");
                assert_eq!(position, 1);
            }
            other => panic!("expected UnknownSymbol, got {:?}", other),
        }
    }

    #[test]
    fn truncated_message_test() {
        let (tree, table) = classic();
        // "b" is 1101: keep only the first two bits.
        let full = encode_bits(&table, &['f', 'b']).unwrap();
        assert_eq!(full.len(), 5);
        let cut = EncodedMessage::from_bitset(BitSet::with_sentinel(&full[..3]));
        assert!(matches!(
            decode_message(&tree, &cut),
            Err(HuffmanError::CorruptStream(_))
        ));
    }

    #[test]
    fn empty_message_test() {
        let (tree, table) = classic();
        let message = serialize_message(&table, &[]).unwrap();
        assert_eq!(message.payload_len(), Some(0));
        assert!(decode_message(&tree, &message).unwrap().is_empty());

        let unframed = EncodedMessage::from_bytes(vec![0, 0]);
        assert!(matches!(
            decode_message(&tree, &unframed),
            Err(HuffmanError::CorruptStream(_))
        ));
    }
}
