//! Error types for tree construction, encoding, decoding and storage.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;

/// Every failure the codec can report. None of these are retried internally; they
/// describe bad input or damaged data, not transient conditions.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// The frequency table holds no symbols, so there is nothing to build a tree from.
    #[error("cannot build a code tree from an empty alphabet")]
    EmptyAlphabet,

    /// A symbol was given a count of zero.
    #[error("symbol {symbol} has a zero frequency")]
    ZeroFrequency { symbol: String },

    /// A message contained a symbol that has no code. The whole message is rejected.
    #[error("symbol {symbol} at position {position} has no code in the table")]
    UnknownSymbol { symbol: String, position: usize },

    /// The structural bitstream and symbol stream do not describe a valid tree.
    #[error("corrupt tree: {0}")]
    CorruptTree(String),

    /// An encoded message is truncated or mis-framed.
    #[error("corrupt message stream: {0}")]
    CorruptStream(String),

    /// The underlying channel could not be opened, read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod test {
    use super::HuffmanError;

    #[test]
    fn display_test() {
        let err = HuffmanError::UnknownSymbol {
            symbol: "'c'".to_string(),
            position: 1,
        };
        assert_eq!(
            err.to_string(),
            "symbol 'c' at position 1 has no code in the table"
        );
        assert_eq!(
            HuffmanError::CorruptStream("truncated".into()).to_string(),
            "corrupt message stream: truncated"
        );
    }

    #[test]
    fn io_conversion_test() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: HuffmanError = io.into();
        assert!(matches!(err, HuffmanError::Io(_)));
    }
}
