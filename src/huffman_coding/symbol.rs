use std::fmt::Debug;
use std::hash::Hash;

/// An atomic unit of the alphabet being coded.
///
/// Symbols only need equality and hashing for coding. `BITS` fixes how wide each symbol is
/// in the persisted symbol stream, so that the stream can be cut back into symbols without
/// any separators.
pub trait Symbol: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Width of one symbol on the wire: a whole number of bytes, at most 32 bits. Padding
    /// in the last byte would otherwise read back as an extra symbol.
    const BITS: u8;

    /// The symbol as a wire word. Only the low `BITS` bits are written.
    fn to_word(self) -> u32;

    /// Rebuild a symbol from a wire word, or None if the word is not a valid symbol.
    fn from_word(word: u32) -> Option<Self>;
}

impl Symbol for u8 {
    const BITS: u8 = 8;

    fn to_word(self) -> u32 {
        self as u32
    }

    fn from_word(word: u32) -> Option<Self> {
        u8::try_from(word).ok()
    }
}

/// UTF-16 code units.
impl Symbol for u16 {
    const BITS: u8 = 16;

    fn to_word(self) -> u32 {
        self as u32
    }

    fn from_word(word: u32) -> Option<Self> {
        u16::try_from(word).ok()
    }
}

impl Symbol for char {
    const BITS: u8 = 32;

    fn to_word(self) -> u32 {
        self as u32
    }

    fn from_word(word: u32) -> Option<Self> {
        char::from_u32(word)
    }
}

#[cfg(test)]
mod test {
    use super::Symbol;

    #[test]
    fn char_word_test() {
        assert_eq!('a'.to_word(), 0x61);
        assert_eq!(char::from_word(0x1F600), Some('😀'));
        // Lone surrogates are not chars.
        assert_eq!(char::from_word(0xD800), None);
    }

    #[test]
    fn narrow_word_test() {
        assert_eq!(u8::from_word(0x100), None);
        assert_eq!(u16::from_word(0xFFFF), Some(0xFFFF));
        assert_eq!(<u16 as Symbol>::BITS, 16);
    }
}
