use std::fs;

use hufflit::compression::compress::{code_report, compress, Encoder};
use hufflit::compression::decompress::{expand, load_files};
use hufflit::compression::StoragePaths;
use hufflit::tools::cli::{HuffOpts, Mode};
use hufflit::tools::freq_count::{freqs, literal_symbols};
use hufflit::HuffmanError;

const LITERALS: &str = "hello world\nabracadabra\n\nsay \"hi\"\nhello\n";

fn opts_for(dir: &tempfile::TempDir, input: &str) -> HuffOpts {
    let input_path = dir.path().join("literals.txt");
    fs::write(&input_path, input).unwrap();
    let mut opts = HuffOpts::new();
    opts.input = Some(input_path);
    opts.dir = dir.path().to_path_buf();
    opts
}

#[test]
fn compress_then_expand() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = opts_for(&dir, LITERALS);

    let report = compress(&opts).unwrap();
    assert_eq!(report.accepted, 5);
    assert_eq!(report.rejected, 0);
    for path in opts.paths().all() {
        assert!(path.exists(), "{} missing", path.display());
    }

    opts.op_mode = Mode::Expand;
    let literals = expand(&opts).unwrap();
    assert_eq!(literals, LITERALS.lines().collect::<Vec<_>>());
}

#[test]
fn raw_mode_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = opts_for(&dir, "naïve\ncafé\n");
    opts.quoted = false;
    compress(&opts).unwrap();
    assert_eq!(expand(&opts).unwrap(), vec!["naïve", "café"]);
}

#[test]
fn alphabet_file_rejects_foreign_literals() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = opts_for(&dir, "abc\nxyz\ncab\n");
    let alphabet = dir.path().join("alphabet.txt");
    fs::write(&alphabet, "aabbcc\n").unwrap();
    opts.alphabet = Some(alphabet);

    let report = compress(&opts).unwrap();
    assert_eq!(report.accepted, 2);
    assert_eq!(report.rejected, 1);
    assert_eq!(expand(&opts).unwrap(), vec!["abc", "cab"]);
}

#[test]
fn second_compress_needs_force() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = opts_for(&dir, LITERALS);
    compress(&opts).unwrap();

    let err = compress(&opts).unwrap_err();
    assert!(matches!(err, HuffmanError::Io(_)));

    opts.force_overwrite = true;
    compress(&opts).unwrap();
    assert_eq!(expand(&opts).unwrap().len(), 5);
}

#[test]
fn encoder_files_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let paths = StoragePaths::in_dir(dir.path());
    let words = ["one", "two", "three", "", "eleven"];

    let table = freqs(words, true);
    let mut encoder = Encoder::from_table(&table).unwrap();
    let report = encoder.add_messages(words.iter().map(|w| literal_symbols(w, true)));
    assert_eq!(report.accepted, words.len());
    encoder.store_files(&paths, false).unwrap();

    let (decoder, messages) = load_files::<char>(&paths).unwrap();
    assert!(decoder.tree().is_isomorphic(encoder.tree()));
    assert_eq!(messages, encoder.messages());
    let decoded = decoder.decode_all(&messages).unwrap();
    for (word, symbols) in words.iter().zip(decoded) {
        assert_eq!(symbols, literal_symbols(word, true));
    }
}

#[test]
fn damaged_tree_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let opts = opts_for(&dir, LITERALS);
    compress(&opts).unwrap();

    let paths = opts.paths();
    let mut symbols = fs::read(&paths.symbols).unwrap();
    symbols.truncate(symbols.len() - 4);
    fs::write(&paths.symbols, symbols).unwrap();

    let err = expand(&opts).unwrap_err();
    assert!(matches!(err, HuffmanError::CorruptTree(_)));
}

#[test]
fn missing_files_are_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let paths = StoragePaths::in_dir(dir.path());
    assert!(matches!(
        load_files::<char>(&paths),
        Err(HuffmanError::Io(_))
    ));
}

#[test]
fn empty_input_has_no_alphabet() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = opts_for(&dir, "");
    opts.quoted = false;
    assert!(matches!(compress(&opts), Err(HuffmanError::EmptyAlphabet)));
}

#[test]
fn code_report_lists_every_symbol() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = opts_for(&dir, "aaab\n");
    opts.op_mode = Mode::Codes;
    opts.quoted = false;

    let report = code_report(&opts).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("2 symbols, 4 occurrences, 4 bits"));
}
