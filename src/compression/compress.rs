use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use super::StoragePaths;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::Result;
use crate::huffman_coding::codes::{generate_codes, CodeTable};
use crate::huffman_coding::freq_table::FrequencyTable;
use crate::huffman_coding::message_codec::{serialize_message, EncodedMessage};
use crate::huffman_coding::symbol::Symbol;
use crate::huffman_coding::tree::{build_tree, CodeTree};
use crate::huffman_coding::tree_codec::{serialize_tree, TreeRecord};
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::{freqs, literal_symbols};

/// Outcome of encoding a batch of messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub accepted: usize,
    pub rejected: usize,
}

/// Holds a tree, its code table and the messages encoded with them so far.
#[derive(Clone, Debug)]
pub struct Encoder<S: Symbol> {
    tree: CodeTree<S>,
    codes: CodeTable<S>,
    messages: Vec<EncodedMessage>,
}

impl<S: Symbol> Encoder<S> {
    /// Build the tree and code table for `freqs`.
    pub fn from_table(freqs: &FrequencyTable<S>) -> Result<Self> {
        let tree = build_tree(freqs)?;
        let codes = generate_codes(&tree);
        info!(
            "Built a code for {} symbols (longest code {} bits).",
            codes.len(),
            tree.depth().max(1)
        );
        Ok(Self {
            tree,
            codes,
            messages: Vec::new(),
        })
    }

    pub fn tree(&self) -> &CodeTree<S> {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable<S> {
        &self.codes
    }

    /// Messages queued for storage, in the order they were added.
    pub fn messages(&self) -> &[EncodedMessage] {
        &self.messages
    }

    /// Encode one message without queueing it.
    pub fn encode(&self, symbols: &[S]) -> Result<EncodedMessage> {
        serialize_message(&self.codes, symbols)
    }

    /// Encode one message and queue it. A rejected message leaves the queue untouched.
    pub fn add_message(&mut self, symbols: &[S]) -> Result<()> {
        let message = self.encode(symbols)?;
        self.messages.push(message);
        Ok(())
    }

    /// Encode and queue every message that can be coded. Messages with a symbol outside
    /// the table are skipped and counted.
    pub fn add_messages<I, M>(&mut self, inputs: I) -> BatchReport
    where
        I: IntoIterator<Item = M>,
        M: AsRef<[S]>,
    {
        let mut report = BatchReport::default();
        for (i, input) in inputs.into_iter().enumerate() {
            match self.add_message(input.as_ref()) {
                Ok(()) => report.accepted += 1,
                Err(e) => {
                    warn!("Message {} rejected: {}", i, e);
                    report.rejected += 1;
                }
            }
        }
        info!(
            "Encoded {} messages, rejected {}.",
            report.accepted, report.rejected
        );
        report
    }

    /// Write the tree as a matched pair: structure to one sink, symbols to the other.
    pub fn store_tree<W1: Write, W2: Write>(&self, structure: W1, symbols: W2) -> Result<()> {
        write_tree(&serialize_tree(&self.tree), structure, symbols)
    }

    /// Write every queued message to `sink`. Returns the number written.
    pub fn store_messages<W: Write>(&self, sink: W) -> Result<usize> {
        write_messages(&self.messages, sink)
    }

    /// Write tree and messages to the three files in `paths`. Without `force` an existing
    /// file is an error and nothing is written. The files are written next to their
    /// final names and renamed into place once all three are complete; on any failure
    /// everything this call created is removed again.
    pub fn store_files(&self, paths: &StoragePaths, force: bool) -> Result<()> {
        if !force {
            for path in paths.all() {
                refuse_existing(path)?;
            }
        }
        let staged = StoragePaths {
            messages: staging(&paths.messages),
            tree: staging(&paths.tree),
            symbols: staging(&paths.symbols),
        };

        let result = self.write_files(&staged).and_then(|written| {
            publish(&staged, paths)?;
            Ok(written)
        });
        match result {
            Ok(written) => {
                info!(
                    "Stored tree in {} and {}, {} messages in {}.",
                    paths.tree.display(),
                    paths.symbols.display(),
                    written,
                    paths.messages.display()
                );
                Ok(())
            }
            Err(e) => {
                error!("Storing failed, removing partial output: {}", e);
                staged.all().iter().for_each(|path| discard(path));
                Err(e)
            }
        }
    }

    fn write_files(&self, paths: &StoragePaths) -> Result<usize> {
        self.store_tree(create(&paths.tree)?, create(&paths.symbols)?)?;
        self.store_messages(create(&paths.messages)?)
    }
}

/// Tree format: the structure as one framed record, the symbols as fixed-width words.
pub fn write_tree<S: Symbol, W1: Write, W2: Write>(
    record: &TreeRecord<S>,
    structure: W1,
    symbols: W2,
) -> Result<()> {
    let mut bw = BitWriter::new(structure);
    bw.add_record(record.structure.as_bytes())?;
    bw.finish()?;

    let mut bw = BitWriter::new(symbols);
    record
        .symbols
        .iter()
        .for_each(|s| bw.out_word(s.to_word(), S::BITS));
    bw.finish()?;
    debug!(
        "Wrote tree: {} structure bytes, {} symbols of {} bits.",
        record.structure.as_bytes().len(),
        record.symbols.len(),
        S::BITS
    );
    Ok(())
}

/// Message format: one framed record per message, back to back.
pub fn write_messages<W: Write>(messages: &[EncodedMessage], sink: W) -> Result<usize> {
    let mut bw = BitWriter::new(sink);
    for message in messages {
        bw.add_record(message.as_bytes())?;
    }
    let written = bw.records();
    bw.finish()?;
    Ok(written)
}

fn refuse_existing(path: &Path) -> io::Result<()> {
    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to replace it)", path.display()),
        ));
    }
    Ok(())
}

/// Sibling path a file is written to before it is renamed into place.
fn staging(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Rename every staged file to its final name. Once one file has been replaced an older
/// set is broken as well, so a later failure removes all three final files.
fn publish(staged: &StoragePaths, paths: &StoragePaths) -> io::Result<()> {
    for (i, (from, to)) in staged.all().into_iter().zip(paths.all()).enumerate() {
        if let Err(e) = fs::rename(from, to) {
            if i > 0 {
                paths.all().iter().for_each(|path| discard(path));
            }
            return Err(e);
        }
        debug!("Moved {} into place.", to.display());
    }
    Ok(())
}

fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed {}.", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove {}: {}", path.display(), e),
    }
}

fn create(path: &Path) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Compress the literals in the input file named in opts (one per line) and store them in
/// the output directory.
pub fn compress(opts: &HuffOpts) -> Result<BatchReport> {
    let input = opts.input.as_ref().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "no input file was given")
    })?;
    let text = fs::read_to_string(input)?;

    let table = match &opts.alphabet {
        Some(path) => freqs(fs::read_to_string(path)?.lines(), opts.quoted),
        None => freqs(text.lines(), opts.quoted),
    };
    info!(
        "Counted {} distinct symbols over {} occurrences.",
        table.len(),
        table.total()
    );

    let mut encoder = Encoder::from_table(&table)?;
    let report = encoder.add_messages(text.lines().map(|l| literal_symbols(l, opts.quoted)));
    encoder.store_files(&opts.paths(), opts.force_overwrite)?;
    Ok(report)
}

/// List the code for every symbol in the input file named in opts, with the total cost.
pub fn code_report(opts: &HuffOpts) -> Result<String> {
    let input = opts.input.as_ref().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "no input file was given")
    })?;
    let text = fs::read_to_string(input)?;
    let table = freqs(text.lines(), opts.quoted);
    let encoder = Encoder::from_table(&table)?;

    let cost = encoder.codes().weighted_cost(&table);
    let mut report = encoder.codes().listing();
    report.push_str(&format!(
        "{} symbols, {} occurrences, {} bits ({:.3} bits per symbol)\n",
        table.len(),
        table.total(),
        cost,
        cost as f64 / table.total() as f64
    ));
    Ok(report)
}
