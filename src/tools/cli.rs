use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use crate::compression::StoragePaths;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Any -q wins: one keeps errors, a second silences everything. Otherwise each -v
    /// raises the level one step from Warnings.
    pub fn from_flags(quiet: u64, count: u64) -> Self {
        match quiet {
            0 => {}
            1 => return Verbosity::Errors,
            _ => return Verbosity::Quiet,
        }
        match count {
            0 => Verbosity::Warnings,
            1 => Verbosity::Info,
            2 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Compress, Expand, Codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Expand,
    Codes,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "hufflit",
    version,
    about = "Huffman coding for string literals",
    long_about = "
    Builds a static Huffman code from the characters of a set of literals (one per line),
    then stores the code tree and every encoded literal. The tree is stored as two files,
    its shape and its symbols; the literals go to a third file.")]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress noncritical messages (a 2nd -q silences errors too)
    #[clap(short = 'q', long = "quiet", action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode the literals in INPUT and store tree and messages in DIR
    Compress {
        /// File with one literal per line
        input: PathBuf,
        /// Output directory
        #[clap(short = 'o', long = "out-dir", default_value = ".")]
        dir: PathBuf,
        /// Count symbols from this file instead of INPUT; literals with other symbols are skipped
        #[clap(short = 'a', long = "alphabet")]
        alphabet: Option<PathBuf>,
        /// Overwrite existing output files
        #[clap(short = 'f', long = "force")]
        force: bool,
        /// Code literals as they are, without surrounding quotes
        #[clap(long = "raw")]
        raw: bool,
    },
    /// Decode every literal stored in DIR and print one per line
    Expand {
        /// Directory holding the stored files
        #[clap(default_value = ".")]
        dir: PathBuf,
        /// The literals were stored without surrounding quotes
        #[clap(long = "raw")]
        raw: bool,
    },
    /// Print the code for every symbol of INPUT and the total cost
    Codes {
        /// File with one literal per line
        input: PathBuf,
        /// Count literals as they are, without surrounding quotes
        #[clap(long = "raw")]
        raw: bool,
    },
}

#[derive(Debug)]
pub struct HuffOpts {
    /// Compress/Expand/Codes
    pub op_mode: Mode,
    /// File of literals to read for input
    pub input: Option<PathBuf>,
    /// Optional file to count symbols from instead of the input
    pub alphabet: Option<PathBuf>,
    /// Directory holding the stored files
    pub dir: PathBuf,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Wrap each literal in double quotes before counting and coding
    pub quoted: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            op_mode: Mode::Compress,
            input: None,
            alphabet: None,
            dir: PathBuf::from("."),
            force_overwrite: false,
            quoted: true,
            verbose: Verbosity::Warnings,
        }
    }

    /// Put command line information from CLAP into our internal structure.
    pub fn from_args(args: Args) -> Self {
        let mut opts = Self::new();
        opts.verbose = Verbosity::from_flags(args.quiet.into(), args.verbose.into());
        match args.command {
            Command::Compress {
                input,
                dir,
                alphabet,
                force,
                raw,
            } => {
                opts.op_mode = Mode::Compress;
                opts.input = Some(input);
                opts.dir = dir;
                opts.alphabet = alphabet;
                opts.force_overwrite = force;
                opts.quoted = !raw;
            }
            Command::Expand { dir, raw } => {
                opts.op_mode = Mode::Expand;
                opts.dir = dir;
                opts.quoted = !raw;
            }
            Command::Codes { input, raw } => {
                opts.op_mode = Mode::Codes;
                opts.input = Some(input);
                opts.quoted = !raw;
            }
        }
        opts
    }

    /// The stored files for this run.
    pub fn paths(&self) -> StoragePaths {
        StoragePaths::in_dir(&self.dir)
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the command line, set the log level and report what we are about to do.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from_args(Args::parse());
    log::set_max_level(opts.verbose.level_filter());

    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    if let Some(input) = &opts.input {
        info!("Getting input from the file {}", input.display());
    }
    info!("Stored files live in {}", opts.dir.display());
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compress_args_test() {
        let args = Args::parse_from([
            "hufflit", "-vv", "compress", "lits.txt", "-o", "out", "--force", "--raw",
        ]);
        let opts = HuffOpts::from_args(args);
        assert_eq!(opts.op_mode, Mode::Compress);
        assert_eq!(opts.input, Some(PathBuf::from("lits.txt")));
        assert_eq!(opts.dir, PathBuf::from("out"));
        assert!(opts.force_overwrite);
        assert!(!opts.quoted);
        assert_eq!(opts.verbose, Verbosity::Debug);
        assert_eq!(opts.paths().tree, PathBuf::from("out/tree.ser"));
    }

    #[test]
    fn expand_defaults_test() {
        let opts = HuffOpts::from_args(Args::parse_from(["hufflit", "expand", "-qq"]));
        assert_eq!(opts.op_mode, Mode::Expand);
        assert_eq!(opts.dir, PathBuf::from("."));
        assert!(opts.quoted);
        assert_eq!(opts.verbose, Verbosity::Quiet);
        assert_eq!(opts.verbose.level_filter(), LevelFilter::Off);
    }

    #[test]
    fn verbosity_test() {
        assert_eq!(Verbosity::from_flags(0, 0), Verbosity::Warnings);
        assert_eq!(Verbosity::from_flags(0, 9), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(1, 3), Verbosity::Errors);
        assert_eq!(Verbosity::from_flags(2, 0), Verbosity::Quiet);
    }

    #[test]
    fn errors_only_test() {
        let opts = HuffOpts::from_args(Args::parse_from(["hufflit", "-q", "codes", "in.txt"]));
        assert_eq!(opts.verbose, Verbosity::Errors);
        assert_eq!(opts.verbose.level_filter(), LevelFilter::Error);
    }
}
