//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use hufflit::compression::compress::{code_report, compress};
use hufflit::compression::decompress::expand;
use hufflit::tools::cli::{huffopts_init, Mode};
use hufflit::HuffmanError;

use log::{error, info, warn, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), HuffmanError> {
    // Available log levels are Error, Warn, Info, Debug, Trace. The command line narrows
    // this down with log::set_max_level.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Logger was already initialized.");
    }

    let options = huffopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Compress => compress(&options).map(|report| {
            if report.rejected > 0 {
                warn!(
                    "{} literals could not be coded and were left out.",
                    report.rejected
                );
            }
            println!("Stored {} literals.", report.accepted);
        }),
        Mode::Expand => expand(&options).map(|literals| {
            literals.iter().for_each(|l| println!("{}", l));
        }),
        Mode::Codes => code_report(&options).map(|report| print!("{}", report)),
    };

    match &result {
        Ok(()) => info!("Done.\n"),
        Err(e) => error!("{}", e),
    }
    result
}
