//! The tools module provides the helpers around the codec.
//!
//! The tools are:
//! - cli: Command line interface and run options.
//! - freq_count: Frequency count of the characters in a set of literals.
//!
pub mod cli;
pub mod freq_count;
