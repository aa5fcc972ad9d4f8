//! Command-line interface module
//!
//! Handles argument parsing for the `getpot` binary

pub mod args;

pub use args::*;
