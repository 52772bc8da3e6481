//! Terminal implementation of the Console contract
//!
//! Renders lines and tables, prompts for input, and drives the progress
//! bar for transfers.

mod term;

pub use term::TermConsole;
