#![deny(missing_docs)]
#![doc = "Reader and writer for the SUSY Les Houches Accord text format."]

/// Line oriented SLHA reader.
pub mod reader;
/// SLHA text writer.
pub mod writer;

pub use reader::{parse_float, parse_str, read_file};
pub use writer::{format_value, write_document, write_file};
