#![deny(missing_docs)]
#![doc = "Document model, structured errors and canonical hashing shared by the SLHA crates."]

/// Block, entry and decay table types.
pub mod document;
/// Structured error payloads.
pub mod errors;
/// Canonical hashing helpers.
pub mod hash;
/// Canonical JSON helpers.
pub mod serde;

pub use document::{Block, Decay, DecayChannel, Document, Entry, Index};
pub use errors::{ErrorInfo, SlhaError};
pub use hash::{canonical_document_hash, stable_hash_string};
