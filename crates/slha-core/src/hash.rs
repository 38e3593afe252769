use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::document::Document;
use crate::errors::SlhaError;
use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash for the provided serialisable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, SlhaError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(hex::encode(Sha256::digest(bytes)))
}

/// Canonical hash of a document's blocks and decays.
///
/// Object keys are sorted before hashing, so documents holding the same
/// blocks in a different order share a hash.
pub fn canonical_document_hash(document: &Document) -> Result<String, SlhaError> {
    stable_hash_string(document)
}
