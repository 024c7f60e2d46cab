//! Snapshot fingerprints.

use sha2::{Digest, Sha256};

/// Hex SHA-256 fingerprint of a factory-data body.
///
/// A rendered view carries the fingerprint of the body it was built from, so
/// two views agree on their dataset exactly when their fingerprints match.
pub fn calculate_checksum(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
