//! SHA-256 hex digests for session tokens and translation fingerprints.

use sha2::{Digest, Sha256};

pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Fingerprint of the source texts a machine translation was made from.
///
/// Parts are separated by a unit separator so `["ab", "c"]` and
/// `["a", "bc"]` differ. `None` parts hash differently from empty ones.
pub fn source_fingerprint<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        match part {
            Some(text) => {
                hasher.update(b"s");
                hasher.update(text.as_bytes());
            }
            None => hasher.update(b"n"),
        }
        hasher.update([0x1f]);
    }
    format!("{:x}", hasher.finalize())
}
