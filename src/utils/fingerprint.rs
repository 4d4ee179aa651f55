use sha2::{Digest, Sha256};

/// Idempotency key for a search: same song asked by the same requester maps
/// to the same key regardless of case or spacing.
#[must_use]
pub fn request_fingerprint(title: &str, artist: &str, requester: &str) -> String {
    let cleaned: String = [title, artist, requester]
        .concat()
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    let mut hasher = Sha256::new();
    hasher.update(cleaned.as_bytes());
    hex::encode(hasher.finalize())
}
