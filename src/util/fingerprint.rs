use itertools::Itertools;
use sha2::{Digest, Sha256};

/// Deterministic fingerprint of one raw row, for downstream idempotent
/// imports. Pairs are sorted by column name so the hash is independent of
/// column order in the source file.
pub fn row_fingerprint<'a>(
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let joined = pairs
        .into_iter()
        .sorted()
        .map(|(k, v)| format!("{k}={v}"))
        .join("\u{1f}");
    let digest = Sha256::digest(joined.as_bytes());
    hex::encode(digest)
}
