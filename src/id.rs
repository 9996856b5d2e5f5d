use sha2::{Digest, Sha256};
use time::OffsetDateTime;

/// The hour-bucket format fed into the submission id: UTC year, month,
/// day and hour, zero-padded, no separators.
const HOUR_BUCKET_FORMAT: &str = "%Y%m%d%H";

/// Hashes a value with SHA-256 and renders it as lowercase hex.
///
/// Unsalted and unkeyed: anyone who knows the pre-image can recompute
/// the digest, so treat this as content addressing rather than a
/// security control.
pub fn hash_sha256(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());

    hex::encode(hasher.finalize())
}

/// Derives the submission id for an email at the current UTC hour.
///
/// Submissions from the same email within the same UTC clock hour share
/// an id; once the hour boundary passes the id is no longer
/// reproducible. This is a coarse per-hour identity bucket, not a
/// unique request id. Caller-supplied ids bypass derivation entirely
/// and are never checked for collision.
pub fn derive_submission_id(email: &str) -> String {
    derive_submission_id_at(email, OffsetDateTime::now_utc())
}

/// Derives the submission id for an email at an explicit instant.
pub fn derive_submission_id_at(email: &str, at: OffsetDateTime) -> String {
    let bucket = at.format(HOUR_BUCKET_FORMAT);

    hash_sha256(&format!("{}{}", email, bucket))
}
