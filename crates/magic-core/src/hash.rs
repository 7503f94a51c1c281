//! Deterministic, order-independent hashing helpers, used for the
//! result cache key (keyed by input path) and for content fingerprints
//! during near-duplicate segment dedup.

use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use crate::geometry::Point;

/// Computes a stable SipHash-1-3 digest over an ordered point sequence,
/// using fixed zero keys so the value is reproducible across platforms
/// and process runs.
pub fn hash_points(points: &[Point]) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_usize(points.len());
    for p in points {
        hasher.write_i32(p.x);
        hasher.write_i32(p.y);
    }
    hasher.finish()
}

/// Computes a stable digest over raw bytes (e.g. a cache key path or a
/// serialized AST for idempotency checks).
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write(bytes);
    hasher.finish()
}
