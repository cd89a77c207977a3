//! Resource identifier generation.

/// Length in hex characters of a generated resource identifier.
pub const ID_LENGTH: usize = 16;

/// Generate a new resource identifier.
///
/// The token is the truncated hex digest of a hash over a fresh block of
/// cryptographically random bytes. Do not assume anything about the data
/// structure: successive calls are not ordered, sortable, or related in any
/// way beyond being practically unique and `ID_LENGTH` characters long.
pub fn next_id() -> String {
    let seed = uuid::Uuid::new_v4();
    let digest = blake3::hash(seed.as_bytes());
    digest.to_hex()[..ID_LENGTH].to_string()
}
