use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Seed for the weekly view. Not derived from data: every render of the
/// weekly composition in a session uses the same random stream.
pub const WEEKLY_SEED: u64 = 42;

/// Stable seed from a list of string parts (SHA-256, first 8 bytes).
///
/// Parts are separated by a unit separator so `["ab", "c"]` and `["a", "bc"]`
/// produce different seeds.
pub fn derive_seed<I, S>(parts: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            hasher.update([0x1fu8]);
        }
        hasher.update(part.as_ref().as_bytes());
    }
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
