use rand::RngCore;

/// URL-safe alphabet, 64 symbols so each character consumes exactly 6 bits.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Identifier length in the reference wire contract.
pub const ID_LEN: usize = 10;

/// Generate a fixed-length URL-safe identifier from the given byte source.
///
/// 10 characters at 6 bits each is 60 bits of entropy, which keeps the
/// collision probability below 2^-40 across a million issuances. The rng is
/// a parameter so tests can substitute a deterministic source.
pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| ALPHABET[(b & 0x3f) as usize] as char)
        .collect()
}

/// Check that a string is a well-formed identifier (fixed length, alphabet
/// members only). Used as path hygiene before ids become file names.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| ALPHABET.contains(&b))
}

/// Stateless identifier generator backed by the thread-local CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdGenerator;

impl IdGenerator {
    pub fn generate(&self) -> String {
        generate_with(&mut rand::thread_rng(), ID_LEN)
    }
}
