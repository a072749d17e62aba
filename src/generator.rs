use rand::RngExt;

/// Characters used for generated aliases: ASCII digits and letters without the
/// look-alikes `0`, `O`, `1`, `I` and `l`.
pub const ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Default length of a generated alias.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Source of candidate aliases.
///
/// Implementations do not touch storage; the store rejects collisions at insert
/// time and the service decides whether to retry.
pub trait GenerateAlias: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Produces random aliases drawn from [`ALPHABET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasGenerator;

impl AliasGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl GenerateAlias for AliasGenerator {
    /// Generate an alias of exactly `length` characters drawn from [`ALPHABET`].
    fn generate(&self, length: usize) -> String {
        let mut rng = rand::rng();
        (0..length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
