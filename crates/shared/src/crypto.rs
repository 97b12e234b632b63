//! Hashing utilities for admin API keys.

use sha2::{Digest, Sha256};

/// Prefix every admin API key starts with.
pub const API_KEY_PREFIX: &str = "pa_";

/// Minimum key length: the prefix plus eight identifying characters.
pub const MIN_API_KEY_LEN: usize = API_KEY_PREFIX.len() + 8;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns the eight characters following `pa_`, used to identify a key in logs.
pub fn extract_key_prefix(key: &str) -> Option<&str> {
    if is_well_formed_key(key) {
        key.get(API_KEY_PREFIX.len()..MIN_API_KEY_LEN)
    } else {
        None
    }
}

/// Cheap structural check done before any database lookup.
pub fn is_well_formed_key(key: &str) -> bool {
    key.len() >= MIN_API_KEY_LEN && key.starts_with(API_KEY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_value() {
        assert_eq!(
            sha256_hex("test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        assert_eq!(sha256_hex("pa_same_key"), sha256_hex("pa_same_key"));
        assert_ne!(sha256_hex("pa_key_one"), sha256_hex("pa_key_two"));
    }

    #[test]
    fn test_extract_key_prefix() {
        assert_eq!(extract_key_prefix("pa_abcdefgh12345"), Some("abcdefgh"));
        assert_eq!(extract_key_prefix("pa_12345678"), Some("12345678"));
        assert_eq!(extract_key_prefix("pa_short"), None);
        assert_eq!(extract_key_prefix("pm_abcdefgh12345"), None);
        assert_eq!(extract_key_prefix(""), None);
    }

    #[test]
    fn test_is_well_formed_key() {
        assert!(is_well_formed_key("pa_abcdefgh"));
        assert!(!is_well_formed_key("pa_abcdefg"));
        assert!(!is_well_formed_key("PA_abcdefgh"));
    }
}
