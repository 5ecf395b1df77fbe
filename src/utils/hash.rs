//! Unified hashing utilities using FxHash.
//!
//! Uses `rustc_hash::FxHasher` for fast, deterministic hashing. The hash is
//! only used to name private cache files, so stability within one machine
//! is all that matters.
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let h = hash::compute("https://example.com/lib.js"); // -> u64
//! let name = hash::hex_name("https://example.com/lib.js"); // -> "3F0A..." (16 chars)
//! ```

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

/// Compute hash and return it as a fixed-width, 16-digit uppercase hex name.
#[inline]
pub fn hex_name<T: AsRef<[u8]> + ?Sized>(value: &T) -> String {
    format!("{:016X}", compute(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_deterministic() {
        assert_eq!(compute("same input"), compute("same input"));
        assert_ne!(compute("input a"), compute("input b"));
    }

    #[test]
    fn test_hex_name_fixed_width() {
        let name = hex_name("");
        assert_eq!(name.len(), 16);
        let name = hex_name("https://example.com/a/very/long/path/lib.js");
        assert_eq!(name.len(), 16);
        assert!(
            name.chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }
}
