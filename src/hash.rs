// src/hash.rs

//! Content checksums for staging integrity.
//!
//! Digests are used only for equality comparison between a staged
//! artifact's metadata and the current state of a source file; tamper
//! resistance is not a goal. SHA-256 is the default. MD5 is retained so
//! headers written by the legacy shell tool (which fell back to `md5sum`
//! when `sha256sum` was missing) can still be verified.
//!
//! Recorded digests are tagged with their algorithm (`sha256:<hex>`);
//! untagged values are read as SHA-256 for backward compatibility, so a
//! header staged under one algorithm never spuriously mismatches under
//! another.

use crate::error::{Error, Result};
use md5::Md5;
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::str::FromStr;

/// Hash algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-256, the preferred digest for all new artifacts
    #[default]
    Sha256,

    /// MD5, accepted when verifying artifacts staged by the legacy tool
    Md5,
}

impl HashAlgorithm {
    /// Digest output length in bytes
    #[inline]
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Md5 => 16,
        }
    }

    /// Digest output length as a hex string
    #[inline]
    pub const fn hex_len(&self) -> usize {
        self.output_len() * 2
    }

    /// Algorithm name as used in digest prefixes
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Md5 => "md5",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "md5" | "md-5" => Ok(Self::Md5),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A digest value with the algorithm that produced it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    /// The algorithm used
    pub algorithm: HashAlgorithm,
    /// The digest as a lowercase hex string
    pub value: String,
}

impl Digest {
    /// Create a digest value, validating hex characters and length
    pub fn new(algorithm: HashAlgorithm, value: impl Into<String>) -> Result<Self> {
        let value: String = value.into();

        if value.len() != algorithm.hex_len() || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidDigest(value));
        }

        Ok(Self {
            algorithm,
            value: value.to_lowercase(),
        })
    }

    fn new_unchecked(algorithm: HashAlgorithm, value: String) -> Self {
        Self { algorithm, value }
    }

    /// Parse a digest string, with or without an algorithm tag.
    ///
    /// `sha256:abc...` and `md5:abc...` select the named algorithm;
    /// untagged values default to SHA-256 (legacy headers were untagged).
    pub fn parse_prefixed(s: &str) -> Result<Self> {
        if let Some((algo, hex)) = s.split_once(':') {
            let algorithm = algo.parse()?;
            Self::new(algorithm, hex)
        } else {
            Self::new(HashAlgorithm::Sha256, s)
        }
    }

    /// Format as an algorithm-tagged string (e.g. `sha256:abc...`)
    pub fn to_prefixed_string(&self) -> String {
        format!("{}:{}", self.algorithm.name(), self.value)
    }

    /// Recompute this digest's algorithm over `data` and compare.
    ///
    /// Comparing by recomputation means a header recorded under MD5 is
    /// verified under MD5 even though the tool now prefers SHA-256.
    pub fn matches(&self, data: &[u8]) -> bool {
        hash_bytes(self.algorithm, data).value == self.value
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Compute the digest of a byte slice with the given algorithm
pub fn hash_bytes(algorithm: HashAlgorithm, data: &[u8]) -> Digest {
    let value = match algorithm {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(data);
            format!("{:x}", hasher.finalize())
        }
        HashAlgorithm::Md5 => {
            let mut hasher = Md5::new();
            hasher.update(data);
            format!("{:x}", hasher.finalize())
        }
    };
    Digest::new_unchecked(algorithm, value)
}

/// Compute the default checksum over the exact byte stream given.
///
/// No newline normalization happens here; callers are responsible for
/// constructing the bytes consistently.
#[inline]
pub fn checksum(data: &[u8]) -> Digest {
    hash_bytes(HashAlgorithm::default(), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        let digest = hash_bytes(HashAlgorithm::Sha256, b"Hello, World!");
        assert_eq!(digest.algorithm, HashAlgorithm::Sha256);
        assert_eq!(
            digest.value,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_md5_known_value() {
        let digest = hash_bytes(HashAlgorithm::Md5, b"Hello, World!");
        assert_eq!(digest.algorithm, HashAlgorithm::Md5);
        assert_eq!(digest.value, "65a8e27d8879283831b664bd8b7f0ad4");
    }

    #[test]
    fn test_checksum_is_stable() {
        let a = checksum(b"same bytes");
        let b = checksum(b"same bytes");
        assert_eq!(a, b);
    }

    #[test]
    fn test_checksum_detects_single_byte_change() {
        assert_ne!(checksum(b"same bytes"), checksum(b"same byteZ"));
    }

    #[test]
    fn test_trailing_newline_is_significant() {
        // The service hashes the exact byte stream it is given.
        assert_ne!(checksum(b"body"), checksum(b"body\n"));
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!(
            "sha256".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sha256
        );
        assert_eq!(
            "SHA-256".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sha256
        );
        assert_eq!("md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert!("blake3".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_digest_validation() {
        assert!(Digest::new(HashAlgorithm::Sha256, "abc123").is_err());
        assert!(
            Digest::new(
                HashAlgorithm::Sha256,
                "gggg6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f",
            )
            .is_err()
        );
        assert!(
            Digest::new(
                HashAlgorithm::Sha256,
                "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f",
            )
            .is_ok()
        );
    }

    #[test]
    fn test_prefixed_round_trip() {
        let digest = checksum(b"data");
        let parsed = Digest::parse_prefixed(&digest.to_prefixed_string()).unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn test_unprefixed_defaults_to_sha256() {
        let digest = Digest::parse_prefixed(
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f",
        )
        .unwrap();
        assert_eq!(digest.algorithm, HashAlgorithm::Sha256);
    }

    #[test]
    fn test_matches_recomputes_with_recorded_algorithm() {
        let md5 = hash_bytes(HashAlgorithm::Md5, b"legacy content");
        assert!(md5.matches(b"legacy content"));
        assert!(!md5.matches(b"other content"));
    }
}
