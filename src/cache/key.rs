//! Cache Key Module
//!
//! Maps semantic identifiers (search queries, "trending", image URLs) to
//! filesystem-safe storage keys.

use std::fmt;

use sha2::{Digest, Sha256};

/// Number of identifier characters kept as a readable key prefix.
const PREFIX_CHARS: usize = 48;

/// Number of hex characters of the identifier digest appended to the prefix.
const DIGEST_HEX_CHARS: usize = 16;

// == Payload Kind ==
/// The kind of payload stored under a key; selects the file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Json,
    Image,
}

impl PayloadKind {
    pub fn suffix(self) -> &'static str {
        match self {
            PayloadKind::Json => ".json",
            PayloadKind::Image => ".jpg",
        }
    }
}

// == Cache Key ==
/// An opaque storage key, usable directly as a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the storage key for `identifier`.
    ///
    /// The key is a sanitized prefix of the identifier (characters outside
    /// `[A-Za-z0-9_-]` become `_`), a digest of the full identifier, and the
    /// payload suffix. The digest keeps identifiers that sanitize alike, such
    /// as `a/b` and `a?b`, apart, and bounds the key length.
    pub fn derive(identifier: &str, kind: PayloadKind) -> Self {
        let prefix: String = identifier
            .chars()
            .take(PREFIX_CHARS)
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let digest = Sha256::digest(identifier.as_bytes());
        let hash = hex::encode(digest);

        CacheKey(format!(
            "{}-{}{}",
            prefix,
            &hash[..DIGEST_HEX_CHARS],
            kind.suffix()
        ))
    }

    /// Rebuilds a key from a stored file name.
    pub fn from_file_name(name: impl Into<String>) -> Self {
        CacheKey(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
