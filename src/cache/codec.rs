//! Codec Module
//!
//! Serializers that parameterize the generic cache. A codec decides how an
//! entry is laid out in storage and where its write timestamp lives.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{CacheEntry, CacheKey, EntryMetadata, PayloadKind};
use crate::error::{CacheError, Result};

/// Encodes cache entries to bytes and back.
pub trait Codec: Send + Sync + 'static {
    type Value: Clone + Send + Sync + 'static;

    /// Payload kind, which selects the key suffix.
    fn kind(&self) -> PayloadKind;

    fn encode(&self, entry: &CacheEntry<Self::Value>) -> Result<Vec<u8>>;

    /// Decodes stored bytes. `meta` is what the backend recorded for the
    /// entry; codecs that embed the timestamp ignore it.
    fn decode(
        &self,
        key: &CacheKey,
        bytes: &[u8],
        meta: &EntryMetadata,
    ) -> Result<CacheEntry<Self::Value>>;

    /// Write time of an entry judged from backend metadata alone.
    ///
    /// None when the timestamp is inside the payload and the entry has to be
    /// read and decoded to learn it.
    fn written_at_from_metadata(
        &self,
        _key: &CacheKey,
        _meta: &EntryMetadata,
    ) -> Option<Result<DateTime<Utc>>> {
        None
    }

    /// Turns a freshly fetched network payload into a value.
    fn from_payload(&self, payload: &[u8]) -> std::result::Result<Self::Value, String>;
}

// == JSON Codec ==
/// Stores the whole `CacheEntry<T>` as JSON, timestamp included.
pub struct JsonCodec<T> {
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Codec for JsonCodec<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Value = T;

    fn kind(&self) -> PayloadKind {
        PayloadKind::Json
    }

    fn encode(&self, entry: &CacheEntry<T>) -> Result<Vec<u8>> {
        serde_json::to_vec(entry).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn decode(&self, key: &CacheKey, bytes: &[u8], _meta: &EntryMetadata) -> Result<CacheEntry<T>> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn from_payload(&self, payload: &[u8]) -> std::result::Result<T, String> {
        serde_json::from_slice(payload).map_err(|e| e.to_string())
    }
}

// == Raw Bytes Codec ==
/// Stores the payload bytes untouched; the write timestamp comes from the
/// backend's metadata (file modification time on disk).
#[derive(Debug, Default, Clone, Copy)]
pub struct RawBytesCodec;

impl Codec for RawBytesCodec {
    type Value = Vec<u8>;

    fn kind(&self) -> PayloadKind {
        PayloadKind::Image
    }

    /// Empty values are refused: an empty file is how a torn image write
    /// looks on disk, so it could never be read back.
    fn encode(&self, entry: &CacheEntry<Vec<u8>>) -> Result<Vec<u8>> {
        if entry.value.is_empty() {
            return Err(CacheError::Serialization(
                "refusing to store an empty image".to_string(),
            ));
        }
        Ok(entry.value.clone())
    }

    fn decode(
        &self,
        key: &CacheKey,
        bytes: &[u8],
        meta: &EntryMetadata,
    ) -> Result<CacheEntry<Vec<u8>>> {
        if bytes.is_empty() {
            return Err(empty_payload(key));
        }
        Ok(CacheEntry::new(bytes.to_vec(), meta.written_at))
    }

    fn written_at_from_metadata(
        &self,
        key: &CacheKey,
        meta: &EntryMetadata,
    ) -> Option<Result<DateTime<Utc>>> {
        if meta.size == 0 {
            return Some(Err(empty_payload(key)));
        }
        Some(Ok(meta.written_at))
    }

    fn from_payload(&self, payload: &[u8]) -> std::result::Result<Vec<u8>, String> {
        if payload.is_empty() {
            return Err("empty image payload".to_string());
        }
        Ok(payload.to_vec())
    }
}

fn empty_payload(key: &CacheKey) -> CacheError {
    CacheError::Corrupt {
        key: key.to_string(),
        reason: "empty payload".to_string(),
    }
}
