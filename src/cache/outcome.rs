//! Lookup and write outcomes reported by the cache facade.

use crate::error::CacheError;

// == Lookup ==
/// Result of a cache read.
///
/// `Degraded` means storage misbehaved (corrupt entry, I/O failure). Callers
/// treat it exactly like `Miss`; it exists so the problem stays visible.
#[derive(Debug)]
pub enum Lookup<V> {
    Hit(V),
    Miss,
    Degraded(CacheError),
}

impl<V> Lookup<V> {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Lookup::Degraded(_))
    }

    /// The cached value, with `Miss` and `Degraded` both mapped to None.
    pub fn into_option(self) -> Option<V> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Miss | Lookup::Degraded(_) => None,
        }
    }
}

impl<V> From<Lookup<V>> for Option<V> {
    fn from(lookup: Lookup<V>) -> Self {
        lookup.into_option()
    }
}

// == Write Status ==
/// Result of a cache write. A degraded write leaves the cache as if the
/// write never happened; it is never an error for the caller.
#[derive(Debug)]
pub enum WriteStatus {
    Written,
    Degraded(CacheError),
}

impl WriteStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteStatus::Written)
    }
}
