//! Background Disk Writer
//!
//! Moves disk writes off the caller's path. Jobs run one at a time in
//! submission order, so the last `put` for a key is also the last write.
//!
//! Every queued write carries a ticket from the `WriteFence`. Removals and
//! invalidations go through the same fence, so a write queued before them
//! never lands after them, even when it is already running.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::cache::backend::{DiskBackend, StorageBackend};
use crate::cache::{CacheCounters, CacheKey};

// == Write Fence ==
#[derive(Debug, Default)]
struct FenceState {
    /// Tickets below this were issued before the last invalidation
    floor: u64,
    /// Per-key floors set by removals while writes were pending
    removed: HashMap<CacheKey, u64>,
}

/// Orders background writes against removals.
///
/// A write runs under the read lock and only if its ticket is not older than
/// a removal of its key or a full invalidation. Removals take the write lock,
/// so they wait for a running write and then delete what it produced.
#[derive(Debug, Default)]
pub struct WriteFence {
    next_ticket: AtomicU64,
    /// Writes ticketed but not yet finished
    pending: AtomicUsize,
    state: RwLock<FenceState>,
}

impl WriteFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pending write and returns its ticket.
    pub fn begin(&self) -> u64 {
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.next_ticket.fetch_add(1, Ordering::SeqCst)
    }

    /// Marks a write as finished, whether it ran or was dropped.
    pub fn finish(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            let mut state = self.state.write();
            // nothing left that a recorded removal could apply to
            if self.pending.load(Ordering::SeqCst) == 0 {
                state.removed.clear();
            }
        }
    }

    /// Runs `write` unless a removal or invalidation superseded `ticket`.
    pub fn write_if_current<R>(
        &self,
        key: &CacheKey,
        ticket: u64,
        write: impl FnOnce() -> R,
    ) -> Option<R> {
        let state = self.state.read();
        let superseded = ticket < state.floor
            || state
                .removed
                .get(key)
                .map_or(false, |&floor| ticket < floor);
        if superseded {
            return None;
        }
        Some(write())
    }

    /// Supersedes every pending write for `key`, then runs `delete`.
    pub fn remove_with<R>(&self, key: &CacheKey, delete: impl FnOnce() -> R) -> R {
        let mut state = self.state.write();
        if self.pending.load(Ordering::SeqCst) > 0 {
            state
                .removed
                .insert(key.clone(), self.next_ticket.load(Ordering::SeqCst));
        }
        delete()
    }

    /// Supersedes every pending write, then runs `clear`.
    pub fn clear_with<R>(&self, clear: impl FnOnce() -> R) -> R {
        let mut state = self.state.write();
        state.floor = self.next_ticket.load(Ordering::SeqCst);
        state.removed.clear();
        clear()
    }
}

enum WriteJob {
    Store {
        key: CacheKey,
        bytes: Vec<u8>,
        written_at: DateTime<Utc>,
        ticket: u64,
    },
    Flush(oneshot::Sender<()>),
}

// == Disk Writer ==
#[derive(Debug)]
pub struct DiskWriter {
    sender: mpsc::UnboundedSender<WriteJob>,
    fence: Arc<WriteFence>,
}

impl DiskWriter {
    /// Spawns the writer task on the current tokio runtime.
    ///
    /// Returns None outside a runtime; callers then write synchronously.
    pub fn spawn(disk: Arc<DiskBackend>, counters: Arc<Mutex<CacheCounters>>) -> Option<Self> {
        let handle = Handle::try_current().ok()?;
        let (sender, mut receiver) = mpsc::unbounded_channel::<WriteJob>();
        let fence = Arc::new(WriteFence::new());
        let task_fence = fence.clone();

        handle.spawn(async move {
            while let Some(job) = receiver.recv().await {
                match job {
                    WriteJob::Store {
                        key,
                        bytes,
                        written_at,
                        ticket,
                    } => {
                        let disk = disk.clone();
                        let fence = task_fence.clone();
                        let task_key = key.clone();
                        let result = tokio::task::spawn_blocking(move || {
                            fence.write_if_current(&task_key, ticket, || {
                                disk.write(&task_key, &bytes, written_at)
                            })
                        })
                        .await;
                        task_fence.finish();

                        match result {
                            Ok(Some(Ok(()))) => {}
                            Ok(None) => {
                                debug!(key = %key, "dropping write superseded by removal");
                            }
                            Ok(Some(Err(e))) => {
                                warn!(key = %key, error = %e, "background cache write failed");
                                counters.lock().record_degraded();
                            }
                            Err(e) => {
                                warn!(key = %key, error = %e, "background cache write panicked");
                                counters.lock().record_degraded();
                            }
                        }
                    }
                    WriteJob::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
            debug!("disk writer stopped");
        });

        Some(Self { sender, fence })
    }

    /// Queues a write. Hands the bytes back if the writer task is gone.
    pub fn store(
        &self,
        key: CacheKey,
        bytes: Vec<u8>,
        written_at: DateTime<Utc>,
    ) -> Result<(), Vec<u8>> {
        let ticket = self.fence.begin();
        self.sender
            .send(WriteJob::Store {
                key,
                bytes,
                written_at,
                ticket,
            })
            .map_err(|rejected| {
                self.fence.finish();
                match rejected.0 {
                    WriteJob::Store { bytes, .. } => bytes,
                    WriteJob::Flush(_) => Vec::new(),
                }
            })
    }

    /// Deletes `key` through `delete` after superseding its queued writes.
    pub fn remove_with<R>(&self, key: &CacheKey, delete: impl FnOnce() -> R) -> R {
        self.fence.remove_with(key, delete)
    }

    /// Clears through `clear` after superseding every queued write.
    pub fn clear_with<R>(&self, clear: impl FnOnce() -> R) -> R {
        self.fence.clear_with(clear)
    }

    /// Waits until every write queued before this call has finished.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.sender.send(WriteJob::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }
}
