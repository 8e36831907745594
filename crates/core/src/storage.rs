//! Key-Value Storage Abstraction
//!
//! The persistence backend every store in the workspace writes through:
//! string keys, string values, synchronous access, bounded capacity.
//! A write may fail at any time, and running out of quota is an ordinary
//! outcome that callers are expected to handle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::error::{CoreError, CoreResult};

/// Synchronous string key-value store with bounded capacity.
///
/// Writes replace the whole value under a key; there is no partial update.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> CoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Bytes currently used by keys and values.
    fn usage_bytes(&self) -> CoreResult<u64>;

    /// Capacity in bytes, or `None` when unbounded.
    fn quota_bytes(&self) -> Option<u64>;

    /// Whether the backend can currently be read.
    fn is_healthy(&self) -> bool {
        self.usage_bytes().is_ok()
    }
}

/// Size charged against the quota for one entry.
pub fn entry_size(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

/// Check that replacing an entry of `previous` bytes with one of `required`
/// bytes keeps `used` within `quota`.
pub fn check_quota(
    key: &str,
    used: u64,
    previous: u64,
    required: u64,
    quota: Option<u64>,
) -> CoreResult<()> {
    let Some(quota) = quota else {
        return Ok(());
    };
    let available = quota.saturating_sub(used.saturating_sub(previous));
    if required > available {
        return Err(CoreError::QuotaExceeded {
            key: key.to_string(),
            required,
            available,
        });
    }
    Ok(())
}

/// Process-local store used for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<u64>,
    read_only: AtomicBool,
}

impl InMemoryStore {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes past `quota` bytes
    pub fn with_quota(quota: u64) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Make every subsequent write fail, as a locked-down browser profile does.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    fn used(entries: &HashMap<String, String>) -> u64 {
        entries.iter().map(|(k, v)| entry_size(k, v)).sum()
    }
}

fn poisoned() -> CoreError {
    CoreError::internal("storage lock poisoned")
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(CoreError::storage("store is read-only"));
        }
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let previous = entries
            .get(key)
            .map(|old| entry_size(key, old))
            .unwrap_or(0);
        check_quota(
            key,
            Self::used(&entries),
            previous,
            entry_size(key, value),
            self.quota,
        )?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn usage_bytes(&self) -> CoreResult<u64> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(Self::used(&entries))
    }

    fn quota_bytes(&self) -> Option<u64> {
        self.quota
    }
}
