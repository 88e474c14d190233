use crate::utils::clock::Clock;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("ttl of {0:?} is out of range")]
    InvalidTtl(Duration),
}

/// Key-value store with per-entry expiry
pub trait Cache<V>: Send + Sync {
    /// The value under `key`, or `None` if absent or expired
    fn get(&self, key: &str) -> Result<Option<V>, CacheError>;

    /// Store `value` under `key` until `ttl` from now, replacing any previous entry
    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<(), CacheError>;
}

struct CacheEntry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

/// Process-local cache. Nothing survives a restart.
pub struct MemoryCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl<V> MemoryCache<V> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_capacity(clock, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(clock: Arc<dyn Clock>, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            clock,
        }
    }

    /// Number of stored entries, expired ones included until they are touched
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, CacheEntry<V>>>, CacheError> {
        self.entries
            .lock()
            .map_err(|e| CacheError::Unavailable(e.to_string()))
    }
}

/// Make room for one more key: expired entries go first, then whatever expires soonest
fn make_room<V>(
    entries: &mut HashMap<String, CacheEntry<V>>,
    capacity: usize,
    now: DateTime<Utc>,
) {
    entries.retain(|_, entry| entry.expires_at > now);

    while entries.len() >= capacity {
        let soonest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());

        match soonest {
            Some(key) => {
                entries.remove(&key);
            }
            None => break,
        }
    }
}

impl<V: Clone + Send> Cache<V> for MemoryCache<V> {
    fn get(&self, key: &str) -> Result<Option<V>, CacheError> {
        let now = self.clock.now();
        let mut entries = self.lock()?;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<(), CacheError> {
        let now = self.clock.now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(CacheError::InvalidTtl(ttl))?;

        let mut entries = self.lock()?;
        if !entries.contains_key(key) && entries.len() >= self.capacity {
            make_room(&mut entries, self.capacity, now);
        }
        entries.insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }
}
