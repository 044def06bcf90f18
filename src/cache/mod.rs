//! File-backed key/value cache with lazy TTL expiry.
//!
//! One file per key at `<dir>/<key>.cache`, holding a versioned JSON
//! envelope `{version, expires_at, value}`. Expiry is checked only on read:
//! an expired entry is deleted at that point, and stale entries persist on
//! disk until the next read for that exact key. There is no locking —
//! concurrent writers to the same key race with last-write-wins semantics,
//! and a concurrent reader may see either value.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// File extension of cache entries.
const CACHE_EXT: &str = "cache";

/// Envelope format version; bumped if the on-disk layout ever changes.
const ENVELOPE_VERSION: u32 = 1;

/// Errors produced by the file cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The key contains characters that could escape the cache directory.
    #[error("invalid cache key {key:?}: keys must not contain path separators or dot prefixes")]
    InvalidKey { key: String },

    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// On-disk envelope around a cached value.
///
/// `expires_at` is an absolute epoch timestamp in seconds; `0` means the
/// entry never expires.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    expires_at: u64,
    value: serde_json::Value,
}

/// A key/value store backed by one file per key in a cache directory.
///
/// Values are any `serde`-serializable payload. A decode failure on read
/// (truncated file, foreign bytes, envelope version mismatch) is reported as
/// a miss, not an error — corruption never propagates to callers.
///
/// # Examples
///
/// ```no_run
/// use kerangka::cache::FileCache;
/// use std::time::Duration;
///
/// # async fn demo() -> Result<(), kerangka::cache::CacheError> {
/// let cache = FileCache::new("/tmp/app-cache");
///
/// // `None` TTL: the entry never expires.
/// cache.set("greeting", &"hallo dunia", None).await?;
/// assert_eq!(cache.get::<String>("greeting").await?.as_deref(), Some("hallo dunia"));
///
/// cache.set("session", &42u32, Some(Duration::from_secs(60))).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Creates a cache rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serializes `value` and writes it to `<dir>/<key>.cache`, creating the
    /// directory if absent. A `None` TTL means the entry never expires.
    ///
    /// Concurrent writers to the same key race; the last write wins.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidKey`] for unsafe keys, [`CacheError::Io`] /
    /// [`CacheError::Encode`] for write or serialization failures.
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let expires_at = match ttl {
            Some(ttl) => epoch_now().saturating_add(ttl.as_secs()),
            None => 0,
        };
        let envelope = Envelope {
            version: ENVELOPE_VERSION,
            expires_at,
            value: serde_json::to_value(value)?,
        };

        tokio::fs::write(&path, serde_json::to_vec(&envelope)?).await?;
        Ok(())
    }

    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the backing file is absent, when the entry
    /// has expired (the file is deleted at that point), or when the payload
    /// cannot be decoded.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let path = self.entry_path(key)?;

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let envelope: Envelope = match serde_json::from_slice(&raw) {
            Ok(env) => env,
            Err(e) => {
                warn!(key, error = %e, "corrupt cache entry treated as miss");
                return Ok(None);
            }
        };

        if envelope.version != ENVELOPE_VERSION {
            warn!(
                key,
                version = envelope.version,
                "cache entry with unknown envelope version treated as miss"
            );
            return Ok(None);
        }

        if envelope.expires_at != 0 && epoch_now() >= envelope.expires_at {
            // Lazy eviction: expiry is only ever enforced here.
            let _ = tokio::fs::remove_file(&path).await;
            return Ok(None);
        }

        match serde_json::from_value(envelope.value) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "cache value does not match requested type");
                Ok(None)
            }
        }
    }

    /// Deletes the entry stored under `key`.
    ///
    /// Returns `Ok(true)` if a file was removed, `Ok(false)` if none existed.
    pub async fn remove(&self, key: &str) -> Result<bool, CacheError> {
        let path = self.entry_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    // Keys become file names verbatim, so anything that could traverse out
    // of the cache directory is rejected up front.
    fn entry_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        let unsafe_key = key.is_empty()
            || key.starts_with('.')
            || key.contains(['/', '\\'])
            || key.contains("..");
        if unsafe_key {
            return Err(CacheError::InvalidKey {
                key: key.to_owned(),
            });
        }
        Ok(self.dir.join(format!("{key}.{CACHE_EXT}")))
    }
}

fn epoch_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
