use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use devseed_core::error::{Error, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheEntry {
    pub status: u16,
    pub body: String,
    pub cached_at: DateTime<Utc>,
}

/// Cache key for a request: method, URL and body. Credentials are not part
/// of the key.
pub fn request_key(method: &str, url: &str, body: &[u8]) -> String {
    let mut h = blake3::Hasher::new();
    h.update(method.as_bytes());
    h.update(b"\n");
    h.update(url.as_bytes());
    h.update(b"\n");
    h.update(body);
    h.finalize().to_hex().to_string()
}

pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .map_err(|e| Error::Cache(format!("cannot create {}: {}", dir.display(), e)))?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// A corrupt entry reads as a miss; the next successful response
    /// overwrites it.
    pub fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Cache(format!("cannot read {}: {}", path.display(), e))),
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt cache entry");
                Ok(None)
            }
        }
    }

    /// Written to a temp file in the cache directory and renamed into place,
    /// so a reader never sees half an entry.
    pub fn put(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        let bytes = serde_json::to_vec(entry).map_err(|e| Error::Cache(e.to_string()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| Error::Cache(e.to_string()))?;
        tmp.write_all(&bytes).map_err(|e| Error::Cache(e.to_string()))?;
        tmp.persist(self.entry_path(key)).map_err(|e| Error::Cache(e.to_string()))?;
        Ok(())
    }

    pub fn entry_count(&self) -> Result<usize> {
        let mut n = 0;
        for entry in fs::read_dir(&self.dir)? {
            if entry?.path().extension().and_then(|s| s.to_str()) == Some("json") { n += 1; }
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(body: &str) -> CacheEntry {
        CacheEntry { status: 200, body: body.to_string(), cached_at: Utc::now() }
    }

    #[test]
    fn key_depends_on_method_url_and_body() {
        let base = request_key("POST", "http://x/embeddings", b"{\"input\":\"a\"}");
        assert_eq!(base, request_key("POST", "http://x/embeddings", b"{\"input\":\"a\"}"));
        assert_ne!(base, request_key("POST", "http://x/embeddings", b"{\"input\":\"b\"}"));
        assert_ne!(base, request_key("GET", "http://x/embeddings", b"{\"input\":\"a\"}"));
        assert_ne!(base, request_key("POST", "http://y/embeddings", b"{\"input\":\"a\"}"));
    }

    #[test]
    fn put_then_get_survives_reopen() {
        let tmp = tempfile::tempdir().expect("tmp");
        let cache = ResponseCache::open(tmp.path()).expect("open");
        cache.put("k1", &entry("hello")).expect("put");

        let reopened = ResponseCache::open(tmp.path()).expect("reopen");
        let got = reopened.get("k1").expect("get").expect("hit");
        assert_eq!(got.body, "hello");
        assert_eq!(reopened.entry_count().expect("count"), 1);
        assert!(reopened.get("k2").expect("get").is_none());
    }

    #[test]
    fn corrupt_entry_is_a_miss_and_can_be_overwritten() {
        let tmp = tempfile::tempdir().expect("tmp");
        let cache = ResponseCache::open(tmp.path()).expect("open");
        fs::write(tmp.path().join("k1.json"), "{not json").expect("write");

        assert!(cache.get("k1").expect("get").is_none());
        cache.put("k1", &entry("fresh")).expect("put");
        assert_eq!(cache.get("k1").expect("get").expect("hit").body, "fresh");
    }

    #[test]
    fn open_creates_nested_directory() {
        let tmp = tempfile::tempdir().expect("tmp");
        let dir = tmp.path().join("a").join("b");
        let cache = ResponseCache::open(&dir).expect("open");
        assert!(cache.dir().is_dir());
        assert_eq!(cache.entry_count().expect("count"), 0);
    }
}
