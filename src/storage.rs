use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};

/// Durable string-keyed key-value storage. Values are opaque bytes; every
/// persisted collection in this crate is a JSON document written through
/// [`put_json`]. Mutations must be visible to any later read through the
/// same store.
pub trait KeyValueStore: Send + Sync {
    fn get_raw(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;
    fn put_raw(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> anyhow::Result<Option<T>> {
    match store.get_raw(key)? {
        Some(bytes) => {
            let value = serde_json::from_slice(&bytes)
                .with_context(|| format!("decode value under {key:?}"))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

pub fn put_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> anyhow::Result<()> {
    let bytes =
        serde_json::to_vec(value).with_context(|| format!("encode value under {key:?}"))?;
    store.put_raw(key, bytes)
}

/// On-disk store backed by an embedded sled database. Each write flushes
/// before returning, so a completed mutation survives process exit.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db = sled::open(path.as_ref())
            .with_context(|| format!("open database at {}", path.as_ref().display()))?;
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get_raw(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let value = self.db.get(key.as_bytes()).context("read key")?;
        Ok(value.map(|bytes| bytes.to_vec()))
    }

    fn put_raw(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()> {
        self.db.insert(key.as_bytes(), value).context("write key")?;
        self.db.flush().context("flush write")?;
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.db.remove(key.as_bytes()).context("remove key")?;
        self.db.flush().context("flush removal")?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral embedders.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let entries = self.entries.lock().expect("storage mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn put_raw(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_through_memory_store() {
        let store = MemoryStore::new();
        put_json(&store, "nums", &vec![1u32, 2, 3]).expect("put should succeed");
        let loaded: Option<Vec<u32>> = get_json(&store, "nums").expect("get should succeed");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<u32>> = get_json(&store, "absent").expect("get should succeed");
        assert_eq!(loaded, None);
    }

    #[test]
    fn remove_clears_the_entry() {
        let store = MemoryStore::new();
        put_json(&store, "flag", &true).expect("put should succeed");
        store.remove("flag").expect("remove should succeed");
        let loaded: Option<bool> = get_json(&store, "flag").expect("get should succeed");
        assert_eq!(loaded, None);
    }

    #[test]
    fn malformed_value_surfaces_a_decode_error() {
        let store = MemoryStore::new();
        store
            .put_raw("bad", b"not json".to_vec())
            .expect("put should succeed");
        let err = get_json::<Vec<u32>>(&store, "bad").unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
