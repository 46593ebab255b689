//! Actor-keyed path tables owned by the host.
//!
//! `PathRegistry` maps an actor to its live `MotionPath`; `SavedPathStore`
//! keeps encoded blobs by actor name. Both are plain values the host creates
//! and passes by reference.

use std::sync::{Arc, Mutex, MutexGuard};

use hashbrown::HashMap;

use crate::ids::{IdAllocator, PathId};
use crate::path::MotionPath;
use crate::sink::ActorKey;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone, Debug)]
pub struct RegisteredPath {
    pub id: PathId,
    pub path: Arc<MotionPath>,
}

#[derive(Default, Debug)]
struct RegistryInner {
    ids: IdAllocator,
    paths: HashMap<ActorKey, RegisteredPath>,
}

/// Live paths, at most one per actor.
#[derive(Default, Debug)]
pub struct PathRegistry {
    inner: Mutex<RegistryInner>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `path` to `key`, replacing whatever was there.
    pub fn register(&self, key: impl Into<ActorKey>, path: Arc<MotionPath>) -> PathId {
        let key = key.into();
        let mut inner = lock(&self.inner);
        let id = inner.ids.alloc_path();
        if inner
            .paths
            .insert(key.clone(), RegisteredPath { id, path })
            .is_some()
        {
            log::debug!("replaced motion path for {key} ({id:?})");
        } else {
            log::debug!("registered motion path for {key} ({id:?})");
        }
        id
    }

    pub fn unregister(&self, key: &str) -> Option<Arc<MotionPath>> {
        let removed = lock(&self.inner).paths.remove(key);
        if removed.is_some() {
            log::debug!("unregistered motion path for {key}");
        }
        removed.map(|entry| entry.path)
    }

    pub fn lookup(&self, key: &str) -> Option<Arc<MotionPath>> {
        lock(&self.inner).paths.get(key).map(|entry| entry.path.clone())
    }

    pub fn entry(&self, key: &str) -> Option<RegisteredPath> {
        lock(&self.inner).paths.get(key).cloned()
    }

    /// Unregister only if `key` is still bound to `id`.
    pub fn unregister_if(&self, key: &str, id: PathId) -> bool {
        let mut inner = lock(&self.inner);
        match inner.paths.get(key) {
            Some(entry) if entry.id == id => {
                inner.paths.remove(key);
                log::debug!("unregistered motion path for {key} ({id:?})");
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        lock(&self.inner).paths.contains_key(key)
    }

    pub fn keys(&self) -> Vec<ActorKey> {
        let mut keys: Vec<_> = lock(&self.inner).paths.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Encoded path blobs keyed by actor name.
#[derive(Default, Debug)]
pub struct SavedPathStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl SavedPathStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `blob` under `name`, overwriting any earlier save.
    pub fn save(&self, name: impl Into<String>, blob: Vec<u8>) {
        let name = name.into();
        log::debug!("saved {} byte path blob for {name}", blob.len());
        lock(&self.blobs).insert(name, blob);
    }

    pub fn load(&self, name: &str) -> Option<Vec<u8>> {
        lock(&self.blobs).get(name).cloned()
    }

    pub fn remove(&self, name: &str) -> Option<Vec<u8>> {
        lock(&self.blobs).remove(name)
    }

    pub fn clear(&self) {
        lock(&self.blobs).clear();
    }

    pub fn len(&self) -> usize {
        lock(&self.blobs).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
