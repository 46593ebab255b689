//! Explicit per-actor lifecycle: `init`, then `tick` once per fixed step, then `dispose`.

use std::sync::Arc;

use crate::ids::PathId;
use crate::path::MotionPath;
use crate::playback::TickOutcome;
use crate::registry::PathRegistry;
use crate::sink::{ActorKey, MotionSink};

/// Binds one actor's sink to a path for a host-owned scheduler.
pub struct PathInstance {
    key: ActorKey,
    path: Arc<MotionPath>,
    sink: Box<dyn MotionSink + Send>,
    id: Option<PathId>,
}

impl std::fmt::Debug for PathInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathInstance")
            .field("key", &self.key)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl PathInstance {
    pub fn new(
        key: impl Into<ActorKey>,
        path: Arc<MotionPath>,
        sink: Box<dyn MotionSink + Send>,
    ) -> Self {
        Self {
            key: key.into(),
            path,
            sink,
            id: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn path(&self) -> &Arc<MotionPath> {
        &self.path
    }

    pub fn is_registered(&self) -> bool {
        self.id.is_some()
    }

    /// Publish the path in the registry under the instance key.
    pub fn init(&mut self, registry: &PathRegistry) -> PathId {
        let id = registry.register(self.key.clone(), self.path.clone());
        self.id = Some(id);
        id
    }

    /// Follow a replacement registered under the same key (e.g. after an
    /// import), then advance playback by one frame.
    pub fn tick(&mut self, registry: &PathRegistry) -> TickOutcome {
        if let Some(entry) = registry.entry(&self.key) {
            if Some(entry.id) != self.id {
                self.path = entry.path;
                self.id = Some(entry.id);
            }
        }
        self.path.tick(self.sink.as_mut())
    }

    /// Remove the registration if it is still ours.
    pub fn dispose(&mut self, registry: &PathRegistry) {
        if let Some(id) = self.id.take() {
            registry.unregister_if(&self.key, id);
        }
    }
}
