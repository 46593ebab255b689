//! Identifiers handed out by the registry.

use serde::{Deserialize, Serialize};

/// Opaque handle for one registration of a path.
///
/// Re-registering an actor yields a fresh id, so a stale `PathId` never
/// matches the replacement path.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PathId(pub u32);

/// Monotonic allocator for `PathId`.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_path: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_path(&mut self) -> PathId {
        let id = PathId(self.next_path);
        self.next_path = self.next_path.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
