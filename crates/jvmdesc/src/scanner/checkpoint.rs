use std::collections::BTreeMap;

use super::Cursor;

/// Opaque handle naming one cursor saved with
/// [`Scanner::state_save`](super::Scanner::state_save).
///
/// Handles are minted from a per-scanner generation counter that is never
/// rewound, so a handle stays unique even after its snapshot was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint(u64);

/// Snapshots keyed by live handles.
#[derive(Debug, Default)]
pub(crate) struct CheckpointMap {
    generation: u64,
    saved: BTreeMap<Checkpoint, Cursor>,
}

impl CheckpointMap {
    pub fn save(&mut self, cursor: Cursor) -> Checkpoint {
        let handle = Checkpoint(self.generation);
        self.generation += 1;
        self.saved.insert(handle, cursor);
        handle
    }

    pub fn get(&self, handle: Checkpoint) -> Option<Cursor> {
        self.saved.get(&handle).copied()
    }

    pub fn remove(&mut self, handle: Checkpoint) -> Option<Cursor> {
        self.saved.remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }
}
