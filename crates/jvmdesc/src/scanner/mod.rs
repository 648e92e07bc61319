//! Scanner: a cursor over immutable input with speculative lookahead.
//!
//! Why this exists
//! - Recursive-descent parsing over a closed grammar wants unbounded
//!   lookahead without a tokenizing pass. Every grammar operator (literal,
//!   alternation, sequence, regex) reduces to two primitives, `next()` and
//!   `consume()`/`skip()`, composed with save/restore of the cursor.
//!
//! What it does
//! - Keeps a window `[begin, end)` of input that has been looked at but not
//!   yet committed. `next()` extends `end` by one unit supplied by the
//!   [`Tape`]; `consume()` commits the window through the tape's hook and
//!   `skip()` discards it.
//! - Offers two ways to roll back:
//!   - [`Scanner::speculate`] returns a [`Speculation`] guard that restores
//!     the cursor when dropped unless committed. All combinators in this crate
//!     use it, so a failed attempt can never leave a half-advanced cursor.
//!   - [`Scanner::state_save`] / [`Scanner::state_load`] /
//!     [`Scanner::state_delete`] keep snapshots under [`Checkpoint`] handles
//!     for callers that need to jump back from arbitrary places.
//!
//! Invariants
//! - `begin <= end <= tape.len()` at all times.
//! - `next()` never moves `begin`.
//! - The cursor only moves forward through `next()` or back to a position it
//!   previously held.
//!
//! Notes
//! - Snapshots taken with `state_save` live until `state_delete` or until the
//!   scanner is dropped. Nothing bounds their number; embedding code that saves
//!   in a loop must delete as it goes.
use core::ops::{Deref, DerefMut, Range};

use tracing::trace;

use crate::error::RangeError;

mod checkpoint;
mod chars;

pub use checkpoint::Checkpoint;
use checkpoint::CheckpointMap;
pub use chars::{CharScanner, CharTape, Pattern};

/// Input a [`Scanner`] walks over.
///
/// Implementors decide what one logical unit is (a byte, a `char`, a token)
/// and what committing a window means.
pub trait Tape {
    /// Borrowed view of a range of the input.
    type Slice: ?Sized;
    /// Destination for committed content.
    type Sink: ?Sized;

    /// Length of the input in offset units.
    fn len(&self) -> usize;

    /// Whether the input is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset one logical unit past `at`, or `None` at end of input.
    fn step(&self, at: usize) -> Option<usize>;

    /// Whether `at` is a valid cursor position.
    fn is_boundary(&self, at: usize) -> bool {
        at <= self.len()
    }

    /// Reads `range` without side effects. `range` is always valid.
    fn slice(&self, range: Range<usize>) -> &Self::Slice;

    /// Commit hook invoked by [`Scanner::consume`] for a non-empty window.
    fn commit(&self, range: Range<usize>, sink: Option<&mut Self::Sink>);
}

/// The `[begin, end)` window of a scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    begin: usize,
    end: usize,
}

impl Cursor {
    /// Start of the not yet committed window.
    #[must_use]
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Farthest point reached by lookahead.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }
}

/// A checkpointing cursor over a [`Tape`].
#[derive(Debug)]
pub struct Scanner<T: Tape> {
    tape: T,
    cursor: Cursor,
    checkpoints: CheckpointMap,
}

impl<T: Tape> Scanner<T> {
    /// Creates a scanner positioned at the start of `tape`.
    pub fn from_tape(tape: T) -> Self {
        Self {
            tape,
            cursor: Cursor::default(),
            checkpoints: CheckpointMap::default(),
        }
    }

    #[inline]
    pub fn tape(&self) -> &T {
        &self.tape
    }

    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the window end has reached the end of the input.
    pub fn is_at_end(&self) -> bool {
        self.tape.step(self.cursor.end).is_none()
    }

    /// Extends the window by one unit. Returns `false`, leaving the cursor
    /// alone, at end of input.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        match self.tape.step(self.cursor.end) {
            Some(end) => {
                debug_assert!(end > self.cursor.end, "tape step must advance");
                self.cursor.end = end;
                true
            }
            None => false,
        }
    }

    /// Commits the window through [`Tape::commit`] and starts a new one.
    ///
    /// Returns `false` without calling the hook when the window is empty.
    pub fn consume(&mut self) -> bool {
        self.commit_window(None)
    }

    /// Like [`consume`](Self::consume), passing `sink` to the commit hook.
    pub fn consume_into(&mut self, sink: &mut T::Sink) -> bool {
        self.commit_window(Some(sink))
    }

    fn commit_window(&mut self, sink: Option<&mut T::Sink>) -> bool {
        if self.cursor.is_empty() {
            return false;
        }
        trace!(begin = self.cursor.begin, end = self.cursor.end, "commit window");
        self.tape.commit(self.cursor.range(), sink);
        self.cursor.begin = self.cursor.end;
        true
    }

    /// Discards the window without invoking the commit hook.
    ///
    /// Returns whether anything was discarded.
    pub fn skip(&mut self) -> bool {
        let skipped = !self.cursor.is_empty();
        self.cursor.begin = self.cursor.end;
        skipped
    }

    /// The content of the current window.
    pub fn consumption(&self) -> &T::Slice {
        self.tape.slice(self.cursor.range())
    }

    /// Reads `begin..end` without touching the cursor.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] if the range is inverted, runs past the end
    /// of the input, or splits a unit.
    pub fn consumption_range(&self, begin: usize, end: usize) -> Result<&T::Slice, RangeError> {
        if begin > end {
            return Err(RangeError::Inverted { begin, end });
        }
        let len = self.tape.len();
        if end > len {
            return Err(RangeError::OutOfBounds { begin, end, len });
        }
        for offset in [begin, end] {
            if !self.tape.is_boundary(offset) {
                return Err(RangeError::NotCharBoundary { offset });
            }
        }
        Ok(self.tape.slice(begin..end))
    }

    /// Saves the current cursor under a fresh handle.
    pub fn state_save(&mut self) -> Checkpoint {
        let handle = self.checkpoints.save(self.cursor);
        trace!(?handle, begin = self.cursor.begin, end = self.cursor.end, "state save");
        handle
    }

    /// Restores the cursor saved under `handle`.
    ///
    /// The snapshot stays in place, so the same handle can be loaded again.
    /// Returns `false` and leaves the cursor alone for an unknown handle.
    pub fn state_load(&mut self, handle: Checkpoint) -> bool {
        match self.checkpoints.get(handle) {
            Some(cursor) => {
                trace!(?handle, begin = cursor.begin, end = cursor.end, "state load");
                self.cursor = cursor;
                true
            }
            None => {
                trace!(?handle, "state load: no such checkpoint");
                false
            }
        }
    }

    /// Drops the snapshot saved under `handle`. Returns whether one existed.
    pub fn state_delete(&mut self, handle: Checkpoint) -> bool {
        let removed = self.checkpoints.remove(handle).is_some();
        trace!(?handle, removed, "state delete");
        removed
    }

    /// Number of snapshots saved and not yet deleted.
    pub fn live_checkpoints(&self) -> usize {
        self.checkpoints.len()
    }

    /// One-step lookahead: whether `next()` would succeed. Never moves the
    /// cursor.
    pub fn test_next(&mut self) -> bool {
        self.probe(Self::next)
    }

    /// Snapshots the cursor and returns a guard that restores it on drop
    /// unless [`Speculation::commit`] is called.
    pub fn speculate(&mut self) -> Speculation<'_, T> {
        let saved = self.cursor;
        Speculation {
            scanner: self,
            saved,
            committed: false,
        }
    }

    /// Runs `f`, keeping its progress only if it returns `Some`.
    pub fn attempt<R>(&mut self, f: impl FnOnce(&mut Self) -> Option<R>) -> Option<R> {
        let mut guard = self.speculate();
        let out = f(&mut *guard)?;
        guard.commit();
        Some(out)
    }

    /// Runs `f`, keeping its progress only if it returns `true`.
    pub fn attempt_if(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        self.attempt(|s| f(s).then_some(())).is_some()
    }

    /// Runs `f` and restores the cursor afterwards, whatever `f` did.
    pub fn probe<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let mut guard = self.speculate();
        f(&mut *guard)
    }
}

/// Guard returned by [`Scanner::speculate`].
///
/// Dereferences to the scanner. Dropping the guard restores the cursor it
/// saw on creation; [`commit`](Self::commit) keeps the progress instead.
#[must_use = "dropping a speculation immediately rolls it back"]
pub struct Speculation<'a, T: Tape> {
    scanner: &'a mut Scanner<T>,
    saved: Cursor,
    committed: bool,
}

impl<T: Tape> Speculation<'_, T> {
    /// Keeps everything done through this guard.
    pub fn commit(mut self) {
        self.committed = true;
    }

    /// The cursor that will be restored on rollback.
    pub fn saved(&self) -> Cursor {
        self.saved
    }
}

impl<T: Tape> Deref for Speculation<'_, T> {
    type Target = Scanner<T>;

    fn deref(&self) -> &Self::Target {
        self.scanner
    }
}

impl<T: Tape> DerefMut for Speculation<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.scanner
    }
}

impl<T: Tape> Drop for Speculation<'_, T> {
    fn drop(&mut self) {
        if !self.committed && self.scanner.cursor != self.saved {
            trace!(
                from = self.scanner.cursor.end,
                to = self.saved.end,
                "speculation rolled back"
            );
            self.scanner.cursor = self.saved;
        }
    }
}
