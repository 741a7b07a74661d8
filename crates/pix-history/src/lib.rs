//! # pix-history
//!
//! Undo/redo snapshot history for an image editing session.
//!
//! [`HistoryStack`] holds an ordered sequence of [`PixelBuffer`] snapshots
//! plus a cursor marking the active one. Committing a new state truncates
//! any forward (redo) history; undo and redo only move the cursor, never
//! the entries. Each snapshot is exclusively owned by the stack: buffers
//! are immutable and moved in by value, so no external mutation can
//! corrupt a snapshot.
//!
//! # State machine
//!
//! ```text
//! add_state(A)  : [A]        cursor 0
//! add_state(B)  : [A, B]     cursor 1
//! undo()        : [A, B]     cursor 0  -> returns A
//! add_state(C)  : [A, C]     cursor 1  (B discarded)
//! redo()        : [A, C]     cursor 1  (at the bound: no-op)
//! clear()       : []         cursor -1
//! ```
//!
//! # Boundary behavior
//!
//! `undo()` below index 0 and `redo()` past the last entry are no-ops
//! that hand back the unchanged current entry. This mirrors how editors
//! behave at the ends of their history: nothing to do is not an error,
//! and [`can_undo`](HistoryStack::can_undo) /
//! [`can_redo`](HistoryStack::can_redo) expose the bounds for callers
//! that want to gray out a button. `None` is returned only when the
//! stack holds no entries at all.
//!
//! # Concurrency
//!
//! Not designed for concurrent mutation: truncation and cursor movement
//! do not commute, so callers must serialize `add_state`/`undo`/`redo`/
//! `clear` (a single control thread does this naturally).

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use pix_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Ordered snapshot sequence with a cursor, supporting add/undo/redo/clear.
///
/// # Example
///
/// ```rust
/// use pix_core::PixelBuffer;
/// use pix_history::HistoryStack;
///
/// let mut history = HistoryStack::new();
/// history.add_state(PixelBuffer::filled(2, 2, [1, 1, 1]));
/// history.add_state(PixelBuffer::filled(2, 2, [2, 2, 2]));
///
/// assert!(history.can_undo());
/// let prev = history.undo().unwrap();
/// assert_eq!(prev.pixel(0, 0), [1, 1, 1]);
///
/// let next = history.redo().unwrap();
/// assert_eq!(next.pixel(0, 0), [2, 2, 2]);
/// ```
#[derive(Debug)]
pub struct HistoryStack {
    /// Snapshots, oldest first.
    entries: Vec<PixelBuffer>,
    /// Index of the active entry; -1 when empty.
    cursor: isize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStack {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: -1,
        }
    }

    /// Commits a new state: truncates forward history, appends the
    /// snapshot, and advances the cursor to it.
    ///
    /// This is the only operation besides [`clear`](Self::clear) that
    /// changes the entry sequence. It cannot fail.
    pub fn add_state(&mut self, img: PixelBuffer) {
        let keep = (self.cursor + 1) as usize;
        let discarded = self.entries.len() - keep;
        self.entries.truncate(keep);
        self.entries.push(img);
        self.cursor += 1;
        debug!(
            cursor = self.cursor,
            entries = self.entries.len(),
            discarded,
            "add_state"
        );
    }

    /// Steps the cursor back one entry and returns the now-active
    /// snapshot.
    ///
    /// At the lower bound (cursor already at the first entry) the cursor
    /// stays put and the current entry is returned unchanged. Returns
    /// `None` only when the history is empty.
    pub fn undo(&mut self) -> Option<&PixelBuffer> {
        if self.can_undo() {
            self.cursor -= 1;
            trace!(cursor = self.cursor, "undo");
        }
        self.current()
    }

    /// Steps the cursor forward one entry and returns the now-active
    /// snapshot.
    ///
    /// At the upper bound the cursor stays put and the current entry is
    /// returned unchanged. Returns `None` only when the history is empty.
    pub fn redo(&mut self) -> Option<&PixelBuffer> {
        if self.can_redo() {
            self.cursor += 1;
            trace!(cursor = self.cursor, "redo");
        }
        self.current()
    }

    /// Returns the active snapshot, or `None` if the history is empty.
    pub fn current(&self) -> Option<&PixelBuffer> {
        if self.cursor < 0 {
            None
        } else {
            self.entries.get(self.cursor as usize)
        }
    }

    /// Returns `true` if there is an earlier entry to step back to.
    #[inline]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns `true` if there is a later entry to step forward to.
    #[inline]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len() as isize
    }

    /// Number of snapshots currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the history holds no snapshots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the active entry, or `None` when empty.
    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        if self.cursor < 0 {
            None
        } else {
            Some(self.cursor as usize)
        }
    }

    /// Discards all snapshots and resets the cursor.
    ///
    /// Called when a new image is opened and the previous session's edit
    /// trail no longer applies.
    pub fn clear(&mut self) {
        debug!(discarded = self.entries.len(), "clear");
        self.entries.clear();
        self.cursor = -1;
    }
}
