//! Bounded undo/redo history of whole-grid snapshots

use std::collections::VecDeque;

/// Maximum number of snapshots kept by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Immutable copy of a grid's tile sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    tiles: Box<[u32]>,
}

impl Snapshot {
    pub fn new(tiles: Vec<u32>) -> Self {
        Self {
            tiles: tiles.into_boxed_slice(),
        }
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Linear undo/redo log with a cursor
///
/// `cursor` points at the snapshot matching the live grid. Pushing after an
/// undo discards everything past the cursor. Pushing a snapshot equal to the
/// one at the cursor does nothing.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    capacity: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.max(1)),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Record a snapshot, returning false if it duplicated the current entry
    pub fn push(&mut self, snapshot: Snapshot) -> bool {
        if self.current() == Some(&snapshot) {
            return false;
        }

        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(snapshot);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.cursor -= 1;
        }
        true
    }

    /// Step back one entry and return it for restoring
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry and return it for restoring
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest snapshot still retained
    pub fn oldest(&self) -> Option<&Snapshot> {
        self.entries.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(value: u32) -> Snapshot {
        Snapshot::new(vec![value; 4])
    }

    #[test]
    fn test_push_and_dedup() {
        let mut history = HistoryStack::default();
        assert!(history.push(snap(0)));
        assert!(!history.push(snap(0)));
        assert_eq!(history.len(), 1);
        assert!(history.push(snap(1)));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_undo_redo_bounds() {
        let mut history = HistoryStack::default();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());

        history.push(snap(0));
        assert!(history.undo().is_none());
        history.push(snap(1));
        assert_eq!(history.undo(), Some(&snap(0)));
        assert!(history.undo().is_none());
        assert_eq!(history.redo(), Some(&snap(1)));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_push_after_undo_prunes_redo_branch() {
        let mut history = HistoryStack::default();
        history.push(snap(0));
        history.push(snap(1));
        history.push(snap(2));
        history.undo();
        history.undo();
        assert!(history.push(snap(7)));
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.current(), Some(&snap(7)));
        assert_eq!(history.undo(), Some(&snap(0)));
    }

    #[test]
    fn test_dedup_compares_against_cursor_after_undo() {
        let mut history = HistoryStack::default();
        history.push(snap(0));
        history.push(snap(1));
        history.undo();
        // Same as the entry at the cursor: no-op, redo branch survives
        assert!(!history.push(snap(0)));
        assert!(history.can_redo());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = HistoryStack::default();
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
        for i in 0..60 {
            history.push(snap(i));
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.cursor(), 49);
        assert_eq!(history.oldest(), Some(&snap(10)));

        let mut last = None;
        for _ in 0..49 {
            last = history.undo().cloned();
        }
        assert_eq!(last, Some(snap(10)));
        assert!(history.undo().is_none());
        assert_eq!(history.current(), Some(&snap(10)));

        let mut small = HistoryStack::new(2);
        assert_eq!(small.capacity(), 2);
        small.push(snap(0));
        small.push(snap(1));
        small.push(snap(2));
        assert_eq!(small.oldest(), Some(&snap(1)));
    }

    #[test]
    fn test_push_undo_redo_restores() {
        let mut history = HistoryStack::default();
        history.push(snap(3));
        history.push(snap(4));
        history.undo();
        assert_eq!(history.redo(), Some(&snap(4)));
    }
}
