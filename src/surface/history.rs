//! Linear snapshot history with a redo stack.

use crate::image::EncodedImage;

/// Ordered snapshots, a cursor into them, and a redo stack.
///
/// The sequence is never empty: it is created with the initial blank canvas.
/// Committing while the cursor is behind the tail drops everything after the
/// cursor and empties the redo stack, so a new stroke cannot be redone past.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<EncodedImage>,
    cursor: usize,
    redo: Vec<EncodedImage>,
}

impl History {
    /// Creates a history holding only `initial`.
    pub fn new(initial: EncodedImage) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            redo: Vec::new(),
        }
    }

    /// Appends a snapshot, discarding any branch after the cursor.
    pub fn commit(&mut self, snapshot: EncodedImage) {
        if self.cursor + 1 < self.snapshots.len() {
            log::debug!(
                "Discarding {} snapshot(s) after cursor {}",
                self.snapshots.len() - self.cursor - 1,
                self.cursor
            );
            self.snapshots.truncate(self.cursor + 1);
            self.redo.clear();
        }
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    /// Moves the cursor back one step.
    ///
    /// Returns the snapshot that should now be displayed, or `None` at the start.
    pub fn step_back(&mut self) -> Option<EncodedImage> {
        if self.cursor == 0 {
            return None;
        }
        self.redo.push(self.snapshots[self.cursor].clone());
        self.cursor -= 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Moves the cursor forward one step, restoring the top of the redo stack.
    ///
    /// Returns the snapshot that should now be displayed, or `None` when
    /// there is nothing to redo.
    pub fn step_forward(&mut self) -> Option<EncodedImage> {
        let snapshot = self.redo.pop()?;
        self.cursor += 1;
        match self.snapshots.get_mut(self.cursor) {
            Some(slot) => *slot = snapshot.clone(),
            None => self.snapshots.push(snapshot.clone()),
        }
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of snapshots in the sequence.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> &EncodedImage {
        &self.snapshots[self.cursor]
    }

    pub fn get(&self, index: usize) -> Option<&EncodedImage> {
        self.snapshots.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tag: u8) -> EncodedImage {
        EncodedImage::from_png_bytes(vec![tag])
    }

    fn history_with(count: u8) -> History {
        let mut history = History::new(snap(0));
        for tag in 1..=count {
            history.commit(snap(tag));
        }
        history
    }

    #[test]
    fn commits_advance_cursor_to_tail() {
        let history = history_with(4);
        assert_eq!(history.len(), 5);
        assert_eq!(history.cursor(), 4);
        assert_eq!(history.current(), &snap(4));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn step_back_at_start_changes_nothing() {
        let mut history = History::new(snap(0));
        assert!(history.step_back().is_none());
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn step_forward_without_redo_changes_nothing() {
        let mut history = history_with(2);
        assert!(history.step_forward().is_none());
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn back_then_forward_returns_to_same_snapshot() {
        let mut history = history_with(3);
        assert_eq!(history.step_back(), Some(snap(2)));
        assert_eq!(history.redo_depth(), 1);
        assert_eq!(history.step_forward(), Some(snap(3)));
        assert_eq!(history.cursor(), 3);
        assert_eq!(history.current(), &snap(3));
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn commit_after_undo_discards_branch_and_redo() {
        let mut history = history_with(3);
        history.step_back();
        history.step_back();
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.redo_depth(), 2);

        history.commit(snap(9));
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.get(1), Some(&snap(1)));
        assert_eq!(history.current(), &snap(9));
        assert!(history.step_forward().is_none());
    }

    #[test]
    fn undo_all_the_way_then_redo_all_the_way() {
        let mut history = history_with(3);
        while history.step_back().is_some() {}
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.redo_depth(), 3);

        let mut replayed = Vec::new();
        while let Some(snapshot) = history.step_forward() {
            replayed.push(snapshot);
        }
        assert_eq!(replayed, vec![snap(1), snap(2), snap(3)]);
        assert_eq!(history.len(), 4);
    }
}
