use sparsegrid_core::GridChangedEvent;

/// Undo and redo stacks of recorded grid events
#[derive(Debug)]
pub struct Journal<T> {
    /// Events that can be undone, oldest first
    undo_stack: Vec<GridChangedEvent<T>>,
    /// Events that can be redone
    redo_stack: Vec<GridChangedEvent<T>>,
    /// Maximum number of undo levels
    max_size: usize,
    /// Whether to fold consecutive edits of one cell together
    enable_merging: bool,
    /// Set while an undo/redo is being applied so its own event is ignored
    replaying: bool,
}

impl<T: Clone + PartialEq> Journal<T> {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
            enable_merging: true,
            replaying: false,
        }
    }

    pub fn set_merging(&mut self, enabled: bool) {
        self.enable_merging = enabled;
    }

    pub(crate) fn set_replaying(&mut self, replaying: bool) {
        self.replaying = replaying;
    }

    /// Push a new event, dropping the redo stack
    pub fn record(&mut self, event: GridChangedEvent<T>) {
        if self.replaying || event.is_empty() {
            return;
        }

        // Clear redo stack on new action
        self.redo_stack.clear();

        if self.enable_merging {
            if let Some(last) = self.undo_stack.last_mut() {
                if can_merge(last, &event) {
                    last.new_values = event.new_values;
                    return;
                }
            }
        }

        self.undo_stack.push(event);

        // Limit stack size
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    pub(crate) fn pop_undo(&mut self) -> Option<GridChangedEvent<T>> {
        self.undo_stack.pop()
    }

    pub(crate) fn pop_redo(&mut self) -> Option<GridChangedEvent<T>> {
        self.redo_stack.pop()
    }

    pub(crate) fn push_undo(&mut self, event: GridChangedEvent<T>) {
        self.undo_stack.push(event);
    }

    pub(crate) fn push_redo(&mut self, event: GridChangedEvent<T>) {
        self.redo_stack.push(event);
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

/// Two single-cell edits of the same coordinate where the second picks up
/// exactly what the first left behind
fn can_merge<T: PartialEq>(last: &GridChangedEvent<T>, next: &GridChangedEvent<T>) -> bool {
    let [written] = last.new_values.as_slice() else {
        return false;
    };
    let [replaced] = next.old_values.as_slice() else {
        return false;
    };
    let [next_written] = next.new_values.as_slice() else {
        return false;
    };
    last.old_values.len() <= 1
        && last.old_values.iter().all(|c| c.coord == written.coord)
        && replaced == written
        && next_written.coord == written.coord
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparsegrid_core::{Cell, Coord};

    fn set(x: i32, old: Option<i32>, new: i32) -> GridChangedEvent<i32> {
        let coord = Coord::new(x, 0);
        GridChangedEvent::new(
            old.map(|v| Cell::new(coord, v)).into_iter().collect(),
            vec![Cell::new(coord, new)],
        )
    }

    #[test]
    fn test_merges_consecutive_edits() {
        let mut journal = Journal::new(10);
        journal.record(set(0, None, 1));
        journal.record(set(0, Some(1), 2));
        journal.record(set(0, Some(2), 3));
        assert_eq!(journal.undo_count(), 1);

        let merged = journal.pop_undo().unwrap();
        assert_eq!(merged, set(0, None, 3));
    }

    #[test]
    fn test_no_merge_across_cells_or_when_disabled() {
        let mut journal = Journal::new(10);
        journal.record(set(0, None, 1));
        journal.record(set(1, None, 1));
        assert_eq!(journal.undo_count(), 2);

        let mut journal = Journal::new(10);
        journal.set_merging(false);
        journal.record(set(0, None, 1));
        journal.record(set(0, Some(1), 2));
        assert_eq!(journal.undo_count(), 2);
    }

    #[test]
    fn test_max_size_drops_oldest() {
        let mut journal = Journal::new(2);
        journal.set_merging(false);
        for i in 0..5 {
            journal.record(set(i, None, i));
        }
        assert_eq!(journal.undo_count(), 2);
        assert_eq!(journal.pop_undo().unwrap(), set(4, None, 4));
        assert_eq!(journal.pop_undo().unwrap(), set(3, None, 3));
    }

    #[test]
    fn test_replaying_events_ignored() {
        let mut journal = Journal::new(5);
        journal.set_replaying(true);
        journal.record(set(0, None, 1));
        assert_eq!(journal.undo_count(), 0);
    }
}
