use sparsegrid_core::{Coord, Grid, GridChangedEvent, ListenerId};
use std::cell::RefCell;
use std::rc::Rc;

use crate::journal::Journal;

/// Manages undo/redo history for a grid.
///
/// Attach it to a grid and every change event the grid raises is journaled.
/// Undo and redo replay the inverse or the original event on the grid.
pub struct HistoryManager<T> {
    journal: Rc<RefCell<Journal<T>>>,
}

impl<T: Clone + PartialEq + 'static> HistoryManager<T> {
    /// Create a new history manager with the specified max undo levels
    pub fn new(max_size: usize) -> Self {
        Self {
            journal: Rc::new(RefCell::new(Journal::new(max_size))),
        }
    }

    /// Enable or disable folding consecutive single-cell edits together
    pub fn with_merging(self, enabled: bool) -> Self {
        self.journal.borrow_mut().set_merging(enabled);
        self
    }

    /// Journal every change `grid` raises from now on
    pub fn attach(&self, grid: &mut Grid<T>) -> ListenerId {
        let journal = Rc::clone(&self.journal);
        grid.subscribe(move |event: &GridChangedEvent<T>| {
            journal.borrow_mut().record(event.clone());
        })
    }

    /// Record an event by hand
    pub fn record(&self, event: GridChangedEvent<T>) {
        self.journal.borrow_mut().record(event);
    }

    /// Undo the last recorded change
    pub fn undo(&self, grid: &mut Grid<T>) -> Option<Vec<Coord>> {
        let event = self.journal.borrow_mut().pop_undo()?;
        self.replay(grid, &event);

        let affected = event.coords();
        tracing::debug!(cells = affected.len(), "undo");
        self.journal.borrow_mut().push_redo(event);
        Some(affected)
    }

    /// Redo the last undone change
    pub fn redo(&self, grid: &mut Grid<T>) -> Option<Vec<Coord>> {
        let event = self.journal.borrow_mut().pop_redo()?;
        let inverse = event.clone().inverted();
        self.replay(grid, &inverse);

        let affected = event.coords();
        tracing::debug!(cells = affected.len(), "redo");
        self.journal.borrow_mut().push_undo(event);
        Some(affected)
    }

    /// Revert `event` on the grid without journaling the result
    fn replay(&self, grid: &mut Grid<T>, event: &GridChangedEvent<T>) {
        self.journal.borrow_mut().set_replaying(true);
        grid.revert(event);
        self.journal.borrow_mut().set_replaying(false);
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.journal.borrow().undo_count() > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.journal.borrow().redo_count() > 0
    }

    pub fn undo_count(&self) -> usize {
        self.journal.borrow().undo_count()
    }

    pub fn redo_count(&self) -> usize {
        self.journal.borrow().redo_count()
    }

    /// Clear all history
    pub fn clear(&self) {
        self.journal.borrow_mut().clear();
    }
}

impl<T: Clone + PartialEq + 'static> Default for HistoryManager<T> {
    fn default() -> Self {
        Self::new(100)
    }
}
