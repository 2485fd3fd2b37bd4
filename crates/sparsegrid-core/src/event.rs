//! Change notification for grids.
//!
//! A grid raises one [`GridChangedEvent`] per logical operation, batching all
//! affected cells. Handlers are registered on a [`Listeners`] registry and run
//! synchronously, in registration order, after the mutation has completed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cell::Cell;
use crate::coord::Coord;
use crate::equality::{cell_items, same_cells};

/// Cells removed or replaced (`old_values`) and cells added or replacing
/// (`new_values`) by a single grid operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridChangedEvent<T> {
    #[serde(default = "Vec::new")]
    pub old_values: Vec<Cell<T>>,
    #[serde(default = "Vec::new")]
    pub new_values: Vec<Cell<T>>,
}

impl<T> Default for GridChangedEvent<T> {
    fn default() -> Self {
        Self {
            old_values: Vec::new(),
            new_values: Vec::new(),
        }
    }
}

impl<T> GridChangedEvent<T> {
    pub fn new(old_values: Vec<Cell<T>>, new_values: Vec<Cell<T>>) -> Self {
        Self {
            old_values,
            new_values,
        }
    }

    pub fn added(new_values: Vec<Cell<T>>) -> Self {
        Self::new(Vec::new(), new_values)
    }

    pub fn removed(old_values: Vec<Cell<T>>) -> Self {
        Self::new(old_values, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.old_values.is_empty() && self.new_values.is_empty()
    }

    /// The event that undoes this one
    pub fn inverted(self) -> Self {
        Self::new(self.new_values, self.old_values)
    }

    /// Every coordinate mentioned by either side, without repeats
    pub fn coords(&self) -> Vec<Coord> {
        let mut coords: Vec<Coord> = Vec::new();
        for cell in self.old_values.iter().chain(&self.new_values) {
            if !coords.contains(&cell.coord) {
                coords.push(cell.coord);
            }
        }
        coords
    }
}

impl<T: PartialEq> PartialEq for GridChangedEvent<T> {
    fn eq(&self, other: &Self) -> bool {
        same_cells(cell_items(&self.old_values), cell_items(&other.old_values))
            && same_cells(cell_items(&self.new_values), cell_items(&other.new_values))
    }
}

impl<T: Eq> Eq for GridChangedEvent<T> {}

/// Handle returned by [`Listeners::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler<T> = Box<dyn FnMut(&GridChangedEvent<T>)>;

/// Ordered registry of change handlers
pub struct Listeners<T> {
    handlers: Vec<(ListenerId, Handler<T>)>,
    next_id: u64,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&GridChangedEvent<T>) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns false if the handler was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every handler against `event`. Empty events are dropped.
    pub fn dispatch(&mut self, event: &GridChangedEvent<T>) {
        if event.is_empty() {
            return;
        }
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.handlers.len())
            .finish()
    }
}
