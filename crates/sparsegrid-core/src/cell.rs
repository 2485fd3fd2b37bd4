use serde::{Deserialize, Serialize};

use crate::coord::Coord;

/// A value placed at a coordinate.
///
/// This is the unit every bulk operation and every change event speaks in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell<T> {
    pub coord: Coord,
    pub value: T,
}

impl<T> Cell<T> {
    pub const fn new(coord: Coord, value: T) -> Self {
        Cell { coord, value }
    }

    /// Same value at a shifted coordinate, `None` if the shift overflows
    pub fn translated(self, delta: Coord) -> Option<Self> {
        Some(Cell {
            coord: self.coord.checked_add(delta)?,
            value: self.value,
        })
    }

    pub fn into_pair(self) -> (Coord, T) {
        (self.coord, self.value)
    }
}

impl<T> From<(Coord, T)> for Cell<T> {
    fn from((coord, value): (Coord, T)) -> Self {
        Cell::new(coord, value)
    }
}

impl<T> From<Cell<T>> for (Coord, T) {
    fn from(cell: Cell<T>) -> Self {
        cell.into_pair()
    }
}
