use std::fmt;
use std::slice;

use crate::cell::Cell;
use crate::coord::{shifted, Boundaries, Coord, Rect};
use crate::equality::{cell_items, pair_items, same_cells};
use crate::error::GridError;
use crate::event::{GridChangedEvent, ListenerId, Listeners};
use crate::extent::Extents;

/// Sparse grid where any number of values may share a coordinate.
///
/// Entries are kept in insertion order. Adding never collides, and removing
/// a coordinate removes every entry stacked on it.
pub struct OverlapGrid<T> {
    entries: Vec<Cell<T>>,
    extents: Extents,
    listeners: Listeners<T>,
}

impl<T> OverlapGrid<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            extents: Extents::new(),
            listeners: Listeners::new(),
        }
    }

    /// Register a change handler
    pub fn subscribe<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&GridChangedEvent<T>) + 'static,
    {
        self.listeners.subscribe(handler)
    }

    /// Drop a listener. Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// All values stacked at `coord`, oldest first
    pub fn get(&self, coord: Coord) -> Vec<&T> {
        self.entries
            .iter()
            .filter(|e| e.coord == coord)
            .map(|e| &e.value)
            .collect()
    }

    /// Number of entries, not of distinct coordinates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether any entry sits at `coord`
    pub fn contains(&self, coord: Coord) -> bool {
        self.entries.iter().any(|e| e.coord == coord)
    }

    /// Smallest `x` of any entry, 0 when empty
    pub fn first_column(&self) -> i32 {
        self.extents.first_column()
    }

    /// Largest `x` of any entry, 0 when empty
    pub fn last_column(&self) -> i32 {
        self.extents.last_column()
    }

    /// Smallest `y` of any entry, 0 when empty
    pub fn first_row(&self) -> i32 {
        self.extents.first_row()
    }

    /// Largest `y` of any entry, 0 when empty
    pub fn last_row(&self) -> i32 {
        self.extents.last_row()
    }

    /// `last_column - first_column + 1`, 0 when empty
    pub fn column_count(&self) -> usize {
        self.extents.column_count()
    }

    /// `last_row - first_row + 1`, 0 when empty
    pub fn row_count(&self) -> usize {
        self.extents.row_count()
    }

    /// Smallest inclusive rectangle covering every entry
    pub fn boundaries(&self) -> Boundaries {
        self.extents.boundaries()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> slice::Iter<'_, Cell<T>> {
        self.entries.iter()
    }

    fn push(&mut self, cell: Cell<T>) {
        self.extents.insert(cell.coord);
        self.entries.push(cell);
    }

    /// Remove every entry matching `doomed`, keeping the survivors in order
    fn extract<F>(&mut self, mut doomed: F) -> Vec<Cell<T>>
    where
        F: FnMut(&Cell<T>) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.entries).into_iter().partition(|e| doomed(e));
        self.entries = kept;
        for cell in &removed {
            self.extents.remove(cell.coord);
        }
        removed
    }

    fn notify(&mut self, event: GridChangedEvent<T>) {
        if event.is_empty() {
            return;
        }
        tracing::trace!(
            old = event.old_values.len(),
            new = event.new_values.len(),
            "overlap grid changed"
        );
        self.listeners.dispatch(&event);
    }
}

impl<T: Clone + PartialEq> OverlapGrid<T> {
    /// Stack a value at `coord`
    pub fn add(&mut self, coord: Coord, value: T) {
        let cell = Cell::new(coord, value);
        self.push(cell.clone());
        self.notify(GridChangedEvent::added(vec![cell]));
    }

    /// Stack every cell, one event for the batch
    pub fn add_cells<I>(&mut self, cells: I) -> usize
    where
        I: IntoIterator<Item = Cell<T>>,
    {
        let cells: Vec<Cell<T>> = cells.into_iter().collect();
        for cell in &cells {
            self.push(cell.clone());
        }
        let count = cells.len();
        self.notify(GridChangedEvent::added(cells));
        count
    }

    /// Remove the oldest entry at `coord` holding `value`
    pub fn remove(&mut self, coord: Coord, value: &T) -> bool {
        let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.coord == coord && e.value == *value)
        else {
            return false;
        };
        let cell = self.entries.remove(pos);
        self.extents.remove(cell.coord);
        self.notify(GridChangedEvent::removed(vec![cell]));
        true
    }

    /// Remove every entry at `coord`, failing if there is none
    pub fn remove_at(&mut self, coord: Coord) -> Result<Vec<T>, GridError> {
        if !self.contains(coord) {
            tracing::debug!(%coord, "remove rejected, nothing there");
            return Err(GridError::NothingThere { coord });
        }
        Ok(self.try_remove_at(coord))
    }

    /// Remove every entry at `coord`; empty if there was none
    pub fn try_remove_at(&mut self, coord: Coord) -> Vec<T> {
        let removed = self.extract(|e| e.coord == coord);
        let values = removed.iter().map(|e| e.value.clone()).collect();
        self.notify(GridChangedEvent::removed(removed));
        values
    }

    /// Remove every entry holding `value`
    pub fn remove_all(&mut self, value: &T) -> usize {
        self.remove_all_where(|v| v == value)
    }

    /// Remove every entry whose value matches `predicate`
    pub fn remove_all_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let removed = self.extract(|e| predicate(&e.value));
        let count = removed.len();
        self.notify(GridChangedEvent::removed(removed));
        count
    }

    /// Distinct coordinates holding `value`, first seen first
    pub fn indexes_of(&self, value: &T) -> Vec<Coord> {
        self.indexes_of_where(|v| v == value)
    }

    /// Distinct coordinates with a value matching `predicate`, first seen first
    pub fn indexes_of_where<F>(&self, mut predicate: F) -> Vec<Coord>
    where
        F: FnMut(&T) -> bool,
    {
        let mut coords = Vec::new();
        for entry in &self.entries {
            if predicate(&entry.value) && !coords.contains(&entry.coord) {
                coords.push(entry.coord);
            }
        }
        coords
    }

    /// Check whether an entry at `coord` holds `value`
    pub fn contains_cell(&self, coord: Coord, value: &T) -> bool {
        self.entries
            .iter()
            .any(|e| e.coord == coord && e.value == *value)
    }

    /// Check whether any entry holds `value`
    pub fn contains_value(&self, value: &T) -> bool {
        self.entries.iter().any(|e| e.value == *value)
    }

    /// Evict every entry outside `bounds`
    pub fn resize(&mut self, bounds: Boundaries) -> usize {
        let removed = self.extract(|e| !bounds.contains(e.coord));
        let count = removed.len();
        self.notify(GridChangedEvent::removed(removed));
        count
    }

    /// Remove every entry
    pub fn clear(&mut self) -> usize {
        let removed = self.extract(|_| true);
        let count = removed.len();
        self.notify(GridChangedEvent::removed(removed));
        count
    }

    /// Shift every entry by `delta`.
    ///
    /// Fails with `CoordinateOverflow` and leaves the grid untouched if any
    /// entry would leave the `i32` range.
    pub fn translate_all(&mut self, delta: Coord) -> Result<usize, GridError> {
        if delta == Coord::ZERO || self.is_empty() {
            return Ok(0);
        }
        self.shift(delta, |_| true)
    }

    /// Shift the entries inside the inclusive `region` by `delta`.
    ///
    /// Entries landing on occupied coordinates simply stack there.
    pub fn translate(&mut self, region: Boundaries, delta: Coord) -> Result<usize, GridError> {
        if delta == Coord::ZERO || region.is_degenerate() {
            return Ok(0);
        }
        self.shift(delta, |coord| region.contains(coord))
    }

    /// Shift the entries inside the half-open `region` by `delta`
    pub fn translate_rect(&mut self, region: Rect, delta: Coord) -> Result<usize, GridError> {
        match region.to_boundaries() {
            Some(bounds) => self.translate(bounds, delta),
            None => Ok(0),
        }
    }

    fn shift<F>(&mut self, delta: Coord, selected: F) -> Result<usize, GridError>
    where
        F: Fn(Coord) -> bool,
    {
        let targets: Vec<(usize, Coord)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| selected(entry.coord))
            .map(|(i, entry)| shifted(entry.coord, delta).map(|dest| (i, dest)))
            .collect::<Result<_, _>>()?;

        let mut event = GridChangedEvent::default();
        for (i, dest) in targets {
            let entry = &mut self.entries[i];
            event.old_values.push(entry.clone());
            self.extents.remove(entry.coord);
            entry.coord = dest;
            self.extents.insert(dest);
            event.new_values.push(entry.clone());
        }

        let count = event.new_values.len();
        tracing::trace!(%delta, count, "overlap translate");
        self.notify(event);
        Ok(count)
    }

    /// Relabel every entry at `a` as `b` and vice versa
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        if a == b {
            return false;
        }

        let mut event = GridChangedEvent::default();
        for entry in self.entries.iter_mut() {
            let target = if entry.coord == a {
                b
            } else if entry.coord == b {
                a
            } else {
                continue;
            };
            event.old_values.push(entry.clone());
            self.extents.remove(entry.coord);
            entry.coord = target;
            self.extents.insert(target);
            event.new_values.push(entry.clone());
        }

        let changed = !event.is_empty();
        self.notify(event);
        changed
    }
}

impl<T: Clone> OverlapGrid<T> {
    /// Independent copy of every entry. Listeners are not copied.
    pub fn copy(&self) -> OverlapGrid<T> {
        self.entries.iter().cloned().collect()
    }

    /// Copy of the entries inside `bounds`
    pub fn copy_within(&self, bounds: Boundaries) -> OverlapGrid<T> {
        self.entries
            .iter()
            .filter(|e| bounds.contains(e.coord))
            .cloned()
            .collect()
    }

    /// Every entry in insertion order
    pub fn cells(&self) -> Vec<Cell<T>> {
        self.entries.clone()
    }
}

impl<T> Default for OverlapGrid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for OverlapGrid<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: fmt::Debug> fmt::Debug for OverlapGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlapGrid")
            .field("entries", &self.entries)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a OverlapGrid<T> {
    type Item = &'a Cell<T>;
    type IntoIter = slice::Iter<'a, Cell<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T> IntoIterator for OverlapGrid<T> {
    type Item = Cell<T>;
    type IntoIter = std::vec::IntoIter<Cell<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T> FromIterator<Cell<T>> for OverlapGrid<T> {
    fn from_iter<I: IntoIterator<Item = Cell<T>>>(iter: I) -> Self {
        let mut grid = OverlapGrid::new();
        for cell in iter {
            grid.push(cell);
        }
        grid
    }
}

impl<T> FromIterator<(Coord, T)> for OverlapGrid<T> {
    fn from_iter<I: IntoIterator<Item = (Coord, T)>>(iter: I) -> Self {
        iter.into_iter().map(Cell::from).collect()
    }
}

impl<T: Clone + PartialEq> Extend<Cell<T>> for OverlapGrid<T> {
    fn extend<I: IntoIterator<Item = Cell<T>>>(&mut self, iter: I) {
        self.add_cells(iter);
    }
}

impl<T: PartialEq> PartialEq for OverlapGrid<T> {
    fn eq(&self, other: &Self) -> bool {
        same_cells(cell_items(&self.entries), cell_items(&other.entries))
    }
}

impl<T: Eq> Eq for OverlapGrid<T> {}

impl<T: PartialEq> PartialEq<[Cell<T>]> for OverlapGrid<T> {
    fn eq(&self, other: &[Cell<T>]) -> bool {
        same_cells(cell_items(&self.entries), cell_items(other))
    }
}

impl<T: PartialEq> PartialEq<Vec<Cell<T>>> for OverlapGrid<T> {
    fn eq(&self, other: &Vec<Cell<T>>) -> bool {
        *self == other[..]
    }
}

impl<T: PartialEq> PartialEq<[(Coord, T)]> for OverlapGrid<T> {
    fn eq(&self, other: &[(Coord, T)]) -> bool {
        same_cells(cell_items(&self.entries), pair_items(other))
    }
}

impl<T: PartialEq> PartialEq<Vec<(Coord, T)>> for OverlapGrid<T> {
    fn eq(&self, other: &Vec<(Coord, T)>) -> bool {
        *self == other[..]
    }
}

mod overlap_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<T: Serialize> Serialize for OverlapGrid<T> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.entries.serialize(serializer)
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for OverlapGrid<T> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let entries = Vec::<Cell<T>>::deserialize(deserializer)?;
            Ok(entries.into_iter().collect())
        }
    }
}
