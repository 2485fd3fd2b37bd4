use ndarray::Array2;
use std::collections::{hash_map, HashMap, HashSet};
use std::fmt;

use crate::cell::Cell;
use crate::coord::{shifted, Boundaries, Coord, Rect};
use crate::equality::{cell_items, dense_items, jagged_items, pair_items, same_cells};
use crate::error::GridError;
use crate::event::{GridChangedEvent, ListenerId, Listeners};
use crate::extent::Extents;

/// Sparse map from coordinates to values, at most one value per coordinate.
///
/// Only occupied coordinates are stored. Every structural mutation raises a
/// single [`GridChangedEvent`] describing all cells it touched.
pub struct Grid<T> {
    /// Occupied coordinates only; an absent key means "nothing there"
    cells: HashMap<Coord, T>,
    /// Occupancy per column/row for O(log n) extent queries
    extents: Extents,
    listeners: Listeners<T>,
}

impl<T> Grid<T> {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
            extents: Extents::new(),
            listeners: Listeners::new(),
        }
    }

    /// Create an empty grid with room for `capacity` cells
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: HashMap::with_capacity(capacity),
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

    /// Number of subscribed listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Get the value at a coordinate
    pub fn get(&self, coord: Coord) -> Option<&T> {
        self.cells.get(&coord)
    }

    /// Number of occupied coordinates
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no coordinate is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check whether a coordinate is occupied
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Smallest occupied `x`, 0 when empty
    pub fn first_column(&self) -> i32 {
        self.extents.first_column()
    }

    /// Largest occupied `x`, 0 when empty
    pub fn last_column(&self) -> i32 {
        self.extents.last_column()
    }

    /// Smallest occupied `y`, 0 when empty
    pub fn first_row(&self) -> i32 {
        self.extents.first_row()
    }

    /// Largest occupied `y`, 0 when empty
    pub fn last_row(&self) -> i32 {
        self.extents.last_row()
    }

    /// Columns spanned by the occupied cells, counted through `x = 0`
    pub fn column_count(&self) -> usize {
        self.extents.column_count_from_origin()
    }

    /// Rows spanned by the occupied cells, counted through `y = 0`
    pub fn row_count(&self) -> usize {
        self.extents.row_count_from_origin()
    }

    /// Exact bounding box of the occupied cells (all zero when empty)
    pub fn boundaries(&self) -> Boundaries {
        self.extents.boundaries()
    }

    /// Iterate `(coord, &value)` in no particular order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.cells.iter(),
        }
    }

    /// Occupied coordinates in no particular order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.keys().copied()
    }

    /// Stored values in no particular order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.cells.values()
    }

    /// Insert without notifying. Returns the replaced value, if any.
    fn put(&mut self, coord: Coord, value: T) -> Option<T> {
        let old = self.cells.insert(coord, value);
        if old.is_none() {
            self.extents.insert(coord);
        }
        old
    }

    /// Remove without notifying
    fn take(&mut self, coord: Coord) -> Option<T> {
        let old = self.cells.remove(&coord);
        if old.is_some() {
            self.extents.remove(coord);
        }
        old
    }

    fn notify(&mut self, event: GridChangedEvent<T>) {
        if event.is_empty() {
            return;
        }
        tracing::trace!(
            old = event.old_values.len(),
            new = event.new_values.len(),
            "grid changed"
        );
        self.listeners.dispatch(&event);
    }

    /// Coordinates 4-connected to `seed` inside `bounds` whose current value
    /// equals `target`. Absent matches absent.
    fn connected_region(&self, seed: Coord, target: Option<&T>, bounds: Boundaries) -> Vec<Coord>
    where
        T: PartialEq,
    {
        let mut region = Vec::new();
        let mut visited = HashSet::new();
        let mut pending = vec![seed];

        while let Some(coord) = pending.pop() {
            if !visited.insert(coord) {
                continue;
            }
            if !bounds.contains(coord) || self.get(coord) != target {
                continue;
            }
            region.push(coord);
            pending.extend(coord.neighbours().filter(|n| !visited.contains(n)));
        }

        region
    }
}

impl<T: Clone + PartialEq> Grid<T> {
    /// Upsert (`Some`) or remove (`None`) the value at `coord`.
    ///
    /// Fires an event only if the stored state actually changes. Returns the
    /// previous value.
    pub fn set(&mut self, coord: Coord, value: Option<T>) -> Option<T> {
        match value {
            Some(value) => {
                let old = self.put(coord, value.clone());
                if old.as_ref() == Some(&value) {
                    return old;
                }
                let old_values = old.iter().cloned().map(|v| Cell::new(coord, v)).collect();
                self.notify(GridChangedEvent::new(old_values, vec![Cell::new(coord, value)]));
                old
            }
            None => {
                let old = self.take(coord)?;
                self.notify(GridChangedEvent::removed(vec![Cell::new(coord, old.clone())]));
                Some(old)
            }
        }
    }

    /// Insert into an empty slot
    pub fn add(&mut self, coord: Coord, value: T) -> Result<(), GridError> {
        if self.contains(coord) {
            tracing::debug!(%coord, "add rejected, slot occupied");
            return Err(GridError::SlotOccupied { coord });
        }
        self.put(coord, value.clone());
        self.notify(GridChangedEvent::added(vec![Cell::new(coord, value)]));
        Ok(())
    }

    /// Like [`Grid::add`] but a collision is silently ignored
    pub fn try_add(&mut self, coord: Coord, value: T) -> bool {
        self.add(coord, value).is_ok()
    }

    /// Insert a batch of cells, all or nothing.
    ///
    /// Fails if any target is occupied or the batch names a coordinate twice.
    pub fn add_cells<I>(&mut self, cells: I) -> Result<usize, GridError>
    where
        I: IntoIterator<Item = Cell<T>>,
    {
        let cells: Vec<Cell<T>> = cells.into_iter().collect();
        let mut seen = HashSet::with_capacity(cells.len());
        for cell in &cells {
            if self.contains(cell.coord) || !seen.insert(cell.coord) {
                tracing::debug!(coord = %cell.coord, "batch add rejected, slot occupied");
                return Err(GridError::SlotOccupied { coord: cell.coord });
            }
        }

        for cell in &cells {
            self.put(cell.coord, cell.value.clone());
        }
        let count = cells.len();
        self.notify(GridChangedEvent::added(cells));
        Ok(count)
    }

    /// Insert the cells whose slot is free, skip the rest.
    ///
    /// Returns how many were inserted.
    pub fn try_add_cells<I>(&mut self, cells: I) -> usize
    where
        I: IntoIterator<Item = Cell<T>>,
    {
        let mut inserted = Vec::new();
        for cell in cells {
            if self.contains(cell.coord) {
                continue;
            }
            self.put(cell.coord, cell.value.clone());
            inserted.push(cell);
        }
        let count = inserted.len();
        self.notify(GridChangedEvent::added(inserted));
        count
    }

    /// Remove the value at `coord`, failing if there is none
    pub fn remove_at(&mut self, coord: Coord) -> Result<T, GridError> {
        let Some(old) = self.take(coord) else {
            tracing::debug!(%coord, "remove rejected, nothing there");
            return Err(GridError::NothingThere { coord });
        };
        self.notify(GridChangedEvent::removed(vec![Cell::new(coord, old.clone())]));
        Ok(old)
    }

    /// Remove and return the value at `coord` if there is one
    pub fn try_remove_at(&mut self, coord: Coord) -> Option<T> {
        self.remove_at(coord).ok()
    }

    /// Remove every cell holding `value`
    pub fn remove_all(&mut self, value: &T) -> usize {
        self.remove_all_where(|v| v == value)
    }

    /// Remove every cell whose value matches `predicate`
    pub fn remove_all_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let doomed: Vec<Coord> = self
            .cells
            .iter()
            .filter(|&(_, v)| predicate(v))
            .map(|(c, _)| *c)
            .collect();

        let removed: Vec<Cell<T>> = doomed
            .into_iter()
            .filter_map(|coord| self.take(coord).map(|v| Cell::new(coord, v)))
            .collect();
        let count = removed.len();
        self.notify(GridChangedEvent::removed(removed));
        count
    }

    /// Coordinates holding `value`
    pub fn indexes_of(&self, value: &T) -> Vec<Coord> {
        self.indexes_of_where(|v| v == value)
    }

    /// Coordinates whose value matches `predicate`
    pub fn indexes_of_where<F>(&self, mut predicate: F) -> Vec<Coord>
    where
        F: FnMut(&T) -> bool,
    {
        self.cells
            .iter()
            .filter(|&(_, v)| predicate(v))
            .map(|(c, _)| *c)
            .collect()
    }

    /// Check whether `coord` holds exactly `value`
    pub fn contains_cell(&self, coord: Coord, value: &T) -> bool {
        self.get(coord) == Some(value)
    }

    /// Check whether any coordinate holds `value`
    pub fn contains_value(&self, value: &T) -> bool {
        self.cells.values().any(|v| v == value)
    }

    /// Flood fill clipped to the grid's current boundaries
    pub fn flood_fill(&mut self, seed: Coord, new_value: T) -> usize {
        let bounds = self.boundaries();
        self.flood_fill_within(seed, new_value, bounds)
    }

    /// Overwrite the 4-connected region around `seed` that shares the seed's
    /// value, without leaving `bounds`.
    ///
    /// An absent seed fills the connected absent coordinates inside `bounds`.
    /// Returns the number of coordinates changed.
    pub fn flood_fill_within(&mut self, seed: Coord, new_value: T, bounds: Boundaries) -> usize {
        if !bounds.contains(seed) {
            return 0;
        }
        let target = self.get(seed).cloned();
        if target.as_ref() == Some(&new_value) {
            return 0;
        }

        let region = self.connected_region(seed, target.as_ref(), bounds);
        let mut old_values = Vec::new();
        let mut new_values = Vec::with_capacity(region.len());
        for coord in region {
            if let Some(old) = self.put(coord, new_value.clone()) {
                old_values.push(Cell::new(coord, old));
            }
            new_values.push(Cell::new(coord, new_value.clone()));
        }

        let count = new_values.len();
        tracing::trace!(%seed, count, "flood fill");
        self.notify(GridChangedEvent::new(old_values, new_values));
        count
    }

    /// Flood clear clipped to the grid's current boundaries
    pub fn flood_clear(&mut self, seed: Coord) -> usize {
        let bounds = self.boundaries();
        self.flood_clear_within(seed, bounds)
    }

    /// Remove the 4-connected region around `seed` that shares the seed's
    /// value, without leaving `bounds`. Returns the number removed.
    pub fn flood_clear_within(&mut self, seed: Coord, bounds: Boundaries) -> usize {
        if !bounds.contains(seed) {
            return 0;
        }
        let Some(target) = self.get(seed).cloned() else {
            return 0;
        };

        let region = self.connected_region(seed, Some(&target), bounds);
        let removed: Vec<Cell<T>> = region
            .into_iter()
            .filter_map(|coord| self.take(coord).map(|v| Cell::new(coord, v)))
            .collect();

        let count = removed.len();
        tracing::trace!(%seed, count, "flood clear");
        self.notify(GridChangedEvent::removed(removed));
        count
    }

    /// Evict everything outside `bounds`
    pub fn resize(&mut self, bounds: Boundaries) -> usize {
        self.remove_where_coord(|coord| !bounds.contains(coord))
    }

    /// Remove everything
    pub fn clear(&mut self) -> usize {
        self.remove_where_coord(|_| true)
    }

    fn remove_where_coord<F>(&mut self, mut doomed: F) -> usize
    where
        F: FnMut(Coord) -> bool,
    {
        let coords: Vec<Coord> = self.coords().filter(|c| doomed(*c)).collect();
        let removed: Vec<Cell<T>> = coords
            .into_iter()
            .filter_map(|coord| self.take(coord).map(|v| Cell::new(coord, v)))
            .collect();
        let count = removed.len();
        self.notify(GridChangedEvent::removed(removed));
        count
    }

    /// Shift every cell by `delta`.
    ///
    /// Fails with `CoordinateOverflow` and leaves the grid untouched if any
    /// cell would leave the `i32` range.
    pub fn translate_all(&mut self, delta: Coord) -> Result<usize, GridError> {
        if delta == Coord::ZERO || self.is_empty() {
            return Ok(0);
        }

        let new_values: Vec<Cell<T>> = self
            .iter()
            .map(|(coord, value)| {
                Cell::new(coord, value.clone())
                    .translated(delta)
                    .ok_or(GridError::CoordinateOverflow { coord, delta })
            })
            .collect::<Result<_, _>>()?;

        let old_values: Vec<Cell<T>> = self
            .cells
            .drain()
            .map(|(coord, value)| Cell::new(coord, value))
            .collect();
        self.extents.clear();
        for cell in &new_values {
            self.put(cell.coord, cell.value.clone());
        }

        let count = new_values.len();
        tracing::trace!(%delta, count, "translate all");
        self.notify(GridChangedEvent::new(old_values, new_values));
        Ok(count)
    }

    /// Shift the cells inside the inclusive `region` by `delta`.
    ///
    /// Unmoved cells at a destination are overwritten ("squashed") and
    /// reported in the event's `old_values` alongside the moved originals.
    /// Overflow is checked before anything moves, as in `translate_all`.
    pub fn translate(&mut self, region: Boundaries, delta: Coord) -> Result<usize, GridError> {
        if delta == Coord::ZERO || region.is_degenerate() {
            return Ok(0);
        }

        let moving: Vec<(Coord, Coord)> = self
            .coords()
            .filter(|c| region.contains(*c))
            .map(|coord| shifted(coord, delta).map(|dest| (coord, dest)))
            .collect::<Result<_, _>>()?;
        if moving.is_empty() {
            return Ok(0);
        }

        // Lift every moving cell first so none of them can squash another.
        let mut old_values = Vec::with_capacity(moving.len());
        let mut lifted = Vec::with_capacity(moving.len());
        for (coord, dest) in moving {
            if let Some(value) = self.take(coord) {
                old_values.push(Cell::new(coord, value.clone()));
                lifted.push(Cell::new(dest, value));
            }
        }

        let mut new_values = Vec::with_capacity(lifted.len());
        for cell in lifted {
            if let Some(squashed) = self.put(cell.coord, cell.value.clone()) {
                old_values.push(Cell::new(cell.coord, squashed));
            }
            new_values.push(cell);
        }

        let count = new_values.len();
        tracing::trace!(%region, %delta, count, "translate region");
        self.notify(GridChangedEvent::new(old_values, new_values));
        Ok(count)
    }

    /// Shift the cells inside the half-open `region` by `delta`
    pub fn translate_rect(&mut self, region: Rect, delta: Coord) -> Result<usize, GridError> {
        match region.to_boundaries() {
            Some(bounds) => self.translate(bounds, delta),
            None => Ok(0),
        }
    }

    /// Exchange the occupants of `a` and `b`.
    ///
    /// With one side empty this is a move. Returns false when nothing changed.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        if a == b {
            return false;
        }
        let at_a = self.take(a);
        let at_b = self.take(b);
        if at_a.is_none() && at_b.is_none() {
            return false;
        }

        let mut old_values = Vec::with_capacity(2);
        let mut new_values = Vec::with_capacity(2);
        if let Some(value) = at_a {
            old_values.push(Cell::new(a, value.clone()));
            self.put(b, value.clone());
            new_values.push(Cell::new(b, value));
        }
        if let Some(value) = at_b {
            old_values.push(Cell::new(b, value.clone()));
            self.put(a, value.clone());
            new_values.push(Cell::new(a, value));
        }

        tracing::trace!(%a, %b, "swap");
        self.notify(GridChangedEvent::new(old_values, new_values));
        true
    }

    /// Apply the inverse of a recorded event: drop its `new_values` and
    /// restore its `old_values`. Fires the inverted event.
    pub fn revert(&mut self, event: &GridChangedEvent<T>) {
        let mut applied = GridChangedEvent::default();
        for cell in &event.new_values {
            if let Some(value) = self.take(cell.coord) {
                applied.old_values.push(Cell::new(cell.coord, value));
            }
        }
        for cell in &event.old_values {
            if let Some(value) = self.put(cell.coord, cell.value.clone()) {
                applied.old_values.push(Cell::new(cell.coord, value));
            }
            applied.new_values.push(cell.clone());
        }
        self.notify(applied);
    }
}

impl<T: Clone> Grid<T> {
    /// Independent copy of every cell. Listeners are not copied.
    pub fn copy(&self) -> Grid<T> {
        self.iter().map(|(c, v)| (c, v.clone())).collect()
    }

    /// Independent copy of the cells inside `bounds`
    pub fn copy_within(&self, bounds: Boundaries) -> Grid<T> {
        self.iter()
            .filter(|(c, _)| bounds.contains(*c))
            .map(|(c, v)| (c, v.clone()))
            .collect()
    }

    /// Owned cells in storage order
    pub fn cells(&self) -> impl Iterator<Item = Cell<T>> + '_ {
        self.iter().map(|(c, v)| Cell::new(c, v.clone()))
    }
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Grid<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("cells", &self.cells)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Borrowing iterator over `(Coord, &T)`
pub struct Iter<'a, T> {
    inner: hash_map::Iter<'a, Coord, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Coord, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(c, v)| (*c, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Owning iterator over the grid's cells
pub struct IntoIter<T> {
    inner: hash_map::IntoIter<Coord, T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = Cell<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(c, v)| Cell::new(c, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (Coord, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Grid<T> {
    type Item = Cell<T>;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.cells.into_iter(),
        }
    }
}

/// Later cells overwrite earlier ones at the same coordinate
impl<T> FromIterator<(Coord, T)> for Grid<T> {
    fn from_iter<I: IntoIterator<Item = (Coord, T)>>(iter: I) -> Self {
        let mut grid = Grid::new();
        for (coord, value) in iter {
            grid.put(coord, value);
        }
        grid
    }
}

impl<T> FromIterator<Cell<T>> for Grid<T> {
    fn from_iter<I: IntoIterator<Item = Cell<T>>>(iter: I) -> Self {
        iter.into_iter().map(Cell::into_pair).collect()
    }
}

/// Upserts every cell and raises one event for the ones that changed
impl<T: Clone + PartialEq> Extend<Cell<T>> for Grid<T> {
    fn extend<I: IntoIterator<Item = Cell<T>>>(&mut self, iter: I) {
        let mut event = GridChangedEvent::default();
        for cell in iter {
            let old = self.put(cell.coord, cell.value.clone());
            if old.as_ref() == Some(&cell.value) {
                continue;
            }
            if let Some(old) = old {
                event.old_values.push(Cell::new(cell.coord, old));
            }
            event.new_values.push(cell);
        }
        self.notify(event);
    }
}

impl<T: PartialEq> PartialEq for Grid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(c, v)| other.get(c) == Some(v))
    }
}

impl<T: Eq> Eq for Grid<T> {}

/// Dense arrays are indexed `[x, y]`; `None` marks an empty slot
impl<T: PartialEq> PartialEq<Array2<Option<T>>> for Grid<T> {
    fn eq(&self, other: &Array2<Option<T>>) -> bool {
        if self.coords().any(|c| c.is_negative()) {
            return false;
        }
        dense_items(other).is_some_and(|items| same_cells(self.iter(), items))
    }
}

/// Jagged arrays are indexed `[x][y]`; `None` marks an empty slot
impl<T: PartialEq> PartialEq<Vec<Vec<Option<T>>>> for Grid<T> {
    fn eq(&self, other: &Vec<Vec<Option<T>>>) -> bool {
        if self.coords().any(|c| c.is_negative()) {
            return false;
        }
        jagged_items(other).is_some_and(|items| same_cells(self.iter(), items))
    }
}

impl<T: PartialEq> PartialEq<[Cell<T>]> for Grid<T> {
    fn eq(&self, other: &[Cell<T>]) -> bool {
        same_cells(self.iter(), cell_items(other))
    }
}

impl<T: PartialEq> PartialEq<Vec<Cell<T>>> for Grid<T> {
    fn eq(&self, other: &Vec<Cell<T>>) -> bool {
        *self == other[..]
    }
}

impl<T: PartialEq> PartialEq<[(Coord, T)]> for Grid<T> {
    fn eq(&self, other: &[(Coord, T)]) -> bool {
        same_cells(self.iter(), pair_items(other))
    }
}

impl<T: PartialEq> PartialEq<Vec<(Coord, T)>> for Grid<T> {
    fn eq(&self, other: &Vec<(Coord, T)>) -> bool {
        *self == other[..]
    }
}

/// Grids travel as a sequence of cells so empty slots never materialise
mod grid_serde {
    use super::*;
    use serde::ser::SerializeSeq;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl<T: Serialize> Serialize for Grid<T> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            // Row-major so the output is stable across runs
            let mut entries: Vec<(Coord, &T)> = self.iter().collect();
            entries.sort_by_key(|(c, _)| (c.y, c.x));

            let mut seq = serializer.serialize_seq(Some(entries.len()))?;
            for (coord, value) in entries {
                seq.serialize_element(&Cell::new(coord, value))?;
            }
            seq.end()
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for Grid<T> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct GridVisitor<T>(std::marker::PhantomData<T>);

            impl<'de, T: Deserialize<'de>> de::Visitor<'de> for GridVisitor<T> {
                type Value = Grid<T>;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a sequence of cells")
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
                where
                    A: de::SeqAccess<'de>,
                {
                    let mut grid = Grid::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
                    while let Some(cell) = seq.next_element::<Cell<T>>()? {
                        if grid.contains(cell.coord) {
                            return Err(de::Error::custom(GridError::InvalidArgument(format!(
                                "coordinate {} appears twice",
                                cell.coord
                            ))));
                        }
                        grid.put(cell.coord, cell.value);
                    }
                    Ok(grid)
                }
            }

            deserializer.deserialize_seq(GridVisitor(std::marker::PhantomData))
        }
    }
}
