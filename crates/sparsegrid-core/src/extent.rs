//! Column/row occupancy bookkeeping.
//!
//! Each grid keeps a count of entries per column and per row so the first and
//! last occupied column/row are available in O(log n) after any insert or
//! removal, without rescanning storage.

use std::collections::BTreeMap;

use crate::coord::{Boundaries, Coord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extents {
    columns: BTreeMap<i32, usize>,
    rows: BTreeMap<i32, usize>,
}

impl Extents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more entry at `coord`
    pub fn insert(&mut self, coord: Coord) {
        *self.columns.entry(coord.x).or_insert(0) += 1;
        *self.rows.entry(coord.y).or_insert(0) += 1;
    }

    /// Forget one entry at `coord`
    pub fn remove(&mut self, coord: Coord) {
        release(&mut self.columns, coord.x);
        release(&mut self.rows, coord.y);
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.rows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn first_column(&self) -> i32 {
        self.columns.keys().next().copied().unwrap_or(0)
    }

    pub fn last_column(&self) -> i32 {
        self.columns.keys().next_back().copied().unwrap_or(0)
    }

    pub fn first_row(&self) -> i32 {
        self.rows.keys().next().copied().unwrap_or(0)
    }

    pub fn last_row(&self) -> i32 {
        self.rows.keys().next_back().copied().unwrap_or(0)
    }

    /// Exact min/max rectangle, all zero when empty
    pub fn boundaries(&self) -> Boundaries {
        Boundaries::new(
            self.first_row(),
            self.last_row(),
            self.first_column(),
            self.last_column(),
        )
    }

    /// Width counted through the origin: `max(0, last) - min(0, first) + 1`
    pub fn column_count_from_origin(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        span(self.first_column().min(0), self.last_column().max(0))
    }

    /// Height counted through the origin
    pub fn row_count_from_origin(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        span(self.first_row().min(0), self.last_row().max(0))
    }

    /// Plain `last - first + 1` width
    pub fn column_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        span(self.first_column(), self.last_column())
    }

    /// Plain `last - first + 1` height
    pub fn row_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        span(self.first_row(), self.last_row())
    }
}

fn release(counts: &mut BTreeMap<i32, usize>, key: i32) {
    if let Some(count) = counts.get_mut(&key) {
        *count -= 1;
        if *count == 0 {
            counts.remove(&key);
        }
    }
}

fn span(first: i32, last: i32) -> usize {
    (i64::from(last) - i64::from(first) + 1) as usize
}
