//! Shape normalisation for grid comparisons.
//!
//! Every comparable shape (another grid, a dense array, a jagged array, a list
//! of cells or of pairs) is flattened into `(Coord, &T)` items and handed to
//! [`same_cells`], which performs an order-independent multiset comparison.

use ndarray::Array2;
use std::collections::HashMap;

use crate::cell::Cell;
use crate::coord::Coord;

/// Order-independent, count-sensitive comparison of two cell sequences
pub fn same_cells<'a, T, A, B>(left: A, right: B) -> bool
where
    T: PartialEq + 'a,
    A: IntoIterator<Item = (Coord, &'a T)>,
    B: IntoIterator<Item = (Coord, &'a T)>,
{
    let mut buckets: HashMap<Coord, Vec<&'a T>> = HashMap::new();
    let mut remaining = 0usize;
    for (coord, value) in left {
        buckets.entry(coord).or_default().push(value);
        remaining += 1;
    }

    for (coord, value) in right {
        let Some(bucket) = buckets.get_mut(&coord) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|v| *v == value) else {
            return false;
        };
        bucket.swap_remove(pos);
        remaining -= 1;
    }

    remaining == 0
}

/// Borrowed view of a cell slice
pub fn cell_items<T>(cells: &[Cell<T>]) -> impl Iterator<Item = (Coord, &T)> {
    cells.iter().map(|c| (c.coord, &c.value))
}

/// Borrowed view of a pair slice
pub fn pair_items<T>(pairs: &[(Coord, T)]) -> impl Iterator<Item = (Coord, &T)> {
    pairs.iter().map(|(c, v)| (*c, v))
}

/// Occupied entries of a dense array. Axis 0 is `x`, axis 1 is `y`.
///
/// Returns `None` if an index does not fit a coordinate.
pub fn dense_items<T>(array: &Array2<Option<T>>) -> Option<Vec<(Coord, &T)>> {
    array
        .indexed_iter()
        .filter_map(|((x, y), v)| v.as_ref().map(|v| (x, y, v)))
        .map(|(x, y, v)| Some((index_coord(x, y)?, v)))
        .collect()
}

/// Occupied entries of a jagged array, `array[x][y]`
pub fn jagged_items<T>(array: &[Vec<Option<T>>]) -> Option<Vec<(Coord, &T)>> {
    array
        .iter()
        .enumerate()
        .flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .filter_map(move |(y, v)| v.as_ref().map(|v| (x, y, v)))
        })
        .map(|(x, y, v)| Some((index_coord(x, y)?, v)))
        .collect()
}

fn index_coord(x: usize, y: usize) -> Option<Coord> {
    Some(Coord::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}
