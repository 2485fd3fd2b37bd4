use sparsegrid_core::{Cell, Coord, Grid, OverlapGrid};

/// Later pairs overwrite earlier ones at the same coordinate
pub fn grid_from_pairs<T, I>(pairs: I) -> Grid<T>
where
    I: IntoIterator<Item = (Coord, T)>,
{
    pairs.into_iter().collect()
}

/// Row-major list of `(coord, value)` pairs
pub fn to_pairs<T: Clone>(grid: &Grid<T>) -> Vec<(Coord, T)> {
    to_cells(grid).into_iter().map(Cell::into_pair).collect()
}

pub fn grid_from_cells<T, I>(cells: I) -> Grid<T>
where
    I: IntoIterator<Item = Cell<T>>,
{
    cells.into_iter().collect()
}

/// Row-major list of cells
pub fn to_cells<T: Clone>(grid: &Grid<T>) -> Vec<Cell<T>> {
    let mut cells: Vec<Cell<T>> = grid.cells().collect();
    cells.sort_by_key(|c| (c.coord.y, c.coord.x));
    cells
}

/// Every cell becomes one overlap entry
pub fn overlap_from_grid<T: Clone>(grid: &Grid<T>) -> OverlapGrid<T> {
    to_cells(grid).into_iter().collect()
}

/// Collapse stacks to a single value; the newest entry at a coordinate wins
pub fn grid_from_overlap<T: Clone>(overlap: &OverlapGrid<T>) -> Grid<T> {
    overlap.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_cells_round_trip() {
        let grid = grid_from_pairs(vec![(c(3, -1), "x"), (c(-2, 5), "y")]);
        assert_eq!(grid_from_cells(to_cells(&grid)), grid);
        assert_eq!(to_pairs(&grid), vec![(c(3, -1), "x"), (c(-2, 5), "y")]);
    }

    #[test]
    fn test_later_pairs_win() {
        let grid = grid_from_pairs(vec![(c(0, 0), 1), (c(0, 0), 2)]);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(c(0, 0)), Some(&2));
    }

    #[test]
    fn test_overlap_conversions() {
        let grid = grid_from_pairs(vec![(c(0, 0), 'a'), (c(1, 0), 'b')]);
        let mut overlap = overlap_from_grid(&grid);
        assert_eq!(overlap.len(), 2);

        overlap.add(c(0, 0), 'z');
        let collapsed = grid_from_overlap(&overlap);
        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed.get(c(0, 0)), Some(&'z'));
    }
}
