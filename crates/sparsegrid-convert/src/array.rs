use ndarray::Array2;
use sparsegrid_core::{Coord, Grid, GridError};

/// Build a grid from a dense array indexed `[x, y]`.
///
/// Fails with `InvalidRange` if an occupied index does not fit in `i32`.
pub fn grid_from_dense<T: Clone>(array: &Array2<Option<T>>) -> Result<Grid<T>, GridError> {
    array
        .indexed_iter()
        .filter_map(|((x, y), v)| {
            let value = v.as_ref()?;
            Some(coord_at(x, y).map(|coord| (coord, value.clone())))
        })
        .collect()
}

/// Dense `[x, y]` array just large enough for every occupied cell
pub fn to_dense<T: Clone>(grid: &Grid<T>) -> Result<Array2<Option<T>>, GridError> {
    check_non_negative(grid)?;
    if grid.is_empty() {
        return Ok(Array2::from_elem((0, 0), None));
    }

    let shape = (
        grid.last_column() as usize + 1,
        grid.last_row() as usize + 1,
    );
    let mut array = Array2::from_elem(shape, None);
    for (coord, value) in grid {
        array[[coord.x as usize, coord.y as usize]] = Some(value.clone());
    }
    Ok(array)
}

/// Build a grid from a jagged array indexed `[x][y]`
pub fn grid_from_jagged<T: Clone>(array: &[Vec<Option<T>>]) -> Result<Grid<T>, GridError> {
    array
        .iter()
        .enumerate()
        .flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .filter_map(move |(y, v)| {
                    let value = v.as_ref()?;
                    Some(coord_at(x, y).map(|coord| (coord, value.clone())))
                })
        })
        .collect()
}

/// Jagged `[x][y]` array; each column is only as tall as its own last cell
pub fn to_jagged<T: Clone>(grid: &Grid<T>) -> Result<Vec<Vec<Option<T>>>, GridError> {
    check_non_negative(grid)?;
    if grid.is_empty() {
        return Ok(Vec::new());
    }

    let mut columns: Vec<Vec<Option<T>>> = vec![Vec::new(); grid.last_column() as usize + 1];
    for (coord, value) in grid {
        let column = &mut columns[coord.x as usize];
        let y = coord.y as usize;
        if column.len() <= y {
            column.resize(y + 1, None);
        }
        column[y] = Some(value.clone());
    }
    Ok(columns)
}

/// Coordinate for an array index pair
pub(crate) fn coord_at(x: usize, y: usize) -> Result<Coord, GridError> {
    Ok(Coord::new(axis_index("x", x)?, axis_index("y", y)?))
}

fn axis_index(name: &'static str, index: usize) -> Result<i32, GridError> {
    i32::try_from(index).map_err(|_| GridError::InvalidRange {
        name,
        value: i64::try_from(index).unwrap_or(i64::MAX),
    })
}

fn check_non_negative<T>(grid: &Grid<T>) -> Result<(), GridError> {
    match grid.coords().find(|c| c.is_negative()) {
        Some(coord) => Err(GridError::NegativeCoordinate { coord }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    fn sample() -> Grid<char> {
        vec![(c(0, 0), 'a'), (c(2, 1), 'b'), (c(1, 3), 'c')]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_dense_export_shape() {
        let dense = to_dense(&sample()).unwrap();
        assert_eq!(dense.dim(), (3, 4));
        assert_eq!(dense[[2, 1]], Some('b'));
        assert_eq!(dense[[1, 1]], None);
        assert!(sample() == dense);
    }

    #[test]
    fn test_dense_round_trip() {
        let grid = sample();
        let back = grid_from_dense(&to_dense(&grid).unwrap()).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_dense_import_skips_empty_slots() {
        let mut dense = Array2::from_elem((5, 5), None);
        dense[[4, 0]] = Some(1);
        let grid = grid_from_dense(&dense).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(c(4, 0)), Some(&1));
    }

    #[test]
    fn test_negative_coordinate_rejected() {
        let mut grid = sample();
        grid.add(c(0, -2), 'z').unwrap();
        assert_eq!(
            to_dense(&grid).unwrap_err(),
            GridError::NegativeCoordinate { coord: c(0, -2) }
        );
        assert!(to_jagged(&grid).is_err());
    }

    #[test]
    fn test_jagged_columns_are_ragged() {
        let jagged = to_jagged(&sample()).unwrap();
        assert_eq!(jagged.len(), 3);
        assert_eq!(jagged[0], vec![Some('a')]);
        assert_eq!(jagged[1], vec![None, None, None, Some('c')]);
        assert_eq!(jagged[2], vec![None, Some('b')]);
        assert_eq!(grid_from_jagged(&jagged).unwrap(), sample());
    }

    #[test]
    fn test_index_past_i32_rejected() {
        let past = i32::MAX as usize + 1;
        assert_eq!(
            coord_at(past, 0),
            Err(GridError::InvalidRange {
                name: "x",
                value: 2_147_483_648,
            })
        );
        assert!(coord_at(0, past).is_err());
        assert_eq!(coord_at(i32::MAX as usize, 3), Ok(c(i32::MAX, 3)));
    }

    #[test]
    fn test_empty_grid_exports() {
        let grid: Grid<u8> = Grid::new();
        assert_eq!(to_dense(&grid).unwrap().len(), 0);
        assert!(to_jagged(&grid).unwrap().is_empty());
    }
}
