use sparsegrid_core::{Grid, GridError};

use crate::array::coord_at;

/// Reshape a row-major sequence into a grid `column_count` wide.
///
/// `None` entries leave their slot empty.
pub fn grid_from_flat<T, I>(values: I, column_count: usize) -> Result<Grid<T>, GridError>
where
    I: IntoIterator<Item = Option<T>>,
{
    if column_count == 0 {
        return Err(GridError::InvalidRange {
            name: "column_count",
            value: 0,
        });
    }

    let width = column_count;
    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let value = v?;
            Some(coord_at(i % width, i / width).map(|coord| (coord, value)))
        })
        .collect()
}

/// Row-major dump from the origin to the last occupied column and row
pub fn to_flat<T: Clone>(grid: &Grid<T>) -> Result<Vec<Option<T>>, GridError> {
    if let Some(coord) = grid.coords().find(|c| c.is_negative()) {
        return Err(GridError::NegativeCoordinate { coord });
    }
    if grid.is_empty() {
        return Ok(Vec::new());
    }

    let width = grid.last_column() as usize + 1;
    let height = grid.last_row() as usize + 1;
    let mut flat = vec![None; width * height];
    for (coord, value) in grid {
        flat[coord.y as usize * width + coord.x as usize] = Some(value.clone());
    }
    Ok(flat)
}
