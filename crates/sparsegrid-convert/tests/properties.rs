use proptest::prelude::*;
use sparsegrid_convert::{
    from_json, grid_from_cells, grid_from_dense, grid_from_jagged, to_cells, to_dense, to_jagged,
    to_json,
};
use sparsegrid_core::{Cell, Coord, Grid, GridError};

fn arb_grid(range: std::ops::Range<i32>) -> impl Strategy<Value = Grid<u8>> {
    prop::collection::vec(
        ((range.clone(), range).prop_map(|(x, y)| Coord::new(x, y)), 0u8..3),
        0..40,
    )
    .prop_map(|cells| cells.into_iter().collect())
}

proptest! {
    #[test]
    fn dense_equality_agrees_with_export(grid in arb_grid(0..10)) {
        let dense = to_dense(&grid).unwrap();
        prop_assert!(grid == dense);
        prop_assert_eq!(grid_from_dense(&dense).unwrap(), grid.copy());

        let jagged = to_jagged(&grid).unwrap();
        prop_assert!(grid == jagged);
        prop_assert_eq!(grid_from_jagged(&jagged).unwrap(), grid.copy());

        // one negative cell breaks both the comparison and the export
        let mut shifted = grid.copy();
        shifted.add(Coord::new(-1, 0), 0).unwrap();
        prop_assert!(shifted != dense);
        prop_assert!(shifted != jagged);
        prop_assert_eq!(
            to_dense(&shifted).unwrap_err(),
            GridError::NegativeCoordinate { coord: Coord::new(-1, 0) }
        );
        prop_assert!(to_jagged(&shifted).is_err());
    }

    #[test]
    fn dense_export_fails_exactly_on_negative_cells(grid in arb_grid(-5..5)) {
        let negative = grid.coords().any(|c| c.is_negative());
        match to_dense(&grid) {
            Ok(dense) => {
                prop_assert!(!negative);
                prop_assert!(grid == dense);
            }
            Err(GridError::NegativeCoordinate { coord }) => {
                prop_assert!(coord.is_negative());
                prop_assert!(grid.contains(coord));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
        prop_assert_eq!(to_jagged(&grid).is_err(), negative);
    }

    #[test]
    fn cells_round_trip(grid in arb_grid(-50..50)) {
        let cells: Vec<Cell<u8>> = to_cells(&grid);
        prop_assert_eq!(cells.len(), grid.len());
        prop_assert!(grid == cells);
        prop_assert_eq!(grid_from_cells(cells), grid.copy());

        let json = to_json(&grid).unwrap();
        let decoded: Grid<u8> = from_json(&json).unwrap();
        prop_assert_eq!(decoded, grid);
    }
}
