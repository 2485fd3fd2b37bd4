use proptest::prelude::*;
use sparsegrid_core::{Boundaries, Cell, Coord, Grid, GridChangedEvent, GridError};
use std::cell::RefCell;
use std::rc::Rc;

fn arb_cells(range: std::ops::Range<i32>) -> impl Strategy<Value = Vec<(Coord, u8)>> {
    prop::collection::vec(
        ((range.clone(), range).prop_map(|(x, y)| Coord::new(x, y)), 0u8..3),
        0..40,
    )
}

fn arb_bounds() -> impl Strategy<Value = Boundaries> {
    (-6i32..6, -6i32..6, -6i32..6, -6i32..6)
        .prop_map(|(a, b, c, d)| Boundaries::from_corners(Coord::new(a, b), Coord::new(c, d)))
}

fn event_count(grid: &mut Grid<u8>) -> Rc<RefCell<usize>> {
    let hits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&hits);
    grid.subscribe(move |_: &GridChangedEvent<u8>| *counter.borrow_mut() += 1);
    hits
}

/// Coordinates clustered around the origin and both ends of the `i32` range
fn arb_edge_cells() -> impl Strategy<Value = Vec<(Coord, u8)>> {
    let axis = || prop_oneof![i32::MIN..i32::MIN + 3, -3i32..3, i32::MAX - 2..=i32::MAX];
    prop::collection::vec(
        ((axis(), axis()).prop_map(|(x, y)| Coord::new(x, y)), 0u8..3),
        1..20,
    )
}

proptest! {
    #[test]
    fn boundaries_match_occupied_extremes(cells in arb_cells(-20..20)) {
        let grid: Grid<u8> = cells.into_iter().collect();
        let bounds = grid.boundaries();
        if grid.is_empty() {
            prop_assert_eq!(bounds, Boundaries::default());
        } else {
            prop_assert_eq!(bounds.top, grid.coords().map(|c| c.y).min().unwrap());
            prop_assert_eq!(bounds.bottom, grid.coords().map(|c| c.y).max().unwrap());
            prop_assert_eq!(bounds.left, grid.coords().map(|c| c.x).min().unwrap());
            prop_assert_eq!(bounds.right, grid.coords().map(|c| c.x).max().unwrap());
        }
    }

    #[test]
    fn flood_fill_is_idempotent(
        cells in arb_cells(-5..5),
        sx in -5i32..5,
        sy in -5i32..5,
        value in 0u8..3,
    ) {
        let mut grid: Grid<u8> = cells.into_iter().collect();
        let seed = Coord::new(sx, sy);
        grid.flood_fill(seed, value);

        let hits = event_count(&mut grid);
        prop_assert_eq!(grid.flood_fill(seed, value), 0);
        prop_assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn flood_fill_stays_inside_bounds(
        cells in arb_cells(-8..8),
        bounds in arb_bounds(),
        sx in -6i32..6,
        sy in -6i32..6,
        value in 0u8..3,
    ) {
        let mut grid: Grid<u8> = cells.into_iter().collect();
        let before = grid.copy();
        grid.flood_fill_within(Coord::new(sx, sy), value, bounds);

        for (coord, old) in &before {
            if !bounds.contains(coord) {
                prop_assert_eq!(grid.get(coord), Some(old));
            }
        }
        for coord in grid.coords() {
            if !bounds.contains(coord) {
                prop_assert!(before.contains(coord));
            }
        }
    }

    #[test]
    fn flood_clear_stays_inside_bounds(
        cells in arb_cells(-8..8),
        bounds in arb_bounds(),
        sx in -6i32..6,
        sy in -6i32..6,
    ) {
        let mut grid: Grid<u8> = cells.into_iter().collect();
        let before = grid.copy();
        grid.flood_clear_within(Coord::new(sx, sy), bounds);

        for (coord, old) in &before {
            if !bounds.contains(coord) {
                prop_assert_eq!(grid.get(coord), Some(old));
            }
        }
    }

    #[test]
    fn translate_keeps_moved_values_and_reports_squashed(
        cells in arb_cells(-5..5),
        bounds in arb_bounds(),
        dx in -3i32..3,
        dy in -3i32..3,
    ) {
        let mut grid: Grid<u8> = cells.into_iter().collect();
        let before = grid.copy();
        let delta = Coord::new(dx, dy);

        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        grid.subscribe(move |e: &GridChangedEvent<u8>| sink.borrow_mut().push(e.clone()));
        let count = grid.translate(bounds, delta);

        if delta == Coord::ZERO {
            prop_assert_eq!(count, Ok(0));
            prop_assert!(log.borrow().is_empty());
            return Ok(());
        }

        let moved: Vec<(Coord, u8)> = before
            .iter()
            .filter(|(c, _)| bounds.contains(*c))
            .map(|(c, v)| (c, *v))
            .collect();
        prop_assert_eq!(count, Ok(moved.len()));
        for (coord, value) in &moved {
            prop_assert_eq!(grid.get(*coord + delta), Some(value));
        }

        if let Some(event) = log.borrow().first() {
            for (coord, value) in &moved {
                prop_assert!(event.old_values.contains(&Cell::new(*coord, *value)));
                let dest = *coord + delta;
                if let Some(squashed) = before.get(dest) {
                    if !bounds.contains(dest) {
                        prop_assert!(event.old_values.contains(&Cell::new(dest, *squashed)));
                    }
                }
            }
            prop_assert_eq!(event.new_values.len(), moved.len());
        } else {
            prop_assert!(moved.is_empty());
        };
    }

    #[test]
    fn translate_all_is_all_or_nothing(
        cells in arb_edge_cells(),
        dx in -3i32..3,
        dy in -3i32..3,
    ) {
        let mut grid: Grid<u8> = cells.into_iter().collect();
        let before = grid.copy();
        let delta = Coord::new(dx, dy);
        let hits = event_count(&mut grid);

        match grid.translate_all(delta) {
            Ok(count) => {
                prop_assert_eq!(count, if delta == Coord::ZERO { 0 } else { before.len() });
                for (coord, value) in &before {
                    prop_assert_eq!(grid.get(coord + delta), Some(value));
                }
                prop_assert_eq!(grid.len(), before.len());
            }
            Err(GridError::CoordinateOverflow { coord, delta: d }) => {
                prop_assert_eq!(d, delta);
                prop_assert!(before.contains(coord));
                prop_assert_eq!(coord.checked_add(delta), None);
                prop_assert!(grid == before);
                prop_assert_eq!(*hits.borrow(), 0);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
