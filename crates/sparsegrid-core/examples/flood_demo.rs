use sparsegrid_core::{Boundaries, Coord, Grid, GridChangedEvent, OverlapGrid};

fn print_board(grid: &Grid<char>) {
    let bounds = grid.boundaries();
    for y in bounds.top..=bounds.bottom {
        let row: String = (bounds.left..=bounds.right)
            .map(|x| grid.get(Coord::new(x, y)).copied().unwrap_or('.'))
            .collect();
        println!("  {}", row);
    }
}

fn main() {
    // A ring of 'o' around a single 'x', centred on the origin
    let mut grid: Grid<char> = (-2..=2)
        .flat_map(|x| (-2..=2).map(move |y| (Coord::new(x, y), 'o')))
        .collect();
    grid.set(Coord::new(0, 0), Some('x'));

    grid.subscribe(|event: &GridChangedEvent<char>| {
        println!(
            "  event: {} old, {} new",
            event.old_values.len(),
            event.new_values.len()
        );
    });

    println!("=== Example 1: Starting board ===");
    print_board(&grid);

    println!("\n=== Example 2: Flood fill the top two rows ===");
    let top = Boundaries::new(-2, -1, -2, 2);
    let changed = grid.flood_fill_within(Coord::new(-2, -2), '#', top);
    println!("Changed {} cells", changed);
    print_board(&grid);

    println!("\n=== Example 3: Flood clear the rest of the ring ===");
    let removed = grid.flood_clear(Coord::new(2, 2));
    println!("Removed {} cells", removed);
    print_board(&grid);

    println!("\n=== Example 4: Translate the top rows down onto the centre ===");
    match grid.translate(top, Coord::new(0, 2)) {
        Ok(moved) => println!("Moved {} cells", moved),
        Err(e) => println!("Translate failed: {}", e),
    }
    print_board(&grid);

    println!("\n=== Example 5: Overlap grid stacks values ===");
    let mut overlap = OverlapGrid::new();
    overlap.add(Coord::new(1, 1), "tree");
    overlap.add(Coord::new(1, 1), "bird");
    overlap.add(Coord::new(-1, 0), "rock");
    println!("At (1, 1): {:?}", overlap.get(Coord::new(1, 1)));
    println!("Entries: {}, columns: {}", overlap.len(), overlap.column_count());
}
