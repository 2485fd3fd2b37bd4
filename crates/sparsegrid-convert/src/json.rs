use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ConvertError;

/// Encode a grid (or anything else serde can write) as JSON
pub fn to_json<G: Serialize>(grid: &G) -> Result<String, ConvertError> {
    Ok(serde_json::to_string(grid)?)
}

/// Decode a grid from JSON produced by [`to_json`]
pub fn from_json<G: DeserializeOwned>(json: &str) -> Result<G, ConvertError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparsegrid_core::{Coord, Grid, OverlapGrid};

    #[test]
    fn test_grid_json_round_trip() {
        let mut grid = Grid::new();
        grid.add(Coord::new(-3, 2), "a".to_string()).unwrap();
        grid.add(Coord::new(4, 0), String::new()).unwrap();

        let json = to_json(&grid).unwrap();
        let back: Grid<String> = from_json(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_overlap_json_round_trip() {
        let mut overlap = OverlapGrid::new();
        overlap.add(Coord::new(0, 0), 1.5);
        overlap.add(Coord::new(0, 0), 1.5);

        let back: OverlapGrid<f64> = from_json(&to_json(&overlap).unwrap()).unwrap();
        assert_eq!(back, overlap);
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        let err = from_json::<Grid<i32>>("{not json").unwrap_err();
        assert!(matches!(err, ConvertError::Serialization(_)));
    }
}
