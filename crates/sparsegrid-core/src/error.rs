use thiserror::Error;

use crate::coord::Coord;

/// Failures raised by the strict grid operations and the shape adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("slot {coord} is already occupied")]
    SlotOccupied { coord: Coord },

    #[error("nothing there at {coord}")]
    NothingThere { coord: Coord },

    #[error("{name} is out of range: {value}")]
    InvalidRange { name: &'static str, value: i64 },

    #[error("coordinate {coord} cannot be stored in an array")]
    NegativeCoordinate { coord: Coord },

    #[error("moving {coord} by {delta} leaves the coordinate range")]
    CoordinateOverflow { coord: Coord, delta: Coord },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
