pub mod cell;
pub mod coord;
pub mod equality;
pub mod error;
pub mod event;
pub mod extent;
pub mod grid;
pub mod overlap;

pub use cell::Cell;
pub use coord::{Boundaries, Coord, Rect};
pub use error::GridError;
pub use event::{GridChangedEvent, ListenerId, Listeners};
pub use extent::Extents;
pub use grid::Grid;
pub use overlap::OverlapGrid;
