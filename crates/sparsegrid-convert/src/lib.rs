//! Data-shape adapters for [`sparsegrid_core`] grids.
//!
//! Arrays use `(x, y)` indexing with `x` on the first axis; `None` marks an
//! empty slot so sparsity survives every conversion.

pub mod array;
pub mod error;
pub mod flat;
pub mod json;
pub mod sequence;

pub use array::{grid_from_dense, grid_from_jagged, to_dense, to_jagged};
pub use error::ConvertError;
pub use flat::{grid_from_flat, to_flat};
pub use json::{from_json, to_json};
pub use sequence::{
    grid_from_cells, grid_from_overlap, grid_from_pairs, overlap_from_grid, to_cells, to_pairs,
};
