//! Cell sizing.
//!
//! - [`SizeConstraints`]: container size plus section constraints
//! - [`solver`]: the pure distribution solver
//! - [`SizeCache`]: memoized layouts, cleared wholesale
//! - [`CellSizeController`]: answers section and cell size queries for a
//!   [`DisplayPass`]

mod cache;
mod constraints;
mod size_controller;
pub mod solver;

pub use cache::{CacheStats, LayoutKey, SizeCache};
pub use constraints::SizeConstraints;
pub use size_controller::{CellSizeController, DisplayPass};
pub use solver::{CellMeasure, MINIMUM_RELATIVE_EXTENT, Row, SectionLayout};
