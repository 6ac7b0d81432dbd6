//! Cell models and sections.
//!
//! # Core Types
//!
//! - [`CellModel`]: one renderable item, independent of any widget
//! - [`CellSize`]: explicit or relative sizing
//! - [`Section`]: ordered cell models plus [`SectionConstraints`]
//! - [`Distribution`]: how a section divides its cross-axis extent
//! - [`IndexPath`]: `(section, item)` position of a cell
//!
//! ```text
//! ListState
//! ├── Section "header"   constraints: EntireRow
//! │   └── CellModel "title"
//! └── Section "grid"     constraints: Equally { cells_in_row: 3 }
//!     ├── CellModel "photo-1"
//!     ├── CellModel "photo-2"
//!     └── CellModel "photo-3"
//! ```

mod cell;
mod index;
mod section;

pub use cell::{CellModel, CellSize, identical_as};
pub use index::IndexPath;
pub use section::{Distribution, Section, SectionConstraints, validate_sections};
