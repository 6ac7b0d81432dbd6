//! Sectioned - a list controller for sectioned, scrolling collections.
//!
//! The controller owns the sections bound to a list, serializes every
//! mutation through a FIFO action queue while a commit is in flight, and
//! computes cell and section sizes with a cached distribution solver.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use std::sync::Arc;
//!
//! use sectioned::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Row(String);
//!
//! impl CellModel for Row {
//!     fn identifier(&self) -> &str {
//!         &self.0
//!     }
//!
//!     fn size(&self, _container: Size) -> CellSize {
//!         CellSize::Explicit(Size::new(75.0, 100.0))
//!     }
//!
//!     fn identical(&self, other: &dyn CellModel) -> bool {
//!         identical_as(self, other)
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let rows: Vec<Arc<dyn CellModel>> = (0..19)
//!     .map(|i| Arc::new(Row(format!("row-{i}"))) as Arc<dyn CellModel>)
//!     .collect();
//! let section = Section::new("rows", rows)
//!     .with_distribution(Distribution::Equally { cells_in_row: 3 });
//!
//! let controller = ListController::new();
//! controller.update(vec![section.clone()], false, None);
//!
//! let size = controller.section_size(&section, Size::new(200.0, 500.0));
//! assert_eq!(size, Size::new(200.0, 700.0));
//! ```

pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod layout;
pub mod model;
pub mod prelude;

pub use config::ListConfig;
pub use controller::{Completion, ListController};
pub use diagnostics::{Diagnostics, DiagnosticsMode};
pub use error::{ConfigError, ConfigResult, ListError};
pub use sectioned_core::{EdgeInsets, ScrollDirection, Size};
