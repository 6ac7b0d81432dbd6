//! Core systems for Sectioned.
//!
//! This crate provides the foundational pieces shared by the list controller
//! crate:
//!
//! - **Geometry**: sizes, insets and scroll-axis helpers
//! - **Thread affinity**: control-thread preconditions
//! - **Logging**: tracing targets and span names
//!
//! # Axis Example
//!
//! ```
//! use sectioned_core::{ScrollDirection, Size};
//!
//! let container = Size::new(200.0, 500.0);
//! let direction = ScrollDirection::Horizontal;
//!
//! assert_eq!(direction.main(container), 200.0);
//! assert_eq!(direction.cross(container), 500.0);
//! assert_eq!(direction.size(1425.0, 500.0), Size::new(1425.0, 500.0));
//! ```

mod geometry;
pub mod logging;
pub mod thread_check;

pub use geometry::{EdgeInsets, ScrollDirection, Size};
pub use logging::PerfSpan;
pub use thread_check::ThreadAffinity;
