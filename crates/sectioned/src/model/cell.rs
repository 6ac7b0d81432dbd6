//! Cell models: the data describing one renderable item.
//!
//! A cell model is independent of any rendering widget. The list controller
//! only needs three things from it: a stable identifier, a size descriptor,
//! and a model-defined notion of being *identical* to another model.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use sectioned::model::{CellModel, CellSize, identical_as};
//! use sectioned::Size;
//!
//! #[derive(Debug, PartialEq)]
//! struct Label {
//!     id: String,
//!     text: String,
//! }
//!
//! impl CellModel for Label {
//!     fn identifier(&self) -> &str {
//!         &self.id
//!     }
//!
//!     fn size(&self, container: Size) -> CellSize {
//!         CellSize::Explicit(Size::new(container.width, 44.0))
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
//! ```

use std::any::Any;
use std::fmt;

use sectioned_core::Size;

use crate::layout::SizeConstraints;

/// How a cell model wants to be sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellSize {
    /// A definite size chosen by the model.
    Explicit(Size),
    /// No definite size: the cell expands into space left over by its
    /// neighbours. The host's size delegate is asked first; see
    /// [`CellSizeController`](crate::layout::CellSizeController).
    Relative,
}

impl CellSize {
    /// Returns `true` for [`CellSize::Relative`].
    #[inline]
    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Relative)
    }
}

/// Trait implemented by every model placed in a [`Section`](super::Section).
///
/// Identifiers must be non-empty and unique across all sections of one list.
pub trait CellModel: Send + Sync + 'static {
    /// Identifier, unique within the whole list.
    fn identifier(&self) -> &str;

    /// Size descriptor for the given container size (insets already removed).
    fn size(&self, container: Size) -> CellSize;

    /// Model-defined equality used to match models in lookups.
    ///
    /// This is not structural equality: models decide which fields matter.
    fn identical(&self, other: &dyn CellModel) -> bool;

    /// Fallback size for a relative cell the host declined to size.
    ///
    /// A cell that fills the remainder of a row takes its scroll-axis extent
    /// from here.
    fn default_size(&self, _constraints: &SizeConstraints) -> Size {
        Size::ZERO
    }

    /// Upcast for typed comparisons in [`identical`](Self::identical).
    fn as_any(&self) -> &dyn Any;
}

impl fmt::Debug for dyn CellModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellModel")
            .field("identifier", &self.identifier())
            .finish_non_exhaustive()
    }
}

/// `identical` helper for models whose [`PartialEq`] is the right comparison.
///
/// Returns `false` when `other` is a different concrete type.
pub fn identical_as<T>(this: &T, other: &dyn CellModel) -> bool
where
    T: CellModel + PartialEq,
{
    other
        .as_any()
        .downcast_ref::<T>()
        .is_some_and(|other| this == other)
}
