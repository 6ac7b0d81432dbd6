//! Prelude module for Sectioned.
//!
//! ```ignore
//! use sectioned::prelude::*;
//! ```

// ============================================================================
// Controller
// ============================================================================

pub use crate::controller::{Completion, ListController};
pub use crate::config::ListConfig;
pub use crate::diagnostics::DiagnosticsMode;

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    CellModel, CellSize, Distribution, IndexPath, Section, SectionConstraints, identical_as,
};

// ============================================================================
// Host Capabilities
// ============================================================================

pub use crate::host::{
    CommitCompletion, CommitKind, CommitRequest, Displayable, ListCell, ListHost, ScrollPosition,
    SizeDelegate,
};

// ============================================================================
// Sizing and Geometry
// ============================================================================

pub use crate::layout::SizeConstraints;
pub use sectioned_core::{EdgeInsets, ScrollDirection, Size};
