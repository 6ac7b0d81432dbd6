//! Capabilities the list controller needs from its surroundings.
//!
//! The controller never renders anything itself. It talks to a [`ListHost`]
//! (the scrolling view that realizes cells), to the realized [`ListCell`]s,
//! and optionally to a [`SizeDelegate`] that sizes relative cells.
//!
//! Hosts and delegates are held weakly: when they are dropped, host
//! interactions become no-ops.

use std::fmt;
use std::sync::Arc;

use sectioned_core::Size;

use crate::layout::SizeConstraints;
use crate::model::{CellModel, IndexPath};

/// Where a scrolled-to cell ends up in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollPosition {
    /// Top edge of the viewport.
    Top,
    /// Vertically centered.
    #[default]
    CenteredVertically,
    /// Bottom edge of the viewport.
    Bottom,
    /// Left edge of the viewport.
    Left,
    /// Horizontally centered.
    CenteredHorizontally,
    /// Right edge of the viewport.
    Right,
}

/// Kind of content commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitKind {
    /// Incremental update against the previous state.
    Update,
    /// Full re-render.
    Reload,
}

/// A request for the host to render the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRequest {
    /// How the change should be applied.
    pub kind: CommitKind,
    /// Whether the host should animate the change.
    pub animated: bool,
}

/// One-shot completion handle for a commit.
///
/// The host calls [`complete`](Self::complete) once the commit has been
/// applied. Dropping the handle without calling it counts as
/// `finished = false`.
pub struct CommitCompletion {
    callback: Option<Box<dyn FnOnce(bool) + Send>>,
}

impl CommitCompletion {
    /// Wrap a callback.
    pub fn new(callback: impl FnOnce(bool) + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Signal that the commit is done.
    pub fn complete(mut self, finished: bool) {
        if let Some(callback) = self.callback.take() {
            callback(finished);
        }
    }
}

impl Drop for CommitCompletion {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback(false);
        }
    }
}

impl fmt::Debug for CommitCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitCompletion")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

/// The scrolling view that realizes cells.
pub trait ListHost: Send + Sync {
    /// Render the controller's current state.
    ///
    /// The completion may be called synchronously or later, on the control
    /// thread.
    fn commit(&self, request: CommitRequest, completion: CommitCompletion);

    /// Cells currently realized on screen.
    fn visible_cells(&self) -> Vec<Arc<dyn ListCell>>;

    /// Whether the host has realized `index_path`.
    fn is_index_path_available(&self, index_path: IndexPath) -> bool;

    /// Scroll so that `index_path` sits at `position`.
    fn scroll_to_item(&self, index_path: IndexPath, position: ScrollPosition, animated: bool);

    /// Drop any layout the host has cached.
    fn invalidate_layout(&self);

    /// Index path of the cell nearest the viewport center.
    fn center_index_path(&self) -> Option<IndexPath> {
        None
    }
}

/// Display lifecycle callbacks.
pub trait Displayable: Send + Sync {
    /// The list started displaying.
    fn on_will_display(&self);

    /// The list stopped displaying.
    fn on_did_end_displaying(&self);
}

/// A realized cell.
pub trait ListCell: Send + Sync {
    /// The display lifecycle capability, if the cell has one.
    fn as_displayable(&self) -> Option<&dyn Displayable> {
        None
    }
}

/// Sizes relative cells on behalf of the host.
pub trait SizeDelegate: Send + Sync {
    /// Size for `model` bound at `index_path`, or `None` to fall back to the
    /// model's default size. Only asked for cells with a resolvable index path.
    fn size_for(
        &self,
        model: &dyn CellModel,
        index_path: IndexPath,
        constraints: &SizeConstraints,
    ) -> Option<Size>;
}
