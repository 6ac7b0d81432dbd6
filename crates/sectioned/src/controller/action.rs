//! Deferred list actions.
//!
//! While the controller is busy, mutating calls are captured as
//! [`PendingAction`]s and appended to an [`ActionQueue`]. Each action owns its
//! arguments and completion and is consumed exactly once, in FIFO order.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::host::ScrollPosition;
use crate::model::{CellModel, IndexPath, Section};

/// Completion callback for updates, reloads and removals.
///
/// Receives the host's `finished` flag.
pub type Completion = Box<dyn FnOnce(bool) + Send + 'static>;

/// A captured call to the list controller.
pub enum PendingAction {
    /// Full re-render, optionally replacing the sections first.
    Reload {
        sections: Option<Vec<Section>>,
        completion: Option<Completion>,
    },
    /// Incremental update to new sections.
    Update {
        sections: Vec<Section>,
        animated: bool,
        completion: Option<Completion>,
    },
    /// Remove one cell, resolved against the state current at execution.
    Remove {
        index_path: IndexPath,
        animated: bool,
        completion: Option<Completion>,
    },
    /// Scroll a model into view.
    ScrollTo {
        cell_model: Arc<dyn CellModel>,
        position: ScrollPosition,
        animated: bool,
    },
    /// Scroll to the first, middle or last cell.
    Scroll {
        position: ScrollPosition,
        animated: bool,
    },
    /// Clear the size cache and the host's layout.
    InvalidateLayout,
    /// Enter the displaying state.
    WillDisplay,
    /// Leave the displaying state.
    DidEndDisplaying,
}

impl PendingAction {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reload { .. } => "reload",
            Self::Update { .. } => "update",
            Self::Remove { .. } => "remove",
            Self::ScrollTo { .. } => "scroll_to",
            Self::Scroll { .. } => "scroll",
            Self::InvalidateLayout => "invalidate_layout",
            Self::WillDisplay => "will_display",
            Self::DidEndDisplaying => "did_end_displaying",
        }
    }
}

impl fmt::Debug for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PendingAction").field(&self.name()).finish()
    }
}

/// FIFO queue of pending actions.
#[derive(Debug, Default)]
pub struct ActionQueue {
    actions: VecDeque<PendingAction>,
}

impl ActionQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action at the tail.
    pub fn push(&mut self, action: PendingAction) {
        self.actions.push_back(action);
    }

    /// Take the action at the head.
    pub fn pop_front(&mut self) -> Option<PendingAction> {
        self.actions.pop_front()
    }

    /// Number of pending actions.
    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
