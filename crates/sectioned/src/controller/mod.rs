//! The list controller and its action queue.

mod action;
mod list_controller;

pub use action::{ActionQueue, Completion, PendingAction};
pub use list_controller::{ControllerPhase, ListController};
