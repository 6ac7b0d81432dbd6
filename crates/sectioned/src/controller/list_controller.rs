//! The list controller.
//!
//! The controller owns the sections bound to a list and serializes every
//! mutation through one FIFO queue. A mutation runs immediately only when
//! the controller is idle, nothing is draining and the queue is empty;
//! otherwise it is appended verbatim to the queue.
//!
//! # State machine
//!
//! ```text
//!            update / reload / remove
//!   ┌──────┐ ──────────────────────────► ┌──────────┐
//!   │ Idle │                             │ Updating │
//!   └──────┘ ◄────────────────────────── └──────────┘
//!      │       host commit completion         │
//!      │                                      │ every other call
//!      ▼                                      ▼
//!   execute                             ActionQueue (FIFO)
//! ```
//!
//! After a commit completes the controller returns to `Idle`, ends display of
//! visible cells if it is not displaying, invokes the caller's completion,
//! then drains the queue in a plain loop until the queue is empty or another
//! commit suspends it.
//!
//! # Thread Safety
//!
//! The controller is `Send + Sync` but bound to the thread that created it.
//! Every public operation panics when called from any other thread. No lock
//! is held while calling into the host, cells, delegates or completions, so
//! those callbacks may call back into the controller; mutations made from a
//! callback are queued behind the running action.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use sectioned_core::logging::{span_names, targets};
use sectioned_core::{PerfSpan, Size, ThreadAffinity};

use super::action::{ActionQueue, Completion, PendingAction};
use crate::config::ListConfig;
use crate::diagnostics::Diagnostics;
use crate::error::ListError;
use crate::host::{
    CommitCompletion, CommitKind, CommitRequest, ListCell, ListHost, ScrollPosition, SizeDelegate,
};
use crate::layout::{CellSizeController, DisplayPass, SizeConstraints};
use crate::model::{CellModel, IndexPath, Section, SectionConstraints, validate_sections};

/// Whether a commit is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerPhase {
    /// No commit in flight.
    #[default]
    Idle,
    /// Waiting for the host to finish a commit.
    Updating,
}

/// Outcome of executing one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Move on to the next queued action.
    Continue,
    /// A commit is in flight; draining resumes from its completion.
    Suspended,
}

#[derive(Debug)]
struct ControllerState {
    sections: Arc<Vec<Section>>,
    phase: ControllerPhase,
    /// The drain loop currently owns execution.
    draining: bool,
    queue: ActionQueue,
    displaying: bool,
}

impl ControllerState {
    fn is_busy(&self) -> bool {
        self.phase == ControllerPhase::Updating || self.draining || !self.queue.is_empty()
    }
}

struct ControllerInner {
    affinity: ThreadAffinity,
    state: Mutex<ControllerState>,
    sizes: CellSizeController,
    host: RwLock<Option<Weak<dyn ListHost>>>,
    diagnostics: Diagnostics,
    default_constraints: SectionConstraints,
}

/// Serializes updates to a sectioned list and answers size queries.
///
/// Cloning yields another handle to the same controller.
///
/// # Example
///
/// ```ignore
/// let controller = ListController::new();
/// controller.set_host(Some(&host));
/// controller.update(vec![Section::new("main", models)], true, None);
/// // Queued behind the update; runs once the host finishes the commit.
/// controller.scroll(ScrollPosition::Bottom, true);
/// ```
#[derive(Clone)]
pub struct ListController {
    inner: Arc<ControllerInner>,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ListController")
            .field("sections", &state.sections.len())
            .field("phase", &state.phase)
            .field("pending", &state.queue.len())
            .field("displaying", &state.displaying)
            .finish_non_exhaustive()
    }
}

impl ListController {
    /// Create a controller bound to the current thread.
    pub fn new() -> Self {
        Self::with_config(ListConfig::default())
    }

    /// Create a controller with the given configuration.
    pub fn with_config(config: ListConfig) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                affinity: ThreadAffinity::current(),
                state: Mutex::new(ControllerState {
                    sections: Arc::new(Vec::new()),
                    phase: ControllerPhase::Idle,
                    draining: false,
                    queue: ActionQueue::new(),
                    displaying: true,
                }),
                sizes: CellSizeController::new(),
                host: RwLock::new(None),
                diagnostics: Diagnostics::new(config.diagnostics),
                default_constraints: config.default_constraints,
            }),
        }
    }

    // =========================================================================
    // Wiring
    // =========================================================================

    /// Attach (or detach) the host view. Held weakly.
    pub fn set_host(&self, host: Option<&Arc<dyn ListHost>>) {
        self.check_thread("set_host");
        *self.inner.host.write() = host.map(Arc::downgrade);
    }

    /// Attach (or detach) the size delegate. Held weakly.
    pub fn set_size_delegate(&self, delegate: Option<&Arc<dyn SizeDelegate>>) {
        self.check_thread("set_size_delegate");
        self.inner.sizes.set_delegate(delegate);
    }

    /// The cell size controller.
    pub fn size_controller(&self) -> &CellSizeController {
        &self.inner.sizes
    }

    /// The diagnostics reporter.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.inner.diagnostics
    }

    /// Constraints from the configuration this controller was built with.
    pub fn default_constraints(&self) -> SectionConstraints {
        self.inner.default_constraints
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replace the sections and commit them incrementally.
    ///
    /// `completion` receives the host's `finished` flag, even if every
    /// controller handle is dropped before the host finishes.
    pub fn update(&self, sections: Vec<Section>, animated: bool, completion: Option<Completion>) {
        self.check_thread("update");
        self.submit(PendingAction::Update {
            sections,
            animated,
            completion,
        });
    }

    /// Re-render the current sections.
    pub fn reload_data(&self, completion: Option<Completion>) {
        self.check_thread("reload_data");
        self.submit(PendingAction::Reload {
            sections: None,
            completion,
        });
    }

    /// Replace the sections and re-render them in full.
    pub fn reload_data_with(&self, sections: Vec<Section>, completion: Option<Completion>) {
        self.check_thread("reload_data_with");
        self.submit(PendingAction::Reload {
            sections: Some(sections),
            completion,
        });
    }

    /// Remove the cell at `index_path`, dropping its section if it empties.
    ///
    /// The index path is resolved when the action runs. A missing cell is
    /// reported and `completion` receives `false`.
    pub fn remove_cell_model(
        &self,
        index_path: IndexPath,
        animated: bool,
        completion: Option<Completion>,
    ) {
        self.check_thread("remove_cell_model");
        self.submit(PendingAction::Remove {
            index_path,
            animated,
            completion,
        });
    }

    /// Scroll the cell with `cell_model`'s identifier into view.
    pub fn scroll_to(&self, cell_model: Arc<dyn CellModel>, position: ScrollPosition, animated: bool) {
        self.check_thread("scroll_to");
        self.submit(PendingAction::ScrollTo {
            cell_model,
            position,
            animated,
        });
    }

    /// Scroll to the first, middle or last cell.
    ///
    /// `Top`/`Left` pick the first cell, `Bottom`/`Right` the last and the
    /// centered positions the middle one. The chosen cell is always centered
    /// vertically.
    pub fn scroll(&self, position: ScrollPosition, animated: bool) {
        self.check_thread("scroll");
        self.submit(PendingAction::Scroll { position, animated });
    }

    /// Drop every cached size and ask the host to lay out again.
    pub fn invalidate_layout(&self) {
        self.check_thread("invalidate_layout");
        self.submit(PendingAction::InvalidateLayout);
    }

    /// The list is about to be displayed.
    pub fn will_display(&self) {
        self.check_thread("will_display");
        self.submit(PendingAction::WillDisplay);
    }

    /// The list is no longer displayed.
    pub fn did_end_displaying(&self) {
        self.check_thread("did_end_displaying");
        self.submit(PendingAction::DidEndDisplaying);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of the bound sections.
    pub fn sections(&self) -> Arc<Vec<Section>> {
        self.check_thread("sections");
        self.snapshot()
    }

    /// Whether a commit is in flight.
    pub fn is_updating(&self) -> bool {
        self.check_thread("is_updating");
        self.inner.state.lock().phase == ControllerPhase::Updating
    }

    /// Number of queued actions.
    pub fn pending_action_count(&self) -> usize {
        self.check_thread("pending_action_count");
        self.inner.state.lock().queue.len()
    }

    /// Whether the controller is in the displaying state.
    pub fn is_displaying(&self) -> bool {
        self.check_thread("is_displaying");
        self.inner.state.lock().displaying
    }

    /// Size of a bound section for `container_size`.
    ///
    /// The section is matched by identifier and sized with its bound
    /// constraints. An unknown section is reported and sized as zero.
    pub fn section_size(&self, section: &Section, container_size: Size) -> Size {
        self.check_thread("section_size");
        let sections = self.snapshot();
        let Some(index) = sections
            .iter()
            .position(|bound| bound.identifier == section.identifier)
        else {
            self.inner.diagnostics.report(&ListError::SectionNotFound {
                identifier: section.identifier.clone(),
            });
            return Size::ZERO;
        };
        let constraints = SizeConstraints::new(container_size, sections[index].constraints);
        self.inner
            .sizes
            .section_size(DisplayPass::new(&sections), index, &constraints)
    }

    /// Size of a cell. The size delegate is not consulted.
    pub fn cell_size(&self, cell_model: &dyn CellModel, constraints: &SizeConstraints) -> Size {
        self.check_thread("cell_size");
        let sections = self.snapshot();
        let index_path = find_index_path(&sections, cell_model);
        self.inner.sizes.cell_size(
            DisplayPass::new(&sections),
            cell_model,
            index_path,
            constraints,
            false,
        )
    }

    /// First index path whose model has the same identifier and is identical.
    pub fn index_path(&self, cell_model: &dyn CellModel) -> Option<IndexPath> {
        self.check_thread("index_path");
        find_index_path(&self.snapshot(), cell_model)
    }

    /// Model at `index_path`.
    pub fn cell_model(&self, index_path: IndexPath) -> Option<Arc<dyn CellModel>> {
        self.check_thread("cell_model");
        DisplayPass::new(&self.snapshot())
            .cell_model(index_path)
            .cloned()
    }

    /// Model of the cell nearest the viewport center, as reported by the host.
    pub fn center_cell_model(&self) -> Option<Arc<dyn CellModel>> {
        self.check_thread("center_cell_model");
        let index_path = self.host()?.center_index_path()?;
        DisplayPass::new(&self.snapshot())
            .cell_model(index_path)
            .cloned()
    }

    // =========================================================================
    // Queue
    // =========================================================================

    fn check_thread(&self, operation: &str) {
        self.inner.affinity.assert_same_thread_with_msg(operation);
    }

    fn snapshot(&self) -> Arc<Vec<Section>> {
        Arc::clone(&self.inner.state.lock().sections)
    }

    fn host(&self) -> Option<Arc<dyn ListHost>> {
        self.inner.host.read().as_ref().and_then(Weak::upgrade)
    }

    fn submit(&self, action: PendingAction) {
        {
            let mut state = self.inner.state.lock();
            if state.is_busy() {
                tracing::debug!(
                    target: targets::CONTROLLER,
                    action = action.name(),
                    pending = state.queue.len() + 1,
                    "action queued"
                );
                state.queue.push(action);
                return;
            }
            state.draining = true;
        }
        self.drain(action);
    }

    /// Run `first`, then queued actions, until the queue empties or a commit
    /// suspends. The caller must have set `draining`.
    fn drain(&self, first: PendingAction) {
        let _unwind = DrainGuard {
            state: &self.inner.state,
        };
        let mut next = Some(first);
        while let Some(action) = next.take() {
            let flow = self.execute(action);
            let mut state = self.inner.state.lock();
            if flow == Flow::Suspended {
                state.draining = false;
                return;
            }
            next = state.queue.pop_front();
            if next.is_none() {
                state.draining = false;
            }
        }
    }

    /// Continue draining after a commit completed outside the drain loop.
    fn resume(&self) {
        let next = {
            let mut state = self.inner.state.lock();
            if state.phase == ControllerPhase::Updating || state.draining {
                return;
            }
            let Some(next) = state.queue.pop_front() else {
                return;
            };
            state.draining = true;
            next
        };
        tracing::debug!(target: targets::CONTROLLER, action = next.name(), "resuming queue");
        self.drain(next);
    }

    fn execute(&self, action: PendingAction) -> Flow {
        let _span = PerfSpan::new(span_names::ACTION);
        tracing::debug!(target: targets::CONTROLLER, action = action.name(), "executing");

        match action {
            PendingAction::Update {
                sections,
                animated,
                completion,
            } => self.commit(CommitKind::Update, animated, Some(sections), completion),
            PendingAction::Reload {
                sections,
                completion,
            } => self.commit(CommitKind::Reload, false, sections, completion),
            PendingAction::Remove {
                index_path,
                animated,
                completion,
            } => match removing(&self.snapshot(), index_path) {
                Some(sections) => {
                    self.commit(CommitKind::Update, animated, Some(sections), completion)
                }
                None => {
                    self.inner
                        .diagnostics
                        .report(&ListError::IndexPathOutOfBounds { index_path });
                    if let Some(completion) = completion {
                        completion(false);
                    }
                    Flow::Continue
                }
            },
            PendingAction::ScrollTo {
                cell_model,
                position,
                animated,
            } => {
                self.scroll_to_model(cell_model.as_ref(), position, animated);
                Flow::Continue
            }
            PendingAction::Scroll { position, animated } => {
                self.scroll_to_position(position, animated);
                Flow::Continue
            }
            PendingAction::InvalidateLayout => {
                self.inner.sizes.clear_cache();
                if let Some(host) = self.host() {
                    host.invalidate_layout();
                }
                Flow::Continue
            }
            PendingAction::WillDisplay => {
                self.set_displaying(true);
                Flow::Continue
            }
            PendingAction::DidEndDisplaying => {
                self.set_displaying(false);
                Flow::Continue
            }
        }
    }

    fn commit(
        &self,
        kind: CommitKind,
        animated: bool,
        sections: Option<Vec<Section>>,
        completion: Option<Completion>,
    ) -> Flow {
        let _span = PerfSpan::new(span_names::COMMIT);
        if let Some(sections) = &sections
            && let Err(error) = validate_sections(sections)
        {
            self.inner.diagnostics.report(&error);
        }

        {
            let mut state = self.inner.state.lock();
            if let Some(sections) = sections {
                state.sections = Arc::new(sections);
            }
            state.phase = ControllerPhase::Updating;
        }
        self.inner.sizes.clear_cache();

        let Some(host) = self.host() else {
            tracing::debug!(target: targets::CONTROLLER, ?kind, "no host, commit completes immediately");
            self.finish_commit(true, completion);
            return Flow::Continue;
        };

        tracing::debug!(target: targets::CONTROLLER, ?kind, animated, "committing to host");
        let inner = Arc::downgrade(&self.inner);
        host.commit(
            CommitRequest { kind, animated },
            CommitCompletion::new(move |finished| match inner.upgrade() {
                Some(inner) => ListController { inner }.finish_commit(finished, completion),
                None => {
                    if let Some(completion) = completion {
                        completion(finished);
                    }
                }
            }),
        );

        if self.inner.state.lock().phase == ControllerPhase::Updating {
            Flow::Suspended
        } else {
            Flow::Continue
        }
    }

    fn finish_commit(&self, finished: bool, completion: Option<Completion>) {
        let displaying = {
            let mut state = self.inner.state.lock();
            state.phase = ControllerPhase::Idle;
            state.displaying
        };
        tracing::debug!(target: targets::CONTROLLER, finished, "commit finished");

        if !displaying {
            self.notify_visible_cells(false);
        }
        if let Some(completion) = completion {
            completion(finished);
        }
        self.resume();
    }

    fn scroll_to_model(&self, cell_model: &dyn CellModel, position: ScrollPosition, animated: bool) {
        let sections = self.snapshot();
        let found = sections.iter().enumerate().find_map(|(section, bound)| {
            bound
                .cell_models
                .iter()
                .position(|model| model.identifier() == cell_model.identifier())
                .map(|item| IndexPath::new(section, item))
        });
        let Some(index_path) = found else {
            self.inner.diagnostics.report(&ListError::CellModelNotFound {
                identifier: cell_model.identifier().to_string(),
            });
            return;
        };
        let Some(host) = self.host() else {
            return;
        };
        if !host.is_index_path_available(index_path) {
            self.inner
                .diagnostics
                .report(&ListError::IndexPathNotRealized { index_path });
            return;
        }
        host.scroll_to_item(index_path, position, animated);
    }

    fn scroll_to_position(&self, position: ScrollPosition, animated: bool) {
        let sections = self.snapshot();
        let models: Vec<&Arc<dyn CellModel>> = sections
            .iter()
            .flat_map(|bound| bound.cell_models.iter())
            .collect();
        let target = match position {
            ScrollPosition::Top | ScrollPosition::Left => models.first(),
            ScrollPosition::Bottom | ScrollPosition::Right => models.last(),
            ScrollPosition::CenteredVertically | ScrollPosition::CenteredHorizontally => {
                models.get(models.len() / 2)
            }
        };
        if let Some(model) = target {
            self.scroll_to_model(model.as_ref(), ScrollPosition::CenteredVertically, animated);
        }
    }

    fn set_displaying(&self, displaying: bool) {
        {
            let mut state = self.inner.state.lock();
            if state.displaying == displaying {
                return;
            }
            state.displaying = displaying;
        }
        tracing::debug!(target: targets::CONTROLLER, displaying, "display state changed");
        self.notify_visible_cells(displaying);
    }

    fn notify_visible_cells(&self, displaying: bool) {
        let Some(host) = self.host() else {
            return;
        };
        let cells: Vec<Arc<dyn ListCell>> = host.visible_cells();
        for displayable in cells.iter().filter_map(|cell| cell.as_displayable()) {
            if displaying {
                displayable.on_will_display();
            } else {
                displayable.on_did_end_displaying();
            }
        }
    }
}

/// Releases the drain loop if an action panics, so a caught panic from
/// `DiagnosticsMode::Panic` leaves the controller usable.
struct DrainGuard<'a> {
    state: &'a Mutex<ControllerState>,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.state.lock().draining = false;
        }
    }
}

fn find_index_path(sections: &[Section], cell_model: &dyn CellModel) -> Option<IndexPath> {
    sections.iter().enumerate().find_map(|(section, bound)| {
        bound
            .cell_models
            .iter()
            .position(|model| {
                model.identifier() == cell_model.identifier() && model.identical(cell_model)
            })
            .map(|item| IndexPath::new(section, item))
    })
}

/// Sections without the cell at `index_path`, or `None` if there is none.
fn removing(sections: &[Section], index_path: IndexPath) -> Option<Vec<Section>> {
    sections.get(index_path.section)?.cell_model(index_path.item)?;
    let mut sections = sections.to_vec();
    let section = &mut sections[index_path.section];
    section.cell_models.remove(index_path.item);
    if section.is_empty() {
        sections.remove(index_path.section);
    }
    Some(sections)
}

static_assertions::assert_impl_all!(ListController: Send, Sync);
