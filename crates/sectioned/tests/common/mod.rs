//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::any::Any;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use sectioned::prelude::*;

/// Install a test subscriber once. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Cell models
// ============================================================================

/// Scroll-axis extent of a relative fake cell the host declines to size.
pub const DEFAULT_RELATIVE_HEIGHT: f32 = 36.5;

#[derive(Debug, Clone, PartialEq)]
pub struct FakeCellModel {
    pub identifier: String,
    pub size: CellSize,
}

impl FakeCellModel {
    pub fn explicit(identifier: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            identifier: identifier.into(),
            size: CellSize::Explicit(Size::new(width, height)),
        }
    }

    pub fn relative(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            size: CellSize::Relative,
        }
    }

    /// `count` explicit cells named `{prefix}-{n}`.
    pub fn many(prefix: &str, count: usize, width: f32, height: f32) -> Vec<Arc<dyn CellModel>> {
        (1..=count)
            .map(|n| Arc::new(Self::explicit(format!("{prefix}-{n}"), width, height)) as Arc<dyn CellModel>)
            .collect()
    }

    pub fn shared(self) -> Arc<dyn CellModel> {
        Arc::new(self)
    }
}

impl CellModel for FakeCellModel {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn size(&self, _container: Size) -> CellSize {
        self.size
    }

    fn identical(&self, other: &dyn CellModel) -> bool {
        identical_as(self, other)
    }

    fn default_size(&self, constraints: &SizeConstraints) -> Size {
        Size::new(constraints.cross_extent(), DEFAULT_RELATIVE_HEIGHT)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Cells
// ============================================================================

#[derive(Debug, Default)]
pub struct FakeDisplayableCell {
    pub will_display: AtomicUsize,
    pub did_end_displaying: AtomicUsize,
}

impl FakeDisplayableCell {
    pub fn will_display_count(&self) -> usize {
        self.will_display.load(Ordering::SeqCst)
    }

    pub fn did_end_displaying_count(&self) -> usize {
        self.did_end_displaying.load(Ordering::SeqCst)
    }
}

impl Displayable for FakeDisplayableCell {
    fn on_will_display(&self) {
        self.will_display.fetch_add(1, Ordering::SeqCst);
    }

    fn on_did_end_displaying(&self) {
        self.did_end_displaying.fetch_add(1, Ordering::SeqCst);
    }
}

impl ListCell for FakeDisplayableCell {
    fn as_displayable(&self) -> Option<&dyn Displayable> {
        Some(self)
    }
}

/// A cell without the display capability.
#[derive(Debug, Default)]
pub struct PlainCell;

impl ListCell for PlainCell {}

// ============================================================================
// Host
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Commit(CommitRequest),
    Scroll(IndexPath, ScrollPosition, bool),
    InvalidateLayout,
}

/// Host that records effects and, unless auto-completing, holds commit
/// completions until the test releases them.
#[derive(Default)]
pub struct FakeHost {
    auto_complete: AtomicBool,
    unavailable: AtomicBool,
    pending: Mutex<VecDeque<CommitCompletion>>,
    effects: Mutex<Vec<Effect>>,
    cells: Mutex<Vec<Arc<dyn ListCell>>>,
    center: Mutex<Option<IndexPath>>,
}

impl FakeHost {
    /// Host that defers every commit completion.
    pub fn deferred() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Host that completes every commit synchronously with `finished = true`.
    pub fn immediate() -> Arc<Self> {
        let host = Self::default();
        host.auto_complete.store(true, Ordering::SeqCst);
        Arc::new(host)
    }

    /// Attach to `controller`. The controller holds the host weakly.
    pub fn attach(self: &Arc<Self>, controller: &ListController) {
        let host: Arc<dyn ListHost> = Arc::clone(self) as Arc<dyn ListHost>;
        controller.set_host(Some(&host));
    }

    /// Complete the oldest deferred commit. Returns `false` if none is pending.
    pub fn complete_next(&self, finished: bool) -> bool {
        let next = self.pending.lock().pop_front();
        match next {
            Some(completion) => {
                completion.complete(finished);
                true
            }
            None => false,
        }
    }

    /// Drop the oldest deferred commit without completing it.
    pub fn drop_next(&self) -> bool {
        let next = self.pending.lock().pop_front();
        next.is_some()
    }

    pub fn pending_commits(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.effects.lock().clone()
    }

    pub fn set_visible_cells(&self, cells: Vec<Arc<dyn ListCell>>) {
        *self.cells.lock() = cells;
    }

    pub fn set_center(&self, index_path: Option<IndexPath>) {
        *self.center.lock() = index_path;
    }

    pub fn set_index_paths_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }
}

impl ListHost for FakeHost {
    fn commit(&self, request: CommitRequest, completion: CommitCompletion) {
        self.effects.lock().push(Effect::Commit(request));
        if self.auto_complete.load(Ordering::SeqCst) {
            completion.complete(true);
        } else {
            self.pending.lock().push_back(completion);
        }
    }

    fn visible_cells(&self) -> Vec<Arc<dyn ListCell>> {
        self.cells.lock().clone()
    }

    fn is_index_path_available(&self, _index_path: IndexPath) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }

    fn scroll_to_item(&self, index_path: IndexPath, position: ScrollPosition, animated: bool) {
        self.effects
            .lock()
            .push(Effect::Scroll(index_path, position, animated));
    }

    fn invalidate_layout(&self) {
        self.effects.lock().push(Effect::InvalidateLayout);
    }

    fn center_index_path(&self) -> Option<IndexPath> {
        *self.center.lock()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Controller that logs programming errors instead of panicking.
pub fn logging_controller() -> ListController {
    ListController::with_config(ListConfig {
        diagnostics: DiagnosticsMode::Log,
        ..ListConfig::default()
    })
}

/// Completion that records every `finished` flag into `log`.
pub fn record_into(log: &Arc<Mutex<Vec<String>>>, label: &'static str) -> Option<Completion> {
    let log = Arc::clone(log);
    Some(Box::new(move |finished| {
        log.lock().push(format!("{label}:{finished}"));
    }))
}
