//! Cell size controller: solver and cache orchestration.
//!
//! Every size query runs against a [`DisplayPass`], the snapshot of sections
//! currently bound to the list. Margin cells are normalized across the whole
//! pass, so sizing one section needs the others too.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use sectioned_core::logging::{span_names, targets};
use sectioned_core::{PerfSpan, Size};

use super::cache::{CacheStats, LayoutKey, SizeCache};
use super::constraints::SizeConstraints;
use super::solver::{self, CellMeasure, SectionLayout};
use crate::host::SizeDelegate;
use crate::model::{CellModel, CellSize, IndexPath, Section};

/// The sections bound to the list for one round of size queries.
#[derive(Debug, Clone, Copy)]
pub struct DisplayPass<'a> {
    sections: &'a [Section],
}

impl<'a> DisplayPass<'a> {
    /// Create a pass over the given sections.
    pub fn new(sections: &'a [Section]) -> Self {
        Self { sections }
    }

    /// The bound sections.
    #[inline]
    pub fn sections(&self) -> &'a [Section] {
        self.sections
    }

    /// Model at `index_path`, if any.
    pub fn cell_model(&self, index_path: IndexPath) -> Option<&'a Arc<dyn CellModel>> {
        self.sections
            .get(index_path.section)
            .and_then(|section| section.cell_model(index_path.item))
    }
}

/// Computes and caches section and cell sizes.
pub struct CellSizeController {
    cache: Mutex<SizeCache>,
    delegate: RwLock<Option<Weak<dyn SizeDelegate>>>,
    solver_runs: AtomicU64,
}

impl Default for CellSizeController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CellSizeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellSizeController")
            .field("solver_runs", &self.solver_runs())
            .field("cache_stats", &self.cache_stats())
            .finish_non_exhaustive()
    }
}

impl CellSizeController {
    /// Create a controller with an empty cache and no delegate.
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(SizeCache::new()),
            delegate: RwLock::new(None),
            solver_runs: AtomicU64::new(0),
        }
    }

    /// Set (or clear) the size delegate. Held weakly.
    pub fn set_delegate(&self, delegate: Option<&Arc<dyn SizeDelegate>>) {
        *self.delegate.write() = delegate.map(Arc::downgrade);
    }

    /// The size delegate, if it is still alive.
    pub fn delegate(&self) -> Option<Arc<dyn SizeDelegate>> {
        self.delegate.read().as_ref().and_then(Weak::upgrade)
    }

    /// Size of the section at `section_index`.
    ///
    /// The delegate is consulted for relative cells. Returns [`Size::ZERO`]
    /// for an index outside the pass.
    pub fn section_size(
        &self,
        pass: DisplayPass<'_>,
        section_index: usize,
        constraints: &SizeConstraints,
    ) -> Size {
        self.layout(pass, section_index, constraints, true)
            .map_or(Size::ZERO, |layout| layout.size)
    }

    /// Size of a cell.
    ///
    /// A cell bound at `index_path` gets its placed size from the owning
    /// section's layout, solved with that section's constraints and the
    /// container size in `constraints`. An unbound cell gets its explicit
    /// size, or for a relative cell the model's default size. The delegate is
    /// never asked about a cell without an index path.
    pub fn cell_size(
        &self,
        pass: DisplayPass<'_>,
        model: &dyn CellModel,
        index_path: Option<IndexPath>,
        constraints: &SizeConstraints,
        enable_size_by_delegate: bool,
    ) -> Size {
        let bound = index_path.and_then(|path| {
            let section = pass.sections.get(path.section)?;
            let candidate = section.cell_model(path.item)?;
            (candidate.identifier() == model.identifier()).then_some((path, section))
        });

        let Some((path, section)) = bound else {
            return match self.measure(model, None, constraints, enable_size_by_delegate) {
                CellMeasure::Fixed(size) => size,
                CellMeasure::Relative { fallback } => fallback,
            };
        };

        let section_constraints =
            SizeConstraints::new(constraints.container_size, section.constraints);
        let key = LayoutKey::new(constraints.container_size, enable_size_by_delegate);
        if let Some(size) = self
            .cache
            .lock()
            .cell_size(&section.identifier, model.identifier(), key)
        {
            return size;
        }

        self.layout(pass, path.section, &section_constraints, enable_size_by_delegate)
            .and_then(|layout| layout.cell_sizes.get(path.item).copied())
            .unwrap_or(Size::ZERO)
    }

    /// Drop every cached size.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Number of times the solver has run.
    #[inline]
    pub fn solver_runs(&self) -> u64 {
        self.solver_runs.load(Ordering::Relaxed)
    }

    /// Cache effectiveness counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats()
    }

    fn layout(
        &self,
        pass: DisplayPass<'_>,
        section_index: usize,
        constraints: &SizeConstraints,
        by_delegate: bool,
    ) -> Option<Arc<SectionLayout>> {
        let section = pass.sections.get(section_index)?;
        let key = LayoutKey::new(constraints.container_size, by_delegate);
        if let Some(layout) = self.cache.lock().section_layout(&section.identifier, key) {
            return Some(layout);
        }

        let share = self.relative_extent_for_pass(pass, constraints.container_size, by_delegate);
        if let Some(layout) = self.cache.lock().section_layout(&section.identifier, key) {
            return Some(layout);
        }
        let measures = self.measures(section, section_index, constraints, by_delegate);
        let layout = Arc::new(self.solve(&measures, constraints, share));
        tracing::debug!(
            target: targets::LAYOUT,
            section = %section.identifier,
            rows = layout.row_count(),
            width = layout.size.width,
            height = layout.size.height,
            "section solved"
        );
        self.store(section, key, &layout);
        Some(layout)
    }

    /// Margin share for every margin cell of the pass.
    ///
    /// Leftover is the container's scroll-axis extent minus every section's
    /// extent with margin cells measured at zero. Sections without margin
    /// cells are final after that measurement and are cached on the way.
    fn relative_extent_for_pass(
        &self,
        pass: DisplayPass<'_>,
        container: Size,
        by_delegate: bool,
    ) -> f32 {
        let key = LayoutKey::new(container, by_delegate);
        if let Some(extent) = self.cache.lock().relative_extent(key) {
            return extent;
        }

        let direction = pass
            .sections
            .first()
            .map(|section| section.constraints.scroll_direction)
            .unwrap_or_default();

        let mut relative_count = 0;
        let mut content = 0.0;
        for (index, section) in pass.sections.iter().enumerate() {
            let constraints = SizeConstraints::new(container, section.constraints);
            let measures = self.measures(section, index, &constraints, by_delegate);
            let margins = if section.constraints.distribution.has_margin_cells() {
                measures.iter().filter(|measure| measure.is_relative()).count()
            } else {
                0
            };
            let layout = self.solve(&measures, &constraints, 0.0);
            content += direction.main(layout.size);
            relative_count += margins;
            if margins == 0 {
                self.store(section, key, &Arc::new(layout));
            }
        }

        let extent = solver::relative_extent(direction.main(container) - content, relative_count);
        tracing::debug!(
            target: targets::LAYOUT,
            relative_count,
            content,
            extent,
            "margin share computed"
        );
        self.cache.lock().store_relative_extent(key, extent);
        extent
    }

    fn measures(
        &self,
        section: &Section,
        section_index: usize,
        constraints: &SizeConstraints,
        by_delegate: bool,
    ) -> Vec<CellMeasure> {
        section
            .cell_models
            .iter()
            .enumerate()
            .map(|(item, model)| {
                let path = IndexPath::new(section_index, item);
                self.measure(model.as_ref(), Some(path), constraints, by_delegate)
            })
            .collect()
    }

    fn measure(
        &self,
        model: &dyn CellModel,
        index_path: Option<IndexPath>,
        constraints: &SizeConstraints,
        by_delegate: bool,
    ) -> CellMeasure {
        match model.size(constraints.adjusted_container_size()) {
            CellSize::Explicit(size) => CellMeasure::Fixed(size),
            CellSize::Relative => {
                let delegated = match index_path {
                    Some(path) if by_delegate => self
                        .delegate()
                        .and_then(|delegate| delegate.size_for(model, path, constraints)),
                    _ => None,
                };
                match delegated {
                    Some(size) => CellMeasure::Fixed(size),
                    None => CellMeasure::Relative {
                        fallback: model.default_size(constraints),
                    },
                }
            }
        }
    }

    fn solve(
        &self,
        measures: &[CellMeasure],
        constraints: &SizeConstraints,
        relative_extent: f32,
    ) -> SectionLayout {
        let _span = PerfSpan::new(span_names::SOLVE);
        self.solver_runs.fetch_add(1, Ordering::Relaxed);
        solver::solve(measures, constraints, relative_extent)
    }

    fn store(&self, section: &Section, key: LayoutKey, layout: &Arc<SectionLayout>) {
        self.cache.lock().store_section(
            &section.identifier,
            key,
            Arc::clone(layout),
            section.cell_models.iter().map(|model| model.identifier()),
        );
    }
}
