//! Size cache.
//!
//! Solved section layouts are memoized per section identifier, container
//! size and delegate mode. The margin share of a display pass is memoized per
//! container size and delegate mode. Entries are never evicted one by one:
//! the whole cache is cleared when content changes or the layout is
//! invalidated.

use std::collections::HashMap;
use std::sync::Arc;

use sectioned_core::Size;
use sectioned_core::logging::targets;

use super::solver::SectionLayout;

/// Cache key shared by every entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    container: (u32, u32),
    by_delegate: bool,
}

impl LayoutKey {
    /// Create a key for the given container size and delegate mode.
    pub fn new(container: Size, by_delegate: bool) -> Self {
        Self {
            container: container.to_bits(),
            by_delegate,
        }
    }
}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Number of wholesale clears.
    pub invalidations: u64,
}

#[derive(Debug)]
struct CachedSection {
    layout: Arc<SectionLayout>,
    cells: HashMap<String, usize>,
}

/// Memoized section layouts and margin shares.
#[derive(Debug, Default)]
pub struct SizeCache {
    sections: HashMap<String, HashMap<LayoutKey, CachedSection>>,
    relative_extents: HashMap<LayoutKey, f32>,
    stats: CacheStats,
}

impl SizeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, hit: bool) {
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
    }

    /// Cached layout of a section.
    pub fn section_layout(&mut self, section: &str, key: LayoutKey) -> Option<Arc<SectionLayout>> {
        let layout = self
            .sections
            .get(section)
            .and_then(|layouts| layouts.get(&key))
            .map(|cached| Arc::clone(&cached.layout));
        self.record(layout.is_some());
        tracing::trace!(
            target: targets::CACHE,
            section,
            hit = layout.is_some(),
            "section layout lookup"
        );
        layout
    }

    /// Cached placed size of a bound cell.
    pub fn cell_size(&mut self, section: &str, cell: &str, key: LayoutKey) -> Option<Size> {
        let size = self
            .sections
            .get(section)
            .and_then(|layouts| layouts.get(&key))
            .and_then(|cached| {
                let index = *cached.cells.get(cell)?;
                cached.layout.cell_sizes.get(index).copied()
            });
        self.record(size.is_some());
        tracing::trace!(target: targets::CACHE, section, cell, hit = size.is_some(), "cell size lookup");
        size
    }

    /// Store a solved section layout together with its cell identifiers.
    pub fn store_section<'a>(
        &mut self,
        section: &str,
        key: LayoutKey,
        layout: Arc<SectionLayout>,
        cell_identifiers: impl IntoIterator<Item = &'a str>,
    ) {
        let cells = cell_identifiers
            .into_iter()
            .enumerate()
            .map(|(index, identifier)| (identifier.to_owned(), index))
            .collect();
        self.sections
            .entry(section.to_owned())
            .or_default()
            .insert(key, CachedSection { layout, cells });
    }

    /// Cached margin share of a display pass.
    pub fn relative_extent(&mut self, key: LayoutKey) -> Option<f32> {
        let extent = self.relative_extents.get(&key).copied();
        self.record(extent.is_some());
        extent
    }

    /// Store the margin share of a display pass.
    pub fn store_relative_extent(&mut self, key: LayoutKey, extent: f32) {
        self.relative_extents.insert(key, extent);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        let sections = self.sections.len();
        self.sections.clear();
        self.relative_extents.clear();
        self.stats.invalidations += 1;
        tracing::trace!(target: targets::CACHE, sections, "size cache cleared");
    }

    /// Whether nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.relative_extents.is_empty()
    }

    /// Effectiveness counters.
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
