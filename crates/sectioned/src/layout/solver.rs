//! Distribution solver: concrete cell sizes for one section.
//!
//! The solver is a pure function. It receives one [`CellMeasure`] per cell
//! (explicit sizes already resolved, relative cells left open), the section's
//! [`SizeConstraints`], and the scroll-axis extent granted to margin cells in
//! the current display pass. It returns a [`SectionLayout`]: per-cell sizes,
//! the row breakdown, and the section's overall size.
//!
//! Rows are built greedily, the same way a flow layout wraps: an item joins
//! the current row if it fits, otherwise the row is closed and the item
//! starts the next one. There is no look-ahead and no backtracking.
//!
//! ```text
//! cross extent = 200, Proportionally, cells 75 wide
//!
//! ┌────────┬────────┬────┐
//! │   75   │   75   │    │  row 0 (75 + 75 + 75 > 200: wrap)
//! ├────────┼────────┼────┤
//! │   75   │   75   │    │  row 1
//! └────────┴────────┴────┘
//! ```

use std::ops::Range;

use sectioned_core::Size;

use super::constraints::SizeConstraints;
use crate::model::Distribution;

/// Hard floor for the scroll-axis extent of a margin cell.
pub const MINIMUM_RELATIVE_EXTENT: f32 = 1.0;

/// A cell as seen by the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellMeasure {
    /// A definite size (explicit, or supplied by the host).
    Fixed(Size),
    /// A relative cell. `fallback` is the model's default size.
    Relative {
        /// Used for the scroll-axis extent of a row-filling cell.
        fallback: Size,
    },
}

impl CellMeasure {
    /// Returns `true` for [`CellMeasure::Relative`].
    #[inline]
    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Relative { .. })
    }
}

/// One row of a solved section.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell indices in this row.
    pub items: Range<usize>,
    /// Largest scroll-axis extent among the row's cells.
    pub main_extent: f32,
}

/// Result of solving one section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionLayout {
    /// Size of each cell, in cell order.
    pub cell_sizes: Vec<Size>,
    /// Rows, in order along the scroll axis.
    pub rows: Vec<Row>,
    /// Section size: full container cross extent by content extent plus
    /// insets along the scroll axis.
    pub size: Size,
}

impl SectionLayout {
    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Accumulates cells into rows.
#[derive(Debug, Default)]
struct RowBuilder {
    rows: Vec<Row>,
    start: usize,
    len: usize,
    cursor: f32,
    main_extent: f32,
}

impl RowBuilder {
    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `cross` fits after the current cursor.
    fn fits(&self, cross: f32, spacing: f32, available: f32) -> bool {
        self.is_empty() || self.cursor + spacing + cross <= available
    }

    /// Cross extent left in the current row.
    fn remaining(&self, spacing: f32, available: f32) -> f32 {
        if self.is_empty() {
            available
        } else {
            available - self.cursor - spacing
        }
    }

    fn push(&mut self, cross: f32, main: f32, spacing: f32) {
        if !self.is_empty() {
            self.cursor += spacing;
        }
        self.cursor += cross;
        self.main_extent = self.main_extent.max(main);
        self.len += 1;
    }

    fn break_row(&mut self) {
        if self.is_empty() {
            return;
        }
        self.rows.push(Row {
            items: self.start..self.start + self.len,
            main_extent: self.main_extent,
        });
        self.start += self.len;
        self.len = 0;
        self.cursor = 0.0;
        self.main_extent = 0.0;
    }

    fn finish(mut self) -> Vec<Row> {
        self.break_row();
        self.rows
    }
}

/// Scroll-axis extent for each margin cell of a display pass.
///
/// `leftover` is the container's scroll-axis extent minus everything that is
/// not a margin cell. It is divided equally; if it is negative or smaller than
/// [`MINIMUM_RELATIVE_EXTENT`] per cell, every margin cell gets the floor.
pub fn relative_extent(leftover: f32, relative_count: usize) -> f32 {
    if relative_count == 0 {
        return 0.0;
    }
    let count = relative_count as f32;
    if leftover >= MINIMUM_RELATIVE_EXTENT * count {
        leftover / count
    } else {
        MINIMUM_RELATIVE_EXTENT
    }
}

/// Solve one section.
///
/// `relative_extent` is the scroll-axis extent of margin cells (ignored when
/// the distribution fills rows with relative cells instead).
pub fn solve(
    measures: &[CellMeasure],
    constraints: &SizeConstraints,
    relative_extent: f32,
) -> SectionLayout {
    let direction = constraints.direction();
    let section = &constraints.section_constraints;
    let available = constraints.cross_extent();
    let spacing = section.interitem_spacing;

    let main_of = |measure: &CellMeasure| match measure {
        CellMeasure::Fixed(size) => direction.main(*size),
        CellMeasure::Relative { .. } => relative_extent,
    };

    let mut cell_sizes = Vec::with_capacity(measures.len());
    let mut rows = RowBuilder::default();

    match section.distribution {
        Distribution::EntireRow => {
            for measure in measures {
                let main = main_of(measure);
                rows.push(available, main, 0.0);
                rows.break_row();
                cell_sizes.push(direction.size(main, available));
            }
        }
        Distribution::Equally { cells_in_row } => {
            let per_row = cells_in_row.max(1);
            let gaps = spacing * per_row.saturating_sub(1) as f32;
            let slot = ((available - gaps) / per_row as f32).max(0.0);
            for measure in measures {
                if rows.len == per_row {
                    rows.break_row();
                }
                let main = main_of(measure);
                rows.push(slot, main, spacing);
                cell_sizes.push(direction.size(main, slot));
            }
        }
        Distribution::Proportionally => {
            for measure in measures {
                let (main, cross) = match measure {
                    CellMeasure::Fixed(size) => (direction.main(*size), direction.cross(*size)),
                    CellMeasure::Relative { .. } => (relative_extent, available),
                };
                if !rows.fits(cross, spacing, available) {
                    rows.break_row();
                }
                rows.push(cross, main, spacing);
                cell_sizes.push(direction.size(main, cross));
            }
        }
        Distribution::ProportionallyWithLastCellFillingWidth { minimum_width } => {
            for measure in measures {
                let (main, cross) = match measure {
                    CellMeasure::Fixed(size) => {
                        let cross = direction.cross(*size);
                        if !rows.fits(cross, spacing, available) {
                            rows.break_row();
                        }
                        (direction.main(*size), cross)
                    }
                    CellMeasure::Relative { fallback } => {
                        let remaining = rows.remaining(spacing, available);
                        let cross = if rows.is_empty() {
                            available
                        } else if remaining < minimum_width {
                            rows.break_row();
                            available
                        } else {
                            remaining
                        };
                        (direction.main(*fallback), cross)
                    }
                };
                rows.push(cross, main, spacing);
                cell_sizes.push(direction.size(main, cross));
            }
        }
    }

    let rows = rows.finish();
    let content = rows.iter().map(|row| row.main_extent).sum::<f32>()
        + section.line_spacing * rows.len().saturating_sub(1) as f32;
    let main = content + direction.main_inset(&section.inset);
    let size = direction.size(main, direction.cross(constraints.container_size));

    SectionLayout {
        cell_sizes,
        rows,
        size,
    }
}
