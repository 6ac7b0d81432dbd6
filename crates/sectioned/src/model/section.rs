//! Sections: ordered groups of cell models sharing layout constraints.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use sectioned_core::{EdgeInsets, ScrollDirection};
use serde::{Deserialize, Serialize};

use super::cell::CellModel;
use super::index::IndexPath;
use crate::error::ListError;

/// How a section divides its cross-axis extent among cells.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    /// One cell per row; each cell spans the full cross extent.
    #[default]
    EntireRow,
    /// `cells_in_row` equally sized cells per row.
    Equally {
        /// Cells per row. Zero is treated as one.
        cells_in_row: usize,
    },
    /// Cells keep their own size and wrap greedily.
    Proportionally,
    /// Like [`Proportionally`](Self::Proportionally), but relative cells
    /// stretch to fill the rest of their row.
    ProportionallyWithLastCellFillingWidth {
        /// A filling cell never gets less than this; it wraps instead.
        minimum_width: f32,
    },
}

impl Distribution {
    /// Whether relative cells in this distribution are margin cells.
    ///
    /// Margin cells share the leftover scroll-axis space of the display pass.
    /// Under [`ProportionallyWithLastCellFillingWidth`](Self::ProportionallyWithLastCellFillingWidth)
    /// relative cells fill their row instead and take no part in that share.
    #[inline]
    pub fn has_margin_cells(&self) -> bool {
        !matches!(self, Self::ProportionallyWithLastCellFillingWidth { .. })
    }
}

/// Layout constraints shared by every cell of a section.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConstraints {
    /// Direction in which the list scrolls.
    pub scroll_direction: ScrollDirection,
    /// Cross-axis distribution strategy.
    pub distribution: Distribution,
    /// Insets around the section content.
    pub inset: EdgeInsets,
    /// Spacing between rows, along the scroll axis.
    pub line_spacing: f32,
    /// Spacing between cells of one row, along the cross axis.
    pub interitem_spacing: f32,
}

impl SectionConstraints {
    /// Set the distribution strategy.
    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Set the scroll direction.
    pub fn with_scroll_direction(mut self, direction: ScrollDirection) -> Self {
        self.scroll_direction = direction;
        self
    }

    /// Set the section insets.
    pub fn with_inset(mut self, inset: EdgeInsets) -> Self {
        self.inset = inset;
        self
    }

    /// Set row and inter-item spacing.
    pub fn with_spacing(mut self, line_spacing: f32, interitem_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self.interitem_spacing = interitem_spacing;
        self
    }
}

/// An ordered sequence of cell models plus their layout constraints.
#[derive(Debug, Clone)]
pub struct Section {
    /// Identifier, unique among the sections of one list.
    pub identifier: String,
    /// The cells, in display order.
    pub cell_models: Vec<Arc<dyn CellModel>>,
    /// Layout constraints.
    pub constraints: SectionConstraints,
}

impl Section {
    /// Create a section with default constraints.
    pub fn new(identifier: impl Into<String>, cell_models: Vec<Arc<dyn CellModel>>) -> Self {
        Self {
            identifier: identifier.into(),
            cell_models,
            constraints: SectionConstraints::default(),
        }
    }

    /// Replace the constraints.
    pub fn with_constraints(mut self, constraints: SectionConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Set the distribution strategy.
    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.constraints.distribution = distribution;
        self
    }

    /// Set the scroll direction.
    pub fn with_scroll_direction(mut self, direction: ScrollDirection) -> Self {
        self.constraints.scroll_direction = direction;
        self
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cell_models.len()
    }

    /// Returns `true` if the section has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell_models.is_empty()
    }

    /// The cell at `item`, if any.
    #[inline]
    pub fn cell_model(&self, item: usize) -> Option<&Arc<dyn CellModel>> {
        self.cell_models.get(item)
    }
}

/// Check the identifier invariants of a section list.
///
/// Cell identifiers must be non-empty and unique across all sections; section
/// identifiers must be unique among sections. Returns the first violation in
/// section-then-row order.
pub fn validate_sections(sections: &[Section]) -> Result<(), ListError> {
    let mut section_ids: HashMap<&str, usize> = HashMap::with_capacity(sections.len());
    let mut cell_ids: HashMap<&str, IndexPath> = HashMap::new();

    for (section_index, section) in sections.iter().enumerate() {
        if section_ids
            .insert(section.identifier.as_str(), section_index)
            .is_some()
        {
            return Err(ListError::DuplicateSectionIdentifier {
                identifier: section.identifier.clone(),
            });
        }

        for (item, model) in section.cell_models.iter().enumerate() {
            let index_path = IndexPath::new(section_index, item);
            let identifier = model.identifier();
            if identifier.is_empty() {
                return Err(ListError::EmptyIdentifier { index_path });
            }
            match cell_ids.entry(identifier) {
                Entry::Occupied(existing) => {
                    return Err(ListError::DuplicateIdentifier {
                        identifier: identifier.to_string(),
                        first: *existing.get(),
                        second: index_path,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(index_path);
                }
            }
        }
    }
    Ok(())
}
