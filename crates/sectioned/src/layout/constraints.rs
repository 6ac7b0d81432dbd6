//! Size constraints: the pure input to sizing.

use sectioned_core::{ScrollDirection, Size};

use crate::model::SectionConstraints;

/// Container size plus the constraints of the section being sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeConstraints {
    /// Space the host makes available to the list.
    pub container_size: Size,
    /// Constraints of the owning section.
    pub section_constraints: SectionConstraints,
}

impl SizeConstraints {
    /// Create new size constraints.
    pub fn new(container_size: Size, section_constraints: SectionConstraints) -> Self {
        Self {
            container_size,
            section_constraints,
        }
    }

    /// The section's scroll direction.
    #[inline]
    pub fn direction(&self) -> ScrollDirection {
        self.section_constraints.scroll_direction
    }

    /// Container size minus the section insets, clamped at zero.
    pub fn adjusted_container_size(&self) -> Size {
        let inset = &self.section_constraints.inset;
        Size::new(
            (self.container_size.width - inset.horizontal()).max(0.0),
            (self.container_size.height - inset.vertical()).max(0.0),
        )
    }

    /// Cross-axis extent available to cells.
    #[inline]
    pub fn cross_extent(&self) -> f32 {
        self.direction().cross(self.adjusted_container_size())
    }

    /// Full container extent along the scroll direction.
    #[inline]
    pub fn main_extent(&self) -> f32 {
        self.direction().main(self.container_size)
    }
}
