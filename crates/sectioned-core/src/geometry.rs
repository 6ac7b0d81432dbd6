//! Basic geometry types for list layout.
//!
//! Sizes are expressed in logical units. Most layout code does not care whether
//! a dimension is a width or a height; it cares whether the dimension runs
//! along the scroll direction (the *main* axis) or across it (the *cross*
//! axis). [`ScrollDirection`] converts between the two views.

use serde::{Deserialize, Serialize};

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Bit-exact representation, usable as a hash key.
    ///
    /// `0.0` and `-0.0` map to different keys; callers pass sizes produced by
    /// the same host, so this never splits a cache entry in practice.
    #[inline]
    pub fn to_bits(self) -> (u32, u32) {
        (self.width.to_bits(), self.height.to_bits())
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Insets around a section's content.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    /// Top inset.
    pub top: f32,
    /// Left inset.
    pub left: f32,
    /// Bottom inset.
    pub bottom: f32,
    /// Right inset.
    pub right: f32,
}

impl EdgeInsets {
    /// No insets.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// Create new insets.
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Create uniform insets (same value on all sides).
    pub const fn uniform(inset: f32) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Total horizontal inset (left + right).
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical inset (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// The direction in which a list scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Content grows downwards; rows fill the width.
    #[default]
    Vertical,
    /// Content grows to the right; rows fill the height.
    Horizontal,
}

impl ScrollDirection {
    /// Extent of `size` along the scroll direction.
    #[inline]
    pub fn main(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Extent of `size` across the scroll direction.
    #[inline]
    pub fn cross(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// Build a size from main-axis and cross-axis extents.
    #[inline]
    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Self::Vertical => Size::new(cross, main),
            Self::Horizontal => Size::new(main, cross),
        }
    }

    /// Inset total along the scroll direction.
    #[inline]
    pub fn main_inset(self, insets: &EdgeInsets) -> f32 {
        match self {
            Self::Vertical => insets.vertical(),
            Self::Horizontal => insets.horizontal(),
        }
    }

    /// Inset total across the scroll direction.
    #[inline]
    pub fn cross_inset(self, insets: &EdgeInsets) -> f32 {
        match self {
            Self::Vertical => insets.horizontal(),
            Self::Horizontal => insets.vertical(),
        }
    }
}
