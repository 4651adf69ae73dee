//! Core types for equal-heights.
//!
//! These types describe the style vocabulary the equalizer speaks with its
//! host: which property gets written, which height flavor gets measured,
//! and what a written value looks like.

// =============================================================================
// Size Properties
// =============================================================================

/// The style property the computed height is written to.
///
/// `MinHeight` is the default: it equalizes columns without clipping
/// content that later grows taller than the computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeProperty {
    /// Fixed height. Content taller than the written value overflows.
    Height,
    /// Minimum height. Elements can still grow beyond the written value.
    #[default]
    MinHeight,
    /// Maximum height.
    MaxHeight,
}

/// The height flavor read when measuring an element.
///
/// Which one is appropriate depends on the host's box model. With
/// border-box sizing, `InnerHeight` usually matches what the eye sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeasuredProperty {
    /// Rendered content height, without padding or border.
    #[default]
    ContentHeight,
    /// Content plus padding.
    InnerHeight,
    /// Content plus padding plus border.
    OuterHeight,
}

// =============================================================================
// Style Values
// =============================================================================

/// A value written to a [`SizeProperty`].
///
/// `Px(0.0)` is the conventional reset for `min-height`; `Auto` is the
/// conventional reset for `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleValue {
    /// An absolute pixel value.
    Px(f32),
    /// Let the host compute the value (clears a previously written one).
    Auto,
}

impl StyleValue {
    /// Zero pixels - the default reset value.
    pub const ZERO: Self = Self::Px(0.0);
}

impl Default for StyleValue {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Selectors
// =============================================================================

/// Selector handed to the host to find nested images.
///
/// Image loads change rendered heights, so every nested image is a
/// recompute trigger regardless of configuration.
pub const IMAGE_SELECTOR: &str = "img";
