//! Configuration for an equalizer setup.
//!
//! One immutable [`EqualizeOptions`] value is captured per [`equalize`]
//! call and never shared between setups. Overriding a subset of defaults
//! uses plain struct-update syntax:
//!
//! ```ignore
//! use equal_heights::{equalize, EqualizeOptions};
//!
//! let handle = equalize(host, elements, EqualizeOptions {
//!     min_width: 768.0,
//!     equalize_rows: true,
//!     ..Default::default()
//! });
//! ```
//!
//! [`equalize`]: crate::equalize

use std::time::Duration;

use crate::types::{MeasuredProperty, SizeProperty, StyleValue};

/// Options for one equalizer setup.
///
/// The width window `(min_width, max_width)` is exclusive on both ends.
/// Outside the window equalization is disabled, not skipped: every pass
/// writes `reset_value` so stale heights never linger across a breakpoint.
///
/// An empty window (`min_width >= max_width`) is tolerated and means the
/// reset value is written on every pass. Setup logs a warning for it but
/// raises no error.
#[derive(Debug, Clone)]
pub struct EqualizeOptions {
    /// Equalize only when the viewport is strictly wider than this.
    pub min_width: f32,
    /// Equalize only when the viewport is strictly narrower than this.
    pub max_width: f32,
    /// The property the computed height is written to.
    pub target_property: SizeProperty,
    /// Written before measuring, and whenever the window check fails.
    pub reset_value: StyleValue,
    /// Equalize within visual rows instead of across the whole collection.
    pub equalize_rows: bool,
    /// The height flavor read when measuring each element.
    pub measured_property: MeasuredProperty,
    /// Also recompute when nested elements matching this selector load.
    pub load_selector: Option<String>,
    /// Run exactly one extra pass this long after setup. At that moment
    /// the `load_selector` bindings are bound again, picking up content
    /// inserted since setup.
    pub recheck_delay: Option<Duration>,
    /// Collapse resize bursts into one trailing pass after this quiet
    /// period. `None` keeps the historical behavior: every resize event
    /// runs a full pass.
    pub resize_debounce: Option<Duration>,
}

impl Default for EqualizeOptions {
    fn default() -> Self {
        Self {
            min_width: f32::NEG_INFINITY,
            max_width: f32::INFINITY,
            target_property: SizeProperty::MinHeight,
            reset_value: StyleValue::ZERO,
            equalize_rows: false,
            measured_property: MeasuredProperty::ContentHeight,
            load_selector: None,
            recheck_delay: None,
            resize_debounce: None,
        }
    }
}

impl EqualizeOptions {
    /// Check whether a viewport width falls inside the configured window.
    ///
    /// Both bounds are exclusive. With the defaults this is always true.
    pub fn width_in_window(&self, viewport_width: f32) -> bool {
        self.min_width < viewport_width && viewport_width < self.max_width
    }
}
