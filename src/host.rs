//! Host environment seam.
//!
//! The equalizer never touches a concrete UI tree. Everything
//! layout-related - measuring, style writes, offsets, event subscription,
//! one-shot timers - goes through the [`Host`] trait, so the same
//! algorithm runs against a DOM bridge, a widget toolkit, or the scripted
//! fixture used in tests.
//!
//! Hosts are single-threaded and event-driven: callbacks are `Rc<dyn Fn()>`
//! (deliberately `!Send`) and must be invoked on the host's UI thread.
//! All methods take `&self`; hosts that mutate use interior mutability.

use std::rc::Rc;
use std::time::Duration;

use crate::types::{MeasuredProperty, SizeProperty, StyleValue};

/// Removes a subscription or cancels a pending timer when called.
///
/// Dropping an `Unsubscribe` without calling it leaks the binding into the
/// host; the equalizer always either calls or stores these.
pub type Unsubscribe = Box<dyn FnOnce()>;

/// A DOM-like environment the equalizer operates in.
///
/// Implementations are expected to be cheap to query: the equalizer reads
/// the viewport width, offsets and measurements on every pass.
pub trait Host {
    /// Opaque element reference. Cloning must alias the same element.
    type Element: Clone + 'static;

    /// Current viewport width in pixels.
    fn viewport_width(&self) -> f32;

    /// Measure an element's rendered height.
    fn measure(&self, element: &Self::Element, property: MeasuredProperty) -> f32;

    /// Top offset of an element relative to its nearest positioned context.
    ///
    /// Elements sharing a top offset are considered to be on the same
    /// visual row.
    fn offset_top(&self, element: &Self::Element) -> f32;

    /// Write a style value to an element.
    fn write_style(&self, element: &Self::Element, property: SizeProperty, value: StyleValue);

    /// Elements nested under `scope` that match `selector`.
    ///
    /// No matches is a plain empty result, never an error.
    fn select_descendants(&self, scope: &Self::Element, selector: &str) -> Vec<Self::Element>;

    /// Invoke `callback` whenever `element` finishes loading.
    fn on_load(&self, element: &Self::Element, callback: Rc<dyn Fn()>) -> Unsubscribe;

    /// Invoke `callback` on every viewport resize event.
    fn on_viewport_resize(&self, callback: Rc<dyn Fn()>) -> Unsubscribe;

    /// Invoke `callback` once after `delay`. The returned closure cancels
    /// the pending callback if it has not fired yet.
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Unsubscribe;
}
