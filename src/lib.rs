//! # equal-heights
//!
//! Reactive equal-height layout helper for element collections.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! The equalizer measures every element in a collection and writes the
//! maximum back as a shared style value, globally or per visual row. All
//! recompute triggers funnel into one reactive pipeline:
//!
//! ```text
//! triggers (resize / image load / selector load / timeout / refresh)
//!   │
//!   ▼
//! pass generation signal → equalization effect → run_pass(host, ...)
//! ```
//!
//! The hosting environment stays behind the [`Host`] trait: viewport
//! width, measurement, offsets, style writes, selector matching, load and
//! resize events, and one-shot timers all come from the host. The crate
//! itself computes no box models and keeps no global state; everything a
//! setup binds is owned by its [`EqualizeHandle`] and removed on disposal.
//!
//! ## Modules
//!
//! - [`types`] - Style vocabulary (size properties, measured heights, values)
//! - [`options`] - Per-setup configuration with functional default merging
//! - [`host`] - The environment trait seam
//! - [`pass`] - The measure-then-write equalization pass
//! - [`equalize`] - Setup, trigger wiring, teardown handle

pub mod equalize;
pub mod host;
pub mod options;
pub mod pass;
pub mod types;

#[cfg(test)]
pub(crate) mod fixture;

// Re-export commonly used items
pub use equalize::{EqualizeHandle, equalize};
pub use host::{Host, Unsubscribe};
pub use options::EqualizeOptions;
pub use pass::run_pass;
pub use types::{IMAGE_SELECTOR, MeasuredProperty, SizeProperty, StyleValue};
