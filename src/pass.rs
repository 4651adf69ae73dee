//! The equalization pass.
//!
//! One pass is a full measure-then-write cycle over the element
//! collection. It is synchronous, never yields, and is idempotent for a
//! fixed layout: re-running it without an intervening layout change writes
//! the same values again.
//!
//! The pass is a pure procedure over a [`Host`]; all trigger wiring lives
//! in [`crate::equalize`].

use tracing::trace;

use crate::host::Host;
use crate::options::EqualizeOptions;
use crate::types::StyleValue;

/// Run one equalization pass over `elements`.
///
/// Outside the configured width window the pass writes the reset value to
/// every element and returns: equalization is disabled there, not merely
/// skipped, so heights set at another breakpoint never leak across.
///
/// Inside the window every element is first reset (a previously written
/// equal height must not bias measurement), then equalized globally or
/// per visual row depending on the options.
pub fn run_pass<H: Host>(host: &H, elements: &[H::Element], options: &EqualizeOptions) {
    let viewport_width = host.viewport_width();

    if !options.width_in_window(viewport_width) {
        trace!(viewport_width, "viewport outside width window, resetting");
        for element in elements {
            host.write_style(element, options.target_property, options.reset_value);
        }
        return;
    }

    trace!(
        viewport_width,
        elements = elements.len(),
        per_row = options.equalize_rows,
        "equalization pass"
    );

    // Clear any previously set equal height before measuring.
    for element in elements {
        host.write_style(element, options.target_property, options.reset_value);
    }

    if options.equalize_rows {
        equalize_per_row(host, elements, options);
    } else {
        equalize_global(host, elements, options);
    }
}

/// Global mode: one maximum across the whole collection.
fn equalize_global<H: Host>(host: &H, elements: &[H::Element], options: &EqualizeOptions) {
    let mut highest = 0.0f32;

    for element in elements {
        let height = host.measure(element, options.measured_property);
        if height > highest {
            highest = height;
        }
    }

    for element in elements {
        host.write_style(element, options.target_property, StyleValue::Px(highest));
    }
}

/// Per-row mode: group consecutive elements by shared top offset and give
/// each group its own maximum.
fn equalize_per_row<H: Host>(host: &H, elements: &[H::Element], options: &EqualizeOptions) {
    let mut row: Vec<&H::Element> = Vec::new();
    let mut row_top = 0.0f32;
    let mut highest = 0.0f32;

    for element in elements {
        let top = host.offset_top(element);

        if top != row_top {
            if !row.is_empty() {
                apply_row(host, &mut row, highest, options);
                highest = 0.0;
                // Applying the previous row's height may have reflowed
                // this element, so read its offset again.
                row_top = host.offset_top(element);
            } else {
                row_top = top;
            }
        }

        row.push(element);

        let height = host.measure(element, options.measured_property);
        if height > highest {
            highest = height;
        }
    }

    // The final row never sees an offset change; flush it explicitly.
    apply_row(host, &mut row, highest, options);
}

fn apply_row<H: Host>(
    host: &H,
    row: &mut Vec<&H::Element>,
    highest: f32,
    options: &EqualizeOptions,
) {
    for element in row.drain(..) {
        host.write_style(element, options.target_property, StyleValue::Px(highest));
    }
}
