//! Setup, trigger wiring and the teardown handle.
//!
//! Every trigger funnels into one generation signal; one effect owns the
//! pass:
//!
//! ```text
//! triggers (resize / load / timeout / refresh)
//!   │  bump
//!   ▼
//! pass generation signal  (spark-signals)
//!   │  tracked by
//!   ▼
//! equalization effect ──▶ run_pass(host, elements, options)
//! ```
//!
//! `flush_sync()` after each bump keeps recomputation synchronous per
//! trigger: when a host callback returns, the pass has already run.
//!
//! Setup returns an [`EqualizeHandle`]. Disposing it stops the effect,
//! removes every listener bound at setup (or rebound later by the delayed
//! recheck) and cancels pending timers. Listeners never accumulate across
//! repeated setups over overlapping collections - all wiring is
//! per-handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{effect, flush_sync, signal};
use tracing::{debug, warn};

use crate::host::{Host, Unsubscribe};
use crate::options::EqualizeOptions;
use crate::pass::run_pass;
use crate::types::IMAGE_SELECTOR;

// =============================================================================
// Equalize Handle
// =============================================================================

/// Handle returned by [`equalize`] that allows manual refresh and teardown.
///
/// Holds:
/// - The equalization effect's stop function
/// - Every unsubscribe closure bound on the host
/// - Cancellations for the pending recheck and debounce timers
pub struct EqualizeHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    active: Rc<Cell<bool>>,
    subscriptions: Rc<RefCell<Vec<Unsubscribe>>>,
    pending_recheck: Rc<RefCell<Option<Unsubscribe>>>,
    pending_debounce: Rc<RefCell<Option<Unsubscribe>>>,
    trigger: Rc<dyn Fn()>,
}

impl EqualizeHandle {
    /// Run one extra equalization pass on demand.
    ///
    /// Useful after mutating the collection's content through a path the
    /// bound triggers cannot see.
    pub fn refresh(&self) {
        (self.trigger)();
    }

    /// Whether the handle still reacts to triggers.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Tear down the equalizer.
    ///
    /// This will:
    /// 1. Mark the handle inactive (late host callbacks become no-ops)
    /// 2. Cancel the pending recheck and debounce timers
    /// 3. Remove every listener bound on the host
    /// 4. Stop the equalization effect
    pub fn dispose(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.active.replace(false) {
            return;
        }
        debug!("equalizer teardown");

        let pending = self.pending_recheck.borrow_mut().take();
        if let Some(cancel) = pending {
            cancel();
        }
        let pending = self.pending_debounce.borrow_mut().take();
        if let Some(cancel) = pending {
            cancel();
        }

        for unsubscribe in self.subscriptions.borrow_mut().drain(..) {
            unsubscribe();
        }

        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

impl Drop for EqualizeHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Setup
// =============================================================================

/// Attach a height equalizer to `elements`.
///
/// Runs one pass synchronously before returning, then recomputes on every
/// viewport resize, on load of every nested image, on load of nested
/// `load_selector` matches, and once after `recheck_delay` if configured.
///
/// The collection is captured as-is and never re-queried; an empty
/// collection yields no-op passes. Returns an [`EqualizeHandle`] whose
/// disposal (explicit or on drop) removes everything bound here.
pub fn equalize<H: Host + 'static>(
    host: Rc<H>,
    elements: Vec<H::Element>,
    options: EqualizeOptions,
) -> EqualizeHandle {
    if options.min_width >= options.max_width {
        warn!(
            min_width = options.min_width,
            max_width = options.max_width,
            "width window is empty; every pass will write the reset value"
        );
    }
    debug!(
        elements = elements.len(),
        per_row = options.equalize_rows,
        "equalizer setup"
    );

    let elements = Rc::new(elements);
    let options = Rc::new(options);
    let active = Rc::new(Cell::new(true));
    let subscriptions: Rc<RefCell<Vec<Unsubscribe>>> = Rc::new(RefCell::new(Vec::new()));
    let pending_recheck: Rc<RefCell<Option<Unsubscribe>>> = Rc::new(RefCell::new(None));
    let pending_debounce: Rc<RefCell<Option<Unsubscribe>>> = Rc::new(RefCell::new(None));

    let generation = signal(0u64);

    // The ONE equalization effect. Every trigger bumps the generation
    // signal; the pass itself reads nothing reactive.
    let stop_effect: Box<dyn FnOnce()> = {
        let host = Rc::clone(&host);
        let elements = Rc::clone(&elements);
        let options = Rc::clone(&options);
        let active = Rc::clone(&active);
        let generation = generation.clone();
        let stop = effect(move || {
            let _ = generation.get();
            if !active.get() {
                return;
            }
            run_pass(host.as_ref(), &elements, &options);
        });
        Box::new(stop)
    };

    let trigger: Rc<dyn Fn()> = {
        let active = Rc::clone(&active);
        Rc::new(move || {
            if !active.get() {
                return;
            }
            generation.set(generation.get() + 1);
            flush_sync();
        })
    };

    // Initial pass, synchronously at setup.
    flush_sync();

    // Resize, optionally collapsed to one trailing pass per quiet period.
    let resize_callback: Rc<dyn Fn()> = match options.resize_debounce {
        None => Rc::clone(&trigger),
        Some(delay) => {
            let host = Rc::clone(&host);
            let trigger = Rc::clone(&trigger);
            let pending_debounce = Rc::clone(&pending_debounce);
            Rc::new(move || {
                let pending = pending_debounce.borrow_mut().take();
                if let Some(cancel) = pending {
                    cancel();
                }
                let trigger = Rc::clone(&trigger);
                let consumed = Rc::clone(&pending_debounce);
                let cancel = host.schedule_once(
                    delay,
                    Box::new(move || {
                        let _ = consumed.borrow_mut().take();
                        trigger();
                    }),
                );
                *pending_debounce.borrow_mut() = Some(cancel);
            })
        }
    };
    subscriptions
        .borrow_mut()
        .push(host.on_viewport_resize(resize_callback));

    // Nested images change rendered heights when they finish loading.
    bind_load_targets(&host, &elements, IMAGE_SELECTOR, &trigger, &subscriptions);

    if let Some(selector) = &options.load_selector {
        bind_load_targets(&host, &elements, selector, &trigger, &subscriptions);
    }

    // One extra pass after the configured delay. Content inserted between
    // setup and the recheck may match the load selector only now, so its
    // bindings are bound again at that point.
    if let Some(delay) = options.recheck_delay {
        let recheck_host = Rc::clone(&host);
        let elements = Rc::clone(&elements);
        let options = Rc::clone(&options);
        let trigger = Rc::clone(&trigger);
        let subscriptions = Rc::clone(&subscriptions);
        let consumed = Rc::clone(&pending_recheck);
        let cancel = host.schedule_once(
            delay,
            Box::new(move || {
                let _ = consumed.borrow_mut().take();
                trigger();
                if let Some(selector) = &options.load_selector {
                    bind_load_targets(&recheck_host, &elements, selector, &trigger, &subscriptions);
                }
            }),
        );
        *pending_recheck.borrow_mut() = Some(cancel);
    }

    EqualizeHandle {
        stop_effect: Some(stop_effect),
        active,
        subscriptions,
        pending_recheck,
        pending_debounce,
        trigger,
    }
}

/// Bind the trigger to the load event of every nested selector match.
fn bind_load_targets<H: Host>(
    host: &Rc<H>,
    elements: &[H::Element],
    selector: &str,
    trigger: &Rc<dyn Fn()>,
    subscriptions: &Rc<RefCell<Vec<Unsubscribe>>>,
) {
    for scope in elements {
        for target in host.select_descendants(scope, selector) {
            let unsubscribe = host.on_load(&target, Rc::clone(trigger));
            subscriptions.borrow_mut().push(unsubscribe);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
