//! Scripted host environment for tests.
//!
//! `FixtureDom` is an in-memory [`Host`] with scripted heights and
//! offsets, recorded style writes, and manually fired events: tests drive
//! resizes, load completions and captured timers by hand and assert on
//! what got written.
//!
//! Cloning a `FixtureDom` aliases the same underlying state, so a test
//! can hand one clone to the equalizer and keep another for assertions.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::host::{Host, Unsubscribe};
use crate::types::{MeasuredProperty, SizeProperty, StyleValue};

// =============================================================================
// Element State
// =============================================================================

#[derive(Default)]
struct ElementState {
    content_height: f32,
    padding: f32,
    border: f32,
    offset_top: f32,
    /// Tag used for descendant selector matching (children only).
    tag: Option<String>,
    parent: Option<usize>,
    /// Current style values, as a real host would retain them.
    styles: HashMap<SizeProperty, StyleValue>,
    /// Every write, in order.
    writes: Vec<(SizeProperty, StyleValue)>,
}

struct Inner {
    viewport_width: Cell<f32>,
    elements: RefCell<Vec<ElementState>>,
    load_subs: RefCell<Vec<(u64, usize, Rc<dyn Fn()>)>>,
    resize_subs: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
    timers: RefCell<Vec<(u64, Duration, Box<dyn FnOnce()>)>>,
    next_token: Cell<u64>,
    write_count: Cell<usize>,
}

// =============================================================================
// FixtureDom
// =============================================================================

#[derive(Clone)]
pub struct FixtureDom {
    inner: Rc<Inner>,
}

impl FixtureDom {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            inner: Rc::new(Inner {
                viewport_width: Cell::new(viewport_width),
                elements: RefCell::new(Vec::new()),
                load_subs: RefCell::new(Vec::new()),
                resize_subs: RefCell::new(Vec::new()),
                timers: RefCell::new(Vec::new()),
                next_token: Cell::new(0),
                write_count: Cell::new(0),
            }),
        }
    }

    fn next_token(&self) -> u64 {
        let token = self.inner.next_token.get();
        self.inner.next_token.set(token + 1);
        token
    }

    // -------------------------------------------------------------------------
    // Scripting
    // -------------------------------------------------------------------------

    /// Add a top-level element with a scripted content height and offset.
    pub fn element(&self, content_height: f32, offset_top: f32) -> usize {
        let mut elements = self.inner.elements.borrow_mut();
        elements.push(ElementState {
            content_height,
            offset_top,
            ..Default::default()
        });
        elements.len() - 1
    }

    /// Add a tagged child under `parent`, matchable via selectors.
    pub fn child(&self, parent: usize, tag: &str) -> usize {
        let mut elements = self.inner.elements.borrow_mut();
        elements.push(ElementState {
            tag: Some(tag.to_string()),
            parent: Some(parent),
            ..Default::default()
        });
        elements.len() - 1
    }

    pub fn set_content_height(&self, element: usize, content_height: f32) {
        self.inner.elements.borrow_mut()[element].content_height = content_height;
    }

    pub fn set_offset_top(&self, element: usize, offset_top: f32) {
        self.inner.elements.borrow_mut()[element].offset_top = offset_top;
    }

    pub fn set_box_extras(&self, element: usize, padding: f32, border: f32) {
        let mut elements = self.inner.elements.borrow_mut();
        elements[element].padding = padding;
        elements[element].border = border;
    }

    pub fn set_viewport_width(&self, viewport_width: f32) {
        self.inner.viewport_width.set(viewport_width);
    }

    // -------------------------------------------------------------------------
    // Event firing
    // -------------------------------------------------------------------------

    /// Fire every registered resize callback.
    pub fn fire_resize(&self) {
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .inner
            .resize_subs
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Fire the load callbacks registered on one element.
    pub fn fire_load(&self, element: usize) {
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .inner
            .load_subs
            .borrow()
            .iter()
            .filter(|(_, target, _)| *target == element)
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Fire every pending timer, in scheduling order.
    pub fn fire_all_timers(&self) {
        let timers: Vec<(u64, Duration, Box<dyn FnOnce()>)> =
            self.inner.timers.borrow_mut().drain(..).collect();
        for (_, _, callback) in timers {
            callback();
        }
    }

    // -------------------------------------------------------------------------
    // Assertions
    // -------------------------------------------------------------------------

    /// The value of the most recent style write on an element.
    pub fn written(&self, element: usize) -> Option<StyleValue> {
        self.inner.elements.borrow()[element]
            .writes
            .last()
            .map(|&(_, value)| value)
    }

    /// Total style writes across all elements.
    pub fn write_count(&self) -> usize {
        self.inner.write_count.get()
    }

    pub fn load_binding_count(&self) -> usize {
        self.inner.load_subs.borrow().len()
    }

    pub fn resize_binding_count(&self) -> usize {
        self.inner.resize_subs.borrow().len()
    }

    pub fn timer_count(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    pub fn scheduled_delays(&self) -> Vec<Duration> {
        self.inner
            .timers
            .borrow()
            .iter()
            .map(|&(_, delay, _)| delay)
            .collect()
    }
}

// =============================================================================
// Host Implementation
// =============================================================================

impl Host for FixtureDom {
    type Element = usize;

    fn viewport_width(&self) -> f32 {
        self.inner.viewport_width.get()
    }

    fn measure(&self, element: &usize, property: MeasuredProperty) -> f32 {
        let elements = self.inner.elements.borrow();
        let state = &elements[*element];

        // Model the feedback a real host has: written size properties
        // change the rendered height until they are reset.
        let mut content = state.content_height;
        if let Some(StyleValue::Px(value)) = state.styles.get(&SizeProperty::Height) {
            content = *value;
        }
        if let Some(StyleValue::Px(value)) = state.styles.get(&SizeProperty::MinHeight) {
            content = content.max(*value);
        }
        if let Some(StyleValue::Px(value)) = state.styles.get(&SizeProperty::MaxHeight) {
            content = content.min(*value);
        }

        match property {
            MeasuredProperty::ContentHeight => content,
            MeasuredProperty::InnerHeight => content + state.padding,
            MeasuredProperty::OuterHeight => content + state.padding + state.border,
        }
    }

    fn offset_top(&self, element: &usize) -> f32 {
        self.inner.elements.borrow()[*element].offset_top
    }

    fn write_style(&self, element: &usize, property: SizeProperty, value: StyleValue) {
        let mut elements = self.inner.elements.borrow_mut();
        let state = &mut elements[*element];
        state.styles.insert(property, value);
        state.writes.push((property, value));
        self.inner.write_count.set(self.inner.write_count.get() + 1);
    }

    fn select_descendants(&self, scope: &usize, selector: &str) -> Vec<usize> {
        self.inner
            .elements
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, state)| {
                state.parent == Some(*scope) && state.tag.as_deref() == Some(selector)
            })
            .map(|(id, _)| id)
            .collect()
    }

    fn on_load(&self, element: &usize, callback: Rc<dyn Fn()>) -> Unsubscribe {
        let token = self.next_token();
        self.inner
            .load_subs
            .borrow_mut()
            .push((token, *element, callback));

        let inner = Rc::clone(&self.inner);
        Box::new(move || {
            inner.load_subs.borrow_mut().retain(|(t, _, _)| *t != token);
        })
    }

    fn on_viewport_resize(&self, callback: Rc<dyn Fn()>) -> Unsubscribe {
        let token = self.next_token();
        self.inner.resize_subs.borrow_mut().push((token, callback));

        let inner = Rc::clone(&self.inner);
        Box::new(move || {
            inner.resize_subs.borrow_mut().retain(|(t, _)| *t != token);
        })
    }

    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Unsubscribe {
        let token = self.next_token();
        self.inner
            .timers
            .borrow_mut()
            .push((token, delay, callback));

        let inner = Rc::clone(&self.inner);
        Box::new(move || {
            inner.timers.borrow_mut().retain(|(t, _, _)| *t != token);
        })
    }
}
