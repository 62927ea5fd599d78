//! Browser adapter
//!
//! Implements [`ScrollRegion`] over `web_sys::Element` and [`Host`] over the
//! page's `Window`/`Document`. Only compiled for `wasm32` targets.
//!
//! ```ignore
//! let page = WebPage::new().ok_or("no window")?;
//! let panes = document
//!     .query_selector_all(".diff-pane")?
//!     .iter()
//!     .map(ElementRegion::new);
//! let mirror = ScrollMirror::new(page, panes, MirrorOptions::default());
//! ```

use crate::mirror::{
    same_handler, Axis, Host, Overflow, ScrollHandler, ScrollRegion, ScrollTarget, Task,
};
use crate::LOG_TAG;
use log::warn;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Node, ScrollBehavior, ScrollToOptions, Window};

// ─────────────────────────────────────────────────────────────────────────────
// Element Region
// ─────────────────────────────────────────────────────────────────────────────

/// A DOM element used as a scroll region. Equality is element identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRegion(Element);

impl ElementRegion {
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl From<Element> for ElementRegion {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

impl ScrollRegion for ElementRegion {
    fn scroll_offset(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => f64::from(self.0.scroll_left()),
            Axis::Vertical => f64::from(self.0.scroll_top()),
        }
    }

    fn set_scroll_offset(&self, axis: Axis, offset: f64) {
        // Instant, so a page-level `scroll-behavior: smooth` cannot lag the mirror.
        let options = ScrollToOptions::new();
        options.set_behavior(ScrollBehavior::Instant);
        match axis {
            Axis::Horizontal => options.set_left(offset),
            Axis::Vertical => options.set_top(offset),
        }
        self.0.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => f64::from(self.0.scroll_width()),
            Axis::Vertical => f64::from(self.0.scroll_height()),
        }
    }

    fn client_extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => f64::from(self.0.client_width()),
            Axis::Vertical => f64::from(self.0.client_height()),
        }
    }

    fn overflow(&self, axis: Axis) -> Overflow {
        let property = match axis {
            Axis::Horizontal => "overflow-x",
            Axis::Vertical => "overflow-y",
        };
        web_sys::window()
            .and_then(|window| window.get_computed_style(&self.0).ok().flatten())
            .and_then(|style| style.get_property_value(property).ok())
            .map(|keyword| Overflow::from_keyword(&keyword))
            .unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Web Page Host
// ─────────────────────────────────────────────────────────────────────────────

struct Listener {
    target: ScrollTarget<ElementRegion>,
    handler: ScrollHandler,
    closure: Closure<dyn FnMut()>,
}

/// The current browser page as a mirror host.
pub struct WebPage {
    window: Window,
    document: Document,
    listeners: RefCell<Vec<Listener>>,
}

impl WebPage {
    /// Bind to the global window. Returns `None` outside a browser context.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            listeners: RefCell::new(Vec::new()),
        })
    }

    fn event_target(&self, target: &ScrollTarget<ElementRegion>) -> web_sys::EventTarget {
        match target {
            ScrollTarget::Window => self.window.clone().into(),
            ScrollTarget::Region(region) => region.0.clone().into(),
        }
    }

    fn position(&self, target: &ScrollTarget<ElementRegion>, handler: &ScrollHandler) -> Option<usize> {
        self.listeners
            .borrow()
            .iter()
            .position(|l| &l.target == target && same_handler(&l.handler, handler))
    }
}

impl Host for WebPage {
    type Region = ElementRegion;

    fn scrolling_element(&self) -> Option<ElementRegion> {
        self.document
            .scrolling_element()
            .or_else(|| self.document.document_element())
            .map(ElementRegion)
    }

    fn is_body_descendant(&self, region: &ElementRegion) -> bool {
        let Some(body) = self.document.body() else {
            return false;
        };
        let body: &Element = body.as_ref();
        let node: &Node = &region.0;
        body != &region.0 && body.contains(Some(node))
    }

    fn add_scroll_listener(&self, target: &ScrollTarget<ElementRegion>, handler: &ScrollHandler) {
        if self.position(target, handler).is_some() {
            return;
        }
        let callback = Rc::clone(handler);
        let closure = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
        if let Err(err) = self
            .event_target(target)
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
        {
            warn!("{} Failed to attach scroll listener: {:?}", LOG_TAG, err);
            return;
        }
        self.listeners.borrow_mut().push(Listener {
            target: target.clone(),
            handler: Rc::clone(handler),
            closure,
        });
    }

    fn remove_scroll_listener(&self, target: &ScrollTarget<ElementRegion>, handler: &ScrollHandler) {
        let Some(index) = self.position(target, handler) else {
            return;
        };
        let listener = self.listeners.borrow_mut().remove(index);
        if let Err(err) = self.event_target(target).remove_event_listener_with_callback(
            "scroll",
            listener.closure.as_ref().unchecked_ref(),
        ) {
            warn!("{} Failed to detach scroll listener: {:?}", LOG_TAG, err);
        }
    }

    fn defer(&self, task: Task) {
        let callback = Closure::once_into_js(move || task());
        self.window.queue_microtask(callback.unchecked_ref());
    }

    fn request_frame(&self, task: Task) {
        let callback = Closure::once_into_js(move || task());
        if let Err(err) = self.window.request_animation_frame(callback.unchecked_ref()) {
            warn!("{} Failed to request animation frame: {:?}", LOG_TAG, err);
        }
    }
}

impl fmt::Debug for WebPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebPage")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
