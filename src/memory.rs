//! In-memory page host
//!
//! A deterministic stand-in for a browser page: regions with plain numeric
//! offsets and extents, a scroll event queue, a deferred task queue and a
//! frame callback queue. Embedders that lay out their own panes (immediate
//! mode GUIs, terminal UIs) can drive a mirror through it directly; the test
//! suite uses it to step the event loop frame by frame.
//!
//! # Frame model
//!
//! - Changing a region's offset queues one scroll event for its target
//!   (the window for the root region) if the offset actually changed.
//! - [`MemoryPage::render_frame`] takes the frame callbacks requested so far,
//!   dispatches the queued scroll events, then runs the taken callbacks.
//!   Deferred tasks run to completion after every dispatch and callback.
//! - Callbacks requested while a frame is rendering run in the next frame.

use crate::mirror::{
    same_handler, Axis, Host, Overflow, ScrollHandler, ScrollRegion, ScrollTarget, Task,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// Upper bound on frames rendered by [`MemoryPage::settle`].
pub const MAX_SETTLE_FRAMES: usize = 64;

/// Default viewport of a fresh page's root region.
const DEFAULT_VIEWPORT: (f64, f64) = (1024.0, 768.0);

// ─────────────────────────────────────────────────────────────────────────────
// Region
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegionKind {
    /// The page's canonical root scrolling element
    Root,
    /// A page-level element outside the body tree (e.g. `<body>` itself)
    PageProxy,
    /// An element inside the body
    Body,
}

struct RegionInner {
    name: String,
    kind: RegionKind,
    offset: [Cell<f64>; 2],
    extent: [Cell<f64>; 2],
    client: [Cell<f64>; 2],
    overflow: [Cell<Overflow>; 2],
    page: Weak<PageState>,
}

/// Handle to a region on a [`MemoryPage`]. Clones refer to the same region.
#[derive(Clone)]
pub struct MemoryRegion {
    inner: Rc<RegionInner>,
}

fn slot(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    }
}

impl MemoryRegion {
    fn new(
        page: &Rc<PageState>,
        name: &str,
        kind: RegionKind,
        scroll_size: (f64, f64),
        client_size: (f64, f64),
        overflow: Overflow,
    ) -> Self {
        Self {
            inner: Rc::new(RegionInner {
                name: name.to_string(),
                kind,
                offset: [Cell::new(0.0), Cell::new(0.0)],
                extent: [Cell::new(scroll_size.0), Cell::new(scroll_size.1)],
                client: [Cell::new(client_size.0), Cell::new(client_size.1)],
                overflow: [Cell::new(overflow), Cell::new(overflow)],
                page: Rc::downgrade(page),
            }),
        }
    }

    /// The name given at creation.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Set the overflow styling on both axes.
    pub fn with_overflow(self, overflow: Overflow) -> Self {
        for cell in &self.inner.overflow {
            cell.set(overflow);
        }
        self
    }

    /// Resize the content and viewport. Offsets are clamped to the new range
    /// without raising scroll events.
    pub fn set_extents(&self, scroll_size: (f64, f64), client_size: (f64, f64)) {
        let inner = &self.inner;
        inner.extent[0].set(scroll_size.0);
        inner.extent[1].set(scroll_size.1);
        inner.client[0].set(client_size.0);
        inner.client[1].set(client_size.1);
        for axis in Axis::ALL {
            let clamped = self.clamp_offset(axis, self.scroll_offset(axis));
            inner.offset[slot(axis)].set(clamped);
        }
    }

    fn clamp_offset(&self, axis: Axis, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.available_scroll(axis))
    }

    fn target(&self) -> ScrollTarget<MemoryRegion> {
        if self.inner.kind == RegionKind::Root {
            ScrollTarget::Window
        } else {
            ScrollTarget::Region(self.clone())
        }
    }
}

impl ScrollRegion for MemoryRegion {
    fn scroll_offset(&self, axis: Axis) -> f64 {
        self.inner.offset[slot(axis)].get()
    }

    fn set_scroll_offset(&self, axis: Axis, offset: f64) {
        let clamped = self.clamp_offset(axis, offset);
        let cell = &self.inner.offset[slot(axis)];
        if cell.get() == clamped {
            return;
        }
        cell.set(clamped);
        if let Some(page) = self.inner.page.upgrade() {
            page.queue_scroll_event(self.target());
        }
    }

    fn scroll_extent(&self, axis: Axis) -> f64 {
        self.inner.extent[slot(axis)].get()
    }

    fn client_extent(&self, axis: Axis) -> f64 {
        self.inner.client[slot(axis)].get()
    }

    fn overflow(&self, axis: Axis) -> Overflow {
        self.inner.overflow[slot(axis)].get()
    }
}

impl PartialEq for MemoryRegion {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRegion")
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .field("left", &self.scroll_offset(Axis::Horizontal))
            .field("top", &self.scroll_offset(Axis::Vertical))
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct PageState {
    listeners: RefCell<Vec<(ScrollTarget<MemoryRegion>, ScrollHandler)>>,
    pending_events: RefCell<Vec<ScrollTarget<MemoryRegion>>>,
    tasks: RefCell<VecDeque<Task>>,
    frame_callbacks: RefCell<Vec<Task>>,
    frames_rendered: Cell<usize>,
}

impl PageState {
    /// Queue a scroll event. A target appears at most once per frame.
    fn queue_scroll_event(&self, target: ScrollTarget<MemoryRegion>) {
        let mut pending = self.pending_events.borrow_mut();
        if !pending.contains(&target) {
            pending.push(target);
        }
    }

    fn is_listening(&self, target: &ScrollTarget<MemoryRegion>, handler: &ScrollHandler) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(t, h)| t == target && same_handler(h, handler))
    }
}

/// An in-memory page: a root scrolling element plus any number of regions.
#[derive(Clone)]
pub struct MemoryPage {
    state: Rc<PageState>,
    root: MemoryRegion,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Create a page whose root region has a 1024x768 viewport and no
    /// scrollable content yet.
    pub fn new() -> Self {
        let state = Rc::new(PageState::default());
        let root = MemoryRegion::new(
            &state,
            "html",
            RegionKind::Root,
            DEFAULT_VIEWPORT,
            DEFAULT_VIEWPORT,
            Overflow::Visible,
        );
        Self { state, root }
    }

    /// The canonical root scrolling element.
    pub fn root(&self) -> MemoryRegion {
        self.root.clone()
    }

    /// Create a scrollable region inside the body with `overflow: auto`.
    pub fn region(&self, name: &str, scroll_size: (f64, f64), client_size: (f64, f64)) -> MemoryRegion {
        MemoryRegion::new(
            &self.state,
            name,
            RegionKind::Body,
            scroll_size,
            client_size,
            Overflow::Auto,
        )
    }

    /// Create a page-level element outside the body tree. Such elements
    /// resolve to the root region when registered with a mirror.
    pub fn page_proxy(&self, name: &str) -> MemoryRegion {
        MemoryRegion::new(
            &self.state,
            name,
            RegionKind::PageProxy,
            DEFAULT_VIEWPORT,
            DEFAULT_VIEWPORT,
            Overflow::Visible,
        )
    }

    /// Queue a scroll event for `target` without moving anything.
    pub fn fire_scroll(&self, target: ScrollTarget<MemoryRegion>) {
        self.state.queue_scroll_event(target);
    }

    /// Number of attached scroll listeners across all targets.
    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    /// Number of scroll listeners attached to `target`.
    pub fn listener_count_for(&self, target: &ScrollTarget<MemoryRegion>) -> usize {
        self.state
            .listeners
            .borrow()
            .iter()
            .filter(|(t, _)| t == target)
            .count()
    }

    /// Whether any event, task or frame callback is outstanding.
    pub fn has_pending_work(&self) -> bool {
        !self.state.pending_events.borrow().is_empty()
            || !self.state.tasks.borrow().is_empty()
            || !self.state.frame_callbacks.borrow().is_empty()
    }

    /// Total frames rendered so far.
    pub fn frames_rendered(&self) -> usize {
        self.state.frames_rendered.get()
    }

    /// Render one frame: dispatch queued scroll events, then run the frame
    /// callbacks that were requested before this frame started.
    pub fn render_frame(&self) {
        let callbacks = std::mem::take(&mut *self.state.frame_callbacks.borrow_mut());
        let events = std::mem::take(&mut *self.state.pending_events.borrow_mut());

        self.run_tasks();
        for target in events {
            self.dispatch(&target);
            self.run_tasks();
        }
        for callback in callbacks {
            callback();
            self.run_tasks();
        }

        self.state
            .frames_rendered
            .set(self.state.frames_rendered.get() + 1);
    }

    /// Render frames until no work is left, up to [`MAX_SETTLE_FRAMES`].
    /// Returns the number of frames rendered.
    pub fn settle(&self) -> usize {
        let mut frames = 0;
        while self.has_pending_work() && frames < MAX_SETTLE_FRAMES {
            self.render_frame();
            frames += 1;
        }
        frames
    }

    /// Run deferred tasks, including any they schedule, until none remain.
    pub fn run_tasks(&self) {
        loop {
            let task = self.state.tasks.borrow_mut().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }

    fn dispatch(&self, target: &ScrollTarget<MemoryRegion>) {
        let handlers: Vec<ScrollHandler> = self
            .state
            .listeners
            .borrow()
            .iter()
            .filter(|(t, _)| t == target)
            .map(|(_, h)| Rc::clone(h))
            .collect();

        for handler in handlers {
            // Listeners removed by an earlier handler in this dispatch are skipped.
            if self.state.is_listening(target, &handler) {
                handler();
            }
        }
    }
}

impl Host for MemoryPage {
    type Region = MemoryRegion;

    fn scrolling_element(&self) -> Option<MemoryRegion> {
        Some(self.root())
    }

    fn is_body_descendant(&self, region: &MemoryRegion) -> bool {
        region.inner.kind == RegionKind::Body
    }

    fn add_scroll_listener(&self, target: &ScrollTarget<MemoryRegion>, handler: &ScrollHandler) {
        if self.state.is_listening(target, handler) {
            return;
        }
        self.state
            .listeners
            .borrow_mut()
            .push((target.clone(), Rc::clone(handler)));
    }

    fn remove_scroll_listener(&self, target: &ScrollTarget<MemoryRegion>, handler: &ScrollHandler) {
        self.state
            .listeners
            .borrow_mut()
            .retain(|(t, h)| !(t == target && same_handler(h, handler)));
    }

    fn defer(&self, task: Task) {
        self.state.tasks.borrow_mut().push_back(task);
    }

    fn request_frame(&self, task: Task) {
        self.state.frame_callbacks.borrow_mut().push(task);
    }
}

impl fmt::Debug for MemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryPage")
            .field("root", &self.root())
            .field("listeners", &self.listener_count())
            .field("pending_events", &self.state.pending_events.borrow().len())
            .field("frames_rendered", &self.frames_rendered())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
