//! Host environment seam
//!
//! The mirror never talks to a page directly. Everything it needs from the
//! environment (which element scrolls the whole page, where scroll events are
//! observed, how to yield and how to wait for the next frame) goes through
//! the [`Host`] trait.

use super::region::ScrollRegion;
use std::rc::Rc;

/// A scroll listener. Listeners are identified by pointer identity, so the
/// same `Rc` must be passed to remove a listener that was added.
pub type ScrollHandler = Rc<dyn Fn()>;

/// A one-shot continuation scheduled on the host's task or frame loop.
pub type Task = Box<dyn FnOnce()>;

/// Where a region's scroll events are observed.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget<R> {
    /// The page window. Used for the canonical root container, whose scroll
    /// events are only reliably delivered to the window.
    Window,
    /// The region element itself.
    Region(R),
}

/// The environment a mirror runs in.
pub trait Host {
    /// Handle type for scrollable elements. `PartialEq` must mean "same
    /// element"; two handles onto one element compare equal.
    type Region: ScrollRegion + Clone + PartialEq;

    /// The canonical root scroll container of the page, if the page has one.
    fn scrolling_element(&self) -> Option<Self::Region>;

    /// Whether `region` sits inside the page body (and is not the body itself).
    fn is_body_descendant(&self, region: &Self::Region) -> bool;

    /// Attach `handler` for scroll events on `target`.
    fn add_scroll_listener(&self, target: &ScrollTarget<Self::Region>, handler: &ScrollHandler);

    /// Detach `handler` from `target`. Unknown handlers are ignored.
    fn remove_scroll_listener(&self, target: &ScrollTarget<Self::Region>, handler: &ScrollHandler);

    /// Run `task` once the current event turn has finished, before the next.
    fn defer(&self, task: Task);

    /// Run `task` at the next paint/redraw boundary.
    fn request_frame(&self, task: Task);
}

/// Compare two handlers by identity.
pub(crate) fn same_handler(a: &ScrollHandler, b: &ScrollHandler) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_handler_identity() {
        let a: ScrollHandler = Rc::new(|| {});
        let b: ScrollHandler = Rc::new(|| {});
        let a2 = Rc::clone(&a);

        assert!(same_handler(&a, &a2));
        assert!(!same_handler(&a, &b));
    }
}
