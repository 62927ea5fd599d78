//! Scrollable region capability
//!
//! A region is anything with scroll offsets and scroll extents. The mirror
//! only ever reads and writes these numbers; it never creates, styles or
//! destroys the element behind a region.

// ─────────────────────────────────────────────────────────────────────────────
// Axis
// ─────────────────────────────────────────────────────────────────────────────

/// One of the two scroll axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right scrolling (`scrollLeft`, `scrollWidth`, `clientWidth`)
    Horizontal,
    /// Up/down scrolling (`scrollTop`, `scrollHeight`, `clientHeight`)
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// Short label used in diagnostics (`x` or `y`).
    pub fn label(&self) -> &'static str {
        match self {
            Axis::Horizontal => "x",
            Axis::Vertical => "y",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overflow Styling
// ─────────────────────────────────────────────────────────────────────────────

/// The CSS-style overflow behaviour declared for a region on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

impl Overflow {
    /// Parse a computed-style keyword. Unknown keywords map to `Visible`.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim() {
            "hidden" => Overflow::Hidden,
            "clip" => Overflow::Clip,
            "auto" | "overlay" => Overflow::Auto,
            "scroll" => Overflow::Scroll,
            _ => Overflow::Visible,
        }
    }

    /// Whether this value lets the user scroll the region.
    pub fn is_scrollable(&self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Region Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Read/write access to a scrollable element.
///
/// Implementations are expected to be cheap handles onto an element owned
/// elsewhere (a DOM node, a widget in a retained tree). Identity between two
/// handles is expressed through `PartialEq` on the handle type, see
/// [`Host::Region`](crate::mirror::Host::Region).
pub trait ScrollRegion {
    /// Current scroll offset on `axis`, in pixels.
    fn scroll_offset(&self, axis: Axis) -> f64;

    /// Move the scroll offset on `axis` immediately, without animation.
    fn set_scroll_offset(&self, axis: Axis, offset: f64);

    /// Total content size on `axis` (`scrollWidth` / `scrollHeight`).
    fn scroll_extent(&self, axis: Axis) -> f64;

    /// Visible viewport size on `axis` (`clientWidth` / `clientHeight`).
    fn client_extent(&self, axis: Axis) -> f64;

    /// Declared overflow styling on `axis`.
    fn overflow(&self, _axis: Axis) -> Overflow {
        Overflow::Visible
    }

    /// Maximum scroll offset reachable on `axis`.
    fn available_scroll(&self, axis: Axis) -> f64 {
        (self.scroll_extent(axis) - self.client_extent(axis)).max(0.0)
    }

    /// Whether the content overflows the viewport on either axis.
    fn has_overflow(&self) -> bool {
        Axis::ALL
            .iter()
            .any(|&axis| self.scroll_extent(axis) > self.client_extent(axis))
    }

    /// Whether either axis declares `auto` or `scroll` overflow.
    fn has_scroll_styling(&self) -> bool {
        Axis::ALL
            .iter()
            .any(|&axis| self.overflow(axis).is_scrollable())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fixed {
        offset: Cell<f64>,
        extent: f64,
        client: f64,
        overflow: Overflow,
    }

    impl ScrollRegion for Fixed {
        fn scroll_offset(&self, _axis: Axis) -> f64 {
            self.offset.get()
        }

        fn set_scroll_offset(&self, _axis: Axis, offset: f64) {
            self.offset.set(offset);
        }

        fn scroll_extent(&self, _axis: Axis) -> f64 {
            self.extent
        }

        fn client_extent(&self, _axis: Axis) -> f64 {
            self.client
        }

        fn overflow(&self, _axis: Axis) -> Overflow {
            self.overflow
        }
    }

    fn fixed(extent: f64, client: f64, overflow: Overflow) -> Fixed {
        Fixed {
            offset: Cell::new(0.0),
            extent,
            client,
            overflow,
        }
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(Axis::Horizontal.label(), "x");
        assert_eq!(Axis::Vertical.label(), "y");
    }

    #[test]
    fn test_overflow_from_keyword() {
        assert_eq!(Overflow::from_keyword("auto"), Overflow::Auto);
        assert_eq!(Overflow::from_keyword(" scroll "), Overflow::Scroll);
        assert_eq!(Overflow::from_keyword("hidden"), Overflow::Hidden);
        assert_eq!(Overflow::from_keyword("clip"), Overflow::Clip);
        assert_eq!(Overflow::from_keyword("visible"), Overflow::Visible);
        assert_eq!(Overflow::from_keyword("nonsense"), Overflow::Visible);
    }

    #[test]
    fn test_available_scroll_never_negative() {
        let region = fixed(100.0, 300.0, Overflow::Auto);
        assert_eq!(region.available_scroll(Axis::Vertical), 0.0);

        let region = fixed(2000.0, 500.0, Overflow::Auto);
        assert_eq!(region.available_scroll(Axis::Vertical), 1500.0);
    }

    #[test]
    fn test_has_overflow() {
        assert!(!fixed(500.0, 500.0, Overflow::Auto).has_overflow());
        assert!(fixed(501.0, 500.0, Overflow::Auto).has_overflow());
    }

    #[test]
    fn test_has_scroll_styling() {
        assert!(fixed(1.0, 1.0, Overflow::Scroll).has_scroll_styling());
        assert!(!fixed(1.0, 1.0, Overflow::Hidden).has_scroll_styling());
    }
}
