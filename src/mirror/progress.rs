//! Progress engine
//!
//! Converts absolute scroll offsets into a normalized `[0, 1]` proportion of
//! each region's own scrollable distance, and back.

use super::region::{Axis, ScrollRegion};
use crate::config::MirrorOptions;

/// Lower bound for the scrollable distance used as a divisor, so a region
/// without scrollable distance yields a proportion of 0 rather than NaN.
pub const EPSILON: f64 = 1e-5;

// ─────────────────────────────────────────────────────────────────────────────
// Progress
// ─────────────────────────────────────────────────────────────────────────────

/// Normalized scroll position, `0.0..=1.0` on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    /// Horizontal proportion
    pub x: f64,
    /// Vertical proportion
    pub y: f64,
}

impl Progress {
    /// Create a progress value. No validation is performed.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The proportion on `axis`.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Axes whose value is not a finite number in `[0, 1]`.
    pub fn invalid_axes(&self) -> Vec<(Axis, f64)> {
        Axis::ALL
            .iter()
            .map(|&axis| (axis, self.get(axis)))
            .filter(|&(_, value)| !is_valid_proportion(value))
            .collect()
    }
}

/// Whether `value` is a finite number in `[0, 1]`.
pub fn is_valid_proportion(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

// ─────────────────────────────────────────────────────────────────────────────
// Progress Update
// ─────────────────────────────────────────────────────────────────────────────

/// A progress write. Missing axes are filled from the mirror's current
/// canonical progress before validation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl ProgressUpdate {
    pub fn new(x: Option<f64>, y: Option<f64>) -> Self {
        Self { x, y }
    }

    /// Update only the horizontal axis.
    pub fn x(value: f64) -> Self {
        Self::new(Some(value), None)
    }

    /// Update only the vertical axis.
    pub fn y(value: f64) -> Self {
        Self::new(None, Some(value))
    }

    /// Fill missing axes from `current`.
    pub fn merge(&self, current: Progress) -> Progress {
        Progress {
            x: self.x.unwrap_or(current.x),
            y: self.y.unwrap_or(current.y),
        }
    }
}

impl From<f64> for ProgressUpdate {
    /// A single number applies to both axes.
    fn from(value: f64) -> Self {
        Self::new(Some(value), Some(value))
    }
}

impl From<Progress> for ProgressUpdate {
    fn from(progress: Progress) -> Self {
        Self::new(Some(progress.x), Some(progress.y))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Compute / Apply
// ─────────────────────────────────────────────────────────────────────────────

/// Read the normalized scroll position of `region`.
pub fn compute_progress<R: ScrollRegion + ?Sized>(region: &R) -> Progress {
    Progress {
        x: axis_progress(region, Axis::Horizontal),
        y: axis_progress(region, Axis::Vertical),
    }
}

fn axis_progress<R: ScrollRegion + ?Sized>(region: &R, axis: Axis) -> f64 {
    let offset = region.scroll_offset(axis);
    let distance = region.scroll_extent(axis) - region.client_extent(axis);
    if offset <= 0.0 || distance <= 0.0 {
        return 0.0;
    }
    (offset / distance.max(EPSILON)).min(1.0)
}

/// Scroll `region` to `progress` on every axis enabled in `options`.
///
/// Axes without scrollable distance are left alone.
pub fn apply_progress<R: ScrollRegion + ?Sized>(
    progress: Progress,
    region: &R,
    options: &MirrorOptions,
) {
    for axis in Axis::ALL {
        if !options.mirrors(axis) {
            continue;
        }
        let available = region.available_scroll(axis);
        if available > 0.0 {
            region.set_scroll_offset(axis, available * progress.get(axis));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
