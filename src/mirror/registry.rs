//! Region registry and validation
//!
//! Resolves candidate elements to their scroll containers, removes
//! duplicates and checks that the remaining set can be mirrored.

use super::host::{Host, ScrollTarget};
use super::region::ScrollRegion;
use crate::error::{Error, Result};
use crate::LOG_TAG;
use log::warn;
use std::fmt;

/// Minimum number of distinct regions a mirror needs.
pub const MIN_REGIONS: usize = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Warnings
// ─────────────────────────────────────────────────────────────────────────────

/// A non-fatal problem with a registered region. Mirroring still proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionWarning {
    /// The region's content does not overflow its viewport on either axis.
    NotScrollable { index: usize },
    /// A non-root region declares neither `auto` nor `scroll` overflow.
    MissingOverflowStyle { index: usize },
}

impl fmt::Display for RegionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionWarning::NotScrollable { index } => write!(
                f,
                "region #{} is not scrollable: its content does not overflow",
                index
            ),
            RegionWarning::MissingOverflowStyle { index } => write!(
                f,
                "region #{} has no `overflow: auto` or `overflow: scroll` styling",
                index
            ),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// The deduplicated, resolved set of regions a mirror operates on.
#[derive(Debug)]
pub struct Registry<R> {
    regions: Vec<R>,
    root: Option<R>,
}

impl<R: ScrollRegion + Clone + PartialEq> Registry<R> {
    /// Resolve `candidates` to scroll containers and drop duplicates,
    /// keeping first-seen order.
    pub fn resolve<H, I>(host: &H, candidates: I) -> Self
    where
        H: Host<Region = R>,
        I: IntoIterator<Item = R>,
    {
        let root = host.scrolling_element();
        let mut regions: Vec<R> = Vec::new();

        for candidate in candidates {
            let container = resolve_container(host, root.as_ref(), candidate);
            if !regions.contains(&container) {
                regions.push(container);
            }
        }

        Self { regions, root }
    }

    /// Check the registry holds enough regions to mirror between.
    ///
    /// # Errors
    ///
    /// Returns `Error::TooFewRegions` with fewer than [`MIN_REGIONS`].
    pub fn validate(&self) -> Result<()> {
        if self.regions.len() < MIN_REGIONS {
            return Err(Error::TooFewRegions {
                found: self.regions.len(),
            });
        }
        Ok(())
    }

    /// Collect and log element-quality warnings.
    pub fn inspect(&self) -> Vec<RegionWarning> {
        let mut warnings = Vec::new();

        for (index, region) in self.regions.iter().enumerate() {
            if !region.has_overflow() {
                warnings.push(RegionWarning::NotScrollable { index });
            }
            if !self.is_root(region) && !region.has_scroll_styling() {
                warnings.push(RegionWarning::MissingOverflowStyle { index });
            }
        }

        for warning in &warnings {
            warn!("{} {}", LOG_TAG, warning);
        }

        warnings
    }

    /// Whether `region` is the canonical root container.
    pub fn is_root(&self, region: &R) -> bool {
        self.root.as_ref() == Some(region)
    }

    /// Where scroll events for `region` are observed.
    pub fn target_for(&self, region: &R) -> ScrollTarget<R> {
        if self.is_root(region) {
            ScrollTarget::Window
        } else {
            ScrollTarget::Region(region.clone())
        }
    }

    pub fn regions(&self) -> &[R] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Resolve a candidate to its scroll container.
///
/// Body descendants are their own container. Anything else (the document
/// element, the body, other page-level proxies) collapses onto the page's
/// root scrolling element.
fn resolve_container<H: Host>(host: &H, root: Option<&H::Region>, candidate: H::Region) -> H::Region {
    if host.is_body_descendant(&candidate) {
        return candidate;
    }
    match root {
        Some(root) => root.clone(),
        None => candidate,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
