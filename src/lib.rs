//! scroll-mirror
//!
//! Keeps a set of scrollable regions in sync: when one region is scrolled,
//! every other region moves to the proportionally equivalent position. Built
//! for side-by-side diff viewers and linked panels.
//!
//! The mirror is host-agnostic. A [`Host`] supplies the page environment and
//! [`ScrollRegion`] handles supply offsets and extents; [`memory`] provides an
//! in-memory host, and on `wasm32` the `web` module adapts browser elements.

pub mod config;
pub mod error;
pub mod memory;
pub mod mirror;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::MirrorOptions;
pub use error::{Error, Result};
pub use mirror::{
    Axis, Host, Overflow, Progress, ProgressUpdate, RegionWarning, ScrollMirror, ScrollRegion,
    ScrollTarget,
};

/// Tag prefixed to every diagnostic this crate logs.
pub const LOG_TAG: &str = "[scroll-mirror]";
