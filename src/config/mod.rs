//! Configuration module for scroll-mirror
//!
//! This module holds the mirror options. With the `persistence` feature it
//! also provides JSON load/save of those options in the platform-specific
//! configuration directory.

mod options;
#[cfg(feature = "persistence")]
mod persistence;

pub use options::*;
#[cfg(feature = "persistence")]
pub use persistence::*;
