//! Scroll mirroring
//!
//! This module keeps several scrollable regions at the same proportional
//! scroll position:
//!
//! - Region capability trait and axis/overflow types
//! - Host environment seam (root container, listeners, task and frame loop)
//! - Progress engine (offset <-> `[0, 1]` proportion)
//! - Registry with container resolution, deduplication and validation
//! - The mirror session with pause/resume/destroy and feedback-loop guarding

mod host;
mod progress;
mod region;
mod registry;
mod session;

pub(crate) use host::same_handler;
pub use host::{Host, ScrollHandler, ScrollTarget, Task};
pub use progress::{
    apply_progress, compute_progress, is_valid_proportion, Progress, ProgressUpdate, EPSILON,
};
pub use region::{Axis, Overflow, ScrollRegion};
pub use registry::{Registry, RegionWarning, MIN_REGIONS};
pub use session::ScrollMirror;
