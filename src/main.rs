//! scroll-mirror - Demo Entry Point
//!
//! Builds a side-by-side diff layout on an in-memory page, mirrors its two
//! panes and drives a few scroll gestures so the mirrored offsets show up in
//! the log. An optional first argument sets the vertical progress to jump to.

use log::{info, warn};
use scroll_mirror::config::load_options;
use scroll_mirror::memory::{MemoryPage, MemoryRegion};
use scroll_mirror::{Axis, ProgressUpdate, ScrollMirror, ScrollRegion};

/// Application name constant.
const APP_NAME: &str = "scroll-mirror";

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {} demo", APP_NAME);

    let options = load_options();
    info!(
        "Options: vertical: {}, horizontal: {}",
        options.vertical, options.horizontal
    );

    let page = MemoryPage::new();
    let original = page.region("original", (1200.0, 6000.0), (600.0, 900.0));
    let modified = page.region("modified", (900.0, 4200.0), (600.0, 900.0));
    let panes = [original.clone(), modified.clone()];

    let mirror = ScrollMirror::new(page.clone(), panes.clone(), options);
    if !mirror.is_active() {
        return;
    }

    info!("User scrolls the original pane");
    original.set_scroll_offset(Axis::Vertical, 2550.0);
    original.set_scroll_offset(Axis::Horizontal, 300.0);
    page.settle();
    report(&panes);

    let target = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f64>().ok())
        .unwrap_or(1.0);
    info!("Jumping to vertical progress {}", target);
    if let Err(err) = mirror.set_progress(ProgressUpdate::y(target)) {
        warn!("{}", err);
    }
    page.settle();
    report(&panes);

    info!("Paused: scrolling the modified pane alone");
    mirror.pause();
    modified.set_scroll_offset(Axis::Vertical, 0.0);
    page.settle();
    report(&panes);
    mirror.resume();

    mirror.destroy();
    info!("Rendered {} frames", page.frames_rendered());
}

fn report(panes: &[MemoryRegion]) {
    for pane in panes {
        info!(
            "  {:<10} left {:>8.1}  top {:>8.1}",
            pane.name(),
            pane.scroll_offset(Axis::Horizontal),
            pane.scroll_offset(Axis::Vertical)
        );
    }
}
