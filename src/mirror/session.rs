//! Mirror session
//!
//! [`ScrollMirror`] keeps a set of regions at the same proportional scroll
//! position. A native scroll event on one region is read one task turn later
//! and written to every other region.
//!
//! # Feedback loops
//!
//! A programmatic write raises a scroll event on the region that was
//! written. Before each write the region's own listener is detached, and it
//! is re-attached at the frame boundary following its most recent write, so
//! the write never triggers a mirror pass of its own. Writes on consecutive
//! frames keep the region detached until the last one has been delivered.

use super::host::{Host, ScrollHandler, ScrollTarget};
use super::progress::{apply_progress, compute_progress, Progress, ProgressUpdate};
use super::registry::{Registry, RegionWarning};
use crate::config::MirrorOptions;
use crate::error::{Error, Result};
use crate::LOG_TAG;
use log::{debug, error, info, trace, warn};
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

// ─────────────────────────────────────────────────────────────────────────────
// Listener Slots
// ─────────────────────────────────────────────────────────────────────────────

/// Per-region listener binding.
struct Slot<R> {
    target: ScrollTarget<R>,
    handler: ScrollHandler,
    attached: Cell<bool>,
    /// Re-attachments still queued for this region. The listener comes back
    /// only when the last one runs.
    pending: Cell<usize>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Session State
// ─────────────────────────────────────────────────────────────────────────────

struct Session<H: Host> {
    this: Weak<Session<H>>,
    host: H,
    registry: Registry<H::Region>,
    slots: Vec<Slot<H::Region>>,
    warnings: Vec<RegionWarning>,
    options: Cell<MirrorOptions>,
    paused: Cell<bool>,
    /// False once destroyed, or from the start when validation failed.
    active: Cell<bool>,
}

impl<H: Host + 'static> Session<H> {
    fn build<I>(host: H, candidates: I, options: MirrorOptions) -> (Rc<Self>, Result<()>)
    where
        I: IntoIterator<Item = H::Region>,
    {
        let registry = Registry::resolve(&host, candidates);
        let validation = registry.validate();
        let warnings = match validation {
            Ok(()) => registry.inspect(),
            Err(_) => Vec::new(),
        };
        let active = validation.is_ok();

        let session = Rc::new_cyclic(|this: &Weak<Self>| {
            let slots = registry
                .regions()
                .iter()
                .enumerate()
                .map(|(index, region)| {
                    let weak = this.clone();
                    let handler: ScrollHandler = Rc::new(move || {
                        if let Some(session) = weak.upgrade() {
                            session.on_native_scroll(index);
                        }
                    });
                    Slot {
                        target: registry.target_for(region),
                        handler,
                        attached: Cell::new(false),
                        pending: Cell::new(0),
                    }
                })
                .collect();

            Self {
                this: this.clone(),
                host,
                registry,
                slots,
                warnings,
                options: Cell::new(options),
                paused: Cell::new(false),
                active: Cell::new(active),
            }
        });

        if active {
            for index in 0..session.slots.len() {
                session.add_handler(index);
            }
            debug!(
                "{} Mirroring {} regions (vertical: {}, horizontal: {})",
                LOG_TAG,
                session.slots.len(),
                options.vertical,
                options.horizontal
            );
        }

        (session, validation)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Wiring
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach the listener for region `index`, replacing any existing one.
    fn add_handler(&self, index: usize) {
        self.remove_handler(index);
        let slot = &self.slots[index];
        self.host.add_scroll_listener(&slot.target, &slot.handler);
        slot.attached.set(true);
    }

    fn remove_handler(&self, index: usize) {
        let slot = &self.slots[index];
        self.host.remove_scroll_listener(&slot.target, &slot.handler);
        slot.attached.set(false);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mirroring
    // ─────────────────────────────────────────────────────────────────────────

    fn on_native_scroll(&self, index: usize) {
        if !self.active.get() || self.paused.get() {
            return;
        }
        // Let the triggering scroll settle before reading its offset.
        let this = self.this.clone();
        self.host.defer(Box::new(move || {
            if let Some(session) = this.upgrade() {
                session.mirror_from(index);
            }
        }));
    }

    fn mirror_from(&self, index: usize) {
        if !self.active.get() || self.paused.get() {
            return;
        }
        let progress = compute_progress(&self.registry.regions()[index]);
        trace!(
            "{} Mirroring {:?} from region #{}",
            LOG_TAG,
            progress,
            index
        );
        self.mirror_all(progress, Some(index));
    }

    /// Apply `progress` to every region except `exclude`.
    fn mirror_all(&self, progress: Progress, exclude: Option<usize>) {
        let options = self.options.get();

        for (index, region) in self.registry.regions().iter().enumerate() {
            if exclude == Some(index) {
                continue;
            }
            self.remove_handler(index);
            let pending = &self.slots[index].pending;
            pending.set(pending.get() + 1);
            apply_progress(progress, region, &options);

            let this = self.this.clone();
            self.host.request_frame(Box::new(move || {
                if let Some(session) = this.upgrade() {
                    session.reattach(index);
                }
            }));
        }
    }

    /// Frame callback queued by [`mirror_all`](Self::mirror_all). A later
    /// pass that detached the region again keeps it detached.
    fn reattach(&self, index: usize) {
        let pending = &self.slots[index].pending;
        let left = pending.get().saturating_sub(1);
        pending.set(left);
        if left == 0 && self.active.get() {
            self.add_handler(index);
        }
    }

    fn progress(&self) -> Progress {
        self.registry
            .regions()
            .first()
            .map(compute_progress)
            .unwrap_or_default()
    }

    fn set_progress(&self, update: ProgressUpdate) -> Result<()> {
        if !self.active.get() {
            warn!("{} Ignoring progress write on an inactive mirror", LOG_TAG);
            return Err(Error::Inactive);
        }

        let merged = update.merge(self.progress());
        let invalid = merged.invalid_axes();
        if !invalid.is_empty() {
            for (axis, value) in &invalid {
                error!(
                    "{} Invalid progress {}: {} (expected a finite number in [0, 1])",
                    LOG_TAG,
                    axis.label(),
                    value
                );
            }
            return Err(Error::InvalidProgress { axes: invalid });
        }

        self.mirror_all(merged, None);
        Ok(())
    }

    fn destroy(&self) {
        if !self.active.replace(false) {
            return;
        }
        for index in 0..self.slots.len() {
            self.remove_handler(index);
        }
        info!("{} Destroyed; all scroll listeners removed", LOG_TAG);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public Handle
// ─────────────────────────────────────────────────────────────────────────────

/// Synchronizes the scroll position of a set of regions.
///
/// Scrolling any registered region moves every other region to the same
/// proportion of its own scrollable distance. Dropping the mirror detaches
/// all listeners; the regions themselves are never modified otherwise.
///
/// # Example
///
/// ```
/// use scroll_mirror::memory::MemoryPage;
/// use scroll_mirror::{Axis, MirrorOptions, ScrollMirror, ScrollRegion};
///
/// let page = MemoryPage::new();
/// let left = page.region("left", (800.0, 2000.0), (800.0, 1000.0));
/// let right = page.region("right", (800.0, 1000.0), (800.0, 500.0));
/// let mirror = ScrollMirror::new(page.clone(), [left.clone(), right.clone()], MirrorOptions::default());
///
/// left.set_scroll_offset(Axis::Vertical, 500.0);
/// page.settle();
/// assert_eq!(right.scroll_offset(Axis::Vertical), 250.0);
/// # drop(mirror);
/// ```
pub struct ScrollMirror<H: Host + 'static> {
    session: Rc<Session<H>>,
}

impl<H: Host + 'static> ScrollMirror<H> {
    /// Start mirroring `candidates`.
    ///
    /// Each candidate is resolved to its scroll container and duplicates are
    /// dropped. With fewer than two distinct regions an error is logged and
    /// the returned mirror is inert: it attaches no listeners and rejects
    /// progress writes.
    pub fn new<I>(host: H, candidates: I, options: MirrorOptions) -> Self
    where
        I: IntoIterator<Item = H::Region>,
    {
        let (session, validation) = Session::build(host, candidates, options);
        if let Err(err) = validation {
            error!("{} {}; mirroring is disabled", LOG_TAG, err);
        }
        Self { session }
    }

    /// Like [`ScrollMirror::new`], but fails instead of returning an inert mirror.
    ///
    /// # Errors
    ///
    /// Returns `Error::TooFewRegions` when fewer than two distinct regions remain.
    pub fn try_new<I>(host: H, candidates: I, options: MirrorOptions) -> Result<Self>
    where
        I: IntoIterator<Item = H::Region>,
    {
        let (session, validation) = Session::build(host, candidates, options);
        validation?;
        Ok(Self { session })
    }

    /// Ignore native scroll events until [`resume`](Self::resume).
    pub fn pause(&self) {
        if !self.session.paused.replace(true) {
            debug!("{} Paused", LOG_TAG);
        }
    }

    /// Resume reacting to native scroll events.
    pub fn resume(&self) {
        if self.session.paused.replace(false) {
            debug!("{} Resumed", LOG_TAG);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.session.paused.get()
    }

    /// Remove every listener. The mirror stays inert afterwards.
    pub fn destroy(&self) {
        self.session.destroy();
    }

    /// Whether the mirror is validated and not destroyed.
    pub fn is_active(&self) -> bool {
        self.session.active.get()
    }

    /// Progress of the first registered region.
    pub fn progress(&self) -> Progress {
        self.session.progress()
    }

    /// Scroll every region to `update`.
    ///
    /// A bare `f64` applies to both axes; axes missing from a partial update
    /// keep the current [`progress`](Self::progress).
    ///
    /// # Errors
    ///
    /// - `Error::InvalidProgress`: an axis is not a finite number in `[0, 1]`;
    ///   nothing is written
    /// - `Error::Inactive`: the mirror is inert or destroyed
    pub fn set_progress(&self, update: impl Into<ProgressUpdate>) -> Result<()> {
        self.session.set_progress(update.into())
    }

    pub fn options(&self) -> MirrorOptions {
        self.session.options.get()
    }

    /// Replace the options. Takes effect on the next mirror pass.
    pub fn set_options(&self, options: MirrorOptions) {
        self.session.options.set(options);
    }

    /// The resolved, deduplicated regions in registration order.
    pub fn regions(&self) -> &[H::Region] {
        self.session.registry.regions()
    }

    /// Quality warnings raised at construction.
    pub fn warnings(&self) -> &[RegionWarning] {
        &self.session.warnings
    }

    pub fn host(&self) -> &H {
        &self.session.host
    }
}

impl<H: Host + 'static> Drop for ScrollMirror<H> {
    fn drop(&mut self) {
        self.session.destroy();
    }
}

impl<H: Host + 'static> fmt::Debug for ScrollMirror<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollMirror")
            .field("regions", &self.session.registry.len())
            .field("options", &self.options())
            .field("paused", &self.is_paused())
            .field("active", &self.is_active())
            .field(
                "attached",
                &self
                    .session
                    .slots
                    .iter()
                    .filter(|slot| slot.attached.get())
                    .count(),
            )
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryPage, MemoryRegion};
    use crate::mirror::{Axis, ScrollRegion};

    const TOLERANCE: f64 = 1e-9;

    /// Two panes from the classic side-by-side layout:
    /// A is 2000 tall in a 1000 viewport, B is 1000 tall in a 500 viewport.
    fn two_panes() -> (MemoryPage, MemoryRegion, MemoryRegion) {
        let page = MemoryPage::new();
        let a = page.region("a", (600.0, 2000.0), (300.0, 1000.0));
        let b = page.region("b", (400.0, 1000.0), (200.0, 500.0));
        (page, a, b)
    }

    fn mirror(page: &MemoryPage, regions: &[MemoryRegion]) -> ScrollMirror<MemoryPage> {
        ScrollMirror::new(page.clone(), regions.to_vec(), MirrorOptions::default())
    }

    fn top(region: &MemoryRegion) -> f64 {
        region.scroll_offset(Axis::Vertical)
    }

    fn left(region: &MemoryRegion) -> f64 {
        region.scroll_offset(Axis::Horizontal)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_new_attaches_one_listener_per_region() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        assert!(mirror.is_active());
        assert_eq!(page.listener_count(), 2);
        assert_eq!(page.listener_count_for(&ScrollTarget::Region(a)), 1);
        assert_eq!(page.listener_count_for(&ScrollTarget::Region(b)), 1);
    }

    #[test]
    fn test_single_region_after_dedup_is_inert() {
        let (page, a, _) = two_panes();
        let mirror = mirror(&page, &[a.clone(), a.clone()]);

        assert!(!mirror.is_active());
        assert_eq!(page.listener_count(), 0);
        assert!(matches!(mirror.set_progress(0.5), Err(Error::Inactive)));
        assert_eq!(top(&a), 0.0);
    }

    #[test]
    fn test_page_level_candidates_collapse_and_fail_validation() {
        let page = MemoryPage::new();
        let body = page.page_proxy("body");

        let result = ScrollMirror::try_new(
            page.clone(),
            [page.root(), body],
            MirrorOptions::default(),
        );
        assert!(matches!(result, Err(Error::TooFewRegions { found: 1 })));
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_root_region_listens_on_window() {
        let page = MemoryPage::new();
        page.root().set_extents((1024.0, 3000.0), (1024.0, 750.0));
        let pane = page.region("pane", (300.0, 900.0), (300.0, 300.0));
        let _mirror = mirror(&page, &[page.page_proxy("body"), pane.clone()]);

        assert_eq!(page.listener_count_for(&ScrollTarget::Window), 1);
        assert_eq!(page.listener_count_for(&ScrollTarget::Region(page.root())), 0);

        page.root().set_scroll_offset(Axis::Vertical, 1125.0);
        page.settle();
        assert!((top(&pane) - 300.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_warnings_are_collected_but_not_fatal() {
        let page = MemoryPage::new();
        let flat = page.region("flat", (300.0, 300.0), (300.0, 300.0));
        let pane = page.region("pane", (300.0, 900.0), (300.0, 300.0));
        let mirror = mirror(&page, &[flat, pane]);

        assert!(mirror.is_active());
        assert_eq!(mirror.warnings(), &[RegionWarning::NotScrollable { index: 0 }]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event-driven mirroring
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_scrolling_a_mirrors_b_proportionally() {
        let (page, a, b) = two_panes();
        let _mirror = mirror(&page, &[a.clone(), b.clone()]);

        a.set_scroll_offset(Axis::Vertical, 500.0);
        page.settle();

        assert_eq!(top(&b), 250.0);
        assert_eq!(top(&a), 500.0);
    }

    #[test]
    fn test_mirrored_write_does_not_echo_back() {
        let (page, a, b) = two_panes();
        let _mirror = mirror(&page, &[a.clone(), b.clone()]);

        a.set_scroll_offset(Axis::Vertical, 500.0);
        page.render_frame();
        assert_eq!(top(&b), 250.0);
        // B's own listener is detached until the next frame.
        assert_eq!(page.listener_count_for(&ScrollTarget::Region(b.clone())), 0);

        // Move A again before B's scroll event is delivered; B must not pull A back.
        a.set_scroll_offset(Axis::Vertical, 0.0);
        page.render_frame();
        assert_eq!(top(&a), 0.0);
        // The second pass wrote B again, so B stays detached for another frame.
        assert_eq!(page.listener_count_for(&ScrollTarget::Region(b.clone())), 0);

        page.settle();
        assert_eq!(top(&a), 0.0);
        assert_eq!(top(&b), 0.0);
        assert_eq!(page.listener_count_for(&ScrollTarget::Region(b.clone())), 1);
    }

    #[test]
    fn test_continuous_scroll_keeps_source_offset() {
        let (page, a, b) = two_panes();
        let _mirror = mirror(&page, &[a.clone(), b.clone()]);

        // One user scroll step per frame, as during a drag or wheel gesture.
        for offset in [100.0, 200.0, 300.0] {
            a.set_scroll_offset(Axis::Vertical, offset);
            page.render_frame();
            assert_eq!(top(&a), offset);
            assert_eq!(top(&b), offset / 2.0);
        }

        page.settle();
        assert_eq!(top(&a), 300.0);
        assert_eq!(top(&b), 150.0);
        assert_eq!(page.listener_count(), 2);
    }

    #[test]
    fn test_region_stays_detached_until_last_pass_reattaches() {
        let (page, a, b) = two_panes();
        let _mirror = mirror(&page, &[a.clone(), b.clone()]);
        let b_target = ScrollTarget::Region(b.clone());

        a.set_scroll_offset(Axis::Vertical, 100.0);
        page.render_frame();
        a.set_scroll_offset(Axis::Vertical, 200.0);
        page.render_frame();
        // The first pass's re-attachment has run, the second's has not.
        assert_eq!(page.listener_count_for(&b_target), 0);

        page.render_frame();
        assert_eq!(page.listener_count_for(&b_target), 1);
    }

    #[test]
    fn test_progress_is_read_after_one_task_turn() {
        let (page, a, b) = two_panes();
        let _mirror = mirror(&page, &[a.clone(), b.clone()]);

        // A later listener keeps moving A during the same dispatch.
        let moving = a.clone();
        let nudge: ScrollHandler = Rc::new(move || moving.set_scroll_offset(Axis::Vertical, 800.0));
        page.add_scroll_listener(&ScrollTarget::Region(a.clone()), &nudge);

        a.set_scroll_offset(Axis::Vertical, 200.0);
        page.render_frame();

        // The settled offset is mirrored, not the one that raised the event.
        assert_eq!(top(&b), 400.0);
        page.remove_scroll_listener(&ScrollTarget::Region(a.clone()), &nudge);
    }

    #[test]
    fn test_horizontal_and_vertical_mirrored_together() {
        let (page, a, b) = two_panes();
        let _mirror = mirror(&page, &[a.clone(), b.clone()]);

        a.set_scroll_offset(Axis::Horizontal, 150.0);
        a.set_scroll_offset(Axis::Vertical, 250.0);
        page.settle();

        assert_eq!(left(&b), 100.0);
        assert_eq!(top(&b), 125.0);
    }

    #[test]
    fn test_three_regions_follow_the_source() {
        let page = MemoryPage::new();
        let a = page.region("a", (100.0, 1100.0), (100.0, 100.0));
        let b = page.region("b", (100.0, 600.0), (100.0, 100.0));
        let c = page.region("c", (100.0, 300.0), (100.0, 100.0));
        let _mirror = mirror(&page, &[a.clone(), b.clone(), c.clone()]);

        b.set_scroll_offset(Axis::Vertical, 125.0);
        page.settle();

        assert!((top(&a) - 250.0).abs() < TOLERANCE);
        assert!((top(&c) - 50.0).abs() < TOLERANCE);
        assert_eq!(top(&b), 125.0);
    }

    #[test]
    fn test_disabled_axis_is_not_mirrored() {
        let (page, a, b) = two_panes();
        let mirror = ScrollMirror::new(
            page.clone(),
            [a.clone(), b.clone()],
            MirrorOptions::vertical_only(),
        );

        a.set_scroll_offset(Axis::Horizontal, 300.0);
        a.set_scroll_offset(Axis::Vertical, 1000.0);
        page.settle();
        assert_eq!(left(&b), 0.0);
        assert_eq!(top(&b), 500.0);

        mirror.set_options(MirrorOptions::default());
        a.set_scroll_offset(Axis::Horizontal, 150.0);
        page.settle();
        assert_eq!(left(&b), 100.0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pause / resume / destroy
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_pause_ignores_native_scroll() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        mirror.pause();
        assert!(mirror.is_paused());
        a.set_scroll_offset(Axis::Vertical, 500.0);
        page.settle();
        assert_eq!(top(&b), 0.0);

        mirror.resume();
        assert!(!mirror.is_paused());
        a.set_scroll_offset(Axis::Vertical, 1000.0);
        page.settle();
        assert_eq!(top(&b), 500.0);
    }

    #[test]
    fn test_pause_between_event_and_deferred_read_cancels_pass() {
        let (page, a, b) = two_panes();
        let mirror = Rc::new(mirror(&page, &[a.clone(), b.clone()]));

        // Pause from a listener that runs after the mirror's own.
        let pauser = Rc::downgrade(&mirror);
        let pause_now: ScrollHandler = Rc::new(move || {
            if let Some(mirror) = pauser.upgrade() {
                mirror.pause();
            }
        });
        page.add_scroll_listener(&ScrollTarget::Region(a.clone()), &pause_now);

        a.set_scroll_offset(Axis::Vertical, 500.0);
        page.settle();

        assert!(mirror.is_paused());
        assert_eq!(top(&b), 0.0);
    }

    #[test]
    fn test_pause_lets_pending_reattachment_complete() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        mirror.set_progress(0.5).unwrap();
        mirror.pause();
        assert_eq!(page.listener_count(), 0);

        page.settle();
        assert_eq!(page.listener_count(), 2);

        // Listeners are back but still gated by the pause.
        a.set_scroll_offset(Axis::Vertical, 1000.0);
        page.settle();
        assert_eq!(top(&b), 250.0);
    }

    #[test]
    fn test_pause_does_not_block_progress_writes() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        mirror.pause();
        mirror.set_progress(0.5).unwrap();
        assert_eq!(top(&a), 500.0);
        assert_eq!(top(&b), 250.0);
    }

    #[test]
    fn test_destroy_stops_mirroring() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        mirror.destroy();
        assert!(!mirror.is_active());
        assert_eq!(page.listener_count(), 0);

        a.set_scroll_offset(Axis::Vertical, 500.0);
        b.set_scroll_offset(Axis::Horizontal, 100.0);
        page.fire_scroll(ScrollTarget::Region(b.clone()));
        page.settle();
        assert_eq!(top(&b), 0.0);
        assert_eq!(left(&a), 0.0);
    }

    #[test]
    fn test_destroy_cancels_pending_reattachment() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        mirror.set_progress(0.25).unwrap();
        mirror.destroy();
        page.settle();

        assert_eq!(page.listener_count(), 0);
        assert!(matches!(mirror.set_progress(0.5), Err(Error::Inactive)));
    }

    #[test]
    fn test_drop_removes_listeners() {
        let (page, a, b) = two_panes();
        {
            let _mirror = mirror(&page, &[a.clone(), b.clone()]);
            assert_eq!(page.listener_count(), 2);
        }
        assert_eq!(page.listener_count(), 0);

        a.set_scroll_offset(Axis::Vertical, 500.0);
        page.settle();
        assert_eq!(top(&b), 0.0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Progress accessors
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_progress_reads_first_region() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        a.set_scroll_offset(Axis::Vertical, 250.0);
        assert_eq!(mirror.progress().y, 0.25);
        assert_eq!(mirror.progress().x, 0.0);
    }

    #[test]
    fn test_set_progress_round_trips_on_every_region() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        for &(x, y) in &[(0.0, 0.0), (0.2, 0.8), (0.5, 0.5), (1.0, 1.0)] {
            mirror.set_progress(Progress::new(x, y)).unwrap();
            for region in [&a, &b] {
                let read = compute_progress(region);
                assert!((read.x - x).abs() < TOLERANCE);
                assert!((read.y - y).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn test_set_progress_twice_is_idempotent() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        mirror.set_progress(Progress::new(0.3, 0.7)).unwrap();
        page.settle();
        let first = (left(&a), top(&a), left(&b), top(&b));

        mirror.set_progress(Progress::new(0.3, 0.7)).unwrap();
        page.settle();
        assert_eq!(first, (left(&a), top(&a), left(&b), top(&b)));
    }

    #[test]
    fn test_partial_progress_keeps_other_axis() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        mirror.set_progress(ProgressUpdate::x(0.5)).unwrap();
        page.settle();
        assert_eq!((left(&a), left(&b)), (150.0, 100.0));

        mirror.set_progress(ProgressUpdate::y(0.5)).unwrap();
        page.settle();
        assert_eq!((left(&a), left(&b)), (150.0, 100.0));
        assert_eq!((top(&a), top(&b)), (500.0, 250.0));
    }

    #[test]
    fn test_out_of_range_progress_is_rejected() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);
        mirror.set_progress(0.5).unwrap();
        page.settle();

        let result = mirror.set_progress(2.0);
        match result {
            Err(Error::InvalidProgress { axes }) => {
                assert_eq!(axes, vec![(Axis::Horizontal, 2.0), (Axis::Vertical, 2.0)]);
            }
            other => panic!("expected InvalidProgress, got {:?}", other),
        }
        assert_eq!((top(&a), top(&b)), (500.0, 250.0));
        assert_eq!((left(&a), left(&b)), (150.0, 100.0));
    }

    #[test]
    fn test_non_finite_progress_is_rejected() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        let result = mirror.set_progress(ProgressUpdate::y(f64::NAN));
        assert!(matches!(
            result,
            Err(Error::InvalidProgress { ref axes }) if axes.len() == 1 && axes[0].0 == Axis::Vertical
        ));
        assert_eq!(top(&b), 0.0);
    }

    #[test]
    fn test_progress_write_does_not_trigger_mirror_pass() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a.clone(), b.clone()]);

        mirror.set_progress(0.4).unwrap();
        // Both regions were detached for the write; their scroll events are dropped.
        assert_eq!(page.listener_count(), 0);
        page.settle();
        assert_eq!(page.listener_count(), 2);
        assert!((top(&a) - 400.0).abs() < TOLERANCE);
        assert!((top(&b) - 200.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_debug_output() {
        let (page, a, b) = two_panes();
        let mirror = mirror(&page, &[a, b]);
        let text = format!("{:?}", mirror);
        assert!(text.contains("regions: 2"));
        assert!(text.contains("attached: 2"));
    }
}
