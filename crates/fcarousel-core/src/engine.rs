#![forbid(unsafe_code)]

//! [`Carousel`]: the public entry point that owns one [`CarouselState`] and
//! the host's [`FrameScheduler`].
//!
//! Every method runs one complete state transition and only then talks to
//! the scheduler, so a scheduler that calls back synchronously never sees a
//! half-applied update.
//!
//! # Example
//!
//! ```
//! use fcarousel_core::{BoxSize, Carousel, Options, Size};
//!
//! let mut carousel = Carousel::new(Options::default()).unwrap();
//! carousel.set_container_size(Size::new(300.0, 200.0)).unwrap();
//! for _ in 0..8 {
//!     carousel.add_cell_with(0, BoxSize::fixed(100.0, 100.0)).unwrap();
//! }
//! carousel.activate();
//! assert_eq!(carousel.slider_position().x, 100.0);
//!
//! carousel.next();
//! while carousel.scheduler_mut().take() {
//!     carousel.tick();
//! }
//! assert_eq!(carousel.selected_index(), 1);
//! assert!(!carousel.is_animating());
//! ```

use web_time::Instant;

use crate::animation::{self, StepOutcome};
use crate::cells::{Cell, CellId};
use crate::drag;
use crate::error::{CarouselError, Result};
use crate::geometry::{BoxSize, Point, Size};
use crate::layout::{self, ReLayoutReason};
use crate::navigation;
use crate::options::{Options, OptionsPatch};
use crate::scheduler::{FrameScheduler, ManualScheduler};
use crate::selectors;
use crate::slides::{Slide, SlideSet};
use crate::state::CarouselState;

/// One carousel instance.
#[derive(Debug)]
pub struct Carousel<S: FrameScheduler = ManualScheduler> {
    state: CarouselState,
    scheduler: S,
}

impl Carousel<ManualScheduler> {
    /// Inactive carousel with a [`ManualScheduler`].
    pub fn new(options: Options) -> Result<Self> {
        Self::with_scheduler(options, ManualScheduler::new())
    }
}

impl<S: FrameScheduler> Carousel<S> {
    /// Inactive carousel driven by `scheduler`. Fails if `options` are
    /// invalid.
    pub fn with_scheduler(options: Options, scheduler: S) -> Result<Self> {
        if let Err(err) = options.validate() {
            tracing::warn!(error = %err, "rejected carousel options");
            return Err(err);
        }
        tracing::debug!(scheduler = scheduler.name(), "carousel created");
        Ok(Self {
            state: CarouselState::new(options),
            scheduler,
        })
    }

    // ----- Accessors -----

    /// Read-only view of the full state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.state.options
    }

    #[inline]
    #[must_use]
    pub fn slides(&self) -> &SlideSet {
        &self.state.slides
    }

    #[inline]
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Tear down, returning the scheduler.
    pub fn into_scheduler(self) -> S {
        self.scheduler
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state.animation.is_animating
    }

    #[inline]
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.state.slider.selected_slide_index
    }

    // ----- Cells -----

    /// Register a cell with an empty box at index 0.
    pub fn add_cell(&mut self) -> CellId {
        self.state.cells.add()
    }

    /// Register a measured cell. Fails with
    /// [`CarouselError::InvalidMeasurement`] on a non-finite box.
    pub fn add_cell_with(&mut self, index: i64, size: BoxSize) -> Result<CellId> {
        self.state.cells.add_with(index, size)
    }

    pub fn remove_cell(&mut self, id: CellId) -> Result<Cell> {
        self.state
            .cells
            .remove(id)
            .ok_or(CarouselError::UnknownCell { id })
    }

    pub fn update_cell_size(&mut self, id: CellId, size: BoxSize) -> Result<()> {
        self.state.cells.update_size(id, size)
    }

    pub fn update_cell_index(&mut self, id: CellId, index: i64) -> Result<()> {
        self.state.cells.update_index(id, index)
    }

    /// Cells in track order.
    #[must_use]
    pub fn cells_ordered(&self) -> Vec<&Cell> {
        self.state.cells.ordered()
    }

    // ----- Layout -----

    /// Store the container size and re-layout.
    pub fn set_container_size(&mut self, size: Size) -> Result<()> {
        for (field, value) in [("width", size.width), ("height", size.height)] {
            if !value.is_finite() {
                return Err(CarouselError::InvalidMeasurement { field, value });
            }
        }
        self.state.viewport.size = size;
        self.re_layout(ReLayoutReason::CarouselSizeChanged);
        Ok(())
    }

    /// Apply a partial options update. Returns whether anything changed.
    ///
    /// Invalid results are rejected and the current options stay in force.
    pub fn update_options(&mut self, patch: &OptionsPatch) -> Result<bool> {
        let next = patch.apply(&self.state.options);
        if let Err(err) = next.validate() {
            tracing::warn!(error = %err, "rejected options update");
            return Err(err);
        }
        if next == self.state.options {
            return Ok(false);
        }
        self.state.options = next;
        self.re_layout(ReLayoutReason::OptionsChanged);
        Ok(true)
    }

    /// First layout; snaps to `initial_index`.
    pub fn activate(&mut self) {
        layout::activate(&mut self.state);
        self.flush();
    }

    /// Full layout pass. A no-op until [`Self::activate`] has run.
    pub fn re_layout(&mut self, reason: ReLayoutReason) {
        layout::re_layout(&mut self.state, reason);
        self.flush();
    }

    /// Back to the inactive initial state; options, cells and container size
    /// are kept.
    pub fn reset(&mut self) {
        let was_animating = self.state.animation.is_animating;
        self.state.reset();
        if was_animating {
            self.scheduler.cancel_frame();
        }
        tracing::debug!("carousel reset");
    }

    // ----- Navigation -----

    pub fn select(&mut self, index: i64, instant: bool) {
        navigation::select(&mut self.state, index, instant);
        self.flush();
    }

    pub fn previous(&mut self) {
        navigation::previous(&mut self.state);
        self.flush();
    }

    pub fn next(&mut self) {
        navigation::next(&mut self.state);
        self.flush();
    }

    // ----- Pointer -----

    pub fn pointer_down(&mut self) {
        drag::pointer_down(&mut self.state);
        self.flush();
    }

    pub fn drag_start(&mut self, now: Instant) {
        drag::drag_start(&mut self.state, now);
        self.flush();
    }

    /// `delta` is the pointer displacement since [`Self::pointer_down`].
    pub fn drag_move(&mut self, delta: Point) {
        drag::drag_move(&mut self.state, delta);
    }

    pub fn drag_end(&mut self, now: Instant) {
        drag::drag_end(&mut self.state, now);
        self.flush();
    }

    pub fn pointer_up(&mut self) {
        drag::pointer_up(&mut self.state);
    }

    pub fn pointer_cancel(&mut self) {
        drag::pointer_cancel(&mut self.state);
    }

    /// Raw pointer motion; starts the drag past the threshold. Returns
    /// whether the motion is part of a drag.
    pub fn pointer_move(&mut self, delta: Point, now: Instant) -> bool {
        let dragging = drag::pointer_move(&mut self.state, delta, now);
        self.flush();
        dragging
    }

    // ----- Frames -----

    /// Deliver one frame. Frames arriving after the animation stopped do
    /// nothing.
    pub fn tick(&mut self) -> StepOutcome {
        let outcome = animation::step(&mut self.state);
        self.flush();
        outcome
    }

    fn flush(&mut self) {
        if self.state.animation.take_frame_request() {
            self.scheduler.request_frame();
        }
    }

    // ----- Derived views -----

    /// Slider translation to render, alignment anchor included.
    #[must_use]
    pub fn slider_position(&self) -> Point {
        selectors::slider_position(&self.state)
    }

    /// Render position of a cell, wrap shift included.
    #[must_use]
    pub fn cell_position(&self, id: CellId) -> Point {
        selectors::cell_position(&self.state, id)
    }

    /// Presence of slide `index` in `[0, 1]`.
    #[must_use]
    pub fn slide_progress(&self, index: usize) -> f64 {
        selectors::slide_progress(&self.state, index)
    }

    #[must_use]
    pub fn slide_for_cell(&self, id: CellId) -> Option<(usize, &Slide)> {
        selectors::slide_for_cell(&self.state, id)
    }

    #[must_use]
    pub fn viewport_cross_size(&self) -> Option<f64> {
        selectors::viewport_cross_size(&self.state)
    }

    #[must_use]
    pub fn front_slide_index(&self) -> Option<usize> {
        selectors::front_slide_index(&self.state)
    }
}
