#![forbid(unsafe_code)]

//! The carousel snapshot: every piece of state the engine reads or writes.
//!
//! Transitions take `&mut CarouselState`; the exclusive borrow is what keeps a
//! half-applied update from ever being observed by a selector.

use web_time::Instant;

use crate::cells::{CellId, CellStore};
use crate::geometry::{Point, Size};
use crate::options::Options;
use crate::slides::SlideSet;

/// Slider offset, selection, track extent and loop wrap sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliderState {
    /// Raw offset; unbounded in loop mode.
    pub x: f64,
    pub y: f64,
    pub selected_slide_index: usize,
    /// Total outer extent of all cells (the loop modulus).
    pub slidable_width: f64,
    pub slidable_height: f64,
    /// Trailing cells that may be drawn before the first one.
    pub cells_may_wrap_forward: Vec<CellId>,
    /// Leading cells that may be drawn after the last one.
    pub cells_may_wrap_backward: Vec<CellId>,
    /// Subset of `cells_may_wrap_forward` visible at the current offset.
    pub cells_should_wrap_forward: Vec<CellId>,
    /// Subset of `cells_may_wrap_backward` visible at the current offset.
    pub cells_should_wrap_backward: Vec<CellId>,
}

impl SliderState {
    /// Raw offset as a point.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub(crate) fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Track extent as a size.
    #[inline]
    #[must_use]
    pub fn slidable(&self) -> Size {
        Size::new(self.slidable_width, self.slidable_height)
    }
}

/// Transient pointer tracking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    /// Slider offset when the pointer went down.
    pub start_x: f64,
    pub start_y: f64,
    /// Current (possibly damped) pointer displacement.
    pub dx: f64,
    pub dy: f64,
    pub is_pointer_down: bool,
    pub is_dragging: bool,
    pub start_time: Option<Instant>,
}

impl DragState {
    #[inline]
    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    #[inline]
    #[must_use]
    pub fn delta(&self) -> Point {
        Point::new(self.dx, self.dy)
    }
}

/// Running transition or free-scroll decay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationState {
    pub is_animating: bool,
    pub is_free_scrolling: bool,
    pub vx: f64,
    pub vy: f64,
    /// Consecutive frames whose rounded offset did not change.
    pub settle_count: u32,
    /// Set by transitions that need another frame; drained by the engine.
    pub(crate) frame_requested: bool,
}

impl AnimationState {
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Point {
        Point::new(self.vx, self.vy)
    }

    #[inline]
    pub(crate) fn set_velocity(&mut self, velocity: Point) {
        self.vx = velocity.x;
        self.vy = velocity.y;
    }

    /// Whether a frame has been requested and not yet handed to a scheduler.
    #[inline]
    #[must_use]
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    #[inline]
    pub(crate) fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

/// Container facts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportState {
    pub size: Size,
    /// Largest cross-axis outer size seen so far; never decreases.
    pub max_cell_width: f64,
    pub max_cell_height: f64,
    /// Set by the first successful layout.
    pub active: bool,
}

/// The full snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarouselState {
    pub options: Options,
    pub cells: CellStore,
    pub slides: SlideSet,
    pub slider: SliderState,
    pub drag: DragState,
    pub animation: AnimationState,
    pub viewport: ViewportState,
}

impl CarouselState {
    /// Fresh, inactive state. `options` are assumed validated.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Whether the carousel has completed its first layout.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.viewport.active
    }

    /// Loop-mode track length along the main axis.
    #[inline]
    #[must_use]
    pub fn slidable_main(&self) -> f64 {
        self.slider.slidable().main(self.options.direction)
    }

    /// Raw slider offset along the main axis.
    #[inline]
    #[must_use]
    pub fn slider_main(&self) -> f64 {
        self.slider.position().main(self.options.direction)
    }

    /// Back to the inactive initial state, keeping options, cells and the
    /// container size.
    pub fn reset(&mut self) {
        self.slides = SlideSet::default();
        self.slider = SliderState::default();
        self.drag = DragState::default();
        self.animation = AnimationState::default();
        self.viewport = ViewportState {
            size: self.viewport.size,
            ..ViewportState::default()
        };
    }
}
