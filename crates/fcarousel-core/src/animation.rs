#![forbid(unsafe_code)]

//! Per-frame integrator that pulls the slider toward its target.
//!
//! Each [`step`] advances the main-axis offset by one frame of a damped
//! attraction model:
//!
//! ```text
//! pointer down:    v' = (start + delta) - x        (track the pointer)
//! free scrolling:  v' = v                          (coast)
//! otherwise:       v' = (-target - x) * attraction + v
//!
//! x  <- x + v'
//! v  <- v' * (1 - friction)
//! ```
//!
//! `friction` is `free_scroll_friction` while free scrolling.
//!
//! # Invariants
//!
//! 1. At most one frame is outstanding: [`start`] only raises the frame
//!    request when the animation was idle, and [`step`] raises it again only
//!    while the animation keeps running.
//! 2. A step while idle changes nothing (stale frames are dropped).
//! 3. With the pointer up and friction, attraction in (0, 1) the offset
//!    converges; the animation stops after `tuning.settle_ticks` consecutive
//!    frames whose offset is unchanged at `tuning.settle_precision`.
//!
//! # Failure Modes
//!
//! - No slides and no pointer: the animation stops, there is nothing to pull
//!   toward.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::CarouselState;
use crate::util::quantize;
use crate::wrap;

/// What a frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StepOutcome {
    /// The animation was not running; nothing changed.
    Idle,
    /// The offset moved and another frame is requested.
    Running,
    /// The offset settled (or there was nothing to animate) and the animation
    /// stopped.
    Settled,
}

/// Begin animating. A no-op when already running.
///
/// The first integration step happens on the next frame, not here.
pub fn start(state: &mut CarouselState) {
    if state.animation.is_animating {
        return;
    }
    tracing::trace!("animation start");
    state.animation.is_animating = true;
    state.animation.settle_count = 0;
    state.animation.frame_requested = true;
}

/// Let the slider coast without attraction.
#[inline]
pub fn enable_free_scrolling(state: &mut CarouselState) {
    state.animation.is_free_scrolling = true;
}

/// Return to attraction toward the selected slide.
#[inline]
pub fn disable_free_scrolling(state: &mut CarouselState) {
    state.animation.is_free_scrolling = false;
}

/// Advance one frame.
pub fn step(state: &mut CarouselState) -> StepOutcome {
    if !state.animation.is_animating {
        return StepOutcome::Idle;
    }

    let pointer_down = state.drag.is_pointer_down;
    if state.slides.is_empty() && !pointer_down {
        stop(state);
        return StepOutcome::Settled;
    }

    let direction = state.options.direction;
    let free_scrolling = state.animation.is_free_scrolling;
    let position = state.slider.position();
    let previous = position.main(direction);
    let velocity = state.animation.velocity().main(direction);

    let next_velocity = if pointer_down {
        let start = state.drag.start().main(direction);
        let delta = state.drag.delta().main(direction);
        start + delta - previous
    } else if free_scrolling {
        velocity
    } else {
        let target = state.slides.target(state.slider.selected_slide_index);
        (-target - previous) * state.options.attraction + velocity
    };

    let next = previous + next_velocity;
    let friction = state.options.friction_for(free_scrolling);
    state
        .slider
        .set_position(position.with_main(direction, next));
    let stored = state.animation.velocity().with_main(
        direction,
        next_velocity * (1.0 - friction),
    );
    state.animation.set_velocity(stored);

    if state.options.looping {
        wrap::update_should_wrap(state);
    }

    tracing::trace!(offset = next, velocity = next_velocity, "animation step");

    let precision = state.options.tuning.settle_precision;
    if !pointer_down && quantize(next, precision) == quantize(previous, precision) {
        state.animation.settle_count += 1;
    } else {
        state.animation.settle_count = 0;
    }

    if state.animation.settle_count >= state.options.tuning.settle_ticks {
        tracing::debug!(offset = next, "animation settled");
        stop(state);
        return StepOutcome::Settled;
    }

    state.animation.frame_requested = true;
    StepOutcome::Running
}

fn stop(state: &mut CarouselState) {
    state.animation.is_animating = false;
    state.animation.settle_count = 0;
    state.animation.frame_requested = false;
    disable_free_scrolling(state);
}
