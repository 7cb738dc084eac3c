#![forbid(unsafe_code)]

//! Pointer gestures: press, drag, release, and the landing search that picks
//! the slide a release settles on.
//!
//! # State machine
//!
//! ```text
//!            pointer_down            drag_start
//!   Idle ────────────────▶ Pressed ─────────────▶ Dragging
//!     ▲                       │                       │
//!     │   pointer_up/cancel   │          drag_end     │
//!     └───────────────────────┴───────────────────────┘
//! ```
//!
//! While the pointer is down the animation tracks `start + delta` directly.
//! Every entry point is ignored when `options.draggable` is false.
//!
//! # Landing search
//!
//! On release the resting point is projected from the current velocity,
//! `end = x + v / friction` (the sum of the geometric series the integrator
//! would produce). The search walks from the selected slide outward in both
//! directions, stopping each walk as soon as the distance to `end` stops
//! shrinking; slide targets are non-decreasing so the first local minimum is
//! the answer. In loop mode indices past either end wrap and their targets
//! are shifted by whole track lengths.

use web_time::Instant;

use crate::animation;
use crate::geometry::Point;
use crate::navigation;
use crate::state::CarouselState;
use crate::util::modulo_index;

/// Pointer pressed: remember the offset the drag is relative to.
pub fn pointer_down(state: &mut CarouselState) {
    if !state.options.draggable {
        return;
    }
    let start = state.slider.position();
    let drag = &mut state.drag;
    drag.start_x = start.x;
    drag.start_y = start.y;
    drag.dx = 0.0;
    drag.dy = 0.0;
    drag.is_pointer_down = true;
    animation::start(state);
}

/// The press became a drag.
pub fn drag_start(state: &mut CarouselState, now: Instant) {
    if !state.options.draggable {
        return;
    }
    state.drag.is_dragging = true;
    state.drag.start_time = Some(now);
    tracing::debug!("drag start");
    animation::start(state);
}

/// Pointer displacement since the press.
///
/// In loop mode the main-axis delta is reduced modulo the track length. Past
/// either end of a non-loop track the overshoot is halved.
pub fn drag_move(state: &mut CarouselState, delta: Point) {
    if !state.options.draggable {
        return;
    }
    let direction = state.options.direction;
    let main = delta.main(direction);

    let damped = if state.options.looping {
        let slidable = state.slidable_main();
        if slidable > 0.0 { main % slidable } else { main }
    } else if let (Some(first), Some(last)) = (state.slides.first(), state.slides.last()) {
        let start = state.drag.start().main(direction);
        let candidate = start + main;
        let lead = -first.target;
        let tail = -last.target;
        if candidate > lead {
            lead + (candidate - lead) / 2.0 - start
        } else if candidate < tail {
            tail + (candidate - tail) / 2.0 - start
        } else {
            main
        }
    } else {
        main
    };

    let delta = delta.with_main(direction, damped);
    state.drag.dx = delta.x;
    state.drag.dy = delta.y;
}

/// Release after a drag: pick the landing slide and animate to it.
pub fn drag_end(state: &mut CarouselState, now: Instant) {
    if !state.options.draggable {
        return;
    }
    let delta = state.drag.delta();
    let started = state.drag.start_time;
    state.drag.is_dragging = false;
    state.drag.dx = 0.0;
    state.drag.dy = 0.0;

    if state.slides.is_empty() {
        return;
    }

    let direction = state.options.direction;
    let free_scroll = state.options.free_scroll;
    let friction = state.options.friction_for(free_scroll);
    let offset = state.slider_main();
    let velocity = state.animation.velocity().main(direction);
    let end = offset + velocity / friction;

    let selected = state.slider.selected_slide_index;
    let mut target = landing_index(state, end);

    let flick = state.options.tuning.flick_threshold();
    let quick = started.is_some_and(|t| now.saturating_duration_since(t) < flick);
    if !free_scroll && target == selected as i64 && quick {
        target += if delta.main(direction) > 0.0 { -1 } else { 1 };
    }

    if free_scroll {
        animation::enable_free_scrolling(state);
        if !state.options.looping {
            let lead = state.slides.first().map_or(0.0, |s| -s.target);
            let tail = state.slides.last().map_or(0.0, |s| -s.target);
            if end > lead || end < tail {
                animation::disable_free_scrolling(state);
            }
        }
    }

    tracing::debug!(end, target, selected, quick, "drag end");
    navigation::select(state, target, false);
}

/// Nearest slide to the projected resting offset `end`, as an unwrapped
/// index (loop mode may return indices outside `0..len`).
#[must_use]
pub fn landing_index(state: &CarouselState, end: f64) -> i64 {
    let len = state.slides.len();
    if len == 0 {
        return 0;
    }
    let selected = state.slider.selected_slide_index as i64;
    let (left, left_distance) = walk(state, end, selected, -1);
    let (right, right_distance) = walk(state, end, selected, 1);
    if left_distance < right_distance { left } else { right }
}

/// Walk from `from` in steps of `step` until the distance to `end` stops
/// decreasing. Returns the best index and its distance.
fn walk(state: &CarouselState, end: f64, from: i64, step: i64) -> (i64, f64) {
    let len = state.slides.len() as i64;
    let looping = state.options.looping;
    let slidable = state.slidable_main();

    let mut best = from;
    let mut best_distance = f64::INFINITY;
    let mut i = from;
    loop {
        if !looping && (i < 0 || i >= len) {
            break;
        }
        let (index, adjustment) = if looping {
            (modulo_index(i, len as usize), i.div_euclid(len) as f64 * slidable)
        } else {
            (i as usize, 0.0)
        };
        let distance = (-state.slides.target(index) - adjustment - end).abs();
        // A NaN distance never compares, so it must end the walk too.
        if !distance.is_finite() || distance >= best_distance {
            break;
        }
        best_distance = distance;
        best = i;
        i += step;
    }
    (best, best_distance)
}

/// Pointer released (with or without a drag).
pub fn pointer_up(state: &mut CarouselState) {
    state.drag.is_pointer_down = false;
}

/// Pointer interaction aborted by the platform.
pub fn pointer_cancel(state: &mut CarouselState) {
    state.drag.is_pointer_down = false;
}

/// Raw pointer motion while pressed. Starts the drag once either axis
/// exceeds `tuning.drag_threshold`, then forwards to [`drag_move`].
///
/// Returns whether the motion is part of a drag.
pub fn pointer_move(state: &mut CarouselState, delta: Point, now: Instant) -> bool {
    if !state.options.draggable || !state.drag.is_pointer_down {
        return false;
    }
    if !state.drag.is_dragging {
        let threshold = state.options.tuning.drag_threshold;
        if delta.x.abs() <= threshold && delta.y.abs() <= threshold {
            return false;
        }
        drag_start(state, now);
    }
    drag_move(state, delta);
    true
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::geometry::{BoxSize, Size};
    use crate::layout;
    use crate::options::{CellAlign, Options};

    /// Five 1-wide slides, left aligned: targets 0..=4, track length 5.
    fn five(options: Options) -> CarouselState {
        let mut state = CarouselState::new(options.with_cell_align(CellAlign::Left));
        state.viewport.size = Size::new(1.0, 1.0);
        for i in 0..5 {
            state.cells.add_with(i, BoxSize::fixed(1.0, 1.0)).expect("finite box");
        }
        layout::activate(&mut state);
        state
    }

    /// Eight 100-wide cells in a 300 viewport.
    fn eight(options: Options) -> CarouselState {
        let mut state = CarouselState::new(options);
        state.viewport.size = Size::new(300.0, 200.0);
        for i in 0..8 {
            state.cells.add_with(i, BoxSize::fixed(100.0, 100.0)).expect("finite box");
        }
        layout::activate(&mut state);
        state
    }

    #[test]
    fn loop_landing_wraps_to_the_last_slide() {
        let state = five(Options::default().with_loop(true));
        // Dragged right from slide 0: projected end 0.8 is nearest to slide 4
        // one track length back (target -4 + 5 = 1).
        assert_eq!(landing_index(&state, 0.8), -1);
    }

    #[test]
    fn landing_without_loop_stays_in_range() {
        let state = five(Options::default());
        assert_eq!(landing_index(&state, 0.8), 0);
        assert_eq!(landing_index(&state, -2.4), 2);
        assert_eq!(landing_index(&state, -99.0), 4);
    }

    #[test]
    fn landing_search_stops_on_non_finite_distances() {
        let mut state = five(Options::default().with_loop(true));
        state.slider.slidable_width = f64::NAN;
        assert_eq!(landing_index(&state, 0.8), 0);
        assert_eq!(landing_index(&state, f64::NAN), 0);
    }

    #[test]
    fn landing_search_starts_from_the_selection() {
        let mut state = five(Options::default().with_loop(true));
        state.slider.selected_slide_index = 3;
        // Slide 0 one track length ahead (target -5) beats slide 4.
        assert_eq!(landing_index(&state, -4.9), 5);
    }

    #[test]
    fn pointer_down_records_start_and_resets_delta() {
        let mut state = eight(Options::default());
        state.slider.x = -120.0;
        state.drag.dx = 7.0;
        pointer_down(&mut state);
        assert!(state.drag.is_pointer_down);
        assert_eq!(state.drag.start(), Point::new(-120.0, 0.0));
        assert_eq!(state.drag.delta(), Point::ZERO);
        assert!(state.animation.is_animating);
    }

    #[test]
    fn not_draggable_ignores_pointer_input() {
        let mut state = eight(Options::default().with_draggable(false));
        let now = Instant::now();
        pointer_down(&mut state);
        drag_start(&mut state, now);
        drag_move(&mut state, Point::new(-50.0, 0.0));
        assert!(!state.drag.is_pointer_down);
        assert!(!state.drag.is_dragging);
        assert_eq!(state.drag.dx, 0.0);
        assert!(!pointer_move(&mut state, Point::new(-50.0, 0.0), now));
    }

    #[test]
    fn rubber_band_halves_overshoot_past_the_first_slide() {
        let mut state = eight(Options::default());
        pointer_down(&mut state);
        // Rest offset of slide 0 is -50; start is -50.
        drag_move(&mut state, Point::new(40.0, 5.0));
        assert_eq!(state.drag.dx, 20.0);
        assert_eq!(state.drag.dy, 5.0);
    }

    #[test]
    fn rubber_band_halves_overshoot_past_the_last_slide() {
        let mut state = eight(Options::default().with_initial_index(7));
        pointer_down(&mut state);
        // Start -750 equals the last rest offset.
        drag_move(&mut state, Point::new(-60.0, 0.0));
        assert_eq!(state.drag.dx, -30.0);
    }

    #[test]
    fn moves_inside_the_track_are_one_to_one() {
        let mut state = eight(Options::default().with_initial_index(3));
        pointer_down(&mut state);
        drag_move(&mut state, Point::new(-120.0, 0.0));
        assert_eq!(state.drag.dx, -120.0);
    }

    #[test]
    fn loop_moves_reduce_modulo_the_track() {
        let mut state = eight(Options::default().with_loop(true));
        pointer_down(&mut state);
        drag_move(&mut state, Point::new(-1750.0, 0.0));
        assert_eq!(state.drag.dx, -150.0);
    }

    #[test]
    fn quick_flick_advances_one_slide() {
        let mut state = eight(Options::default());
        let t0 = Instant::now();
        pointer_down(&mut state);
        drag_start(&mut state, t0);
        drag_move(&mut state, Point::new(-10.0, 0.0));
        pointer_up(&mut state);
        drag_end(&mut state, t0 + Duration::from_millis(40));
        assert_eq!(state.slider.selected_slide_index, 1);
        assert!(!state.drag.is_dragging);
        assert_eq!(state.drag.delta(), Point::ZERO);
    }

    #[test]
    fn flick_toward_previous_uses_drag_sign() {
        let mut state = eight(Options::default().with_initial_index(4));
        let t0 = Instant::now();
        pointer_down(&mut state);
        drag_start(&mut state, t0);
        drag_move(&mut state, Point::new(10.0, 0.0));
        drag_end(&mut state, t0 + Duration::from_millis(40));
        assert_eq!(state.slider.selected_slide_index, 3);
    }

    #[test]
    fn slow_small_drag_stays_put() {
        let mut state = eight(Options::default().with_initial_index(4));
        let t0 = Instant::now();
        pointer_down(&mut state);
        drag_start(&mut state, t0);
        drag_move(&mut state, Point::new(-10.0, 0.0));
        drag_end(&mut state, t0 + Duration::from_millis(400));
        assert_eq!(state.slider.selected_slide_index, 4);
    }

    #[test]
    fn free_scroll_overshoot_falls_back_to_snapping() {
        let mut state = eight(Options::default().with_free_scroll(true));
        let t0 = Instant::now();
        pointer_down(&mut state);
        drag_start(&mut state, t0);
        // Flung hard to the right, past slide 0.
        state.animation.vx = 30.0;
        drag_end(&mut state, t0 + Duration::from_millis(400));
        assert!(!state.animation.is_free_scrolling);
        assert_eq!(state.slider.selected_slide_index, 0);
    }

    #[test]
    fn free_scroll_inside_the_track_keeps_coasting() {
        let options = Options::default()
            .with_free_scroll(true)
            .with_initial_index(2);
        let mut state = eight(options);
        let t0 = Instant::now();
        pointer_down(&mut state);
        drag_start(&mut state, t0);
        state.animation.vx = -15.0;
        drag_end(&mut state, t0 + Duration::from_millis(400));
        assert!(state.animation.is_free_scrolling);
        // end = -250 - 15 / 0.075 = -450 -> slide 4.
        assert_eq!(state.slider.selected_slide_index, 4);
    }

    #[test]
    fn pointer_move_starts_the_drag_past_the_threshold() {
        let mut state = eight(Options::default());
        let now = Instant::now();
        pointer_down(&mut state);
        assert!(!pointer_move(&mut state, Point::new(-2.0, 1.0), now));
        assert!(!state.drag.is_dragging);
        assert!(pointer_move(&mut state, Point::new(-4.0, 1.0), now));
        assert!(state.drag.is_dragging);
        assert_eq!(state.drag.start_time, Some(now));
        assert_eq!(state.drag.dx, -4.0);
    }

    #[test]
    fn pointer_up_and_cancel_release_the_press() {
        let mut state = eight(Options::default());
        pointer_down(&mut state);
        pointer_up(&mut state);
        assert!(!state.drag.is_pointer_down);
        pointer_down(&mut state);
        pointer_cancel(&mut state);
        assert!(!state.drag.is_pointer_down);
    }
}
