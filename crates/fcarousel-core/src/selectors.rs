#![forbid(unsafe_code)]

//! Read-only projections of [`CarouselState`] for the render consumer.
//!
//! None of these mutate state; they are recomputed on demand after every
//! update.

use crate::cells::CellId;
use crate::geometry::{Direction, Point};
use crate::slides::Slide;
use crate::state::CarouselState;
use crate::util::{modulo, round_to};

/// Viewport offset of the alignment anchor (0, half or full viewport).
#[must_use]
pub fn align_position(state: &CarouselState) -> f64 {
    let direction = state.options.direction;
    state.viewport.size.main(direction) * state.options.cell_align.factor()
}

/// Slider translation to draw, including the alignment anchor.
///
/// In loop mode the raw offset is folded into `[-slidable, 0)` so the drawn
/// track never drifts; wrapped cells cover the gap this leaves.
///
/// With 5 slides of width 1 (`slidable = 5`):
///
/// ```text
/// raw:    -6 -5 -4 -3 -2 -1  0  1  2  3  4  5  6
/// folded: -1 -5 -4 -3 -2 -1 -5 -4 -3 -2 -1 -5 -4
/// ```
#[must_use]
pub fn slider_position(state: &CarouselState) -> Point {
    let direction = state.options.direction;
    let mut main = state.slider_main();
    if state.options.looping {
        let slidable = state.slidable_main();
        main = modulo(main, slidable) - slidable;
    }
    direction.point(main + align_position(state), 0.0)
}

/// Where a cell is drawn on the track, shifted by one track length if it is
/// currently wrapped. Unknown ids draw at the origin.
#[must_use]
pub fn cell_position(state: &CarouselState, id: CellId) -> Point {
    let Some(cell) = state.cells.get(id) else {
        return Point::ZERO;
    };
    let direction = state.options.direction;
    let position = cell.position();
    if !state.options.looping {
        return position;
    }

    let slider = &state.slider;
    let slidable = state.slidable_main();
    let main = position.main(direction);
    if slider.cells_should_wrap_forward.contains(&id) {
        position.with_main(direction, main - slidable)
    } else if slider.cells_should_wrap_backward.contains(&id) {
        position.with_main(direction, main + slidable)
    } else {
        position
    }
}

/// The slide containing `id`, with its index.
#[must_use]
pub fn slide_for_cell(state: &CarouselState, id: CellId) -> Option<(usize, &Slide)> {
    state.slides.find_by_cell(id)
}

/// How "present" slide `index` is, from 0 (away) to 1 (aligned).
///
/// Only the two slides bracketing the current offset have non-zero progress,
/// and their values sum to 1. In loop mode the bracket wraps between the last
/// and first slide. Rounded to four decimals.
#[must_use]
pub fn slide_progress(state: &CarouselState, index: usize) -> f64 {
    let slides = &state.slides;
    let len = slides.len();
    if len == 0 {
        return 0.0;
    }

    let looping = state.options.looping;
    let slidable = state.slidable_main();
    let first = slides.target(0);
    let last = slides.target(len - 1);

    let mut sx = state.slider_main();
    if looping {
        let revised = modulo(sx, slidable) - slidable;
        // A positive raw offset only folds if the folded value still lies on
        // the track; otherwise it is past the first slide going backward.
        if sx <= 0.0 || -revised < last {
            sx = revised;
        }
    }

    let i = slides
        .iter()
        .position(|slide| -sx < slide.target)
        .unwrap_or(len);

    let mut progress = 0.0;
    if i == 0 {
        if looping {
            let p = ratio(-sx + slidable - last, first + slidable - last);
            if index == 0 {
                progress = p;
            }
            if index == len - 1 {
                progress = 1.0 - p;
            }
        } else if index == 0 {
            progress = 1.0;
        }
    } else if i < len {
        let prev = slides.target(i - 1);
        let p = ratio(-sx - prev, slides.target(i) - prev);
        if index == i {
            progress = p;
        } else if index == i - 1 {
            progress = 1.0 - p;
        }
    } else if looping {
        let p = ratio(-sx - last, first + slidable - last);
        if index == len - 1 {
            progress = 1.0 - p;
        }
        if index == 0 {
            progress = p;
        }
    } else if index == len - 1 {
        progress = 1.0;
    }

    round_to(progress.clamp(0.0, 1.0), 4)
}

/// Slide drawn at the front of a stack: the last slide whose target the
/// slider has passed (within one unit). Before the first slide this is slide
/// 0, or the last slide in loop mode.
#[must_use]
pub fn front_slide_index(state: &CarouselState) -> Option<usize> {
    let slides = &state.slides;
    if slides.is_empty() {
        return None;
    }
    let sx = state.slider_main();
    let passed = slides
        .iter()
        .position(|slide| -sx < slide.target - 1.0)
        .unwrap_or(slides.len());
    Some(match passed {
        0 if state.options.looping => slides.len() - 1,
        0 => 0,
        n => n - 1,
    })
}

/// Cross-axis extent the viewport should take: the selected slide's outer
/// cross size when `set_carousel_size` is on.
#[must_use]
pub fn viewport_cross_size(state: &CarouselState) -> Option<f64> {
    if !state.options.set_carousel_size {
        return None;
    }
    let direction: Direction = state.options.direction;
    state
        .slides
        .get(state.slider.selected_slide_index)
        .map(|slide| slide.outer_cross(direction))
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}
