#![forbid(unsafe_code)]

//! Slide selection.
//!
//! In loop mode an out-of-range index is resolved by shifting the raw offset
//! one track length in the same direction before folding the index, so the
//! slider keeps travelling the short way (from the last slide, `next` moves
//! forward onto slide 0 instead of rewinding across the whole track).

use crate::animation;
use crate::state::CarouselState;
use crate::util::modulo_index;
use crate::wrap;

/// Select slide `index`.
///
/// Ignored while inactive, and when the index does not resolve to a slide
/// (non-loop out of range, or no slides at all). `instant` snaps the slider
/// onto the target; otherwise the animation carries it there.
pub fn select(state: &mut CarouselState, index: i64, instant: bool) {
    if !state.is_active() {
        return;
    }

    let len = state.slides.len();
    let direction = state.options.direction;
    let resolved = if state.options.looping {
        if len == 0 {
            return;
        }
        let slidable = state.slidable_main();
        let position = state.slider.position();
        let main = position.main(direction);
        if index < 0 {
            state
                .slider
                .set_position(position.with_main(direction, main - slidable));
        } else if index >= len as i64 {
            state
                .slider
                .set_position(position.with_main(direction, main + slidable));
        }
        modulo_index(index, len)
    } else {
        match usize::try_from(index) {
            Ok(i) if i < len => i,
            _ => return,
        }
    };

    tracing::debug!(index, resolved, instant, "select");
    state.slider.selected_slide_index = resolved;

    if instant {
        let target = state.slides.target(resolved);
        state.slider.set_position(direction.point(-target, 0.0));
        if state.options.looping {
            wrap::update_should_wrap(state);
        }
    } else {
        animation::start(state);
    }
}

/// Select the previous slide, leaving free scroll.
pub fn previous(state: &mut CarouselState) {
    animation::disable_free_scrolling(state);
    let index = state.slider.selected_slide_index as i64 - 1;
    select(state, index, false);
}

/// Select the next slide, leaving free scroll.
pub fn next(state: &mut CarouselState) {
    animation::disable_free_scrolling(state);
    let index = state.slider.selected_slide_index as i64 + 1;
    select(state, index, false);
}
