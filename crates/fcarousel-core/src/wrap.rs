#![forbid(unsafe_code)]

//! Loop-mode wrapping: which cells are drawn one track length away so the
//! track looks continuous.
//!
//! Two passes:
//!
//! - *may wrap* is geometric and only changes with layout: walk inward from
//!   each edge until the accumulated outer size covers the gap the viewport
//!   can show beyond that edge (the alignment anchor on the leading side, the
//!   rest of the viewport on the trailing side).
//! - *should wrap* depends on the current offset and is recomputed every
//!   animation frame: of the may-wrap candidates, take as many as needed to
//!   cover the gap actually visible right now.

use crate::cells::{CellId, CellStore};
use crate::geometry::Direction;
use crate::selectors::{align_position, slider_position};
use crate::state::CarouselState;

/// Recompute `cells_may_wrap_forward` / `cells_may_wrap_backward`.
pub fn update_may_wrap(state: &mut CarouselState) {
    let direction = state.options.direction;
    let align = align_position(state);
    let span = state.viewport.size.main(direction);
    let ordered = state.cells.ordered();

    let mut forward = Vec::new();
    let mut gap = align;
    for cell in ordered.iter().rev() {
        if gap <= 0.0 {
            break;
        }
        forward.push(cell.id);
        gap -= cell.size.outer_main(direction);
    }

    let mut backward = Vec::new();
    let mut gap = span - align;
    for cell in &ordered {
        if gap <= 0.0 {
            break;
        }
        backward.push(cell.id);
        gap -= cell.size.outer_main(direction);
    }

    state.slider.cells_may_wrap_forward = forward;
    state.slider.cells_may_wrap_backward = backward;
}

/// Recompute `cells_should_wrap_forward` / `cells_should_wrap_backward` for
/// the current offset.
pub fn update_should_wrap(state: &mut CarouselState) {
    let direction = state.options.direction;
    let translate = slider_position(state).main(direction);
    let span = state.viewport.size.main(direction);
    let slidable = state.slidable_main();

    let forward = collect(
        &state.cells,
        direction,
        translate,
        &state.slider.cells_may_wrap_forward,
    );
    let backward = collect(
        &state.cells,
        direction,
        span - (translate + slidable),
        &state.slider.cells_may_wrap_backward,
    );

    state.slider.cells_should_wrap_forward = forward;
    state.slider.cells_should_wrap_backward = backward;
}

/// Drop all wrap sets (loop mode switched off).
pub fn clear(state: &mut CarouselState) {
    let slider = &mut state.slider;
    slider.cells_may_wrap_forward.clear();
    slider.cells_may_wrap_backward.clear();
    slider.cells_should_wrap_forward.clear();
    slider.cells_should_wrap_backward.clear();
}

fn collect(cells: &CellStore, direction: Direction, mut gap: f64, ids: &[CellId]) -> Vec<CellId> {
    let mut out = Vec::new();
    for &id in ids {
        if gap <= 0.0 {
            break;
        }
        out.push(id);
        gap -= cells.outer_main(id, direction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoxSize, Point, Size};
    use crate::options::{CellAlign, Options};

    /// Eight 100-wide cells in a 300-wide viewport, positioned back to back.
    fn eight_cells(align: CellAlign) -> (CarouselState, Vec<CellId>) {
        let options = Options::default().with_loop(true).with_cell_align(align);
        let mut state = CarouselState::new(options);
        state.viewport.size = Size::new(300.0, 200.0);
        for i in 0..8 {
            let id = state.cells.add_with(i, BoxSize::fixed(100.0, 100.0)).expect("finite box");
            state.cells.set_position(id, Point::new(i as f64 * 100.0, 0.0));
        }
        state.slider.slidable_width = 800.0;
        let ids = state.cells.ordered_ids();
        (state, ids)
    }

    #[test]
    fn may_wrap_covers_both_viewport_gaps() {
        let (mut state, ids) = eight_cells(CellAlign::Center);
        update_may_wrap(&mut state);
        // 150 before the anchor: two trailing cells, walked from the end.
        assert_eq!(state.slider.cells_may_wrap_forward, vec![ids[7], ids[6]]);
        // 150 after the anchor: two leading cells.
        assert_eq!(state.slider.cells_may_wrap_backward, vec![ids[0], ids[1]]);
    }

    #[test]
    fn left_alignment_needs_no_forward_candidates() {
        let (mut state, ids) = eight_cells(CellAlign::Left);
        update_may_wrap(&mut state);
        assert!(state.slider.cells_may_wrap_forward.is_empty());
        assert_eq!(
            state.slider.cells_may_wrap_backward,
            vec![ids[0], ids[1], ids[2]]
        );
    }

    #[test]
    fn should_wrap_at_first_slide_pulls_trailing_cells_forward() {
        let (mut state, ids) = eight_cells(CellAlign::Center);
        update_may_wrap(&mut state);
        // Slide 0 centered: raw offset -50.
        state.slider.x = -50.0;
        update_should_wrap(&mut state);
        // Folded translate = 750 - 800 + 150 = 100 > 0: the gap left of the
        // track needs the last cell.
        assert_eq!(state.slider.cells_should_wrap_forward, vec![ids[7]]);
        assert!(state.slider.cells_should_wrap_backward.is_empty());
    }

    #[test]
    fn should_wrap_at_last_slide_pushes_leading_cells_backward() {
        let (mut state, ids) = eight_cells(CellAlign::Center);
        update_may_wrap(&mut state);
        // Slide 7 centered: raw offset -750, translate -600.
        state.slider.x = -750.0;
        update_should_wrap(&mut state);
        assert!(state.slider.cells_should_wrap_forward.is_empty());
        // 300 - (-600 + 800) = 100 uncovered after the track end.
        assert_eq!(state.slider.cells_should_wrap_backward, vec![ids[0]]);
    }
}
