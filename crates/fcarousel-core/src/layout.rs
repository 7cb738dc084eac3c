#![forbid(unsafe_code)]

//! Layout pass: position cells, find wrap candidates, rebuild slides, then
//! re-select.
//!
//! # Invariants
//!
//! 1. Cells are laid back to back along the main axis in `(index, id)` order;
//!    the cross-axis coordinate is always 0.
//! 2. `slidable_width` / `slidable_height` equal the summed outer size of all
//!    cells on that axis when it is the main axis.
//! 3. `max_cell_width` / `max_cell_height` only grow.
//! 4. After a pass the selected index lies inside the new slide list (when
//!    there is one).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Direction;
use crate::navigation;
use crate::slides::SlideSet;
use crate::state::CarouselState;
use crate::util::clamp_index;
use crate::wrap;

/// Why a re-layout was requested. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ReLayoutReason {
    /// The host window or container was resized.
    Resize,
    /// Cells were added, removed, re-ordered or re-measured.
    CellsChanged,
    /// The container size was set directly.
    CarouselSizeChanged,
    OptionsChanged,
    /// Explicit host request.
    User,
    #[default]
    Unknown,
}

impl fmt::Display for ReLayoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Resize => "resize",
            Self::CellsChanged => "cells changed",
            Self::CarouselSizeChanged => "carousel size changed",
            Self::OptionsChanged => "options changed",
            Self::User => "user",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Lay cells out back to back and record the track extent.
pub fn position_cells(state: &mut CarouselState) {
    let direction = state.options.direction;
    let placements: Vec<_> = state
        .cells
        .ordered()
        .into_iter()
        .map(|cell| (cell.id, cell.size))
        .collect();

    let mut distance = 0.0;
    let mut max_cross: f64 = 0.0;
    for (id, size) in placements {
        state.cells.set_position(id, direction.point(distance, 0.0));
        distance += size.outer_main(direction);
        max_cross = max_cross.max(size.outer_cross(direction));
    }

    let viewport = &mut state.viewport;
    match direction {
        Direction::Horizontal => {
            state.slider.slidable_width = distance;
            viewport.max_cell_height = viewport.max_cell_height.max(max_cross);
        }
        Direction::Vertical => {
            state.slider.slidable_height = distance;
            viewport.max_cell_width = viewport.max_cell_width.max(max_cross);
        }
    }
}

/// Rebuild the slide list from the current cell positions.
pub fn build_slides(state: &mut CarouselState) {
    let options = &state.options;
    state.slides = SlideSet::build(
        &state.cells.ordered(),
        options.group_cells,
        options.cell_align,
        options.direction,
    );
}

fn rebuild(state: &mut CarouselState) {
    position_cells(state);
    if state.options.looping {
        wrap::update_may_wrap(state);
    } else {
        wrap::clear(state);
    }
    build_slides(state);
}

/// Full layout pass followed by an animated re-select of the current index,
/// clamped into the new slide list. A no-op while inactive.
pub fn re_layout(state: &mut CarouselState, reason: ReLayoutReason) {
    if !state.is_active() {
        return;
    }
    if state.options.debug {
        tracing::info!(%reason, cells = state.cells.len(), "re-layout");
    }

    rebuild(state);

    let selected = state.slider.selected_slide_index as i64;
    match clamp_index(selected, state.slides.len()) {
        Some(index) => navigation::select(state, index as i64, false),
        None => state.slider.selected_slide_index = 0,
    }
    tracing::debug!(
        %reason,
        slides = state.slides.len(),
        selected = state.slider.selected_slide_index,
        "layout complete"
    );
}

/// First layout: build everything, mark the carousel active and snap to
/// `initial_index` (clamped).
pub fn activate(state: &mut CarouselState) {
    rebuild(state);
    state.viewport.active = true;

    if let Some(index) = clamp_index(state.options.initial_index, state.slides.len()) {
        navigation::select(state, index as i64, true);
    }
    tracing::debug!(
        slides = state.slides.len(),
        selected = state.slider.selected_slide_index,
        "carousel activated"
    );
}
