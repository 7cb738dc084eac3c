#![forbid(unsafe_code)]

//! Slide builder: partition ordered cells into slides and compute each
//! slide's resting `target`.
//!
//! # Invariants
//!
//! 1. Every cell belongs to exactly one slide, and slide order matches cell
//!    order.
//! 2. Cell `n` (0-based, in order) opens a new slide iff
//!    `n % group_cells == 0`; a trailing partial group is its own slide.
//! 3. `targets` are non-decreasing in slide order, which lets the landing
//!    search in [`crate::drag`] stop at the first local minimum.
//! 4. A [`SlideSet`] is a value: it is rebuilt wholesale on every layout pass,
//!    together with its cell → slide index map.

use rustc_hash::FxHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cells::{Cell, CellId};
use crate::geometry::{Direction, Margin, Point};
use crate::options::CellAlign;

/// One navigable page of cells.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slide {
    /// Member cells in order.
    pub cells: Vec<CellId>,
    /// Track position of the first cell.
    pub x: f64,
    pub y: f64,
    /// Sum of member outer sizes on the main axis, max on the cross axis.
    pub outer_width: f64,
    pub outer_height: f64,
    /// Leading margin of the first member, trailing margin of the last.
    pub margin: Margin,
    /// Slider displacement (negated) at which this slide is aligned.
    pub target: f64,
}

impl Slide {
    /// Track position of the slide start.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Outer size on the cross axis.
    #[inline]
    #[must_use]
    pub fn outer_cross(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.outer_height,
            Direction::Vertical => self.outer_width,
        }
    }

    fn push(&mut self, cell: &Cell, direction: Direction) {
        let size = &cell.size;
        if self.cells.is_empty() {
            match direction {
                Direction::Horizontal => {
                    self.x = cell.x;
                    self.margin.left = size.margin.left;
                }
                Direction::Vertical => {
                    self.y = cell.y;
                    self.margin.top = size.margin.top;
                }
            }
        }
        self.cells.push(cell.id);
        match direction {
            Direction::Horizontal => {
                self.margin.right = size.margin.right;
                self.outer_width += size.outer_width;
                self.outer_height = self.outer_height.max(size.outer_height);
            }
            Direction::Vertical => {
                self.margin.bottom = size.margin.bottom;
                self.outer_height += size.outer_height;
                self.outer_width = self.outer_width.max(size.outer_width);
            }
        }
    }

    fn seal(&mut self, factor: f64, direction: Direction) {
        let start = self.position().main(direction);
        let leading = self.margin.leading(direction);
        let trailing = self.margin.trailing(direction);
        let outer = match direction {
            Direction::Horizontal => self.outer_width,
            Direction::Vertical => self.outer_height,
        };
        self.target = start + leading + (outer - leading - trailing) * factor;
    }
}

/// The slide list plus its cell → slide lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideSet {
    slides: Vec<Slide>,
    by_cell: FxHashMap<CellId, usize>,
}

impl SlideSet {
    /// Partition `cells` (already in order) into slides.
    #[must_use]
    pub fn build(
        cells: &[&Cell],
        group_cells: usize,
        align: CellAlign,
        direction: Direction,
    ) -> Self {
        let group_cells = group_cells.max(1);
        let factor = align.factor();
        let mut slides: Vec<Slide> = Vec::with_capacity(cells.len().div_ceil(group_cells));
        let mut by_cell = FxHashMap::default();

        for (n, cell) in cells.iter().enumerate() {
            if n % group_cells == 0 {
                if let Some(last) = slides.last_mut() {
                    last.seal(factor, direction);
                }
                slides.push(Slide::default());
            }
            let slide_index = slides.len() - 1;
            slides[slide_index].push(cell, direction);
            by_cell.insert(cell.id, slide_index);
        }
        if let Some(last) = slides.last_mut() {
            last.seal(factor, direction);
        }

        Self { slides, by_cell }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&Slide> {
        self.slides.first()
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Slide> {
        self.slides.last()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Slide] {
        &self.slides
    }

    /// Target of slide `index`. Panics on out-of-range indices, so callers
    /// only use it with indices they resolved against `len()`.
    #[inline]
    #[must_use]
    pub(crate) fn target(&self, index: usize) -> f64 {
        self.slides[index].target
    }

    /// The slide containing `id`, with its index.
    #[must_use]
    pub fn find_by_cell(&self, id: CellId) -> Option<(usize, &Slide)> {
        let index = *self.by_cell.get(&id)?;
        self.slides.get(index).map(|slide| (index, slide))
    }
}

impl<'a> IntoIterator for &'a SlideSet {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}
