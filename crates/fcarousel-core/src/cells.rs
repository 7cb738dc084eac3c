#![forbid(unsafe_code)]

//! Cell store: every live content item with its order, measured box and raw
//! track position.
//!
//! # Invariants
//!
//! 1. Exactly one [`Cell`] per live [`CellId`].
//! 2. Ids come from a per-store monotonic counter and are never reused.
//! 3. `index` only needs to be relatively ordered; gaps left by removals are
//!    fine. Equal indices fall back to id order so iteration is deterministic.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, Result};
use crate::geometry::{BoxSize, Direction, Point};

/// Opaque cell identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CellId(u64);

impl CellId {
    /// Wrap a raw id. Hosts normally get ids from [`CellStore::add`].
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell {}", self.0)
    }
}

/// A single content item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub id: CellId,
    /// Position among siblings.
    pub index: i64,
    pub size: BoxSize,
    /// Track position along x (0 for vertical carousels).
    pub x: f64,
    /// Track position along y (0 for horizontal carousels).
    pub y: f64,
}

impl Cell {
    fn new(id: CellId, index: i64, size: BoxSize) -> Self {
        Self {
            id,
            index,
            size,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Raw track position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Track position on the main axis.
    #[inline]
    #[must_use]
    pub fn main(&self, direction: Direction) -> f64 {
        self.position().main(direction)
    }
}

/// All live cells, keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellStore {
    cells: BTreeMap<CellId, Cell>,
    next_id: u64,
}

impl CellStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new cell at index 0 with an empty box.
    pub fn add(&mut self) -> CellId {
        self.insert(0, BoxSize::default())
    }

    /// Register a new cell with a known index and size. Non-finite boxes are
    /// rejected and consume no id.
    pub fn add_with(&mut self, index: i64, size: BoxSize) -> Result<CellId> {
        if let Some((field, value)) = size.first_non_finite() {
            return Err(CarouselError::InvalidMeasurement { field, value });
        }
        Ok(self.insert(index, size))
    }

    fn insert(&mut self, index: i64, size: BoxSize) -> CellId {
        let id = CellId(self.next_id);
        self.next_id += 1;
        self.cells.insert(id, Cell::new(id, index, size));
        id
    }

    /// Drop a cell. Returns the removed cell, `None` if it was unknown.
    pub fn remove(&mut self, id: CellId) -> Option<Cell> {
        self.cells.remove(&id)
    }

    /// Replace a cell's measured box.
    pub fn update_size(&mut self, id: CellId, size: BoxSize) -> Result<()> {
        if let Some((field, value)) = size.first_non_finite() {
            return Err(CarouselError::InvalidMeasurement { field, value });
        }
        self.get_mut(id)?.size = size;
        Ok(())
    }

    /// Replace a cell's sibling index.
    pub fn update_index(&mut self, id: CellId, index: i64) -> Result<()> {
        self.get_mut(id)?.index = index;
        Ok(())
    }

    /// Set a cell's raw track position.
    pub(crate) fn set_position(&mut self, id: CellId, position: Point) {
        if let Some(cell) = self.cells.get_mut(&id) {
            cell.x = position.x;
            cell.y = position.y;
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(&id)
    }

    fn get_mut(&mut self, id: CellId) -> Result<&mut Cell> {
        self.cells
            .get_mut(&id)
            .ok_or(CarouselError::UnknownCell { id })
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains_key(&id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Outer main-axis size of a cell, 0 for unknown ids.
    #[must_use]
    pub fn outer_main(&self, id: CellId, direction: Direction) -> f64 {
        self.get(id)
            .map_or(0.0, |cell| cell.size.outer_main(direction))
    }

    /// Cells sorted by `(index, id)`.
    #[must_use]
    pub fn ordered(&self) -> Vec<&Cell> {
        let mut cells: Vec<&Cell> = self.cells.values().collect();
        // BTreeMap iteration is already id-ordered and the sort is stable.
        cells.sort_by_key(|cell| cell.index);
        cells
    }

    /// Ids sorted by `(index, id)`.
    #[must_use]
    pub fn ordered_ids(&self) -> Vec<CellId> {
        self.ordered().into_iter().map(|cell| cell.id).collect()
    }
}
