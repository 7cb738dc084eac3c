#![forbid(unsafe_code)]

//! Carousel configuration.
//!
//! [`Options`] is immutable until replaced: any change to it forces a full
//! re-layout. Field names serialize in camelCase so option files use the same
//! keys hosts already pass around (`groupCells`, `freeScrollFriction`, ...).
//!
//! # Loading
//!
//! ```toml
//! # carousel.toml
//! loop = true
//! cellAlign = "left"
//! groupCells = 2
//!
//! [tuning]
//! flickThresholdMs = 80
//! ```
//!
//! ```rust,ignore
//! let options = Options::from_toml_file("carousel.toml")?;
//! ```
//!
//! # Validation
//!
//! `friction`, `attraction` and `freeScrollFriction` must lie strictly inside
//! (0, 1): a value of 0 never settles and a value of 1 stops dead or diverges.
//! `groupCells` must be at least 1.

use std::time::Duration;

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, Result};
pub use crate::geometry::Direction;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Where a slide rests relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl CellAlign {
    /// Fraction of the slide (and viewport) span used as the anchor.
    #[inline]
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// Named visual effect. The engine only stores it; style mapping is the
/// renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Effect {
    #[default]
    Default,
    Lift,
    Fade,
    Stack,
}

// ---------------------------------------------------------------------------
// Tuning
// ---------------------------------------------------------------------------

/// Heuristic thresholds that are not part of the visible configuration but
/// still need to be adjustable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Tuning {
    /// A release whose landing search stays on the current slide moves one
    /// slide anyway if the drag lasted less than this (default: 100ms).
    pub flick_threshold_ms: u64,
    /// Consecutive unchanged frames before the animation stops (default: 3).
    pub settle_ticks: u32,
    /// Pointer travel (per axis) before a press becomes a drag (default: 3.0).
    pub drag_threshold: f64,
    /// Steps per unit when comparing positions for settling (default: 100.0,
    /// i.e. two decimals).
    pub settle_precision: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            flick_threshold_ms: 100,
            settle_ticks: 3,
            drag_threshold: 3.0,
            settle_precision: 100.0,
        }
    }
}

impl Tuning {
    /// Flick threshold as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn flick_threshold(&self) -> Duration {
        Duration::from_millis(self.flick_threshold_ms)
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Full carousel configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Options {
    pub direction: Direction,
    /// Treat the track as cyclic.
    #[cfg_attr(feature = "serde", serde(rename = "loop"))]
    pub looping: bool,
    pub cell_align: CellAlign,
    /// Cells per slide, at least 1.
    pub group_cells: usize,
    /// Do not snap to a slide after release.
    pub free_scroll: bool,
    /// Accept pointer input.
    pub draggable: bool,
    /// Velocity decay per frame while snapping, in (0, 1).
    pub friction: f64,
    /// Pull toward the selected slide per frame, in (0, 1).
    pub attraction: f64,
    /// Velocity decay per frame while free scrolling, in (0, 1).
    pub free_scroll_friction: f64,
    /// Slide selected at activation (clamped into range).
    pub initial_index: i64,
    pub effect: Effect,
    /// Log re-layout reasons at info level.
    pub debug: bool,
    /// Size the viewport's cross axis to the selected slide.
    pub set_carousel_size: bool,
    pub tuning: Tuning,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            looping: false,
            cell_align: CellAlign::Center,
            group_cells: 1,
            free_scroll: false,
            draggable: true,
            friction: 0.28,
            attraction: 0.025,
            free_scroll_friction: 0.075,
            initial_index: 0,
            effect: Effect::Default,
            debug: false,
            set_carousel_size: true,
            tuning: Tuning::default(),
        }
    }
}

impl Options {
    /// Set direction (builder pattern).
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Enable or disable loop mode (builder pattern).
    #[must_use]
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set cell alignment (builder pattern).
    #[must_use]
    pub fn with_cell_align(mut self, align: CellAlign) -> Self {
        self.cell_align = align;
        self
    }

    /// Set cells per slide (builder pattern). Not validated until use.
    #[must_use]
    pub fn with_group_cells(mut self, group_cells: usize) -> Self {
        self.group_cells = group_cells;
        self
    }

    /// Enable or disable free scrolling (builder pattern).
    #[must_use]
    pub fn with_free_scroll(mut self, free_scroll: bool) -> Self {
        self.free_scroll = free_scroll;
        self
    }

    /// Enable or disable pointer input (builder pattern).
    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Set snapping friction (builder pattern).
    #[must_use]
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Set attraction (builder pattern).
    #[must_use]
    pub fn with_attraction(mut self, attraction: f64) -> Self {
        self.attraction = attraction;
        self
    }

    /// Set free-scroll friction (builder pattern).
    #[must_use]
    pub fn with_free_scroll_friction(mut self, friction: f64) -> Self {
        self.free_scroll_friction = friction;
        self
    }

    /// Set the slide selected at activation (builder pattern).
    #[must_use]
    pub fn with_initial_index(mut self, index: i64) -> Self {
        self.initial_index = index;
        self
    }

    /// Set the effect name (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Enable debug logging (builder pattern).
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replace tuning thresholds (builder pattern).
    #[must_use]
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Friction applied to velocity in the current scrolling mode.
    #[inline]
    #[must_use]
    pub fn friction_for(&self, free_scrolling: bool) -> f64 {
        if free_scrolling {
            self.free_scroll_friction
        } else {
            self.friction
        }
    }

    /// Every validation problem, in field order. Empty means valid.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.group_cells < 1 {
            errors.push("groupCells must be >= 1".to_string());
        }

        for (name, value) in [
            ("friction", self.friction),
            ("attraction", self.attraction),
            ("freeScrollFriction", self.free_scroll_friction),
        ] {
            if !(value > 0.0 && value < 1.0) {
                errors.push(format!("{name} must be in (0, 1), got {value}"));
            }
        }

        if self.tuning.settle_ticks == 0 {
            errors.push("tuning.settleTicks must be >= 1".to_string());
        }
        if !(self.tuning.settle_precision.is_finite() && self.tuning.settle_precision > 0.0) {
            errors.push(format!(
                "tuning.settlePrecision must be > 0, got {}",
                self.tuning.settle_precision
            ));
        }
        if !(self.tuning.drag_threshold.is_finite() && self.tuning.drag_threshold >= 0.0) {
            errors.push(format!(
                "tuning.dragThreshold must be >= 0, got {}",
                self.tuning.drag_threshold
            ));
        }

        errors
    }

    /// Reject the configuration if any field is out of range.
    pub fn validate(&self) -> Result<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CarouselError::invalid_options(errors))
        }
    }

    /// Load from a TOML string. The result is validated.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let options: Self = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string. The result is validated.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// A partial [`Options`] update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct OptionsPatch {
    pub direction: Option<Direction>,
    #[cfg_attr(feature = "serde", serde(rename = "loop"))]
    pub looping: Option<bool>,
    pub cell_align: Option<CellAlign>,
    pub group_cells: Option<usize>,
    pub free_scroll: Option<bool>,
    pub draggable: Option<bool>,
    pub friction: Option<f64>,
    pub attraction: Option<f64>,
    pub free_scroll_friction: Option<f64>,
    pub initial_index: Option<i64>,
    pub effect: Option<Effect>,
    pub debug: Option<bool>,
    pub set_carousel_size: Option<bool>,
    pub tuning: Option<Tuning>,
}

impl OptionsPatch {
    /// Overlay this patch on `base`.
    #[must_use]
    pub fn apply(&self, base: &Options) -> Options {
        Options {
            direction: self.direction.unwrap_or(base.direction),
            looping: self.looping.unwrap_or(base.looping),
            cell_align: self.cell_align.unwrap_or(base.cell_align),
            group_cells: self.group_cells.unwrap_or(base.group_cells),
            free_scroll: self.free_scroll.unwrap_or(base.free_scroll),
            draggable: self.draggable.unwrap_or(base.draggable),
            friction: self.friction.unwrap_or(base.friction),
            attraction: self.attraction.unwrap_or(base.attraction),
            free_scroll_friction: self
                .free_scroll_friction
                .unwrap_or(base.free_scroll_friction),
            initial_index: self.initial_index.unwrap_or(base.initial_index),
            effect: self.effect.unwrap_or(base.effect),
            debug: self.debug.unwrap_or(base.debug),
            set_carousel_size: self.set_carousel_size.unwrap_or(base.set_carousel_size),
            tuning: self.tuning.unwrap_or(base.tuning),
        }
    }
}

impl From<Options> for OptionsPatch {
    fn from(options: Options) -> Self {
        Self {
            direction: Some(options.direction),
            looping: Some(options.looping),
            cell_align: Some(options.cell_align),
            group_cells: Some(options.group_cells),
            free_scroll: Some(options.free_scroll),
            draggable: Some(options.draggable),
            friction: Some(options.friction),
            attraction: Some(options.attraction),
            free_scroll_friction: Some(options.free_scroll_friction),
            initial_index: Some(options.initial_index),
            effect: Some(options.effect),
            debug: Some(options.debug),
            set_carousel_size: Some(options.set_carousel_size),
            tuning: Some(options.tuning),
        }
    }
}
