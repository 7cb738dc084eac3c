#![forbid(unsafe_code)]

//! Core: carousel layout, selection, drag physics and slide animation.
//!
//! # Role in fcarousel
//! `fcarousel-core` is a headless engine. Hosts feed it measured cell boxes,
//! a container size and pointer events; it answers with slider and cell
//! positions plus per-slide progress for rendering. It never touches a
//! display, a clock or a thread: time arrives as `now` arguments and frames
//! arrive as [`Carousel::tick`] calls requested through a
//! [`FrameScheduler`].
//!
//! # Primary responsibilities
//! - **Layout**: lay cells out along one axis and group them into slides
//!   with an alignment target each ([`layout`], [`slides`]).
//! - **Navigation**: select, previous and next, with infinite looping
//!   ([`navigation`], [`wrap`]).
//! - **Drag**: pointer tracking, rubber banding and landing prediction
//!   ([`drag`]).
//! - **Animation**: a damped attraction integrator with free-scroll coasting
//!   ([`animation`]).
//! - **Derived views**: render positions and slide progress
//!   ([`selectors`]).
//!
//! # How it fits in the system
//! `fcarousel-harness` drives the engine from scripted scenarios and records
//! deterministic frame traces; UI bindings wrap [`Carousel`] the same way.

pub mod animation;
pub mod cells;
pub mod drag;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod navigation;
pub mod options;
pub mod scheduler;
pub mod selectors;
pub mod slides;
pub mod state;
pub mod util;
pub mod wrap;

#[cfg(feature = "tracing-json")]
pub mod logging;

pub use animation::StepOutcome;
pub use cells::{Cell, CellId, CellStore};
pub use engine::Carousel;
pub use error::{CarouselError, Result};
pub use geometry::{BoxSize, Direction, Margin, Point, Size};
pub use layout::ReLayoutReason;
pub use options::{CellAlign, Effect, Options, OptionsPatch, Tuning};
pub use scheduler::{FrameScheduler, ManualScheduler, NoopScheduler};
pub use slides::{Slide, SlideSet};
pub use state::CarouselState;

/// Re-exported so hosts pass the same clock type the engine expects.
pub use web_time::Instant;
