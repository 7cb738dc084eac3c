#![forbid(unsafe_code)]

//! Frame traces: one JSON object per recorded state, hashed for golden
//! comparison.
//!
//! # JSONL Schema
//!
//! ```json
//! {"seq":0,"step":0,"op":"next","frame":0,"outcome":null,"selected":1,
//!  "slider":[-50.0,0.0],"rendered":[100.0,0.0],"velocity":[0.0,0.0],
//!  "animating":true,"freeScrolling":false,"progress":[1.0,0.0],
//!  "wrapForward":[7],"wrapBackward":[]}
//! ```
//!
//! - `frame` is 0 for the record written right after a step and counts
//!   delivered frames inside `frames`/`settle` steps.
//! - Floats are rounded to [`TRACE_DECIMALS`] places and negative zero is
//!   written as `0.0`, so traces compare byte for byte across platforms.
//! - `wrapForward`/`wrapBackward` hold raw cell ids.
//!
//! # Invariants
//!
//! 1. The same scenario always produces the same JSONL bytes.
//! 2. [`Trace::hash`] covers exactly the bytes [`Trace::to_jsonl`] returns.

use std::io::Write;

use fcarousel_core::util::round_to;
use fcarousel_core::{Carousel, CellId, Point, StepOutcome};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Decimal places kept for every float in a record.
pub const TRACE_DECIMALS: i32 = 4;

/// Snapshot of the engine after a step or a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    pub seq: u64,
    pub step: usize,
    pub op: String,
    pub frame: u32,
    pub outcome: Option<StepOutcome>,
    pub selected: usize,
    pub slider: [f64; 2],
    pub rendered: [f64; 2],
    pub velocity: [f64; 2],
    pub animating: bool,
    pub free_scrolling: bool,
    pub progress: Vec<f64>,
    pub wrap_forward: Vec<u64>,
    pub wrap_backward: Vec<u64>,
}

impl FrameRecord {
    /// Capture the current state of `carousel`.
    #[must_use]
    pub fn capture(
        carousel: &Carousel,
        seq: u64,
        step: usize,
        op: &str,
        frame: u32,
        outcome: Option<StepOutcome>,
    ) -> Self {
        let state = carousel.state();
        let progress = (0..carousel.slides().len())
            .map(|i| stable(carousel.slide_progress(i)))
            .collect();
        Self {
            seq,
            step,
            op: op.to_string(),
            frame,
            outcome,
            selected: carousel.selected_index(),
            slider: pair(state.slider.position()),
            rendered: pair(carousel.slider_position()),
            velocity: pair(state.animation.velocity()),
            animating: state.animation.is_animating,
            free_scrolling: state.animation.is_free_scrolling,
            progress,
            wrap_forward: raw_ids(&state.slider.cells_should_wrap_forward),
            wrap_backward: raw_ids(&state.slider.cells_should_wrap_backward),
        }
    }
}

fn stable(value: f64) -> f64 {
    // Adding +0.0 turns -0.0 into 0.0.
    round_to(value, TRACE_DECIMALS) + 0.0
}

fn pair(point: Point) -> [f64; 2] {
    [stable(point.x), stable(point.y)]
}

fn raw_ids(ids: &[CellId]) -> Vec<u64> {
    ids.iter().map(|id| id.raw()).collect()
}

/// All records of one scenario run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub scenario: String,
    pub records: Vec<FrameRecord>,
}

impl Trace {
    #[must_use]
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&FrameRecord> {
        self.records.last()
    }

    /// Serialize as JSON lines, one record per line.
    pub fn to_jsonl(&self) -> Result<String> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }

    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.to_jsonl()?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Parse JSON lines back into a trace. Blank lines are skipped.
    pub fn from_jsonl(scenario: impl Into<String>, text: &str) -> Result<Self> {
        let records = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<std::result::Result<Vec<FrameRecord>, _>>()?;
        Ok(Self {
            scenario: scenario.into(),
            records,
        })
    }

    /// `blake3:<hex>` over the JSONL bytes.
    pub fn hash(&self) -> Result<String> {
        Ok(hash_jsonl(&self.to_jsonl()?))
    }
}

/// `blake3:<hex>` of already rendered JSONL text.
#[must_use]
pub fn hash_jsonl(jsonl: &str) -> String {
    format!("blake3:{}", blake3::hash(jsonl.as_bytes()).to_hex())
}
