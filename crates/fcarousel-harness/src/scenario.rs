#![forbid(unsafe_code)]

//! Scripted carousel scenarios.
//!
//! A scenario is a container size, a list of cells, a set of options and an
//! ordered list of steps. Steps mirror the engine's public operations; time
//! only moves through `wait` and through delivered frames, so a scenario
//! replays identically on every machine.
//!
//! Cells are referenced by *slot*: the position in the order the scenario
//! created them (initial cells first, then `addCell` steps). Removing a cell
//! leaves its slot empty rather than renumbering the rest.
//!
//! ```toml
//! name = "centered next"
//! container = { width = 300.0, height = 200.0 }
//! cells = [{ width = 100.0, height = 100.0 }, { width = 100.0, height = 100.0 }]
//!
//! [options]
//! loop = true
//!
//! [[steps]]
//! op = "next"
//!
//! [[steps]]
//! op = "settle"
//! ```

use std::path::Path;

use fcarousel_core::{BoxSize, Margin, Options, OptionsPatch, ReLayoutReason, Size};
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// Frame interval used when a scenario does not set one (60 Hz).
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Upper bound on frames delivered by a `settle` step without `maxFrames`.
pub const DEFAULT_SETTLE_FRAMES: u32 = 20_000;

/// A measured cell as written in a scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSpec {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margin: Margin,
}

impl CellSpec {
    #[must_use]
    pub fn box_size(&self) -> BoxSize {
        BoxSize::with_margin(self.width, self.height, self.margin)
    }
}

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    Activate,
    Select {
        index: i64,
        #[serde(default)]
        instant: bool,
    },
    Next,
    Previous,
    Resize {
        width: f64,
        height: f64,
    },
    AddCell {
        cell: CellSpec,
        /// Track index; defaults to the end of the track.
        #[serde(default)]
        index: Option<i64>,
    },
    RemoveCell {
        slot: usize,
    },
    ResizeCell {
        slot: usize,
        cell: CellSpec,
    },
    MoveCell {
        slot: usize,
        index: i64,
    },
    PointerDown,
    DragStart,
    DragMove {
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    DragEnd,
    PointerUp,
    PointerCancel,
    PointerMove {
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    Wait {
        ms: u64,
    },
    Frames {
        count: u32,
    },
    Settle {
        #[serde(default)]
        max_frames: Option<u32>,
    },
    UpdateOptions {
        patch: OptionsPatch,
    },
    ReLayout {
        #[serde(default)]
        reason: ReLayoutReason,
    },
    Reset,
}

impl Step {
    /// Short operation name used in trace records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Select { .. } => "select",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Resize { .. } => "resize",
            Self::AddCell { .. } => "addCell",
            Self::RemoveCell { .. } => "removeCell",
            Self::ResizeCell { .. } => "resizeCell",
            Self::MoveCell { .. } => "moveCell",
            Self::PointerDown => "pointerDown",
            Self::DragStart => "dragStart",
            Self::DragMove { .. } => "dragMove",
            Self::DragEnd => "dragEnd",
            Self::PointerUp => "pointerUp",
            Self::PointerCancel => "pointerCancel",
            Self::PointerMove { .. } => "pointerMove",
            Self::Wait { .. } => "wait",
            Self::Frames { .. } => "frames",
            Self::Settle { .. } => "settle",
            Self::UpdateOptions { .. } => "updateOptions",
            Self::ReLayout { .. } => "reLayout",
            Self::Reset => "reset",
        }
    }
}

fn default_frame_ms() -> u64 {
    DEFAULT_FRAME_MS
}

fn default_true() -> bool {
    true
}

/// A complete scripted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Options,
    pub container: Size,
    #[serde(default)]
    pub cells: Vec<CellSpec>,
    /// Activate the carousel before the first step.
    #[serde(default = "default_true")]
    pub activate: bool,
    /// Virtual time between delivered frames.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a scenario, picking the format from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(HarnessError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
