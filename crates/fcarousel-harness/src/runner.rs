#![forbid(unsafe_code)]

//! Deterministic scenario execution.
//!
//! The runner owns a [`Carousel`] with a
//! [`ManualScheduler`](fcarousel_core::ManualScheduler) and a virtual
//! clock. Frames are only delivered when a `frames` or `settle` step asks for
//! them, and only while the engine has one pending; each delivered frame
//! advances the clock by the scenario's `frameMs`.
//!
//! # Failure Modes
//!
//! - A step naming an empty or unknown slot fails with
//!   [`HarnessError::UnknownSlot`].
//! - A `settle` step that exhausts its frame budget fails with
//!   [`HarnessError::Unsettled`].

use std::time::Duration;

use fcarousel_core::{Carousel, CellId, Instant, Point, Size, StepOutcome};

use crate::error::{HarnessError, Result};
use crate::scenario::{DEFAULT_SETTLE_FRAMES, Scenario, Step};
use crate::trace::{FrameRecord, Trace};

/// Run `scenario` from a fresh engine and return its trace.
pub fn run_scenario(scenario: &Scenario) -> Result<Trace> {
    let mut runner = Runner::new(scenario)?;
    for (index, step) in scenario.steps.iter().enumerate() {
        runner.apply(index, step)?;
    }
    tracing::info!(
        scenario = %scenario.name,
        steps = scenario.steps.len(),
        records = runner.trace.len(),
        "scenario complete"
    );
    Ok(runner.trace)
}

/// Step-by-step driver. Exposed for tests that want to inspect the engine
/// between steps.
#[derive(Debug)]
pub struct Runner {
    carousel: Carousel,
    slots: Vec<Option<CellId>>,
    clock: Instant,
    frame: Duration,
    seq: u64,
    trace: Trace,
}

impl Runner {
    /// Build the engine, add the initial cells and activate it if asked.
    pub fn new(scenario: &Scenario) -> Result<Self> {
        let mut carousel = Carousel::new(scenario.options.clone())?;
        carousel.set_container_size(scenario.container)?;
        let slots = scenario
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| carousel.add_cell_with(i as i64, cell.box_size()).map(Some))
            .collect::<fcarousel_core::Result<Vec<_>>>()?;
        if scenario.activate {
            carousel.activate();
        }
        tracing::debug!(
            scenario = %scenario.name,
            cells = scenario.cells.len(),
            "runner ready"
        );
        Ok(Self {
            carousel,
            slots,
            clock: Instant::now(),
            frame: Duration::from_millis(scenario.frame_ms),
            seq: 0,
            trace: Trace::new(scenario.name.clone()),
        })
    }

    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    #[must_use]
    pub fn into_trace(self) -> Trace {
        self.trace
    }

    /// Cell id in `slot`, if it still exists.
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<CellId> {
        self.slots.get(slot).copied().flatten()
    }

    /// Execute one step and record the resulting state.
    pub fn apply(&mut self, index: usize, step: &Step) -> Result<()> {
        tracing::trace!(step = index, op = step.name(), "apply");
        match step {
            Step::Activate => self.carousel.activate(),
            Step::Select { index, instant } => self.carousel.select(*index, *instant),
            Step::Next => self.carousel.next(),
            Step::Previous => self.carousel.previous(),
            Step::Resize { width, height } => {
                self.carousel
                    .set_container_size(Size::new(*width, *height))?;
            }
            Step::AddCell { cell, index } => {
                let track_index = index.unwrap_or(self.slots.len() as i64);
                let id = self.carousel.add_cell_with(track_index, cell.box_size())?;
                self.slots.push(Some(id));
            }
            Step::RemoveCell { slot } => {
                let id = self.require(index, *slot)?;
                self.carousel.remove_cell(id)?;
                self.slots[*slot] = None;
            }
            Step::ResizeCell { slot, cell } => {
                let id = self.require(index, *slot)?;
                self.carousel.update_cell_size(id, cell.box_size())?;
            }
            Step::MoveCell { slot, index: to } => {
                let id = self.require(index, *slot)?;
                self.carousel.update_cell_index(id, *to)?;
            }
            Step::PointerDown => self.carousel.pointer_down(),
            Step::DragStart => self.carousel.drag_start(self.clock),
            Step::DragMove { dx, dy } => self.carousel.drag_move(Point::new(*dx, *dy)),
            Step::DragEnd => self.carousel.drag_end(self.clock),
            Step::PointerUp => self.carousel.pointer_up(),
            Step::PointerCancel => self.carousel.pointer_cancel(),
            Step::PointerMove { dx, dy } => {
                self.carousel.pointer_move(Point::new(*dx, *dy), self.clock);
            }
            Step::Wait { ms } => self.clock += Duration::from_millis(*ms),
            Step::Frames { count } => {
                self.record(index, step, 0, None);
                for frame in 1..=*count {
                    if !self.deliver(index, step, frame) {
                        break;
                    }
                }
                return Ok(());
            }
            Step::Settle { max_frames } => {
                let budget = max_frames.unwrap_or(DEFAULT_SETTLE_FRAMES);
                self.record(index, step, 0, None);
                let mut frame = 0;
                while self.carousel.scheduler().is_pending() {
                    if frame == budget {
                        return Err(HarnessError::Unsettled {
                            step: index,
                            frames: budget,
                        });
                    }
                    frame += 1;
                    self.deliver(index, step, frame);
                }
                return Ok(());
            }
            Step::UpdateOptions { patch } => {
                self.carousel.update_options(patch)?;
            }
            Step::ReLayout { reason } => self.carousel.re_layout(*reason),
            Step::Reset => self.carousel.reset(),
        }
        self.record(index, step, 0, None);
        Ok(())
    }

    fn require(&self, step: usize, slot: usize) -> Result<CellId> {
        self.slot(slot).ok_or(HarnessError::UnknownSlot { step, slot })
    }

    /// Deliver one pending frame. Returns false when none was pending.
    fn deliver(&mut self, index: usize, step: &Step, frame: u32) -> bool {
        if !self.carousel.scheduler_mut().take() {
            return false;
        }
        self.clock += self.frame;
        let outcome = self.carousel.tick();
        self.record(index, step, frame, Some(outcome));
        true
    }

    fn record(
        &mut self,
        index: usize,
        step: &Step,
        frame: u32,
        outcome: Option<StepOutcome>,
    ) {
        let record =
            FrameRecord::capture(&self.carousel, self.seq, index, step.name(), frame, outcome);
        self.seq += 1;
        self.trace.records.push(record);
    }
}
