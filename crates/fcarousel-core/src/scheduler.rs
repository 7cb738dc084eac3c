#![forbid(unsafe_code)]

//! Frame scheduling seam between the engine and the host's render loop.
//!
//! The engine never sleeps or spawns. When the animation needs another frame
//! it calls [`FrameScheduler::request_frame`] once; the host answers by
//! calling [`crate::Carousel::tick`] on its next frame (for example from
//! `requestAnimationFrame`, a vsync callback, or a fixed-rate timer).
//!
//! The engine guarantees at most one outstanding request, so implementations
//! do not need to deduplicate.

/// Host hook for "call `tick` on the next frame".
pub trait FrameScheduler {
    /// Schedule one call to [`crate::Carousel::tick`].
    fn request_frame(&mut self);

    /// The engine stopped animating; a pending frame, if any, will be a
    /// no-op and may be dropped.
    fn cancel_frame(&mut self) {}

    /// Human-readable scheduler name for logs/debugging.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Records requests for the host (or a test) to drain explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    pending: bool,
    requested: u64,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame is waiting to be delivered.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending frame, if any.
    #[inline]
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Total requests received over the scheduler's lifetime.
    #[inline]
    #[must_use]
    pub fn requested(&self) -> u64 {
        self.requested
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requested += 1;
    }

    fn cancel_frame(&mut self) {
        self.pending = false;
    }

    fn name(&self) -> &str {
        "manual"
    }
}

/// Ignores every request. For hosts that tick unconditionally each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopScheduler;

impl FrameScheduler for NoopScheduler {
    fn request_frame(&mut self) {}

    fn name(&self) -> &str {
        "noop"
    }
}

impl<F: FnMut()> FrameScheduler for F {
    fn request_frame(&mut self) {
        self();
    }

    fn name(&self) -> &str {
        "closure"
    }
}
