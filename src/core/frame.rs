//=========================================================================
// Frame Loop
//=========================================================================
//
// Cooperative per-frame task scheduler driven by the host's redraw signal.
//
// Architecture:
// ```text
//   Component ──schedule(task)──► FrameLoop ──► FrameHandle (owned by component)
//                                    │
//   Host redraw ──tick(now)──────────┘
//        └─► task(FrameTime) → TickControl::{Continue, Exit}
// ```
//
// Each task runs once per tick until its handle is cancelled or dropped,
// or the task itself returns `TickControl::Exit`. Tasks must not block;
// the next tick is only issued after the current one returns.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::registry::{Registration, Registry};
use super::time::Timestamp;

//=== TickControl =========================================================

/// Signal returned by a frame task after each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== FrameTime ===========================================================

/// Timing information handed to each task on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Host time of this tick.
    pub now: Timestamp,

    /// Milliseconds since the previous tick (0 on the first tick).
    pub delta: f64,
}

//=== FrameHandle =========================================================

/// Owner handle for a scheduled task. Dropping it cancels the task.
#[derive(Debug)]
#[must_use = "dropping a FrameHandle cancels the scheduled task"]
pub struct FrameHandle {
    registration: Registration,
}

impl FrameHandle {
    /// Cancels the task. It will not run again, even later in the current tick.
    pub fn cancel(&self) {
        self.registration.cancel();
    }

    /// Returns `true` while the task is still scheduled.
    pub fn is_active(&self) -> bool {
        self.registration.is_active()
    }
}

//=== FrameLoop ===========================================================

type FrameTask = Box<dyn FnMut(FrameTime) -> TickControl>;

/// Runs scheduled tasks once per host frame.
pub struct FrameLoop {
    tasks: Registry<FrameTask>,
    last_tick: Option<Timestamp>,
    ticks: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            tasks: Registry::new(),
            last_tick: None,
            ticks: 0,
        }
    }

    /// Schedules a recurring task.
    ///
    /// # Examples
    ///
    /// ```
    /// use afterglow::core::frame::{FrameLoop, TickControl};
    /// use afterglow::core::time::Timestamp;
    ///
    /// let mut frames = FrameLoop::new();
    /// let handle = frames.schedule(|_frame| TickControl::Continue);
    ///
    /// frames.tick(Timestamp::from_millis(16.0));
    /// assert!(handle.is_active());
    ///
    /// drop(handle);
    /// frames.tick(Timestamp::from_millis(32.0));
    /// assert_eq!(frames.active_tasks(), 0);
    /// ```
    pub fn schedule<F>(&mut self, task: F) -> FrameHandle
    where
        F: FnMut(FrameTime) -> TickControl + 'static,
    {
        let registration = self.tasks.register(Box::new(task));
        trace!(target: "frame", "Task scheduled ({} active)", self.tasks.active_len());
        FrameHandle { registration }
    }

    /// Runs every live task once with the given host time.
    pub fn tick(&mut self, now: Timestamp) {
        let delta = match self.last_tick {
            Some(last) => now.elapsed_since(last).max(0.0),
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.ticks += 1;

        let frame = FrameTime { now, delta };
        self.tasks
            .run_active(|task| task(frame) == TickControl::Continue);
    }

    /// Number of tasks that will run on the next tick.
    pub fn active_tasks(&self) -> usize {
        self.tasks.active_len()
    }

    /// Number of ticks issued so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
